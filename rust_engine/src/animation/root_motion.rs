//! 程序化根运动路径
//!
//! 路径只给出根姿态的基准位置和朝向，捕捉文件自身的根位移由播放驱动叠加。

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};

use crate::config::PlaybackConfig;
use crate::skeleton::RootPose;

/// 根运动路径
pub trait RootPath {
    /// 采样 `t` 秒时的根姿态
    fn sample(&self, t: f64) -> RootPose;
}

/// 绕原点匀速行走的圆形路径（Z 轴向上）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CirclePath {
    pub radius: f32,
    /// 线速度 (m/s)
    pub speed: f32,
    pub height: f32,
}

impl CirclePath {
    pub fn new(radius: f32, speed: f32, height: f32) -> Self {
        Self { radius, speed, height }
    }

    pub fn from_config(config: &PlaybackConfig) -> Self {
        Self::new(config.walking_radius, config.walking_speed, config.base_height)
    }

    /// `t` 秒时转过的角度（弧度）
    pub fn angle_at(&self, t: f64) -> f32 {
        if self.radius.abs() <= f32::EPSILON || !t.is_finite() {
            return 0.0;
        }
        (t as f32) * self.speed / self.radius
    }
}

impl RootPath for CirclePath {
    fn sample(&self, t: f64) -> RootPose {
        let angle = self.angle_at(t);
        let position = Vec3::new(self.radius * angle.cos(), self.radius * angle.sin(), self.height);
        // 朝向沿切线（逆时针前进方向）
        let orientation = Quat::from_rotation_z(angle + FRAC_PI_2);
        RootPose::new(position, orientation)
    }
}

/// 原地不动
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StationaryPath {
    pub pose: RootPose,
}

impl StationaryPath {
    pub fn at_height(height: f32) -> Self {
        Self {
            pose: RootPose::new(Vec3::new(0.0, 0.0, height), Quat::IDENTITY),
        }
    }
}

impl RootPath for StationaryPath {
    fn sample(&self, _t: f64) -> RootPose {
        self.pose
    }
}
