//! 关节类别与轴/缩放策略
//!
//! 捕捉骨骼和目标骨骼的关节轴约定通常不同，这里只按关节类别取一个主轴，
//! 乘以固定缩放，避免目标关节顶到物理极限。不做完整的三轴传递。
//! 修改下表会改变所有已有动作的播放结果。

use glam::Vec3;

/// 关节类别
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JointClass {
    Shoulder,
    Elbow,
    Hip,
    Knee,
    Ankle,
    Other,
}

impl JointClass {
    /// 按规范关节名分类
    pub fn of(canonical: &str) -> Self {
        match canonical {
            "leftShoulder" | "rightShoulder" | "leftUpperArm" | "rightUpperArm" => Self::Shoulder,
            "leftLowerArm" | "rightLowerArm" => Self::Elbow,
            "leftUpperLeg" | "rightUpperLeg" => Self::Hip,
            "leftLowerLeg" | "rightLowerLeg" => Self::Knee,
            "leftFoot" | "rightFoot" => Self::Ankle,
            _ => Self::Other,
        }
    }

    /// 主轴（0 = X, 1 = Y, 2 = Z）
    pub fn axis(self) -> usize {
        match self {
            Self::Shoulder => 1,
            Self::Elbow | Self::Hip | Self::Knee | Self::Ankle => 0,
            Self::Other => 2,
        }
    }

    pub fn scale(self) -> f32 {
        match self {
            Self::Shoulder => 0.3,
            Self::Elbow => 0.5,
            Self::Hip => 0.4,
            Self::Knee => 0.6,
            Self::Ankle => 0.2,
            Self::Other => 0.5,
        }
    }

    /// 欧拉角（度）→ 目标关节角度（弧度）
    pub fn retarget_angle(self, euler_degrees: Vec3) -> f32 {
        euler_degrees[self.axis()].to_radians() * self.scale()
    }
}
