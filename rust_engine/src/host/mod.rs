//! 宿主控制接口
//!
//! 播放驱动不直接修改宿主骨骼，而是把根姿态和关节目标推给实现了
//! [`HostControlAdapter`] 的宿主（物理仿真、动画系统等）。

mod recording;
mod root_only;

pub use recording::RecordingHost;
pub use root_only::RootMotionOnly;

use crate::skeleton::RootPose;

/// 宿主支持的关节控制方式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostCapabilities {
    /// 支持按名称设置关节目标
    pub joints_by_name: bool,
    /// 支持按索引设置关节目标（需要 `joint_names` 提供索引表）
    pub joints_by_index: bool,
}

impl HostCapabilities {
    pub const ROOT_ONLY: Self = Self { joints_by_name: false, joints_by_index: false };
    pub const BY_NAME: Self = Self { joints_by_name: true, joints_by_index: false };
    pub const BY_INDEX: Self = Self { joints_by_name: false, joints_by_index: true };

    /// 实际采用的控制方式，两者都支持时优先按名称
    pub fn joint_control(&self) -> JointControl {
        if self.joints_by_name {
            JointControl::ByName
        } else if self.joints_by_index {
            JointControl::ByIndex
        } else {
            JointControl::RootOnly
        }
    }
}

/// 关节控制方式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JointControl {
    ByName,
    ByIndex,
    /// 宿主不支持关节控制，只播放根运动
    RootOnly,
}

/// 宿主控制接口
///
/// 至少要能设置根姿态；关节目标的两个方法默认什么都不做，
/// 宿主按 [`capabilities`](Self::capabilities) 声明的方式实现其中之一。
pub trait HostControlAdapter {
    fn capabilities(&self) -> HostCapabilities;

    /// 宿主关节名称，位置即索引。只在绑定时调用一次。
    fn joint_names(&self) -> Vec<String> {
        Vec::new()
    }

    fn set_root_pose(&mut self, pose: &RootPose);

    /// 按规范关节名称设置目标角度（弧度）
    fn set_joint_targets(&mut self, _targets: &[(&str, f32)]) {}

    /// 按宿主关节索引设置目标角度（弧度）
    fn set_joint_targets_by_index(&mut self, _targets: &[(usize, f32)]) {}
}
