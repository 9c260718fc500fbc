//! 只接收根运动的宿主包装
//!
//! 宿主没有关节控制能力时，用闭包接收根姿态即可接入播放驱动。

use crate::skeleton::RootPose;

use super::{HostCapabilities, HostControlAdapter};

pub struct RootMotionOnly<F>
where
    F: FnMut(&RootPose),
{
    set_root_pose: F,
}

impl<F> RootMotionOnly<F>
where
    F: FnMut(&RootPose),
{
    pub fn new(set_root_pose: F) -> Self {
        Self { set_root_pose }
    }
}

impl<F> HostControlAdapter for RootMotionOnly<F>
where
    F: FnMut(&RootPose),
{
    fn capabilities(&self) -> HostCapabilities {
        HostCapabilities::ROOT_ONLY
    }

    fn set_root_pose(&mut self, pose: &RootPose) {
        (self.set_root_pose)(pose);
    }
}
