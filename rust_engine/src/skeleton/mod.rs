//! 规范骨骼模型
//!
//! 捕捉骨骼和目标骨骼共用同一套数据结构，只描述结构，不含行为。

mod bone;
mod humanoid;
mod tree;

pub use bone::{Bone, JointLimits};
pub use humanoid::{build_default_humanoid, CANONICAL_JOINT_NAMES};
pub use tree::Skeleton;

use glam::{Mat4, Quat, Vec3};

/// 根姿态（世界空间位置 + 朝向）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootPose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for RootPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl RootPose {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self { position, orientation }
    }

    /// 平移后的姿态，朝向不变
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            position: self.position + offset,
            orientation: self.orientation,
        }
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }
}
