//! 内置人形骨骼
//!
//! 没有可用的捕捉文件、或文件解析失败时使用的固定骨骼。

use glam::Vec3;

use super::{Bone, JointLimits, Skeleton};

/// 规范关节名称
pub const CANONICAL_JOINT_NAMES: [&str; 19] = [
    "hips",
    "spine",
    "chest",
    "neck",
    "head",
    "leftShoulder",
    "leftUpperArm",
    "leftLowerArm",
    "leftHand",
    "rightShoulder",
    "rightUpperArm",
    "rightLowerArm",
    "rightHand",
    "leftUpperLeg",
    "leftLowerLeg",
    "leftFoot",
    "rightUpperLeg",
    "rightLowerLeg",
    "rightFoot",
];

struct HumanoidBone {
    name: &'static str,
    parent: Option<&'static str>,
    /// 相对父骨骼的偏移（米，Z 轴向上）
    offset: [f32; 3],
    /// 角度限制（度），None 表示不限制
    limits: Option<([f32; 3], [f32; 3])>,
}

const fn bone(
    name: &'static str,
    parent: &'static str,
    offset: [f32; 3],
    lower: [f32; 3],
    upper: [f32; 3],
) -> HumanoidBone {
    HumanoidBone {
        name,
        parent: Some(parent),
        offset,
        limits: Some((lower, upper)),
    }
}

// 声明顺序：脊柱链、左臂、右臂、左腿、右腿
const HUMANOID: [HumanoidBone; 19] = [
    HumanoidBone { name: "hips", parent: None, offset: [0.0, 0.0, 0.9], limits: None },
    bone("spine", "hips", [0.0, 0.0, 0.15], [-30.0, -45.0, -30.0], [30.0, 45.0, 30.0]),
    bone("chest", "spine", [0.0, 0.0, 0.2], [-20.0, -30.0, -20.0], [20.0, 30.0, 20.0]),
    bone("neck", "chest", [0.0, 0.0, 0.2], [-45.0, -60.0, -45.0], [45.0, 60.0, 45.0]),
    bone("head", "neck", [0.0, 0.0, 0.15], [-30.0, -45.0, -30.0], [30.0, 45.0, 30.0]),
    bone("leftShoulder", "chest", [-0.15, 0.0, 0.1], [-30.0, -30.0, -90.0], [30.0, 30.0, 90.0]),
    bone("leftUpperArm", "leftShoulder", [-0.15, 0.0, -0.1], [-180.0, -90.0, -45.0], [180.0, 180.0, 180.0]),
    bone("leftLowerArm", "leftUpperArm", [0.0, 0.0, -0.3], [-135.0, -90.0, -90.0], [0.0, 90.0, 90.0]),
    bone("leftHand", "leftLowerArm", [0.0, 0.0, -0.25], [-90.0, -45.0, -45.0], [90.0, 45.0, 45.0]),
    bone("rightShoulder", "chest", [0.15, 0.0, 0.1], [-30.0, -30.0, -90.0], [30.0, 30.0, 90.0]),
    bone("rightUpperArm", "rightShoulder", [0.15, 0.0, -0.1], [-180.0, -180.0, -180.0], [180.0, 90.0, 45.0]),
    bone("rightLowerArm", "rightUpperArm", [0.0, 0.0, -0.3], [-135.0, -90.0, -90.0], [0.0, 90.0, 90.0]),
    bone("rightHand", "rightLowerArm", [0.0, 0.0, -0.25], [-90.0, -45.0, -45.0], [90.0, 45.0, 45.0]),
    bone("leftUpperLeg", "hips", [-0.1, 0.0, -0.1], [-120.0, -45.0, -45.0], [30.0, 45.0, 45.0]),
    bone("leftLowerLeg", "leftUpperLeg", [0.0, 0.0, -0.4], [-135.0, -10.0, -10.0], [0.0, 10.0, 10.0]),
    bone("leftFoot", "leftLowerLeg", [0.0, 0.0, -0.4], [-45.0, -30.0, -30.0], [45.0, 30.0, 30.0]),
    bone("rightUpperLeg", "hips", [0.1, 0.0, -0.1], [-120.0, -45.0, -45.0], [30.0, 45.0, 45.0]),
    bone("rightLowerLeg", "rightUpperLeg", [0.0, 0.0, -0.4], [-135.0, -10.0, -10.0], [0.0, 10.0, 10.0]),
    bone("rightFoot", "rightLowerLeg", [0.0, 0.0, -0.4], [-45.0, -30.0, -30.0], [45.0, 30.0, 30.0]),
];

/// 构建默认人形骨骼
///
/// 根骨骼为 `hips`，每根骨骼 3 个旋转自由度。每次调用结果相同。
pub fn build_default_humanoid() -> Skeleton {
    let bones = HUMANOID
        .iter()
        .map(|h| {
            let mut bone = Bone::new(h.name).with_offset(Vec3::from_array(h.offset));
            bone.parent = h.parent.map(str::to_string);
            bone.limits = h.limits.map(|(lower, upper)| JointLimits::new(lower, upper));
            bone
        })
        .collect();
    Skeleton::assemble(bones, "hips".to_string())
}
