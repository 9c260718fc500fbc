//! 骨骼命名约定表
//!
//! 每张表把某种命名约定的骨骼名映射到规范关节名。
//! 新增约定只需添加表，不改查找逻辑。

use once_cell::sync::Lazy;

use crate::skeleton::CANONICAL_JOINT_NAMES;

use super::map::Convention;

/// 常见 BVH 解剖学命名（Hips / LeftUpLeg / LeftForeArm ...）
pub const ANATOMICAL: &[(&str, &str)] = &[
    ("Hips", "hips"),
    ("Spine", "spine"),
    ("Spine1", "chest"),
    ("Chest", "chest"),
    ("Neck", "neck"),
    ("Head", "head"),
    // 左臂
    ("LeftShoulder", "leftShoulder"),
    ("LeftArm", "leftUpperArm"),
    ("LeftForeArm", "leftLowerArm"),
    ("LeftHand", "leftHand"),
    // 右臂
    ("RightShoulder", "rightShoulder"),
    ("RightArm", "rightUpperArm"),
    ("RightForeArm", "rightLowerArm"),
    ("RightHand", "rightHand"),
    // 左腿
    ("LeftUpLeg", "leftUpperLeg"),
    ("LeftLeg", "leftLowerLeg"),
    ("LeftFoot", "leftFoot"),
    // 右腿
    ("RightUpLeg", "rightUpperLeg"),
    ("RightLeg", "rightLowerLeg"),
    ("RightFoot", "rightFoot"),
];

/// Character Creator 导出的 CC_Base_* 命名
pub const CC_BASE: &[(&str, &str)] = &[
    ("CC_Base_Hip", "hips"),
    ("CC_Base_Pelvis", "hips"),
    ("CC_Base_Spine01", "spine"),
    ("CC_Base_Spine02", "chest"),
    ("CC_Base_Neck", "neck"),
    ("CC_Base_Head", "head"),
    ("CC_Base_L_Clavicle", "leftShoulder"),
    ("CC_Base_L_Upperarm", "leftUpperArm"),
    ("CC_Base_L_Forearm", "leftLowerArm"),
    ("CC_Base_L_Hand", "leftHand"),
    ("CC_Base_R_Clavicle", "rightShoulder"),
    ("CC_Base_R_Upperarm", "rightUpperArm"),
    ("CC_Base_R_Forearm", "rightLowerArm"),
    ("CC_Base_R_Hand", "rightHand"),
    ("CC_Base_L_Thigh", "leftUpperLeg"),
    ("CC_Base_L_Calf", "leftLowerLeg"),
    ("CC_Base_L_Foot", "leftFoot"),
    ("CC_Base_R_Thigh", "rightUpperLeg"),
    ("CC_Base_R_Calf", "rightLowerLeg"),
    ("CC_Base_R_Foot", "rightFoot"),
];

/// 其他工具里零散出现的别名
pub const LEGACY_ALIASES: &[(&str, &str)] = &[
    ("pelvis", "hips"),
    ("root", "hips"),
    ("spine1", "spine"),
    ("upperChest", "chest"),
    ("LeftCollar", "leftShoulder"),
    ("LeftUpperArm", "leftUpperArm"),
    ("LeftLowerArm", "leftLowerArm"),
    ("RightCollar", "rightShoulder"),
    ("RightUpperArm", "rightUpperArm"),
    ("RightLowerArm", "rightLowerArm"),
    ("LeftThigh", "leftUpperLeg"),
    ("LeftShin", "leftLowerLeg"),
    ("RightThigh", "rightUpperLeg"),
    ("RightShin", "rightLowerLeg"),
];

/// 默认约定，按查询优先级排列
pub static STANDARD_CONVENTIONS: Lazy<Vec<Convention>> = Lazy::new(|| {
    vec![
        // 规范名映射到自身，避免被小写回退改写
        Convention::new("canonical", CANONICAL_JOINT_NAMES.iter().map(|&n| (n, n))),
        Convention::from_table("anatomical", ANATOMICAL),
        Convention::from_table("cc_base", CC_BASE),
        Convention::from_table("legacy", LEGACY_ALIASES),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_target_canonical_names() {
        for table in [ANATOMICAL, CC_BASE, LEGACY_ALIASES] {
            for (source, canonical) in table {
                assert!(CANONICAL_JOINT_NAMES.contains(canonical), "{} -> {}", source, canonical);
            }
        }
    }

    #[test]
    fn test_every_canonical_joint_has_source_spellings() {
        for name in CANONICAL_JOINT_NAMES {
            assert!(ANATOMICAL.iter().any(|(_, c)| *c == name), "{}", name);
            assert!(CC_BASE.iter().any(|(_, c)| *c == name), "{}", name);
        }
    }
}
