//! 骨骼重定向
//!
//! 把各种命名约定的源骨骼名映射到规范关节名，并按关节类别换算角度。

mod clip;
mod conventions;
mod joint_class;
mod map;

pub use clip::RetargetedClip;
pub use conventions::{ANATOMICAL, CC_BASE, LEGACY_ALIASES, STANDARD_CONVENTIONS};
pub use joint_class::JointClass;
pub use map::{Convention, Resolution, RetargetMap};
