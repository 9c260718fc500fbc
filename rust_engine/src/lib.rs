//! 动作捕捉重定向引擎
//!
//! 把 BVH 动作捕捉数据按骨骼名称重定向到人形目标骨骼上并实时播放：
//! - BVH 层级 / 通道解析
//! - 捕捉骨骼与目标骨骼共用的规范骨骼模型
//! - 多种骨骼命名约定到规范名称的映射
//! - 按时间选帧、提取通道、输出关节目标和根运动的播放驱动
//! - 宿主控制接口（由外部物理 / 动画系统实现）

pub mod animation;
pub mod config;
pub mod host;
pub mod retarget;
pub mod skeleton;

pub use animation::{
    BvhParser, CaptureAnimation, CaptureBone, CaptureFrame, CaptureParser, ChannelKind, CirclePath,
    JointTarget, ParseError, ParseWarning, PlaybackDriver, PlaybackFrame, PlaybackInfo, PlaybackState,
    RootPath, Section, StationaryPath,
};
pub use config::PlaybackConfig;
pub use host::{HostCapabilities, HostControlAdapter, JointControl, RecordingHost, RootMotionOnly};
pub use retarget::{Convention, JointClass, RetargetMap, RetargetedClip};
pub use skeleton::{build_default_humanoid, Bone, JointLimits, RootPose, Skeleton};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MocapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("BVH parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Skeleton error: {0}")]
    Skeleton(String),
}

pub type Result<T> = std::result::Result<T, MocapError>;
