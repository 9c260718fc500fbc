//! 动画系统
//!
//! 提供 BVH 动作捕捉解析、帧选择、根运动路径和播放驱动。

mod bvh_file;
mod capture;
mod playback;
mod root_motion;

pub use bvh_file::{
    decode_text, load_file, parse, BvhParser, CaptureParser, ParseError, Section, DEFAULT_FRAME_TIME,
};
pub(crate) use capture::unique_name;
pub use capture::{select_frame, CaptureAnimation, CaptureBone, CaptureFrame, ChannelKind, ParseWarning};
pub use playback::{JointTarget, PlaybackDriver, PlaybackFrame, PlaybackInfo, PlaybackState};
pub use root_motion::{CirclePath, RootPath, StationaryPath};
