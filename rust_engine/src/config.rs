//! 播放配置
//!
//! 所有参数扁平化，直接在代码中修改默认值即可。

use once_cell::sync::Lazy;
use std::sync::RwLock;

use crate::animation::DEFAULT_FRAME_TIME;

/// 播放配置（扁平化，不嵌套）
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackConfig {
    // ========== 播放 ==========
    /// 是否循环播放，默认 true
    pub loop_playback: bool,
    /// 播放速度倍率，默认 1.0
    pub speed: f64,

    // ========== 根运动 ==========
    /// 捕捉根骨骼位移缩放，默认 0.01（厘米 → 米）
    pub root_translation_scale: f32,
    /// 绕圈行走速度 (m/s)，默认 0.8
    pub walking_speed: f32,
    /// 绕圈半径 (m)，默认 3.0
    pub walking_radius: f32,
    /// 根骨骼离地高度 (m)，默认 0.9
    pub base_height: f32,

    // ========== 关节 ==========
    /// 是否把重定向角度限制在目标骨骼的关节范围内，默认 true
    pub clamp_to_limits: bool,

    // ========== 解析 ==========
    /// 文件未声明帧间隔时使用的值（秒），默认 1/30
    pub default_frame_time: f64,

    // ========== 调试 ==========
    /// 是否输出调试日志，默认 false
    pub debug_log: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            // ====== 播放 ======
            loop_playback: true,
            // 小于 1 变慢，大于 1 变快；0 会停在第一帧
            speed: 1.0,

            // ====== 根运动 ======
            // 常见捕捉文件以厘米为单位
            root_translation_scale: 0.01,
            walking_speed: 0.8,
            walking_radius: 3.0,
            base_height: 0.9,

            // ====== 关节 ======
            clamp_to_limits: true,

            // ====== 解析 ======
            default_frame_time: DEFAULT_FRAME_TIME,

            // ====== 调试 ======
            debug_log: false,
        }
    }
}

/// 全局配置实例
static PLAYBACK_CONFIG: Lazy<RwLock<PlaybackConfig>> = Lazy::new(|| {
    RwLock::new(PlaybackConfig::default())
});

/// 获取当前配置（只读）
pub fn get_config() -> PlaybackConfig {
    match PLAYBACK_CONFIG.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// 手动设置配置（用于运行时调试）
pub fn set_config(config: PlaybackConfig) {
    match PLAYBACK_CONFIG.write() {
        Ok(mut guard) => *guard = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// 重置为默认配置
pub fn reset_config() {
    set_config(PlaybackConfig::default());
}
