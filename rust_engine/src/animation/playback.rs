//! 播放驱动
//!
//! 按经过时间选帧，读取每根已映射骨骼的通道，换算成目标骨骼的关节目标，
//! 再叠加程序化根运动路径，推给宿主。
//!
//! 状态机：
//! - `Idle`：没有加载动画
//! - `Stopped`：已加载，不推进
//! - `Playing`：播放中
//!
//! 单线程使用。`update` 是纯计算，不做 IO，同一时间输入得到同一输出。

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use glam::Vec3;

use crate::config::{self, PlaybackConfig};
use crate::host::{HostCapabilities, HostControlAdapter, JointControl};
use crate::retarget::{JointClass, RetargetMap};
use crate::skeleton::{JointLimits, RootPose, Skeleton};

use super::bvh_file::{BvhParser, CaptureParser};
use super::capture::CaptureAnimation;
use super::root_motion::{CirclePath, RootPath};

/// 播放状态
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// 没有加载动画
    Idle,
    /// 已加载，未播放
    Stopped,
    /// 播放中
    Playing,
}

/// 单个关节的目标
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointTarget {
    /// 按关节类别换算后的目标角度（弧度）
    pub angle: f32,
    /// 捕捉文件中的原始旋转（弧度，X/Y/Z）
    pub rotation: Vec3,
    /// 根骨骼的缩放后平移，其余骨骼为 None
    pub translation: Option<Vec3>,
}

/// 一次更新的输出
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackFrame {
    pub frame_index: usize,
    /// 规范关节名 → 目标
    pub joint_targets: BTreeMap<String, JointTarget>,
    pub root_pose: RootPose,
}

/// 播放信息
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackInfo {
    pub state: PlaybackState,
    pub total_frames: usize,
    pub current_frame: usize,
    pub frame_time: f64,
    pub duration: f64,
    /// 已绑定到目标骨骼的关节数
    pub bound_joints: usize,
    /// 尚未连接宿主时为 None
    pub joint_control: Option<JointControl>,
}

/// 捕捉骨骼到目标关节的绑定，加载时解析一次
#[derive(Clone, Debug)]
struct JointBinding {
    source: String,
    canonical: String,
    class: JointClass,
    limits: Option<JointLimits>,
    is_root: bool,
}

struct LoadedClip {
    animation: Arc<CaptureAnimation>,
    bindings: Vec<JointBinding>,
}

struct HostBinding {
    capabilities: HostCapabilities,
    /// 连接时宿主报告的关节表，仅按索引控制时记录
    joint_names: Vec<String>,
    control: JointControl,
    /// 规范关节名 → 宿主关节索引
    joint_indices: HashMap<String, usize>,
}

/// 播放驱动
pub struct PlaybackDriver {
    config: PlaybackConfig,
    target: Arc<Skeleton>,
    retarget: RetargetMap,
    path: Box<dyn RootPath>,
    parser: Box<dyn CaptureParser>,
    clip: Option<LoadedClip>,
    state: PlaybackState,
    host: Option<HostBinding>,
}

impl PlaybackDriver {
    /// 使用全局配置、默认重定向表、绕圈路径和 BVH 解析器
    pub fn new(target: Arc<Skeleton>) -> Self {
        let config = config::get_config();
        let path = Box::new(CirclePath::from_config(&config));
        let parser = Box::new(BvhParser::new(config.default_frame_time));
        Self::with_parts(target, RetargetMap::default(), path, parser, config)
    }

    pub fn with_parts(
        target: Arc<Skeleton>,
        retarget: RetargetMap,
        path: Box<dyn RootPath>,
        parser: Box<dyn CaptureParser>,
        config: PlaybackConfig,
    ) -> Self {
        Self {
            config,
            target,
            retarget,
            path,
            parser,
            clip: None,
            state: PlaybackState::Idle,
            host: None,
        }
    }

    /// 加载已解析的动画，进入 `Stopped`
    pub fn load(&mut self, animation: Arc<CaptureAnimation>) {
        let bindings = bind_joints(&animation, &self.target, &self.retarget);
        log::info!(
            "加载动作: {} 根骨骼, {} 帧, 绑定 {} 个关节",
            animation.bone_count(),
            animation.total_frames(),
            bindings.len()
        );
        self.clip = Some(LoadedClip { animation, bindings });
        self.state = PlaybackState::Stopped;
    }

    /// 用注入的解析器解析文本并加载
    ///
    /// 失败时保留之前的动画（没有则使用目标骨骼的静止姿态），进入 `Stopped`。
    pub fn load_text(&mut self, text: &str) -> crate::Result<()> {
        match self.parser.parse(text) {
            Ok(animation) => {
                self.load(Arc::new(animation));
                Ok(())
            }
            Err(e) => {
                self.fall_back(&e);
                Err(e.into())
            }
        }
    }

    /// 用注入的解析器读取文件并加载，失败处理同 [`load_text`](Self::load_text)
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> crate::Result<()> {
        match self.parser.load(path.as_ref()) {
            Ok(animation) => {
                self.load(Arc::new(animation));
                Ok(())
            }
            Err(e) => {
                self.fall_back(&e);
                Err(e)
            }
        }
    }

    fn fall_back(&mut self, error: &dyn std::fmt::Display) {
        if self.clip.is_none() {
            log::warn!("动作加载失败，使用静止姿态: {}", error);
            let rest = CaptureAnimation::rest_pose(&self.target, self.config.default_frame_time);
            self.load(Arc::new(rest));
        } else {
            log::warn!("动作加载失败，保留当前动作: {}", error);
            self.state = PlaybackState::Stopped;
        }
    }

    /// 开始播放，未加载动画时什么都不做并返回 false
    pub fn start(&mut self) -> bool {
        match self.state {
            PlaybackState::Idle => {
                log::warn!("没有加载动作，忽略播放请求");
                false
            }
            _ => {
                self.state = PlaybackState::Playing;
                true
            }
        }
    }

    /// 停止播放，下一次 `update` 不再输出
    pub fn stop(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Stopped;
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn animation(&self) -> Option<&Arc<CaptureAnimation>> {
        self.clip.as_ref().map(|c| &c.animation)
    }

    pub fn target(&self) -> &Skeleton {
        &self.target
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// 已绑定的规范关节名，按捕捉骨骼声明顺序
    pub fn bound_joints(&self) -> Vec<&str> {
        self.clip
            .as_ref()
            .map(|c| c.bindings.iter().map(|b| b.canonical.as_str()).collect())
            .unwrap_or_default()
    }

    /// 计算 `elapsed` 秒时的输出，只在 `Playing` 状态下有结果
    pub fn update(&self, elapsed: f64) -> Option<PlaybackFrame> {
        if self.state != PlaybackState::Playing {
            return None;
        }
        let clip = self.clip.as_ref()?;
        Some(self.evaluate(clip, elapsed))
    }

    fn evaluate(&self, clip: &LoadedClip, elapsed: f64) -> PlaybackFrame {
        let animation = &clip.animation;
        let frame_index = animation.frame_index_at(self.clip_time(elapsed), self.config.loop_playback);
        let scale = self.config.root_translation_scale;

        let mut joint_targets = BTreeMap::new();
        for binding in &clip.bindings {
            // 没有旋转通道的骨骼不输出
            let euler = match animation.euler_degrees(&binding.source, frame_index) {
                Some(euler) => euler,
                None => continue,
            };
            let mut angle = binding.class.retarget_angle(euler);
            if self.config.clamp_to_limits {
                if let Some(limits) = &binding.limits {
                    angle = limits.clamp_axis(binding.class.axis(), angle);
                }
            }
            let translation = if binding.is_root {
                animation.position(&binding.source, frame_index).map(|p| p * scale)
            } else {
                None
            };
            joint_targets.insert(
                binding.canonical.clone(),
                JointTarget {
                    angle,
                    rotation: to_radians(euler),
                    translation,
                },
            );
        }

        // 根位移在目标骨骼中没有对应关节时也要叠加
        let root_offset = animation
            .position(animation.root(), frame_index)
            .map(|p| p * scale)
            .unwrap_or(Vec3::ZERO);
        let root_pose = self.path.sample(elapsed).translated(root_offset);

        if self.config.debug_log {
            log::debug!(
                "t={:.3}s 帧 {} / {}, {} 个关节目标",
                elapsed,
                frame_index,
                animation.total_frames(),
                joint_targets.len()
            );
        }

        PlaybackFrame {
            frame_index,
            joint_targets,
            root_pose,
        }
    }

    /// 动作内部时间 = 经过时间 × 速度倍率
    fn clip_time(&self, elapsed: f64) -> f64 {
        let speed = if self.config.speed.is_finite() {
            self.config.speed.max(0.0)
        } else {
            1.0
        };
        elapsed * speed
    }

    /// 连接宿主，确定关节控制方式
    ///
    /// 按索引控制时在这里建立一次名称到索引的表。宿主不支持任何关节控制时
    /// 只记录一次警告，之后只推根姿态。
    pub fn attach_host(&mut self, host: &dyn HostControlAdapter) -> JointControl {
        let capabilities = host.capabilities();
        let control = capabilities.joint_control();
        let mut joint_indices = HashMap::new();
        let mut joint_names = Vec::new();
        match control {
            JointControl::ByIndex => {
                joint_names = host.joint_names();
                for (index, name) in joint_names.iter().enumerate() {
                    let canonical = self.retarget.canonical_name(name);
                    if self.target.contains(&canonical) {
                        joint_indices.entry(canonical).or_insert(index);
                    }
                }
                if joint_indices.is_empty() {
                    log::warn!("宿主关节索引表与目标骨骼没有共同关节");
                } else {
                    log::info!("宿主关节索引表: {} 个关节", joint_indices.len());
                }
            }
            JointControl::RootOnly => {
                log::warn!("宿主不支持关节控制，降级为只播放根运动");
            }
            JointControl::ByName => {}
        }
        self.host = Some(HostBinding { capabilities, joint_names, control, joint_indices });
        control
    }

    /// 当前宿主的关节控制方式
    pub fn joint_control(&self) -> Option<JointControl> {
        self.host.as_ref().map(|h| h.control)
    }

    /// 更新并把结果推给宿主
    ///
    /// 第一次调用时自动连接宿主。宿主能力或索引表与上次连接时不同，视为更换了宿主，重新连接。
    pub fn drive(&mut self, elapsed: f64, host: &mut dyn HostControlAdapter) -> Option<PlaybackFrame> {
        let frame = self.update(elapsed)?;
        let stale = match &self.host {
            None => true,
            Some(binding) => {
                let capabilities = host.capabilities();
                binding.capabilities != capabilities
                    || (capabilities.joint_control() == JointControl::ByIndex
                        && binding.joint_names != host.joint_names())
            }
        };
        if stale {
            self.attach_host(&*host);
        }

        host.set_root_pose(&frame.root_pose);
        if let Some(binding) = &self.host {
            match binding.control {
                JointControl::ByName => {
                    let targets: Vec<(&str, f32)> = frame
                        .joint_targets
                        .iter()
                        .map(|(name, target)| (name.as_str(), target.angle))
                        .collect();
                    host.set_joint_targets(&targets);
                }
                JointControl::ByIndex => {
                    let targets: Vec<(usize, f32)> = frame
                        .joint_targets
                        .iter()
                        .filter_map(|(name, target)| binding.joint_indices.get(name).map(|&i| (i, target.angle)))
                        .collect();
                    host.set_joint_targets_by_index(&targets);
                }
                JointControl::RootOnly => {}
            }
        }
        Some(frame)
    }

    pub fn info(&self, elapsed: f64) -> PlaybackInfo {
        let (total_frames, current_frame, frame_time, duration, bound_joints) = match &self.clip {
            Some(clip) => {
                let animation = &clip.animation;
                (
                    animation.total_frames(),
                    animation.frame_index_at(self.clip_time(elapsed), self.config.loop_playback),
                    animation.frame_time(),
                    animation.duration(),
                    clip.bindings.len(),
                )
            }
            None => (0, 0, 0.0, 0.0, 0),
        };
        PlaybackInfo {
            state: self.state,
            total_frames,
            current_frame,
            frame_time,
            duration,
            bound_joints,
            joint_control: self.joint_control(),
        }
    }
}

/// 多个捕捉骨骼映射到同一关节时，第一个生效
fn bind_joints(animation: &CaptureAnimation, target: &Skeleton, retarget: &RetargetMap) -> Vec<JointBinding> {
    let mut bound = HashSet::new();
    let mut bindings = Vec::new();
    for bone in animation.bones() {
        let canonical = retarget.canonical_name(&bone.name);
        let target_bone = match target.get(&canonical) {
            Some(b) => b,
            None => {
                log::debug!("骨骼 {} ({}) 不在目标骨骼中，跳过", bone.name, canonical);
                continue;
            }
        };
        if !bound.insert(canonical.clone()) {
            log::debug!("骨骼 {} 映射到已绑定的关节 {}，跳过", bone.name, canonical);
            continue;
        }
        bindings.push(JointBinding {
            source: bone.name.clone(),
            class: JointClass::of(&canonical),
            limits: target_bone.limits,
            is_root: bone.name == animation.root(),
            canonical,
        });
    }
    bindings
}

fn to_radians(degrees: Vec3) -> Vec3 {
    Vec3::new(degrees.x.to_radians(), degrees.y.to_radians(), degrees.z.to_radians())
}
