//! 捕捉动画数据
//!
//! 解析后的 BVH 数据：骨骼树 + 按帧展开的平铺通道缓冲区。
//! 构建完成后不可变，可以在多个播放驱动之间只读共享。

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use glam::Vec3;

use crate::skeleton::Skeleton;

/// 通道类型（单个可动画标量）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    XPosition,
    YPosition,
    ZPosition,
    XRotation,
    YRotation,
    ZRotation,
}

impl ChannelKind {
    pub const POSITIONS: [ChannelKind; 3] =
        [ChannelKind::XPosition, ChannelKind::YPosition, ChannelKind::ZPosition];
    pub const ROTATIONS: [ChannelKind; 3] =
        [ChannelKind::XRotation, ChannelKind::YRotation, ChannelKind::ZRotation];

    pub fn is_position(self) -> bool {
        matches!(self, Self::XPosition | Self::YPosition | Self::ZPosition)
    }

    pub fn is_rotation(self) -> bool {
        !self.is_position()
    }

    /// 轴索引（X=0, Y=1, Z=2）
    pub fn axis(self) -> usize {
        match self {
            Self::XPosition | Self::XRotation => 0,
            Self::YPosition | Self::YRotation => 1,
            Self::ZPosition | Self::ZRotation => 2,
        }
    }

    /// BVH 文件中的写法
    pub fn token(self) -> &'static str {
        match self {
            Self::XPosition => "Xposition",
            Self::YPosition => "Yposition",
            Self::ZPosition => "Zposition",
            Self::XRotation => "Xrotation",
            Self::YRotation => "Yrotation",
            Self::ZRotation => "Zrotation",
        }
    }
}

impl FromStr for ChannelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // 大小写不敏感，部分导出工具会写成 XPOSITION
        match s.to_ascii_lowercase().as_str() {
            "xposition" => Ok(Self::XPosition),
            "yposition" => Ok(Self::YPosition),
            "zposition" => Ok(Self::ZPosition),
            "xrotation" => Ok(Self::XRotation),
            "yrotation" => Ok(Self::YRotation),
            "zrotation" => Ok(Self::ZRotation),
            _ => Err(format!("unknown channel kind '{}'", s)),
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// 捕捉骨骼
#[derive(Clone, Debug)]
pub struct CaptureBone {
    pub name: String,
    pub parent: Option<String>,
    /// 子骨骼名称，按声明顺序
    pub children: Vec<String>,
    /// 静止姿态下相对父骨骼的平移
    pub offset: Vec3,
    pub channels: Vec<ChannelKind>,
    /// 本骨骼通道在每帧数值数组中的起始位置
    pub channel_start_index: usize,
}

impl CaptureBone {
    pub fn new(name: impl Into<String>, parent: Option<String>, channel_start_index: usize) -> Self {
        Self {
            name: name.into(),
            parent,
            children: Vec::new(),
            offset: Vec3::ZERO,
            channels: Vec::new(),
            channel_start_index,
        }
    }

    /// 指定通道在帧数组中的绝对索引
    pub fn channel_index(&self, kind: ChannelKind) -> Option<usize> {
        self.channels
            .iter()
            .position(|&c| c == kind)
            .map(|offset| self.channel_start_index + offset)
    }

    pub fn has_position_channels(&self) -> bool {
        self.channels.iter().any(|c| c.is_position())
    }

    pub fn has_rotation_channels(&self) -> bool {
        self.channels.iter().any(|c| c.is_rotation())
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// 单帧数据
#[derive(Clone, Debug, PartialEq)]
pub struct CaptureFrame {
    pub values: Vec<f32>,
    /// 帧起始时间（秒）= 帧索引 * 帧间隔
    pub time: f64,
}

/// 解析过程中的非致命问题
#[derive(Clone, Debug, PartialEq)]
pub enum ParseWarning {
    /// 存在多个无父骨骼，取第一个作为根
    AmbiguousRoot { chosen: String, candidates: Vec<String> },
    /// 动作行无法解析或列数不符，已跳过
    SkippedRow { line: usize, reason: String },
    /// 头部声明的帧数与实际解析出的帧数不一致
    FrameCountMismatch { declared: usize, parsed: usize },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmbiguousRoot { chosen, candidates } => write!(
                f,
                "multiple parentless bones {:?}, using '{}' as root",
                candidates, chosen
            ),
            Self::SkippedRow { line, reason } => write!(f, "skipped motion row at line {}: {}", line, reason),
            Self::FrameCountMismatch { declared, parsed } => write!(
                f,
                "header declares {} frames but {} rows were parsed",
                declared, parsed
            ),
        }
    }
}

/// 捕捉动画
#[derive(Clone, Debug)]
pub struct CaptureAnimation {
    bones: Vec<CaptureBone>,
    name_to_index: HashMap<String, usize>,
    root: String,
    frames: Vec<CaptureFrame>,
    frame_time: f64,
    channel_count: usize,
    declared_frame_count: Option<usize>,
    warnings: Vec<ParseWarning>,
}

impl CaptureAnimation {
    /// 由解析器组装
    ///
    /// 调用方负责保证骨骼名称唯一、父骨骼存在、`root` 为无父骨骼。
    pub(crate) fn assemble(
        bones: Vec<CaptureBone>,
        root: String,
        frames: Vec<CaptureFrame>,
        frame_time: f64,
        declared_frame_count: Option<usize>,
        warnings: Vec<ParseWarning>,
    ) -> Self {
        let name_to_index = bones
            .iter()
            .enumerate()
            .map(|(i, b)| (b.name.clone(), i))
            .collect();
        let channel_count = bones.iter().map(|b| b.channels.len()).sum();
        Self {
            bones,
            name_to_index,
            root,
            frames,
            frame_time,
            channel_count,
            declared_frame_count,
            warnings,
        }
    }

    /// 为骨骼生成单帧全零的静止姿态动画
    ///
    /// 根骨骼带 6 个通道（位置 + 旋转），其余骨骼 3 个旋转通道。
    pub fn rest_pose(skeleton: &Skeleton, frame_time: f64) -> Self {
        let mut bones = Vec::with_capacity(skeleton.bone_count());
        let mut counter = 0;
        for bone in skeleton.bones() {
            let mut capture = CaptureBone::new(bone.name.clone(), bone.parent.clone(), counter);
            capture.children = bone.children.clone();
            capture.offset = bone.rest_offset;
            if bone.parent.is_none() {
                capture.channels.extend_from_slice(&ChannelKind::POSITIONS);
            }
            capture.channels.extend_from_slice(&ChannelKind::ROTATIONS);
            counter += capture.channels.len();
            bones.push(capture);
        }
        let frames = vec![CaptureFrame { values: vec![0.0; counter], time: 0.0 }];
        Self::assemble(bones, skeleton.root().to_string(), frames, frame_time, Some(1), Vec::new())
    }

    /// 按名称查找骨骼
    pub fn bone(&self, name: &str) -> Option<&CaptureBone> {
        self.name_to_index.get(name).map(|&i| &self.bones[i])
    }

    /// 按声明顺序遍历骨骼
    pub fn bones(&self) -> impl Iterator<Item = &CaptureBone> {
        self.bones.iter()
    }

    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn root_bone(&self) -> Option<&CaptureBone> {
        self.bone(&self.root)
    }

    pub fn frames(&self) -> &[CaptureFrame] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&CaptureFrame> {
        self.frames.get(index)
    }

    /// 实际解析出的帧数（权威值）
    pub fn total_frames(&self) -> usize {
        self.frames.len()
    }

    /// 文件头声明的帧数（仅供参考）
    pub fn declared_frame_count(&self) -> Option<usize> {
        self.declared_frame_count
    }

    pub fn frame_time(&self) -> f64 {
        self.frame_time
    }

    /// 动画总时长（秒）
    pub fn duration(&self) -> f64 {
        self.frames.len() as f64 * self.frame_time
    }

    /// 每帧数值个数
    pub fn channel_count(&self) -> usize {
        self.channel_count
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// 读取单个通道值
    ///
    /// 骨骼不存在、骨骼没有该通道或帧越界时返回 `None`。
    pub fn channel_value(&self, bone: &str, kind: ChannelKind, frame_index: usize) -> Option<f32> {
        let index = self.bone(bone)?.channel_index(kind)?;
        self.frames.get(frame_index)?.values.get(index).copied()
    }

    /// 骨骼旋转（欧拉角，单位：度）
    ///
    /// 骨骼没有任何旋转通道时返回 `None`；缺失的轴记为 0。
    pub fn euler_degrees(&self, bone: &str, frame_index: usize) -> Option<Vec3> {
        self.read_vec3(bone, frame_index, &ChannelKind::ROTATIONS)
    }

    /// 骨骼平移（BVH 原始单位）
    pub fn position(&self, bone: &str, frame_index: usize) -> Option<Vec3> {
        self.read_vec3(bone, frame_index, &ChannelKind::POSITIONS)
    }

    fn read_vec3(&self, bone: &str, frame_index: usize, kinds: &[ChannelKind; 3]) -> Option<Vec3> {
        let capture = self.bone(bone)?;
        let values = &self.frames.get(frame_index)?.values;
        let mut out = Vec3::ZERO;
        let mut found = false;
        for &kind in kinds {
            if let Some(v) = capture.channel_index(kind).and_then(|i| values.get(i)) {
                out[kind.axis()] = *v;
                found = true;
            }
        }
        found.then_some(out)
    }

    /// 按经过时间选帧
    pub fn frame_index_at(&self, elapsed: f64, looping: bool) -> usize {
        select_frame(elapsed, self.frame_time, self.frames.len(), looping)
    }
}

/// 为重名骨骼生成未被占用的名称：`name_index`，仍冲突时 `name_index_1`、`name_index_2` ...
pub(crate) fn unique_name(name: &str, index: usize, taken: impl Fn(&str) -> bool) -> String {
    let mut candidate = format!("{}_{}", name, index);
    let mut suffix = 1;
    while taken(&candidate) {
        candidate = format!("{}_{}_{}", name, index, suffix);
        suffix += 1;
    }
    candidate
}

/// 帧索引 = floor(elapsed / frame_time)，循环时取模，否则截断到最后一帧
///
/// 负数、-∞ 和 NaN 按 0 处理，+∞ 视为无限靠后；`total_frames` 为 0 时返回 0。
pub fn select_frame(elapsed: f64, frame_time: f64, total_frames: usize, looping: bool) -> usize {
    if total_frames == 0 || frame_time.is_nan() || frame_time <= 0.0 {
        return 0;
    }
    let raw = (elapsed / frame_time).floor();
    let index = if raw > 0.0 {
        // 超大值和 +∞ 饱和到 usize::MAX，不循环时落在最后一帧
        raw as usize
    } else {
        // 负数、-∞、NaN
        0
    };
    if looping {
        index % total_frames
    } else {
        index.min(total_frames - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::build_default_humanoid;

    fn two_bone_animation() -> CaptureAnimation {
        let mut root = CaptureBone::new("Hips", None, 0);
        root.channels = vec![
            ChannelKind::XPosition,
            ChannelKind::YPosition,
            ChannelKind::ZPosition,
            ChannelKind::ZRotation,
            ChannelKind::XRotation,
            ChannelKind::YRotation,
        ];
        root.children.push("Spine".to_string());
        let mut spine = CaptureBone::new("Spine", Some("Hips".to_string()), 6);
        spine.channels = vec![ChannelKind::ZRotation, ChannelKind::XRotation];
        let frames = vec![CaptureFrame {
            values: vec![1.0, 2.0, 3.0, 30.0, 10.0, 20.0, 45.0, 5.0],
            time: 0.0,
        }];
        CaptureAnimation::assemble(vec![root, spine], "Hips".to_string(), frames, 0.1, Some(1), Vec::new())
    }

    #[test]
    fn test_select_frame_loop_and_clamp() {
        assert_eq!(select_frame(1.05, 0.1, 10, true), 0);
        assert_eq!(select_frame(1.05, 0.1, 10, false), 9);
        assert_eq!(select_frame(0.25, 0.1, 10, true), 2);
        assert_eq!(select_frame(0.0, 0.1, 10, false), 0);
    }

    #[test]
    fn test_select_frame_degenerate_inputs() {
        assert_eq!(select_frame(-3.0, 0.1, 10, true), 0);
        assert_eq!(select_frame(f64::NAN, 0.1, 10, true), 0);
        assert_eq!(select_frame(1.0, 0.1, 0, true), 0);
        assert_eq!(select_frame(f64::NEG_INFINITY, 0.1, 10, false), 0);
        assert_eq!(select_frame(f64::NAN, 0.1, 10, false), 0);
    }

    #[test]
    fn test_unique_name_skips_taken_suffixes() {
        let taken = ["Leg", "Leg_3", "Leg_3_1"];
        assert_eq!(unique_name("Leg", 3, |n| taken.contains(&n)), "Leg_3_2");
        assert_eq!(unique_name("Arm", 4, |n| taken.contains(&n)), "Arm_4");
    }

    #[test]
    fn test_select_frame_infinite_time_clamps_to_last() {
        assert_eq!(select_frame(f64::INFINITY, 0.1, 10, false), 9);
        assert_eq!(select_frame(1e300, 0.1, 10, false), 9);
        assert!(select_frame(f64::INFINITY, 0.1, 10, true) < 10);
    }

    #[test]
    fn test_channel_kind_parse() {
        assert_eq!("Xposition".parse::<ChannelKind>(), Ok(ChannelKind::XPosition));
        assert_eq!("ZROTATION".parse::<ChannelKind>(), Ok(ChannelKind::ZRotation));
        assert!("Wrotation".parse::<ChannelKind>().is_err());
        assert_eq!(ChannelKind::YRotation.to_string(), "Yrotation");
    }

    #[test]
    fn test_channel_value_lookup() {
        let anim = two_bone_animation();
        assert_eq!(anim.channel_value("Hips", ChannelKind::YPosition, 0), Some(2.0));
        assert_eq!(anim.channel_value("Spine", ChannelKind::XRotation, 0), Some(5.0));
        assert_eq!(anim.channel_value("Spine", ChannelKind::YRotation, 0), None);
        assert_eq!(anim.channel_value("Spine", ChannelKind::XRotation, 1), None);
        assert_eq!(anim.channel_value("Head", ChannelKind::XRotation, 0), None);
    }

    #[test]
    fn test_euler_follows_declared_channel_order() {
        let anim = two_bone_animation();
        assert_eq!(anim.euler_degrees("Hips", 0), Some(Vec3::new(10.0, 20.0, 30.0)));
        // 缺失的 Y 轴记为 0
        assert_eq!(anim.euler_degrees("Spine", 0), Some(Vec3::new(5.0, 0.0, 45.0)));
        assert_eq!(anim.position("Spine", 0), None);
        assert_eq!(anim.position("Hips", 0), Some(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_rest_pose_layout() {
        let skeleton = build_default_humanoid();
        let anim = CaptureAnimation::rest_pose(&skeleton, 1.0 / 30.0);
        assert_eq!(anim.total_frames(), 1);
        assert_eq!(anim.bone_count(), skeleton.bone_count());
        assert_eq!(anim.channel_count(), skeleton.bone_count() * 3 + 3);
        assert_eq!(anim.frames()[0].values.len(), anim.channel_count());
        assert_eq!(anim.root(), "hips");
        assert_eq!(anim.position("hips", 0), Some(Vec3::ZERO));
    }
}
