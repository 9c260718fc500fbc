//! BVH (Biovision Hierarchy) 文件解析
//!
//! BVH 是按行组织的文本格式，分为两段：
//! - `HIERARCHY`：嵌套的 ROOT / JOINT 骨骼块，每块含 OFFSET 与 CHANNELS
//! - `MOTION`：帧数、帧间隔，然后每行一帧的浮点数，列顺序与骨骼声明顺序一致
//!
//! 格式错误（缺段、头部行无法解析、没有骨骼）对整次解析是致命的；
//! 单个动作行无法解析时只跳过该行。

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use glam::Vec3;
use thiserror::Error;

use super::capture::{unique_name, CaptureAnimation, CaptureBone, CaptureFrame, ChannelKind, ParseWarning};

/// 未声明 `Frame Time` 时使用的帧间隔（30 FPS）
pub const DEFAULT_FRAME_TIME: f64 = 1.0 / 30.0;

const HIERARCHY_MARKER: &str = "HIERARCHY";
const MOTION_MARKER: &str = "MOTION";
const FRAMES_PREFIX: &str = "Frames:";
const FRAME_TIME_PREFIX: &str = "Frame Time:";

/// BVH 文件的两个段
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Hierarchy,
    Motion,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Hierarchy => f.write_str(HIERARCHY_MARKER),
            Section::Motion => f.write_str(MOTION_MARKER),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("missing {0} section")]
    MissingSection(Section),

    #[error("hierarchy declares no bones")]
    EmptyHierarchy,

    #[error("motion section contains no valid frames")]
    NoFrames,

    #[error("line {line}: {reason}")]
    InvalidLine { line: usize, reason: String },
}

fn invalid(line: usize, reason: impl Into<String>) -> ParseError {
    ParseError::InvalidLine { line, reason: reason.into() }
}

/// 捕捉文件解析器
///
/// 播放驱动通过该接口接收解析实现，而不是自己探测可用的解析器。
pub trait CaptureParser {
    fn parse(&self, text: &str) -> Result<CaptureAnimation, ParseError>;

    /// 读取文件并解析
    fn load(&self, path: &Path) -> crate::Result<CaptureAnimation> {
        let bytes = fs::read(path)?;
        Ok(self.parse(&decode_text(&bytes))?)
    }
}

/// BVH 解析器
#[derive(Clone, Debug)]
pub struct BvhParser {
    /// 文件未声明帧间隔时的默认值（秒）
    pub default_frame_time: f64,
}

impl Default for BvhParser {
    fn default() -> Self {
        Self { default_frame_time: DEFAULT_FRAME_TIME }
    }
}

impl BvhParser {
    pub fn new(default_frame_time: f64) -> Self {
        let default_frame_time = if default_frame_time > 0.0 && default_frame_time.is_finite() {
            default_frame_time
        } else {
            DEFAULT_FRAME_TIME
        };
        Self { default_frame_time }
    }
}

impl CaptureParser for BvhParser {
    fn parse(&self, text: &str) -> Result<CaptureAnimation, ParseError> {
        parse_with_default(text, self.default_frame_time)
    }
}

/// 从文件加载 BVH
pub fn load_file<P: AsRef<Path>>(path: P) -> crate::Result<CaptureAnimation> {
    BvhParser::default().load(path.as_ref())
}

/// 解析 BVH 文本
pub fn parse(text: &str) -> Result<CaptureAnimation, ParseError> {
    parse_with_default(text, DEFAULT_FRAME_TIME)
}

/// 解码文件字节
///
/// 按 BOM 识别编码（默认 UTF-8），非法字节替换为 U+FFFD。
pub fn decode_text(bytes: &[u8]) -> String {
    let (decoded, encoding, had_errors) = encoding_rs::UTF_8.decode(bytes);
    if had_errors {
        log::warn!("BVH 文本包含无法以 {} 解码的字节，已替换", encoding.name());
    }
    decoded.into_owned()
}

fn parse_with_default(text: &str, default_frame_time: f64) -> Result<CaptureAnimation, ParseError> {
    // 非空行，保留原始行号（从 1 开始）用于报错
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
        .collect();

    let hierarchy_at = lines.iter().position(|(_, l)| *l == HIERARCHY_MARKER);
    let motion_at = lines.iter().position(|(_, l)| *l == MOTION_MARKER);

    let (hierarchy_at, motion_at) = match (hierarchy_at, motion_at) {
        (None, _) => return Err(ParseError::MissingSection(Section::Hierarchy)),
        (_, None) => return Err(ParseError::MissingSection(Section::Motion)),
        // MOTION 出现在 HIERARCHY 之前，视为缺少层级段
        (Some(h), Some(m)) if m < h => return Err(ParseError::MissingSection(Section::Hierarchy)),
        (Some(h), Some(m)) => (h, m),
    };

    let mut warnings = Vec::new();

    let bones = HierarchyBuilder::default().parse(&lines[hierarchy_at + 1..motion_at])?;
    if bones.is_empty() {
        return Err(ParseError::EmptyHierarchy);
    }

    let roots: Vec<String> = bones
        .iter()
        .filter(|b| b.parent.is_none())
        .map(|b| b.name.clone())
        .collect();
    // 第一个骨骼的父骨骼必然为空，roots 不会为空
    let root = roots.first().cloned().unwrap_or_else(|| bones[0].name.clone());
    if roots.len() > 1 {
        warnings.push(ParseWarning::AmbiguousRoot { chosen: root.clone(), candidates: roots });
    }

    let channel_count: usize = bones.iter().map(|b| b.channels.len()).sum();
    let motion = parse_motion(&lines[motion_at + 1..], channel_count, default_frame_time, &mut warnings)?;

    if motion.rows.is_empty() {
        return Err(ParseError::NoFrames);
    }

    if let Some(declared) = motion.declared_frames {
        if declared != motion.rows.len() {
            warnings.push(ParseWarning::FrameCountMismatch { declared, parsed: motion.rows.len() });
        }
    }

    for warning in &warnings {
        log::warn!("BVH: {}", warning);
    }

    let frame_time = motion.frame_time;
    let frames: Vec<CaptureFrame> = motion
        .rows
        .into_iter()
        .enumerate()
        .map(|(i, values)| CaptureFrame { values, time: i as f64 * frame_time })
        .collect();

    log::info!(
        "BVH 解析完成: {} 个骨骼, {} 帧, 帧间隔 {:.4}s, 根骨骼 {}",
        bones.len(),
        frames.len(),
        frame_time,
        root
    );

    Ok(CaptureAnimation::assemble(bones, root, frames, frame_time, motion.declared_frames, warnings))
}

/// 正在跳过的 End Site 块
struct EndSiteSkip {
    depth: i32,
    opened: bool,
}

impl EndSiteSkip {
    /// 消费一行，块结束时返回 true
    fn consume(&mut self, line: &str) -> bool {
        let opens = line.matches('{').count() as i32;
        let closes = line.matches('}').count() as i32;
        self.opened |= opens > 0;
        self.depth += opens - closes;
        self.opened && self.depth <= 0
    }
}

/// 层级段解析状态
#[derive(Default)]
struct HierarchyBuilder {
    bones: Vec<CaptureBone>,
    name_to_index: HashMap<String, usize>,
    /// 当前打开的骨骼（索引）
    stack: Vec<usize>,
    channel_counter: usize,
    end_site: Option<EndSiteSkip>,
}

impl HierarchyBuilder {
    fn parse(mut self, lines: &[(usize, &str)]) -> Result<Vec<CaptureBone>, ParseError> {
        for &(line_no, line) in lines {
            if let Some(skip) = self.end_site.as_mut() {
                if skip.consume(line) {
                    self.end_site = None;
                }
                continue;
            }

            let mut parts = line.split_whitespace();
            let Some(keyword) = parts.next() else {
                continue;
            };

            match keyword {
                "ROOT" | "JOINT" => self.open_bone(parts.next()),
                "OFFSET" => self.set_offset(line_no, parts)?,
                "CHANNELS" => self.set_channels(line_no, parts)?,
                "End" => {
                    let mut skip = EndSiteSkip { depth: 0, opened: false };
                    if !skip.consume(line) {
                        self.end_site = Some(skip);
                    }
                }
                "{" => {}
                "}" => {
                    self.stack.pop();
                }
                other => log::debug!("BVH 第 {} 行: 忽略未知层级关键字 {}", line_no, other),
            }
        }
        Ok(self.bones)
    }

    fn open_bone(&mut self, name: Option<&str>) {
        let index = self.bones.len();
        let name = match name {
            Some(n) if n != "{" => n.to_string(),
            _ => format!("bone_{}", index),
        };
        // 重名骨骼追加序号，保证名称唯一
        let name = if self.name_to_index.contains_key(&name) {
            let renamed = unique_name(&name, index, |n| self.name_to_index.contains_key(n));
            log::warn!("BVH 骨骼名称重复: {}，重命名为 {}", name, renamed);
            renamed
        } else {
            name
        };

        let parent = self.stack.last().copied();
        let bone = CaptureBone::new(
            name.clone(),
            parent.map(|p| self.bones[p].name.clone()),
            self.channel_counter,
        );
        if let Some(p) = parent {
            self.bones[p].children.push(name.clone());
        }
        self.name_to_index.insert(name, index);
        self.bones.push(bone);
        self.stack.push(index);
    }

    fn current(&mut self, line_no: usize, keyword: &str) -> Result<&mut CaptureBone, ParseError> {
        match self.stack.last() {
            Some(&i) => Ok(&mut self.bones[i]),
            None => Err(invalid(line_no, format!("{} outside of a bone block", keyword))),
        }
    }

    fn set_offset<'a>(
        &mut self,
        line_no: usize,
        parts: impl Iterator<Item = &'a str>,
    ) -> Result<(), ParseError> {
        let values = parts
            .take(3)
            .map(|p| p.parse::<f32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| invalid(line_no, format!("invalid OFFSET value: {}", e)))?;
        if values.len() < 3 {
            return Err(invalid(line_no, "OFFSET requires three numbers"));
        }
        self.current(line_no, "OFFSET")?.offset = Vec3::new(values[0], values[1], values[2]);
        Ok(())
    }

    fn set_channels<'a>(
        &mut self,
        line_no: usize,
        mut parts: impl Iterator<Item = &'a str>,
    ) -> Result<(), ParseError> {
        let count = parts
            .next()
            .and_then(|c| c.parse::<usize>().ok())
            .ok_or_else(|| invalid(line_no, "CHANNELS requires a channel count"))?;
        let channels = parts
            .take(count)
            .map(|t| t.parse::<ChannelKind>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| invalid(line_no, e))?;
        if channels.len() != count {
            return Err(invalid(
                line_no,
                format!("CHANNELS declares {} channels but lists {}", count, channels.len()),
            ));
        }

        let start = self.channel_counter;
        let bone = self.current(line_no, "CHANNELS")?;
        if !bone.channels.is_empty() {
            return Err(invalid(line_no, format!("bone '{}' declares CHANNELS twice", bone.name)));
        }
        bone.channels = channels;
        bone.channel_start_index = start;
        self.channel_counter += count;
        Ok(())
    }
}

struct MotionData {
    rows: Vec<Vec<f32>>,
    frame_time: f64,
    declared_frames: Option<usize>,
}

fn parse_motion(
    lines: &[(usize, &str)],
    channel_count: usize,
    default_frame_time: f64,
    warnings: &mut Vec<ParseWarning>,
) -> Result<MotionData, ParseError> {
    let mut motion = MotionData {
        rows: Vec::new(),
        frame_time: default_frame_time,
        declared_frames: None,
    };

    for &(line_no, line) in lines {
        if let Some(rest) = line.strip_prefix(FRAMES_PREFIX) {
            // 帧数仅供参考，以实际解析出的行数为准
            motion.declared_frames = rest.trim().parse::<usize>().ok();
            if motion.declared_frames.is_none() {
                log::warn!("BVH 第 {} 行: 无法解析帧数 '{}'", line_no, rest.trim());
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix(FRAME_TIME_PREFIX) {
            let frame_time = rest
                .trim()
                .parse::<f64>()
                .map_err(|e| invalid(line_no, format!("invalid Frame Time: {}", e)))?;
            if !(frame_time.is_finite() && frame_time > 0.0) {
                return Err(invalid(line_no, format!("Frame Time must be positive, got {}", frame_time)));
            }
            motion.frame_time = frame_time;
            continue;
        }

        match parse_row(line, channel_count) {
            Ok(values) => motion.rows.push(values),
            Err(reason) => warnings.push(ParseWarning::SkippedRow { line: line_no, reason }),
        }
    }

    Ok(motion)
}

/// 解析一行帧数据
fn parse_row(line: &str, channel_count: usize) -> Result<Vec<f32>, String> {
    let values = line
        .split_whitespace()
        .map(|t| t.parse::<f32>().map_err(|_| format!("non-numeric token '{}'", t)))
        .collect::<Result<Vec<_>, _>>()?;
    if values.len() != channel_count {
        return Err(format!("expected {} values, found {}", channel_count, values.len()));
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_BONE: &str = "\
HIERARCHY
ROOT Hips
{
    OFFSET 0.0 0.0 0.0
    CHANNELS 6 Xposition Yposition Zposition Zrotation Xrotation Yrotation
    JOINT Spine
    {
        OFFSET 0.0 10.0 0.0
        CHANNELS 3 Zrotation Xrotation Yrotation
        End Site
        {
            OFFSET 0.0 5.0 0.0
        }
    }
}
MOTION
Frames: 2
Frame Time: 0.1
1.0 2.0 3.0 10.0 20.0 30.0 40.0 50.0 60.0
4.0 5.0 6.0 11.0 21.0 31.0 41.0 51.0 61.0
";

    const HUMANOID_FRAGMENT: &str = "\
HIERARCHY
ROOT CC_Base_Hip
{
  OFFSET 0 90 0
  CHANNELS 6 Xposition Yposition Zposition Zrotation Xrotation Yrotation
  JOINT CC_Base_L_Thigh
  {
    OFFSET 10 -5 0
    CHANNELS 3 Zrotation Xrotation Yrotation
    JOINT CC_Base_L_Calf
    {
      OFFSET 0 -40 0
      CHANNELS 3 Zrotation Xrotation Yrotation
      End Site
      {
        OFFSET 0 -40 0
      }
    }
  }
  JOINT CC_Base_Twist
  {
    OFFSET 0 1 0
    JOINT CC_Base_Spine01
    {
      OFFSET 0 10 0
      CHANNELS 3 Zrotation Xrotation Yrotation
    }
  }
}
MOTION
Frames: 1
Frame Time: 0.0333333
0 90 0 0 0 0 1 2 3 4 5 6 7 8 9
";

    #[test]
    fn test_parse_two_bone_round_trip() {
        let anim = parse(TWO_BONE).unwrap();
        assert_eq!(anim.total_frames(), 2);
        assert_eq!(anim.bone_count(), 2);
        assert!((anim.frames()[1].time - 0.1).abs() < 1e-12);
        assert_eq!(anim.root(), "Hips");
        assert_eq!(anim.declared_frame_count(), Some(2));
        assert!(anim.warnings().is_empty());

        let spine = anim.bone("Spine").unwrap();
        assert_eq!(spine.parent.as_deref(), Some("Hips"));
        assert_eq!(spine.channel_start_index, 6);
        assert!((spine.offset.y - 10.0).abs() < 1e-6);
        assert_eq!(anim.bone("Hips").unwrap().children, vec!["Spine".to_string()]);
        assert_eq!(anim.channel_value("Spine", ChannelKind::YRotation, 1), Some(61.0));
    }

    #[test]
    fn test_channel_width_matches_every_frame() {
        for text in [TWO_BONE, HUMANOID_FRAGMENT] {
            let anim = parse(text).unwrap();
            let width: usize = anim.bones().map(|b| b.channels.len()).sum();
            assert_eq!(width, anim.channel_count());
            for frame in anim.frames() {
                assert_eq!(frame.values.len(), width);
            }
        }
    }

    #[test]
    fn test_channel_start_indices_partition_row() {
        let anim = parse(HUMANOID_FRAGMENT).unwrap();
        let mut expected = 0;
        let mut last_start = None;
        for bone in anim.bones().filter(|b| !b.channels.is_empty()) {
            assert_eq!(bone.channel_start_index, expected, "gap or overlap at {}", bone.name);
            if let Some(last) = last_start {
                assert!(bone.channel_start_index > last);
            }
            last_start = Some(bone.channel_start_index);
            expected += bone.channels.len();
        }
        assert_eq!(expected, anim.channel_count());
    }

    #[test]
    fn test_zero_channel_bone_kept_for_hierarchy() {
        let anim = parse(HUMANOID_FRAGMENT).unwrap();
        let twist = anim.bone("CC_Base_Twist").unwrap();
        assert!(twist.channels.is_empty());
        assert_eq!(twist.channel_start_index, 12);
        assert_eq!(twist.children, vec!["CC_Base_Spine01".to_string()]);
        let spine = anim.bone("CC_Base_Spine01").unwrap();
        assert_eq!(spine.parent.as_deref(), Some("CC_Base_Twist"));
        assert_eq!(spine.channel_start_index, 12);
        assert_eq!(anim.channel_value("CC_Base_Spine01", ChannelKind::YRotation, 0), Some(9.0));
    }

    #[test]
    fn test_end_site_does_not_pop_parent() {
        let anim = parse(HUMANOID_FRAGMENT).unwrap();
        // End Site 之后的 CC_Base_Twist 仍然挂在根骨骼下
        assert_eq!(anim.bone("CC_Base_Twist").unwrap().parent.as_deref(), Some("CC_Base_Hip"));
        assert_eq!(anim.bone_count(), 5);
    }

    #[test]
    fn test_single_root() {
        let anim = parse(HUMANOID_FRAGMENT).unwrap();
        let roots: Vec<_> = anim.bones().filter(|b| b.parent.is_none()).collect();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].name, anim.root());
    }

    #[test]
    fn test_non_numeric_row_is_skipped() {
        let text = "\
HIERARCHY
ROOT Hips
{
OFFSET 0 0 0
CHANNELS 3 Zrotation Xrotation Yrotation
}
MOTION
Frames: 4
Frame Time: 0.1
0 0 0
1 1 1
1 oops 1
2 2 2
";
        let anim = parse(text).unwrap();
        assert_eq!(anim.total_frames(), 3);
        assert_eq!(anim.declared_frame_count(), Some(4));
        assert!(anim
            .warnings()
            .iter()
            .any(|w| matches!(w, ParseWarning::SkippedRow { line: 12, .. })));
        assert!(anim
            .warnings()
            .contains(&ParseWarning::FrameCountMismatch { declared: 4, parsed: 3 }));
        // 被跳过的行不占用时间
        assert!((anim.frames()[2].time - 0.2).abs() < 1e-12);
        assert_eq!(anim.channel_value("Hips", ChannelKind::XRotation, 2), Some(2.0));
    }

    #[test]
    fn test_short_row_is_skipped() {
        let text = TWO_BONE.replace("4.0 5.0 6.0 11.0 21.0 31.0 41.0 51.0 61.0", "4.0 5.0");
        let anim = parse(&text).unwrap();
        assert_eq!(anim.total_frames(), 1);
    }

    #[test]
    fn test_missing_sections() {
        assert_eq!(parse("MOTION\nFrames: 0\n").unwrap_err(), ParseError::MissingSection(Section::Hierarchy));
        assert_eq!(
            parse("HIERARCHY\nROOT Hips\n{\n}\n").unwrap_err(),
            ParseError::MissingSection(Section::Motion)
        );
        let swapped = "MOTION\nFrame Time: 0.1\nHIERARCHY\nROOT Hips\n{\n}\n";
        assert_eq!(parse(swapped).unwrap_err(), ParseError::MissingSection(Section::Hierarchy));
    }

    #[test]
    fn test_empty_hierarchy_and_no_frames() {
        assert_eq!(parse("HIERARCHY\nMOTION\n0 0 0\n").unwrap_err(), ParseError::EmptyHierarchy);
        let no_frames = "HIERARCHY\nROOT Hips\n{\nCHANNELS 1 Xrotation\n}\nMOTION\nFrames: 1\nFrame Time: 0.1\nabc\n";
        assert_eq!(parse(no_frames).unwrap_err(), ParseError::NoFrames);
    }

    #[test]
    fn test_invalid_header_lines_are_fatal() {
        let bad_offset = TWO_BONE.replace("OFFSET 0.0 10.0 0.0", "OFFSET 0.0 ten 0.0");
        assert!(matches!(parse(&bad_offset), Err(ParseError::InvalidLine { line: 8, .. })));

        let bad_channel = TWO_BONE.replace("CHANNELS 3 Zrotation", "CHANNELS 3 Wrotation");
        assert!(matches!(parse(&bad_channel), Err(ParseError::InvalidLine { .. })));

        let bad_time = TWO_BONE.replace("Frame Time: 0.1", "Frame Time: 0");
        assert!(matches!(parse(&bad_time), Err(ParseError::InvalidLine { .. })));
    }

    #[test]
    fn test_default_frame_time() {
        let text = TWO_BONE.replace("Frame Time: 0.1\n", "");
        let anim = parse(&text).unwrap();
        assert!((anim.frame_time() - DEFAULT_FRAME_TIME).abs() < 1e-12);

        let anim = BvhParser::new(0.5).parse(&text).unwrap();
        assert!((anim.frames()[1].time - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_multiple_roots_warns_and_keeps_first() {
        let text = "\
HIERARCHY
ROOT Hips
{
CHANNELS 3 Zrotation Xrotation Yrotation
}
ROOT Prop
{
CHANNELS 1 Xposition
}
MOTION
Frame Time: 0.1
1 2 3 4
";
        let anim = parse(text).unwrap();
        assert_eq!(anim.root(), "Hips");
        assert!(matches!(
            anim.warnings().first(),
            Some(ParseWarning::AmbiguousRoot { chosen, candidates }) if chosen == "Hips" && candidates.len() == 2
        ));
    }

    #[test]
    fn test_duplicate_bone_names_are_renamed() {
        let text = "\
HIERARCHY
ROOT Hips
{
CHANNELS 1 Xrotation
JOINT Leg
{
CHANNELS 1 Xrotation
}
JOINT Leg
{
CHANNELS 1 Xrotation
}
}
MOTION
Frame Time: 0.1
1 2 3
";
        let anim = parse(text).unwrap();
        assert_eq!(anim.bone_count(), 3);
        assert_eq!(anim.bone("Hips").unwrap().children, vec!["Leg", "Leg_2"]);
        assert_eq!(anim.channel_value("Leg_2", ChannelKind::XRotation, 0), Some(3.0));

        let twice = "HIERARCHY\nROOT Hips\n{\nCHANNELS 1 Xrotation\nCHANNELS 1 Yrotation\n}\nMOTION\n1 2\n";
        assert!(matches!(parse(twice), Err(ParseError::InvalidLine { line: 5, .. })));
    }

    #[test]
    fn test_renamed_bone_does_not_shadow_existing_name() {
        let text = "\
HIERARCHY
ROOT Hips
{
CHANNELS 1 Xrotation
JOINT Leg
{
CHANNELS 1 Xrotation
}
JOINT Leg_3
{
CHANNELS 1 Xrotation
}
JOINT Leg
{
CHANNELS 1 Xrotation
}
}
MOTION
Frame Time: 0.1
1 2 3 4
";
        let anim = parse(text).unwrap();
        let names: Vec<&str> = anim.bones().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Hips", "Leg", "Leg_3", "Leg_3_1"]);
        assert_eq!(anim.bone("Hips").unwrap().children, vec!["Leg", "Leg_3", "Leg_3_1"]);
        assert_eq!(anim.channel_value("Leg_3", ChannelKind::XRotation, 0), Some(3.0));
        assert_eq!(anim.channel_value("Leg_3_1", ChannelKind::XRotation, 0), Some(4.0));
    }

    #[test]
    fn test_decode_text_strips_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(TWO_BONE.as_bytes());
        let text = decode_text(&bytes);
        assert!(text.starts_with("HIERARCHY"));
        assert_eq!(parse(&text).unwrap().total_frames(), 2);
    }
}
