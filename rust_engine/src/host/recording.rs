//! 内存宿主
//!
//! 不连接任何仿真，只记录最近一次收到的根姿态和关节目标。
//! 用于无界面运行和测试。

use std::collections::BTreeMap;

use crate::skeleton::RootPose;

use super::{HostCapabilities, HostControlAdapter};

#[derive(Clone, Debug, Default)]
pub struct RecordingHost {
    capabilities: HostCapabilities,
    joint_names: Vec<String>,
    /// 最近一次的根姿态
    pub root_pose: Option<RootPose>,
    /// 最近一次按名称收到的关节目标
    pub named_targets: BTreeMap<String, f32>,
    /// 最近一次按索引收到的关节目标
    pub indexed_targets: BTreeMap<usize, f32>,
    /// 收到的根姿态次数
    pub frames_applied: usize,
}

impl RecordingHost {
    /// 按名称控制关节
    pub fn by_name() -> Self {
        Self {
            capabilities: HostCapabilities::BY_NAME,
            ..Self::default()
        }
    }

    /// 按索引控制关节，`joint_names` 的位置即索引
    pub fn by_index<I, S>(joint_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            capabilities: HostCapabilities::BY_INDEX,
            joint_names: joint_names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// 只接收根姿态
    pub fn root_only() -> Self {
        Self::default()
    }

    pub fn with_capabilities(mut self, capabilities: HostCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }
}

impl HostControlAdapter for RecordingHost {
    fn capabilities(&self) -> HostCapabilities {
        self.capabilities
    }

    fn joint_names(&self) -> Vec<String> {
        self.joint_names.clone()
    }

    fn set_root_pose(&mut self, pose: &RootPose) {
        self.root_pose = Some(*pose);
        self.frames_applied += 1;
    }

    fn set_joint_targets(&mut self, targets: &[(&str, f32)]) {
        self.named_targets = targets.iter().map(|&(name, angle)| (name.to_string(), angle)).collect();
    }

    fn set_joint_targets_by_index(&mut self, targets: &[(usize, f32)]) {
        self.indexed_targets = targets.iter().copied().collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_records_latest_values() {
        let mut host = RecordingHost::by_name();
        host.set_root_pose(&RootPose::default());
        host.set_joint_targets(&[("leftLowerLeg", 0.5), ("rightLowerLeg", -0.25)]);
        host.set_joint_targets(&[("leftLowerLeg", 0.1)]);
        let pose = RootPose::default().translated(Vec3::Z);
        host.set_root_pose(&pose);

        assert_eq!(host.frames_applied, 2);
        assert_eq!(host.root_pose, Some(pose));
        assert_eq!(host.named_targets.len(), 1);
        assert!((host.named_targets["leftLowerLeg"] - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_by_index_exposes_names() {
        let host = RecordingHost::by_index(["hips", "spine"]);
        assert_eq!(host.joint_names(), vec!["hips".to_string(), "spine".to_string()]);
        assert!(host.capabilities().joints_by_index);
        assert!(!RecordingHost::root_only().capabilities().joints_by_name);
    }
}
