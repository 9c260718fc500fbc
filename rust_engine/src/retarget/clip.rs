//! 整段动作重命名
//!
//! 把捕捉动画的骨骼名、父子关系统一换成规范名。通道布局和帧数据不变。

use std::collections::HashSet;

use crate::animation::{unique_name, CaptureAnimation, CaptureBone};

use super::RetargetMap;

/// 使用规范骨骼名的捕捉动画
#[derive(Clone, Debug)]
pub struct RetargetedClip {
    animation: CaptureAnimation,
    /// (源名称, 新名称)，按骨骼声明顺序
    renamed: Vec<(String, String)>,
    /// 规范名已被更早的骨骼占用，保留了源名称的骨骼
    collisions: Vec<String>,
}

impl RetargetedClip {
    /// 多个源骨骼映射到同一规范名时，第一个占用该名称，其余保留源名称
    pub fn from_capture(animation: &CaptureAnimation, map: &RetargetMap) -> Self {
        let mut taken: HashSet<String> = HashSet::new();
        let mut renamed = Vec::with_capacity(animation.bone_count());
        let mut collisions = Vec::new();

        for (index, bone) in animation.bones().enumerate() {
            let canonical = map.canonical_name(&bone.name);
            let name = if taken.contains(&canonical) {
                collisions.push(bone.name.clone());
                if taken.contains(&bone.name) {
                    unique_name(&bone.name, index, |n| taken.contains(n))
                } else {
                    bone.name.clone()
                }
            } else {
                canonical
            };
            taken.insert(name.clone());
            renamed.push((bone.name.clone(), name));
        }

        if !collisions.is_empty() {
            log::warn!("重定向时多个骨骼映射到同一名称，保留源名称: {:?}", collisions);
        }

        let lookup = |source: &str| -> String {
            renamed
                .iter()
                .find(|(s, _)| s == source)
                .map(|(_, n)| n.clone())
                .unwrap_or_else(|| source.to_string())
        };

        let bones: Vec<CaptureBone> = animation
            .bones()
            .zip(&renamed)
            .map(|(bone, (_, name))| CaptureBone {
                name: name.clone(),
                parent: bone.parent.as_deref().map(&lookup),
                children: bone.children.iter().map(|c| lookup(c)).collect(),
                offset: bone.offset,
                channels: bone.channels.clone(),
                channel_start_index: bone.channel_start_index,
            })
            .collect();

        let root = lookup(animation.root());
        let animation = CaptureAnimation::assemble(
            bones,
            root,
            animation.frames().to_vec(),
            animation.frame_time(),
            animation.declared_frame_count(),
            animation.warnings().to_vec(),
        );

        Self {
            animation,
            renamed,
            collisions,
        }
    }

    pub fn animation(&self) -> &CaptureAnimation {
        &self.animation
    }

    pub fn into_animation(self) -> CaptureAnimation {
        self.animation
    }

    /// 新名称对应的源骨骼名
    pub fn source_name(&self, name: &str) -> Option<&str> {
        self.renamed
            .iter()
            .find(|(_, n)| n == name)
            .map(|(s, _)| s.as_str())
    }

    pub fn collisions(&self) -> &[String] {
        &self.collisions
    }
}
