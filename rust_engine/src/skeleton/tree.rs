//! 骨骼树

use std::collections::{HashMap, HashSet, VecDeque};

use crate::animation::CaptureAnimation;
use crate::{MocapError, Result};

use super::Bone;

/// 骨骼树
///
/// 构建后不可变。骨骼按声明顺序保存，另有名称到索引的查找表。
#[derive(Clone, Debug)]
pub struct Skeleton {
    bones: Vec<Bone>,
    name_to_index: HashMap<String, usize>,
    root: String,
    total_dof: u32,
}

impl Skeleton {
    /// 从骨骼列表构建并校验
    ///
    /// 要求：名称唯一、恰好一个根骨骼、父骨骼存在、所有骨骼都能从根到达。
    /// 传入的 `children` 会被忽略，按父子关系重新生成。
    pub fn from_bones(bones: Vec<Bone>) -> Result<Self> {
        let mut names = HashSet::new();
        for bone in &bones {
            if !names.insert(bone.name.as_str()) {
                return Err(MocapError::Skeleton(format!("duplicate bone name '{}'", bone.name)));
            }
        }

        let roots: Vec<&str> = bones
            .iter()
            .filter(|b| b.parent.is_none())
            .map(|b| b.name.as_str())
            .collect();
        let root = match roots.as_slice() {
            [root] => root.to_string(),
            [] => return Err(MocapError::Skeleton("skeleton has no root bone".to_string())),
            many => {
                return Err(MocapError::Skeleton(format!("skeleton has multiple root bones: {:?}", many)))
            }
        };

        for bone in &bones {
            if let Some(parent) = &bone.parent {
                if !names.contains(parent.as_str()) {
                    return Err(MocapError::Skeleton(format!(
                        "bone '{}' references missing parent '{}'",
                        bone.name, parent
                    )));
                }
            }
        }

        let skeleton = Self::assemble(bones, root);

        // 父子关系成环时，环上的骨骼无法从根到达
        let reachable = skeleton.descendants(skeleton.root()).len() + 1;
        if reachable != skeleton.bone_count() {
            return Err(MocapError::Skeleton(format!(
                "{} bones are not reachable from root '{}'",
                skeleton.bone_count() - reachable,
                skeleton.root
            )));
        }

        Ok(skeleton)
    }

    /// 从捕捉动画的骨骼层级构建（自由度 = 通道数）
    pub fn from_capture(animation: &CaptureAnimation) -> Self {
        let bones = animation
            .bones()
            .map(|b| Bone {
                name: b.name.clone(),
                parent: b.parent.clone(),
                children: Vec::new(),
                rest_offset: b.offset,
                degrees_of_freedom: b.channels.len() as u32,
                limits: None,
            })
            .collect();
        Self::assemble(bones, animation.root().to_string())
    }

    /// 组装，不做校验
    pub(crate) fn assemble(mut bones: Vec<Bone>, root: String) -> Self {
        let name_to_index: HashMap<String, usize> = bones
            .iter()
            .enumerate()
            .map(|(i, b)| (b.name.clone(), i))
            .collect();

        for bone in &mut bones {
            bone.children.clear();
        }
        for i in 0..bones.len() {
            let parent_index = bones[i].parent.as_ref().and_then(|p| name_to_index.get(p)).copied();
            if let Some(p) = parent_index {
                let child = bones[i].name.clone();
                bones[p].children.push(child);
            }
        }

        let total_dof = bones.iter().map(|b| b.degrees_of_freedom).sum();
        Self {
            bones,
            name_to_index,
            root,
            total_dof,
        }
    }

    /// 通过名称查找骨骼
    pub fn get(&self, name: &str) -> Option<&Bone> {
        self.name_to_index.get(name).map(|&i| &self.bones[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_to_index.contains_key(name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// 按声明顺序遍历
    pub fn bones(&self) -> impl Iterator<Item = &Bone> {
        self.bones.iter()
    }

    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// 所有骨骼自由度之和
    pub fn total_dof(&self) -> u32 {
        self.total_dof
    }

    /// 父子关节对（父, 子），根骨骼不产生关节
    pub fn joint_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bones
            .iter()
            .filter_map(|b| b.parent.as_deref().map(|p| (p, b.name.as_str())))
    }

    /// 广度优先列出某骨骼的全部后代（不含自身）
    pub fn descendants(&self, name: &str) -> Vec<&str> {
        let mut out = Vec::new();
        let mut visited = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        if let Some(bone) = self.get(name) {
            visited.insert(bone.name.as_str());
            queue.extend(bone.children.iter().map(String::as_str));
        }
        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            out.push(current);
            if let Some(bone) = self.get(current) {
                queue.extend(bone.children.iter().map(String::as_str));
            }
        }
        out
    }
}
