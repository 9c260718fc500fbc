//! 骨骼名称重定向表

use std::collections::HashMap;

use super::conventions::STANDARD_CONVENTIONS;

/// 一种命名约定：源骨骼名 → 规范关节名
#[derive(Clone, Debug)]
pub struct Convention {
    name: String,
    /// 保持声明顺序，反查时结果稳定
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Convention {
    /// 同一源名称出现多次时以第一次为准
    pub fn new<I, S, C>(name: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, C)>,
        S: Into<String>,
        C: Into<String>,
    {
        let mut entries = Vec::new();
        let mut index = HashMap::new();
        for (source, canonical) in pairs {
            let source = source.into();
            if index.contains_key(&source) {
                continue;
            }
            index.insert(source.clone(), entries.len());
            entries.push((source, canonical.into()));
        }
        Self {
            name: name.into(),
            entries,
            index,
        }
    }

    pub fn from_table(name: impl Into<String>, table: &[(&str, &str)]) -> Self {
        Self::new(name, table.iter().copied())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lookup(&self, source: &str) -> Option<&str> {
        self.index.get(source).map(|&i| self.entries[i].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 命名约定匹配结果
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub canonical: &'a str,
    /// 命中的约定名称
    pub convention: &'a str,
}

/// 重定向表
///
/// 按声明顺序依次查询各约定，都没有命中时回退为小写的源名称。
/// 纯函数，不持有可变状态。
#[derive(Clone, Debug)]
pub struct RetargetMap {
    conventions: Vec<Convention>,
}

impl Default for RetargetMap {
    /// 规范名、解剖学命名、CC_Base、零散别名
    fn default() -> Self {
        Self {
            conventions: STANDARD_CONVENTIONS.clone(),
        }
    }
}

impl RetargetMap {
    /// 不含任何约定，所有名称都走小写回退
    pub fn empty() -> Self {
        Self { conventions: Vec::new() }
    }

    /// 追加一种约定，优先级低于已有约定
    pub fn with_convention(mut self, convention: Convention) -> Self {
        self.conventions.push(convention);
        self
    }

    pub fn conventions(&self) -> &[Convention] {
        &self.conventions
    }

    /// 查找源名称对应的规范名，只看约定表，不做回退
    pub fn resolve(&self, source: &str) -> Option<Resolution<'_>> {
        self.conventions.iter().find_map(|c| {
            c.lookup(source).map(|canonical| Resolution {
                canonical,
                convention: c.name(),
            })
        })
    }

    /// 规范名称，未命中时为 `source.to_lowercase()`
    pub fn canonical_name(&self, source: &str) -> String {
        match self.resolve(source) {
            Some(resolution) => resolution.canonical.to_string(),
            None => source.to_lowercase(),
        }
    }

    /// 所有已知的源名称写法，按约定优先级排列
    pub fn source_names(&self, canonical: &str) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for convention in &self.conventions {
            for (source, mapped) in &convention.entries {
                if mapped == canonical && !names.contains(&source.as_str()) {
                    names.push(source);
                }
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convention_lookup() {
        let map = RetargetMap::default();
        assert_eq!(map.canonical_name("LeftUpLeg"), "leftUpperLeg");
        assert_eq!(map.canonical_name("LeftForeArm"), "leftLowerArm");
        assert_eq!(map.canonical_name("CC_Base_L_Thigh"), "leftUpperLeg");
        assert_eq!(map.canonical_name("CC_Base_L_Forearm"), "leftLowerArm");
        assert_eq!(map.canonical_name("LeftShin"), "leftLowerLeg");
        assert_eq!(map.canonical_name("leftUpperArm"), "leftUpperArm");
    }

    #[test]
    fn test_fallback_is_lowercase() {
        let map = RetargetMap::default();
        assert_eq!(map.canonical_name("LeftHandIndex1"), "lefthandindex1");
        assert_eq!(map.canonical_name("CC_Base_L_Toe"), "cc_base_l_toe");
        assert_eq!(RetargetMap::empty().canonical_name("Hips"), "hips");
    }

    #[test]
    fn test_canonical_name_is_deterministic() {
        let map = RetargetMap::default();
        for name in ["Hips", "Spine1", "unknown_Bone", "", "CC_Base_Pelvis"] {
            assert_eq!(map.canonical_name(name), map.canonical_name(name));
            assert_eq!(map.canonical_name(name), RetargetMap::default().canonical_name(name));
        }
    }

    #[test]
    fn test_resolve_reports_convention() {
        let map = RetargetMap::default();
        let r = map.resolve("CC_Base_R_Calf").unwrap();
        assert_eq!(r.canonical, "rightLowerLeg");
        assert_eq!(r.convention, "cc_base");
        assert_eq!(map.resolve("hips").unwrap().convention, "canonical");
        assert!(map.resolve("Tail").is_none());
    }

    #[test]
    fn test_priority_order() {
        // 后追加的约定不能覆盖已有映射
        let custom = Convention::from_table("custom", &[("Hips", "spine"), ("Tail", "tail")]);
        let map = RetargetMap::default().with_convention(custom);
        assert_eq!(map.canonical_name("Hips"), "hips");
        assert_eq!(map.canonical_name("Tail"), "tail");
        assert_eq!(map.resolve("Tail").unwrap().convention, "custom");
    }

    #[test]
    fn test_source_names_many_to_one() {
        let map = RetargetMap::default();
        assert_eq!(
            map.source_names("hips"),
            vec!["hips", "Hips", "CC_Base_Hip", "CC_Base_Pelvis", "pelvis", "root"]
        );
        assert_eq!(map.source_names("chest"), vec!["chest", "Spine1", "Chest", "CC_Base_Spine02", "upperChest"]);
        assert!(map.source_names("tail").is_empty());
    }

    #[test]
    fn test_convention_first_entry_wins() {
        let c = Convention::from_table("dup", &[("A", "hips"), ("A", "spine")]);
        assert_eq!(c.len(), 1);
        assert_eq!(c.lookup("A"), Some("hips"));
    }
}
