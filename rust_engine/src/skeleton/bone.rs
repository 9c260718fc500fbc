//! 骨骼节点

use glam::Vec3;

/// 关节角度限制（单位：度，按 X/Y/Z 轴）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointLimits {
    pub lower: Vec3,
    pub upper: Vec3,
}

impl JointLimits {
    pub fn new(lower: [f32; 3], upper: [f32; 3]) -> Self {
        Self {
            lower: Vec3::from_array(lower),
            upper: Vec3::from_array(upper),
        }
    }

    /// 把某一轴（0 = X, 1 = Y, 2 = Z）上的角度（弧度）限制在范围内
    ///
    /// 轴号超出范围时原样返回。
    pub fn clamp_axis(&self, axis: usize, radians: f32) -> f32 {
        let (lower, upper) = match (self.lower.to_array().get(axis), self.upper.to_array().get(axis)) {
            (Some(lower), Some(upper)) => (lower.to_radians(), upper.to_radians()),
            _ => return radians,
        };
        if lower > upper {
            return radians;
        }
        radians.clamp(lower, upper)
    }
}

/// 骨骼节点
#[derive(Clone, Debug, PartialEq)]
pub struct Bone {
    pub name: String,
    pub parent: Option<String>,
    /// 子骨骼名称（由 Skeleton 按声明顺序根据父子关系生成）
    pub children: Vec<String>,
    /// 静止姿态下相对父骨骼的偏移
    pub rest_offset: Vec3,
    pub degrees_of_freedom: u32,
    pub limits: Option<JointLimits>,
}

impl Bone {
    /// 创建 3 旋转自由度的骨骼
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            rest_offset: Vec3::ZERO,
            degrees_of_freedom: 3,
            limits: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.rest_offset = offset;
        self
    }

    pub fn with_dof(mut self, degrees_of_freedom: u32) -> Self {
        self.degrees_of_freedom = degrees_of_freedom;
        self
    }

    pub fn with_limits(mut self, limits: JointLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
