//! 扫描观察者

use crate::catalog::UnitId;
use crate::registry::Binding;
use infrastructure_common::{ModuleError, TypeKey};
use std::fmt;

/// 类型被跳过的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// 目录中没有该类型
    Unknown,
    /// 接口
    Interface,
    /// 抽象类型
    Abstract,
    /// 非公开类型
    NotPublic,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Unknown => "未知类型",
            Self::Interface => "接口",
            Self::Abstract => "抽象类型",
            Self::NotPublic => "非公开类型",
        };
        f.write_str(text)
    }
}

/// 扫描观察者 trait
///
/// 所有方法都有空的默认实现，按需覆盖。
pub trait ScanObserver: Send + Sync {
    /// 定义单元开始扫描
    fn unit_scanned(&self, _unit: &UnitId) {}

    /// 类型被跳过
    fn type_skipped(&self, _ty: &TypeKey, _reason: SkipReason) {}

    /// 新增了绑定
    fn binding_added(&self, _binding: &Binding) {}

    /// 模块配置完成
    fn module_configured(&self, _module: &TypeKey) {}

    /// 模块创建或配置失败
    fn module_failed(&self, _module: &TypeKey, _error: &ModuleError) {}

    /// 依赖的类型不在目录中
    fn dependency_unresolved(&self, _dependent: &TypeKey, _dependency: &TypeKey) {}
}
