//! 扫描会话

use di_abstractions::UnitId;
use infrastructure_common::TypeKey;
use std::collections::HashSet;

/// 扫描会话
///
/// 记录本次会话中已扫描的定义单元和已配置的模块。
/// 标记总是在扫描或配置之前进行，因此循环依赖会终止，失败的模块不会重试。
#[derive(Debug, Default, Clone)]
pub struct ScanSession {
    scanned_units: HashSet<UnitId>,
    configured_modules: HashSet<TypeKey>,
}

impl ScanSession {
    /// 创建新的扫描会话
    pub fn new() -> Self {
        Self::default()
    }

    /// 标记定义单元，首次标记时返回 `true`
    pub fn mark_unit(&mut self, unit: &UnitId) -> bool {
        if self.scanned_units.contains(unit) {
            return false;
        }
        self.scanned_units.insert(unit.clone())
    }

    /// 标记模块，首次标记时返回 `true`
    pub fn mark_module(&mut self, module: TypeKey) -> bool {
        self.configured_modules.insert(module)
    }

    /// 模块是否已配置（包括配置失败的模块）
    pub fn is_module_configured(&self, module: &TypeKey) -> bool {
        self.configured_modules.contains(module)
    }

    /// 已扫描的定义单元数量
    pub fn scanned_unit_count(&self) -> usize {
        self.scanned_units.len()
    }

    /// 已配置的模块数量
    pub fn configured_module_count(&self) -> usize {
        self.configured_modules.len()
    }

    /// 已扫描的定义单元
    pub fn scanned_units(&self) -> impl Iterator<Item = &UnitId> {
        self.scanned_units.iter()
    }
}
