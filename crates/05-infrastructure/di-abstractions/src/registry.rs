//! 服务注册表抽象接口

use crate::options::OptionsStore;
use infrastructure_common::{Lifetime, TypeKey};
use std::fmt;

/// 服务绑定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Binding {
    /// 服务类型
    pub service_type: TypeKey,
    /// 实现类型
    pub implementation_type: TypeKey,
    /// 生命周期
    pub lifetime: Lifetime,
}

impl Binding {
    /// 创建服务绑定
    pub fn new(service_type: TypeKey, implementation_type: TypeKey, lifetime: Lifetime) -> Self {
        Self {
            service_type,
            implementation_type,
            lifetime,
        }
    }

    /// 服务类型与实现类型是否与给定的一致
    pub fn is_pair(&self, service_type: &TypeKey, implementation_type: &TypeKey) -> bool {
        self.service_type == *service_type && self.implementation_type == *implementation_type
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({})",
            self.service_type.short_name(),
            self.implementation_type.short_name(),
            self.lifetime
        )
    }
}

/// 服务注册表 trait
///
/// 外部容器的绑定存储。自动注册只通过 [`ServiceRegistry::try_add`] 写入绑定。
pub trait ServiceRegistry: Send {
    /// 无条件添加绑定
    fn add(&mut self, binding: Binding);

    /// 所有已注册的绑定，按注册顺序
    fn bindings(&self) -> &[Binding];

    /// 配置选项存储
    fn options(&self) -> &OptionsStore;

    /// 可变的配置选项存储
    fn options_mut(&mut self) -> &mut OptionsStore;

    /// 是否已存在相同服务类型与实现类型的绑定
    fn contains(&self, service_type: &TypeKey, implementation_type: &TypeKey) -> bool {
        self.bindings()
            .iter()
            .any(|binding| binding.is_pair(service_type, implementation_type))
    }

    /// 仅在不存在相同绑定时添加，返回是否添加
    ///
    /// 判断重复时不考虑生命周期。
    fn try_add(
        &mut self,
        service_type: TypeKey,
        implementation_type: TypeKey,
        lifetime: Lifetime,
    ) -> bool {
        if self.contains(&service_type, &implementation_type) {
            return false;
        }
        self.add(Binding::new(service_type, implementation_type, lifetime));
        true
    }
}
