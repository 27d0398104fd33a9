//! 接口匹配规则

use infrastructure_common::TypeKey;

/// 接口匹配器
///
/// 在服务声明未指定服务类型时，决定实现类型应绑定到哪个接口。
pub trait InterfaceMatcher: Send + Sync {
    /// 接口是否与实现类型匹配
    fn matches(&self, interface: &TypeKey, implementation: &TypeKey) -> bool;
}

impl<F> InterfaceMatcher for F
where
    F: Fn(&TypeKey, &TypeKey) -> bool + Send + Sync,
{
    fn matches(&self, interface: &TypeKey, implementation: &TypeKey) -> bool {
        self(interface, implementation)
    }
}

/// 命名约定匹配器
///
/// 接口简称去掉一个前导 `I` 后，如果是实现类型简称的子串则匹配，
/// 例如 `IHello` 匹配 `Hello` 与 `TransitHello`。
#[derive(Debug, Clone, Copy, Default)]
pub struct NamingConventionMatcher;

impl InterfaceMatcher for NamingConventionMatcher {
    fn matches(&self, interface: &TypeKey, implementation: &TypeKey) -> bool {
        let interface_name = interface.short_name();
        let stem = interface_name.strip_prefix('I').unwrap_or(interface_name);
        implementation.short_name().contains(stem)
    }
}
