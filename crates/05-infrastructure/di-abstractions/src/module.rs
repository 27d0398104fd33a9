//! 模块抽象

use crate::registry::ServiceRegistry;
use config_abstractions::ConfigurationSource;
use infrastructure_common::ModuleError;

/// 配置模块
///
/// 模块在扫描过程中被创建一次、调用一次 `configure` 后丢弃，
/// 用于向注册表写入配置选项或额外的绑定。
pub trait Module: Send + Sync {
    /// 配置服务
    fn configure(
        &self,
        services: &mut dyn ServiceRegistry,
        configuration: Option<&dyn ConfigurationSource>,
    ) -> Result<(), ModuleError>;
}
