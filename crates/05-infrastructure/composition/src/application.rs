//! 组装完成的应用

use config_abstractions::ConfigurationSource;
use di_abstractions::{Binding, ServiceRegistry, SkipReason};
use di_impl::{ScanEvent, ServiceCollection, UnitCatalog};
use infrastructure_common::TypeKey;

/// 扫描报告
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// 扫描过程中记录的事件
    pub events: Vec<ScanEvent>,
    /// 已扫描的定义单元数量
    pub scanned_units: usize,
    /// 已处理的模块数量（包括失败的模块）
    pub processed_modules: usize,
}

impl ScanReport {
    /// 新增的绑定
    pub fn bindings_added(&self) -> Vec<Binding> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ScanEvent::BindingAdded(binding) => Some(*binding),
                _ => None,
            })
            .collect()
    }

    /// 配置失败的模块及错误信息
    pub fn failed_modules(&self) -> Vec<(TypeKey, String)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ScanEvent::ModuleFailed { module, message } => Some((*module, message.clone())),
                _ => None,
            })
            .collect()
    }

    /// 被跳过的类型
    pub fn skipped_types(&self) -> Vec<(TypeKey, SkipReason)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ScanEvent::TypeSkipped(ty, reason) => Some((*ty, *reason)),
                _ => None,
            })
            .collect()
    }

    /// 是否有模块失败或依赖无法解析
    pub fn has_failures(&self) -> bool {
        self.events.iter().any(|event| {
            matches!(
                event,
                ScanEvent::ModuleFailed { .. } | ScanEvent::DependencyUnresolved { .. }
            )
        })
    }
}

/// 应用
///
/// 持有扫描结果：服务集合、配置源、类型目录与扫描报告。
pub struct Application {
    services: ServiceCollection,
    configuration: Option<Box<dyn ConfigurationSource>>,
    catalog: UnitCatalog,
    report: ScanReport,
}

impl Application {
    pub(crate) fn new(
        services: ServiceCollection,
        configuration: Option<Box<dyn ConfigurationSource>>,
        catalog: UnitCatalog,
        report: ScanReport,
    ) -> Self {
        Self {
            services,
            configuration,
            catalog,
            report,
        }
    }

    /// 服务集合
    pub fn services(&self) -> &ServiceCollection {
        &self.services
    }

    /// 取出服务集合
    pub fn into_services(self) -> ServiceCollection {
        self.services
    }

    /// 配置源
    pub fn configuration(&self) -> Option<&dyn ConfigurationSource> {
        self.configuration.as_deref()
    }

    /// 类型目录
    pub fn catalog(&self) -> &UnitCatalog {
        &self.catalog
    }

    /// 扫描报告
    pub fn report(&self) -> &ScanReport {
        &self.report
    }

    /// 读取模块写入的配置选项
    pub fn options<T: 'static>(&self) -> Option<&T> {
        self.services.options().get::<T>()
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("services", &self.services)
            .field("configuration", &self.configuration.as_ref().map(|c| c.name()))
            .field("catalog", &self.catalog.units())
            .field("report", &self.report)
            .finish()
    }
}
