//! 应用构建器

use crate::application::{Application, ScanReport};
use config_abstractions::ConfigurationSource;
use config_impl::ConfigurationBuilder;
use di_abstractions::{Describe, InterfaceMatcher, ScanObserver};
use di_impl::{DefiningUnit, RecordingObserver, ServiceCollection, ServiceLoader, UnitCatalog};
use infrastructure_common::{InfrastructureError, TypeKey};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// 加载目标
#[derive(Debug, Clone)]
enum LoadTarget {
    Types(Vec<TypeKey>),
    Unit(String),
}

/// 应用构建器
///
/// 使用建造者模式组装配置源、定义单元与扫描入口，`build` 时执行一次扫描会话。
pub struct ApplicationBuilder {
    /// 分层配置
    configuration: ConfigurationBuilder,
    /// 自定义配置源，设置后忽略分层配置
    custom_configuration: Option<Box<dyn ConfigurationSource>>,
    /// 定义单元
    units: Vec<DefiningUnit>,
    /// 加载目标，按添加顺序执行
    targets: Vec<LoadTarget>,
    /// 接口匹配器
    matcher: Option<Box<dyn InterfaceMatcher>>,
    /// 扫描观察者
    observers: Vec<Arc<dyn ScanObserver>>,
    /// 是否启用日志初始化
    logging_enabled: bool,
    /// 日志配置
    logging_config: LoggingConfig,
}

impl ApplicationBuilder {
    /// 创建新的应用构建器
    pub fn new() -> Self {
        Self {
            configuration: ConfigurationBuilder::new(),
            custom_configuration: None,
            units: Vec::new(),
            targets: Vec::new(),
            matcher: None,
            observers: Vec::new(),
            logging_enabled: false, // 默认不启用日志初始化
            logging_config: LoggingConfig::default(),
        }
    }

    /// 添加 TOML 配置文件
    pub fn add_config_toml<P: AsRef<Path>>(mut self, path: P) -> Result<Self, InfrastructureError> {
        let path = ensure_exists(path.as_ref())?;
        info!("添加 TOML 配置文件: {}", path.display());
        self.configuration = self.configuration.add_toml_file(path, true);
        Ok(self)
    }

    /// 添加 JSON 配置文件
    pub fn add_config_json<P: AsRef<Path>>(mut self, path: P) -> Result<Self, InfrastructureError> {
        let path = ensure_exists(path.as_ref())?;
        info!("添加 JSON 配置文件: {}", path.display());
        self.configuration = self.configuration.add_json_file(path, true);
        Ok(self)
    }

    /// 添加 YAML 配置文件
    pub fn add_config_yaml<P: AsRef<Path>>(mut self, path: P) -> Result<Self, InfrastructureError> {
        let path = ensure_exists(path.as_ref())?;
        info!("添加 YAML 配置文件: {}", path.display());
        self.configuration = self.configuration.add_yaml_file(path, true);
        Ok(self)
    }

    /// 添加可选的 TOML 配置文件，文件不存在时忽略
    pub fn add_optional_config_toml<P: AsRef<Path>>(mut self, path: P) -> Self {
        debug!("添加可选 TOML 配置文件: {}", path.as_ref().display());
        self.configuration = self.configuration.add_toml_file(path.as_ref(), false);
        self
    }

    /// 添加环境变量配置源
    pub fn add_config_env_vars<S: Into<String>>(mut self, prefix: S) -> Self {
        let prefix = prefix.into();
        info!("添加环境变量配置源，前缀: {}", prefix);
        self.configuration = self.configuration.add_environment(prefix);
        self
    }

    /// 使用自定义配置源
    pub fn with_configuration<C>(mut self, configuration: C) -> Self
    where
        C: ConfigurationSource + 'static,
    {
        info!("使用自定义配置源: {}", configuration.name());
        self.custom_configuration = Some(Box::new(configuration));
        self
    }

    /// 添加定义单元
    pub fn add_unit(mut self, unit: DefiningUnit) -> Self {
        debug!("添加定义单元: {}", unit.id());
        self.units.push(unit);
        self
    }

    /// 添加多个定义单元
    pub fn with_units(mut self, units: impl IntoIterator<Item = DefiningUnit>) -> Self {
        self.units.extend(units);
        self
    }

    /// 设置接口匹配器
    pub fn with_matcher<M: InterfaceMatcher + 'static>(mut self, matcher: M) -> Self {
        self.matcher = Some(Box::new(matcher));
        self
    }

    /// 添加扫描观察者
    pub fn with_observer(mut self, observer: Arc<dyn ScanObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// 加载可描述类型
    pub fn load<T: Describe>(self) -> Self {
        self.load_type(T::type_key())
    }

    /// 加载类型
    pub fn load_type(mut self, ty: TypeKey) -> Self {
        match self.targets.last_mut() {
            Some(LoadTarget::Types(types)) => types.push(ty),
            _ => self.targets.push(LoadTarget::Types(vec![ty])),
        }
        self
    }

    /// 加载定义单元
    pub fn load_unit(mut self, name: impl Into<String>) -> Self {
        self.targets.push(LoadTarget::Unit(name.into()));
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = config;
        self.logging_enabled = true; // 启用日志初始化
        self
    }

    /// 构建应用，执行一次扫描会话
    pub fn build(self) -> Result<Application, InfrastructureError> {
        // 只有在明确配置了日志时才初始化日志，避免在测试中重复初始化
        if self.logging_enabled {
            self.initialize_logging()?;
        }

        info!("开始构建应用");

        let configuration: Option<Box<dyn ConfigurationSource>> = match self.custom_configuration {
            Some(configuration) => Some(configuration),
            None if self.configuration.source_count() > 0 => {
                Some(Box::new(self.configuration.build()?) as Box<dyn ConfigurationSource>)
            }
            None => None,
        };

        let catalog = UnitCatalog::from_units(self.units)?;
        info!(
            "类型目录构建完成，共 {} 个定义单元，{} 个类型",
            catalog.units().len(),
            catalog.type_count()
        );

        let recorder = Arc::new(RecordingObserver::new());
        let mut services = ServiceCollection::new();

        let session = {
            let mut loader = ServiceLoader::new(&catalog).with_observer(recorder.clone());
            if let Some(configuration) = configuration.as_deref() {
                loader = loader.with_configuration(configuration);
            }
            if let Some(matcher) = self.matcher {
                loader = loader.with_matcher(move |interface: &TypeKey, implementation: &TypeKey| {
                    matcher.matches(interface, implementation)
                });
            }
            for observer in self.observers {
                loader = loader.with_observer(observer);
            }

            for target in &self.targets {
                match target {
                    LoadTarget::Types(types) => {
                        loader.load_types(&mut services, types);
                    }
                    LoadTarget::Unit(name) => {
                        loader.load_unit(&mut services, name)?;
                    }
                }
            }
            loader.into_session()
        };

        let report = ScanReport {
            events: recorder.events(),
            scanned_units: session.scanned_unit_count(),
            processed_modules: session.configured_module_count(),
        };

        info!(
            "应用构建完成，共 {} 个绑定，{} 个模块",
            services.len(),
            report.processed_modules
        );
        Ok(Application::new(services, configuration, catalog, report))
    }

    /// 初始化日志系统
    fn initialize_logging(&self) -> Result<(), InfrastructureError> {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(self.logging_config.level)
            .with_target(self.logging_config.show_target)
            .with_thread_ids(self.logging_config.show_thread_ids)
            .with_file(self.logging_config.show_file)
            .with_line_number(self.logging_config.show_line_number);

        if self.logging_config.json_format {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        }
        .map_err(|e| InfrastructureError::BootstrapFailed {
            message: format!("日志初始化失败: {}", e),
        })?;

        info!("日志系统初始化完成");
        Ok(())
    }
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_exists(path: &Path) -> Result<&Path, InfrastructureError> {
    if path.exists() {
        Ok(path)
    } else {
        Err(InfrastructureError::BootstrapFailed {
            message: format!("配置文件不存在: {}", path.display()),
        })
    }
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: tracing::Level,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: tracing::Level::DEBUG,
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }
}
