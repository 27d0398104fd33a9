//! 服务加载入口

use crate::engine::RegistrationEngine;
use crate::observer::Observers;
use crate::session::ScanSession;
use config_abstractions::ConfigurationSource;
use di_abstractions::{
    Describe, InterfaceMatcher, NamingConventionMatcher, ScanObserver, ServiceRegistry,
    TypeCatalog, UnitId,
};
use infrastructure_common::{RegistrationError, RegistrationResult, TypeKey};
use std::sync::Arc;
use tracing::info;

/// 服务加载器
///
/// 持有一个扫描会话，多次加载共享同一会话的跟踪状态；
/// 不同的加载器之间互不影响。
pub struct ServiceLoader<'a> {
    catalog: &'a dyn TypeCatalog,
    configuration: Option<&'a dyn ConfigurationSource>,
    matcher: Box<dyn InterfaceMatcher + 'a>,
    observers: Observers,
    session: ScanSession,
}

impl<'a> ServiceLoader<'a> {
    /// 创建新的服务加载器
    pub fn new(catalog: &'a dyn TypeCatalog) -> Self {
        Self {
            catalog,
            configuration: None,
            matcher: Box::new(NamingConventionMatcher),
            observers: Observers::new(),
            session: ScanSession::new(),
        }
    }

    /// 设置传给模块的配置源
    pub fn with_configuration(mut self, configuration: &'a dyn ConfigurationSource) -> Self {
        self.configuration = Some(configuration);
        self
    }

    /// 设置接口匹配器
    pub fn with_matcher(mut self, matcher: impl InterfaceMatcher + 'a) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    /// 添加扫描观察者
    pub fn with_observer(mut self, observer: Arc<dyn ScanObserver>) -> Self {
        self.observers.add(observer);
        self
    }

    /// 加载一组类型
    pub fn load_types(
        &mut self,
        services: &mut dyn ServiceRegistry,
        types: &[TypeKey],
    ) -> &mut Self {
        info!("加载 {} 个类型", types.len());
        let engine = RegistrationEngine::new(self.catalog)
            .with_configuration(self.configuration)
            .with_matcher(self.matcher.as_ref())
            .with_observer(&self.observers);
        engine.scan_types(services, &mut self.session, types);
        self
    }

    /// 加载单个可描述类型
    pub fn load<T: Describe>(&mut self, services: &mut dyn ServiceRegistry) -> &mut Self {
        self.load_types(services, &[T::type_key()])
    }

    /// 加载定义单元中的全部类型
    pub fn load_unit(
        &mut self,
        services: &mut dyn ServiceRegistry,
        name: &str,
    ) -> RegistrationResult<&mut Self> {
        let unit = UnitId::new(name);
        if self.catalog.unit_types(&unit).is_none() {
            return Err(RegistrationError::UnknownUnit {
                unit: name.to_string(),
            });
        }

        let engine = RegistrationEngine::new(self.catalog)
            .with_configuration(self.configuration)
            .with_matcher(self.matcher.as_ref())
            .with_observer(&self.observers);
        engine.scan_unit(services, &mut self.session, &unit);
        Ok(self)
    }

    /// 当前扫描会话
    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    /// 取出扫描会话
    pub fn into_session(self) -> ScanSession {
        self.session
    }
}

impl std::fmt::Debug for ServiceLoader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceLoader")
            .field("configuration", &self.configuration.map(|c| c.name()))
            .field("observers", &self.observers)
            .field("session", &self.session)
            .finish()
    }
}
