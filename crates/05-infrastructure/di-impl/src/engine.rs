//! 注册引擎
//!
//! 根据类型上的声明生成绑定、递归扫描被依赖类型所在的定义单元并配置模块。

use crate::observer::NoopObserver;
use crate::session::ScanSession;
use config_abstractions::ConfigurationSource;
use di_abstractions::{
    Binding, InterfaceMatcher, ModuleFactory, NamingConventionMatcher, ScanObserver,
    ServiceDeclaration, ServiceRegistry, SkipReason, TypeCatalog, TypeDescriptor, TypeKind,
    UnitId,
};
use infrastructure_common::{Lifetime, ModuleError, TypeKey};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, warn};

/// 注册引擎
///
/// 引擎本身不持有状态，跟踪信息保存在调用方传入的 [`ScanSession`] 中。
#[derive(Clone, Copy)]
pub struct RegistrationEngine<'a> {
    catalog: &'a dyn TypeCatalog,
    configuration: Option<&'a dyn ConfigurationSource>,
    matcher: &'a dyn InterfaceMatcher,
    observer: &'a dyn ScanObserver,
}

impl<'a> RegistrationEngine<'a> {
    /// 创建新的注册引擎，使用命名约定匹配器
    pub fn new(catalog: &'a dyn TypeCatalog) -> Self {
        Self {
            catalog,
            configuration: None,
            matcher: &NamingConventionMatcher,
            observer: &NoopObserver,
        }
    }

    /// 设置传给模块的配置源
    pub fn with_configuration(
        mut self,
        configuration: Option<&'a dyn ConfigurationSource>,
    ) -> Self {
        self.configuration = configuration;
        self
    }

    /// 设置接口匹配器
    pub fn with_matcher(mut self, matcher: &'a dyn InterfaceMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// 设置扫描观察者
    pub fn with_observer(mut self, observer: &'a dyn ScanObserver) -> Self {
        self.observer = observer;
        self
    }

    /// 扫描一组类型
    pub fn scan_types(
        &self,
        services: &mut dyn ServiceRegistry,
        session: &mut ScanSession,
        types: &[TypeKey],
    ) {
        for ty in types {
            self.scan_type(services, session, ty);
        }
    }

    /// 扫描定义单元中的全部类型，同一会话中每个单元只扫描一次
    pub fn scan_unit(
        &self,
        services: &mut dyn ServiceRegistry,
        session: &mut ScanSession,
        unit: &UnitId,
    ) {
        if !session.mark_unit(unit) {
            debug!("定义单元已扫描，跳过: {}", unit);
            return;
        }

        let Some(types) = self.catalog.unit_types(unit) else {
            warn!("定义单元不在目录中: {}", unit);
            return;
        };

        info!("开始扫描定义单元: {} ({} 个类型)", unit, types.len());
        self.observer.unit_scanned(unit);
        self.scan_types(services, session, types);
        info!("定义单元扫描完成: {}", unit);
    }

    fn scan_type(
        &self,
        services: &mut dyn ServiceRegistry,
        session: &mut ScanSession,
        ty: &TypeKey,
    ) {
        let Some(descriptor) = self.catalog.descriptor(ty) else {
            self.skip(ty, SkipReason::Unknown);
            return;
        };
        if let Some(reason) = skip_reason(descriptor) {
            self.skip(ty, reason);
            return;
        }

        let service = self.catalog.effective_service(ty);
        let dependencies = self.catalog.effective_dependencies(ty);

        match service {
            Some(declaration) if declaration.ignored => {
                debug!("类型已声明忽略: {}", ty);
            }
            Some(declaration) => self.register_service(services, ty, &declaration),
            None => {}
        }

        if let Some(dependencies) = dependencies {
            for dependency in &dependencies.depended_types {
                match self.catalog.unit_of(dependency) {
                    Some(unit) => self.scan_unit(services, session, unit),
                    None => {
                        warn!("依赖的类型不在目录中: {} -> {}", ty, dependency);
                        self.observer.dependency_unresolved(ty, dependency);
                    }
                }
            }
        }

        if let Some(factory) = descriptor.factory() {
            if session.mark_module(*ty) {
                self.configure_module(services, ty, factory);
            }
        }
    }

    fn register_service(
        &self,
        services: &mut dyn ServiceRegistry,
        implementation: &TypeKey,
        declaration: &ServiceDeclaration,
    ) {
        let lifetime = declaration.lifetime;

        if let Some(service_type) = declaration.service_type {
            self.add_binding(services, service_type, *implementation, lifetime);
            return;
        }

        let interfaces = self.catalog.interfaces(implementation);
        if let Some(interface) = interfaces
            .iter()
            .find(|interface| self.matcher.matches(interface, implementation))
        {
            let service_type = interface.generic_definition().unwrap_or(*interface);
            self.add_binding(services, service_type, *implementation, lifetime);
        }
        self.add_binding(services, *implementation, *implementation, lifetime);
    }

    fn add_binding(
        &self,
        services: &mut dyn ServiceRegistry,
        service_type: TypeKey,
        implementation_type: TypeKey,
        lifetime: Lifetime,
    ) {
        let binding = Binding::new(service_type, implementation_type, lifetime);
        if services.try_add(service_type, implementation_type, lifetime) {
            debug!("添加绑定: {}", binding);
            self.observer.binding_added(&binding);
        } else {
            debug!("绑定已存在，跳过: {}", binding);
        }
    }

    fn configure_module(
        &self,
        services: &mut dyn ServiceRegistry,
        module: &TypeKey,
        factory: &ModuleFactory,
    ) {
        debug!("配置模块: {}", module);

        let configuration = self.configuration;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| -> Result<(), ModuleError> {
            let instance = (**factory)()?;
            instance.configure(services, configuration)
        }));

        let result = outcome.unwrap_or_else(|payload| {
            Err(ModuleError::Panicked {
                type_name: module.name().to_string(),
                message: panic_message(payload.as_ref()),
            })
        });

        match result {
            Ok(()) => {
                info!("模块配置完成: {}", module.short_name());
                self.observer.module_configured(module);
            }
            Err(error) => {
                warn!("模块配置失败: {}, 错误: {}", module, error);
                self.observer.module_failed(module, &error);
            }
        }
    }

    fn skip(&self, ty: &TypeKey, reason: SkipReason) {
        debug!("跳过类型: {} ({})", ty, reason);
        self.observer.type_skipped(ty, reason);
    }
}

/// 只有公开的具体类型参与注册
fn skip_reason(descriptor: &TypeDescriptor) -> Option<SkipReason> {
    if descriptor.kind() == TypeKind::Interface {
        Some(SkipReason::Interface)
    } else if descriptor.is_abstract() {
        Some(SkipReason::Abstract)
    } else if !descriptor.is_public() {
        Some(SkipReason::NotPublic)
    } else {
        None
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "未知 panic".to_string()
    }
}
