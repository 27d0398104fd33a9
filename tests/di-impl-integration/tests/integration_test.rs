//! di-impl 集成测试：定义单元、依赖展开、模块配置与去重

use config_abstractions::ConfigurationSource;
use config_impl::MemoryConfiguration;
use di_abstractions::{
    Binding, Describe, Lifetime, Module, ServiceDeclaration, ServiceRegistry, TypeDescriptor,
    TypeKey,
};
use di_impl::{
    DefiningUnit, RecordingObserver, ScanEvent, ServiceCollection, ServiceLoader, UnitCatalog,
};
use infrastructure_common::{ModuleError, RegistrationError};
use serde::Deserialize;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ---- 第一个功能单元 ----

trait IHello {}
trait IGreeter {}

struct Hello;
struct IgnoredHello;
struct TransitHello;
struct PlainService;

#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(default)]
struct Option1 {
    value: String,
}

#[derive(Default)]
struct Module1;

impl Module for Module1 {
    fn configure(
        &self,
        services: &mut dyn ServiceRegistry,
        configuration: Option<&dyn ConfigurationSource>,
    ) -> Result<(), ModuleError> {
        match configuration {
            Some(configuration) => services
                .options_mut()
                .bind_or_default::<Option1>(&configuration.get_section("Module1:Option1"))?,
            None => services.options_mut().configure::<Option1>(|o| o.value.clear()),
        }
        Ok(())
    }
}

impl Describe for Module1 {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::class::<Self>().module::<Self>()
    }
}

fn module1_unit() -> DefiningUnit {
    DefiningUnit::new("module1")
        .with_descriptor(TypeDescriptor::interface::<dyn IHello>())
        .with_descriptor(
            TypeDescriptor::class::<Hello>()
                .implements::<dyn IHello>()
                .service(ServiceDeclaration::scoped()),
        )
        .with_descriptor(
            TypeDescriptor::class::<IgnoredHello>()
                .extends::<Hello>()
                .service(ServiceDeclaration::ignored()),
        )
        .with_descriptor(
            TypeDescriptor::class::<TransitHello>()
                .extends::<Hello>()
                .service(ServiceDeclaration::transient()),
        )
        .with_descriptor(
            TypeDescriptor::class::<PlainService>()
                .implements::<dyn IGreeter>()
                .service(ServiceDeclaration::singleton()),
        )
        .with_type::<Module1>()
}

// ---- 第二个功能单元 ----

trait IWorld {}

struct World;

#[derive(Default)]
struct Module2;

impl Module for Module2 {
    fn configure(
        &self,
        services: &mut dyn ServiceRegistry,
        _configuration: Option<&dyn ConfigurationSource>,
    ) -> Result<(), ModuleError> {
        services.try_add(
            TypeKey::of::<World>(),
            TypeKey::of::<World>(),
            Lifetime::Singleton,
        );
        Ok(())
    }
}

fn module2_unit() -> DefiningUnit {
    DefiningUnit::new("module2")
        .with_descriptor(
            TypeDescriptor::class::<World>()
                .implements::<dyn IWorld>()
                .service(ServiceDeclaration::for_service(TypeKey::of::<dyn IWorld>())),
        )
        .with_descriptor(TypeDescriptor::class::<Module2>().module::<Module2>())
}

// ---- 入口单元 ----

#[derive(Default)]
struct ApiModule;

impl Module for ApiModule {
    fn configure(
        &self,
        _services: &mut dyn ServiceRegistry,
        _configuration: Option<&dyn ConfigurationSource>,
    ) -> Result<(), ModuleError> {
        Ok(())
    }
}

fn api_unit() -> DefiningUnit {
    DefiningUnit::new("api").with_descriptor(
        TypeDescriptor::class::<ApiModule>()
            .module::<ApiModule>()
            .depends_on([TypeKey::of::<Module1>(), TypeKey::of::<Module2>()]),
    )
}

fn sample_catalog() -> UnitCatalog {
    UnitCatalog::from_units([module1_unit(), module2_unit(), api_unit()]).unwrap()
}

fn bindings_of<T: 'static>(services: &ServiceCollection) -> Vec<Binding> {
    services.bindings_of(TypeKey::of::<T>()).copied().collect()
}

#[test]
fn test_full_sample_scan() -> anyhow::Result<()> {
    let catalog = sample_catalog();
    let observer = Arc::new(RecordingObserver::new());
    let mut services = ServiceCollection::new();

    let mut loader = ServiceLoader::new(&catalog).with_observer(observer.clone());
    loader.load_unit(&mut services, "api")?;

    let hello = TypeKey::of::<Hello>();
    let world = TypeKey::of::<World>();
    assert_eq!(
        bindings_of::<Hello>(&services),
        vec![
            Binding::new(TypeKey::of::<dyn IHello>(), hello, Lifetime::Scoped),
            Binding::new(hello, hello, Lifetime::Scoped),
        ]
    );
    assert_eq!(
        bindings_of::<World>(&services),
        vec![
            Binding::new(TypeKey::of::<dyn IWorld>(), world, Lifetime::Transient),
            Binding::new(world, world, Lifetime::Singleton),
        ]
    );
    assert!(bindings_of::<IgnoredHello>(&services).is_empty());

    assert_eq!(
        observer.configured_modules(),
        vec![
            TypeKey::of::<Module1>(),
            TypeKey::of::<Module2>(),
            TypeKey::of::<ApiModule>()
        ]
    );
    assert_eq!(loader.session().scanned_unit_count(), 3);
    assert_eq!(services.options().get::<Option1>(), Some(&Option1::default()));
    Ok(())
}

#[test]
fn test_inherited_interface_with_own_lifetime() {
    let catalog = sample_catalog();
    let mut services = ServiceCollection::new();
    services.load_from(&catalog, &[TypeKey::of::<TransitHello>()], None);

    let transit = TypeKey::of::<TransitHello>();
    assert_eq!(
        services.bindings(),
        &[
            Binding::new(TypeKey::of::<dyn IHello>(), transit, Lifetime::Transient),
            Binding::new(transit, transit, Lifetime::Transient),
        ]
    );
}

#[test]
fn test_no_matching_interface_binds_self_only() {
    let catalog = sample_catalog();
    let mut services = ServiceCollection::new();
    services.load_from(&catalog, &[TypeKey::of::<PlainService>()], None);

    let plain = TypeKey::of::<PlainService>();
    assert_eq!(
        services.bindings(),
        &[Binding::new(plain, plain, Lifetime::Singleton)]
    );
}

#[test]
fn test_rescanning_adds_nothing() -> anyhow::Result<()> {
    let catalog = sample_catalog();
    let observer = Arc::new(RecordingObserver::new());
    let mut services = ServiceCollection::new();
    let mut loader = ServiceLoader::new(&catalog).with_observer(observer.clone());

    loader.load_unit(&mut services, "module1")?;
    let count = services.len();
    let modules = observer.configured_modules().len();

    loader
        .load_unit(&mut services, "module1")?
        .load_types(&mut services, &[TypeKey::of::<Hello>(), TypeKey::of::<Module1>()]);

    assert_eq!(services.len(), count);
    assert_eq!(observer.configured_modules().len(), modules);
    assert_eq!(observer.scanned_units().len(), 1);
    Ok(())
}

#[test]
fn test_separate_loaders_do_not_share_tracking() -> anyhow::Result<()> {
    let catalog = sample_catalog();
    let first = Arc::new(RecordingObserver::new());
    let second = Arc::new(RecordingObserver::new());

    let mut services = ServiceCollection::new();
    ServiceLoader::new(&catalog)
        .with_observer(first.clone())
        .load_unit(&mut services, "module1")?;

    let mut other_services = ServiceCollection::new();
    ServiceLoader::new(&catalog)
        .with_observer(second.clone())
        .load_unit(&mut other_services, "module1")?;

    assert_eq!(first.configured_modules(), second.configured_modules());
    assert_eq!(services.len(), other_services.len());
    Ok(())
}

// ---- 相互依赖的定义单元 ----

struct Alpha;
struct Beta;

fn cyclic_catalog() -> UnitCatalog {
    UnitCatalog::from_units([
        DefiningUnit::new("alpha").with_descriptor(
            TypeDescriptor::class::<Alpha>()
                .service(ServiceDeclaration::singleton())
                .depends_on([TypeKey::of::<Beta>()]),
        ),
        DefiningUnit::new("beta").with_descriptor(
            TypeDescriptor::class::<Beta>()
                .service(ServiceDeclaration::singleton())
                .depends_on([TypeKey::of::<Alpha>()]),
        ),
    ])
    .unwrap()
}

#[test]
fn test_mutually_dependent_units_terminate() -> anyhow::Result<()> {
    let catalog = cyclic_catalog();
    let observer = Arc::new(RecordingObserver::new());
    let mut services = ServiceCollection::new();

    let mut loader = ServiceLoader::new(&catalog).with_observer(observer.clone());
    loader.load_unit(&mut services, "alpha")?;

    assert_eq!(services.len(), 2);
    assert!(services.contains(&TypeKey::of::<Alpha>(), &TypeKey::of::<Alpha>()));
    assert!(services.contains(&TypeKey::of::<Beta>(), &TypeKey::of::<Beta>()));
    assert_eq!(loader.session().scanned_unit_count(), 2);
    assert_eq!(observer.scanned_units().len(), 2);
    Ok(())
}

// ---- 模块失败 ----

struct Downstream;

#[derive(Default)]
struct FailingModule;

impl Module for FailingModule {
    fn configure(
        &self,
        services: &mut dyn ServiceRegistry,
        _configuration: Option<&dyn ConfigurationSource>,
    ) -> Result<(), ModuleError> {
        services.try_add(
            TypeKey::of::<Downstream>(),
            TypeKey::of::<Downstream>(),
            Lifetime::Scoped,
        );
        Err(ModuleError::configuration_failed("缺少必需的配置"))
    }
}

#[test]
fn test_module_failure_keeps_partial_work_and_continues() {
    static ATTEMPTS: AtomicUsize = AtomicUsize::new(0);

    let catalog = UnitCatalog::from_units([DefiningUnit::new("failing")
        .with_descriptor(TypeDescriptor::class::<FailingModule>().module::<FailingModule>())
        .with_descriptor(
            TypeDescriptor::class::<Beta>().module_factory(|| {
                ATTEMPTS.fetch_add(1, Ordering::SeqCst);
                Err(ModuleError::instantiation_failed("Beta", "工厂不可用"))
            }),
        )
        .with_descriptor(
            TypeDescriptor::class::<Alpha>().service(ServiceDeclaration::transient()),
        )])
    .unwrap();

    let observer = Arc::new(RecordingObserver::new());
    let mut services = ServiceCollection::new();
    let mut loader = ServiceLoader::new(&catalog).with_observer(observer.clone());
    let types = [
        TypeKey::of::<FailingModule>(),
        TypeKey::of::<Beta>(),
        TypeKey::of::<Alpha>(),
    ];
    loader.load_types(&mut services, &types);
    loader.load_types(&mut services, &types);

    assert_eq!(
        observer.failed_modules(),
        vec![TypeKey::of::<FailingModule>(), TypeKey::of::<Beta>()]
    );
    assert_eq!(ATTEMPTS.load(Ordering::SeqCst), 1);
    assert!(services.contains(&TypeKey::of::<Downstream>(), &TypeKey::of::<Downstream>()));
    assert!(services.contains(&TypeKey::of::<Alpha>(), &TypeKey::of::<Alpha>()));
}

// ---- 配置与错误 ----

#[test]
fn test_module_binds_configuration_section() -> anyhow::Result<()> {
    let catalog = sample_catalog();
    let configuration = MemoryConfiguration::new(json!({
        "Module1": { "Option1": { "value": "Hello" } }
    }));
    let mut services = ServiceCollection::new();

    ServiceLoader::new(&catalog)
        .with_configuration(&configuration)
        .load::<Module1>(&mut services);

    assert_eq!(services.options().get::<Option1>().unwrap().value, "Hello");
    assert!(services.is_empty());
    Ok(())
}

#[test]
fn test_unknown_unit_is_the_only_top_level_error() {
    let catalog = sample_catalog();
    let mut services = ServiceCollection::new();
    let mut loader = ServiceLoader::new(&catalog);

    let result = loader.load_unit(&mut services, "missing").map(|_| ());
    assert_eq!(
        result,
        Err(RegistrationError::UnknownUnit {
            unit: "missing".to_string()
        })
    );

    struct NotInCatalog;
    loader.load_types(&mut services, &[TypeKey::of::<NotInCatalog>()]);
    assert!(services.is_empty());
}

#[test]
fn test_unresolved_dependency_is_reported() {
    struct Missing;

    let catalog = UnitCatalog::from_units([DefiningUnit::new("lonely").with_descriptor(
        TypeDescriptor::class::<Alpha>()
            .service(ServiceDeclaration::singleton())
            .depends_on([TypeKey::of::<Missing>()]),
    )])
    .unwrap();

    let observer = Arc::new(RecordingObserver::new());
    let mut services = ServiceCollection::new();
    ServiceLoader::new(&catalog)
        .with_observer(observer.clone())
        .load_types(&mut services, &[TypeKey::of::<Alpha>()]);

    assert_eq!(services.len(), 1);
    assert!(observer.events().contains(&ScanEvent::DependencyUnresolved {
        dependent: TypeKey::of::<Alpha>(),
        dependency: TypeKey::of::<Missing>(),
    }));
}

#[test]
fn test_custom_matcher() {
    let catalog = sample_catalog();
    let mut services = ServiceCollection::new();

    ServiceLoader::new(&catalog)
        .with_matcher(|_: &TypeKey, _: &TypeKey| false)
        .load_types(&mut services, &[TypeKey::of::<Hello>()]);

    let hello = TypeKey::of::<Hello>();
    assert_eq!(
        services.bindings(),
        &[Binding::new(hello, hello, Lifetime::Scoped)]
    );
}
