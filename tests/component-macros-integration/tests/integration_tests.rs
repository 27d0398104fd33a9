//! 派生宏集成测试

use component_macros::Injectable;
use config_abstractions::ConfigurationSource;
use di_abstractions::{
    Declaration, Describe, Lifetime, Module, ServiceDeclaration, ServiceRegistry, TypeCatalog,
    TypeKey, TypeKind,
};
use di_impl::{DefiningUnit, ServiceCollection, ServiceLoader, UnitCatalog};
use infrastructure_common::ModuleError;

pub trait IHello {}
pub trait IWorld {}
pub trait IRepository<T> {
    fn all(&self) -> Vec<T>;
}

#[derive(Injectable)]
#[injectable(scoped)]
#[implements(dyn IHello)]
pub struct Hello;

#[derive(Injectable)]
#[injectable(ignored)]
#[extends(Hello)]
pub struct IgnoredHello;

#[derive(Injectable)]
#[injectable(transient)]
#[extends(Hello)]
pub struct TransitHello;

#[derive(Injectable)]
#[injectable(service = dyn IWorld)]
pub struct World;

#[derive(Injectable)]
#[injectable]
pub struct DefaultService;

#[derive(Injectable)]
#[injectable]
#[abstract_type]
pub struct AbstractService;

#[derive(Injectable)]
#[injectable]
struct InternalService;

pub struct User;

#[derive(Injectable)]
#[injectable]
#[implements(dyn IWorld, dyn IRepository<User>)]
pub struct UserRepository;

#[derive(Default, Injectable)]
#[module]
#[depends_on(Hello)]
#[depends_on(World, Hello)]
pub struct ApiModule;

impl Module for ApiModule {
    fn configure(
        &self,
        _services: &mut dyn ServiceRegistry,
        _configuration: Option<&dyn ConfigurationSource>,
    ) -> Result<(), ModuleError> {
        Ok(())
    }
}

#[test]
fn test_bare_injectable_is_singleton() {
    let descriptor = DefaultService::describe();

    assert_eq!(descriptor.key(), TypeKey::of::<DefaultService>());
    assert_eq!(descriptor.kind(), TypeKind::Class);
    assert_eq!(
        descriptor.declarations(),
        &[Declaration::Service(ServiceDeclaration::singleton())]
    );
    assert!(descriptor.is_public());
    assert!(!descriptor.is_module());
}

#[test]
fn test_service_type_defaults_to_transient() {
    let descriptor = World::describe();

    assert_eq!(
        descriptor.declarations(),
        &[Declaration::Service(ServiceDeclaration::for_service(
            TypeKey::of::<dyn IWorld>()
        ))]
    );
}

#[test]
fn test_extends_and_ignored() {
    let ignored = IgnoredHello::describe();
    assert_eq!(ignored.base(), Some(TypeKey::of::<Hello>()));
    assert_eq!(
        ignored.declarations(),
        &[Declaration::Service(ServiceDeclaration::ignored())]
    );

    let transit = TransitHello::describe();
    assert_eq!(
        transit.declarations()[0].as_service().map(|s| s.lifetime),
        Some(Lifetime::Transient)
    );
}

#[test]
fn test_interfaces_keep_declaration_order() {
    let descriptor = UserRepository::describe();

    assert_eq!(
        descriptor.interfaces(),
        &[
            TypeKey::of::<dyn IWorld>(),
            TypeKey::of::<dyn IRepository<User>>()
        ]
    );
}

#[test]
fn test_visibility_and_abstract() {
    assert!(AbstractService::describe().is_abstract());
    assert!(!InternalService::describe().is_public());
}

#[test]
fn test_repeated_depends_on_are_merged() {
    let catalog = UnitCatalog::from_units([DefiningUnit::new("api").with_type::<ApiModule>()])
        .unwrap();

    let dependencies = catalog
        .effective_dependencies(&TypeKey::of::<ApiModule>())
        .unwrap();
    assert_eq!(
        dependencies.depended_types,
        vec![TypeKey::of::<Hello>(), TypeKey::of::<World>()]
    );
    assert!(ApiModule::describe().is_module());
}

#[test]
fn test_derived_types_scan_end_to_end() {
    let catalog = UnitCatalog::from_units([
        DefiningUnit::new("hello")
            .with_type::<Hello>()
            .with_type::<IgnoredHello>()
            .with_type::<TransitHello>(),
        DefiningUnit::new("world").with_type::<World>(),
        DefiningUnit::new("misc")
            .with_type::<AbstractService>()
            .with_type::<InternalService>()
            .with_type::<UserRepository>(),
        DefiningUnit::new("api").with_type::<ApiModule>(),
    ])
    .unwrap();

    let mut services = ServiceCollection::new();
    let mut loader = ServiceLoader::new(&catalog);
    loader.load::<ApiModule>(&mut services);
    loader.load_unit(&mut services, "misc").unwrap();

    let hello = TypeKey::of::<Hello>();
    let transit = TypeKey::of::<TransitHello>();
    assert!(services.contains(&TypeKey::of::<dyn IHello>(), &hello));
    assert!(services.contains(&TypeKey::of::<dyn IHello>(), &transit));
    assert!(services.contains(&TypeKey::of::<dyn IWorld>(), &TypeKey::of::<World>()));
    assert_eq!(services.bindings_of(TypeKey::of::<IgnoredHello>()).count(), 0);
    assert_eq!(services.bindings_of(TypeKey::of::<AbstractService>()).count(), 0);
    assert_eq!(services.bindings_of(TypeKey::of::<InternalService>()).count(), 0);

    let repository = services
        .bindings_of(TypeKey::of::<UserRepository>())
        .next()
        .unwrap();
    assert!(matches!(repository.service_type, TypeKey::GenericDefinition(_)));
    assert_eq!(repository.service_type.short_name(), "IRepository");
}
