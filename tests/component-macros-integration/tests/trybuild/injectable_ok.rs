use component_macros::Injectable;
use config_abstractions::ConfigurationSource;
use di_abstractions::{Describe, Module, ServiceRegistry};
use infrastructure_common::ModuleError;

pub trait IHello {}

#[derive(Injectable)]
#[injectable(service = dyn IHello, scoped)]
#[implements(dyn IHello)]
pub struct Hello;

impl IHello for Hello {}

#[derive(Default, Injectable)]
#[module]
#[depends_on(Hello)]
pub struct HelloModule;

impl Module for HelloModule {
    fn configure(
        &self,
        _services: &mut dyn ServiceRegistry,
        _configuration: Option<&dyn ConfigurationSource>,
    ) -> Result<(), ModuleError> {
        Ok(())
    }
}

fn main() {
    let descriptor = Hello::describe();
    assert_eq!(descriptor.interfaces().len(), 1);
    assert!(HelloModule::describe().is_module());
}
