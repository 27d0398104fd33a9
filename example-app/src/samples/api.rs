//! API 模块

use super::module1::{IHello, Module1};
use super::module2::{IWorld, Module2};
use component_macros::Injectable;
use config_abstractions::ConfigurationSource;
use di_abstractions::{Module, ServiceRegistry};
use di_impl::DefiningUnit;
use infrastructure_common::ModuleError;

/// 入口模块，扫描时会先加载两个功能模块所在的定义单元
#[derive(Debug, Default, Injectable)]
#[module]
#[depends_on(Module1, Module2)]
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

/// 组合问候语
pub fn greeting(hello: &dyn IHello, world: &dyn IWorld) -> String {
    format!("{} {}", hello.say_hello(), world.say_world())
}

pub fn unit() -> DefiningUnit {
    DefiningUnit::new("lily.api").with_type::<ApiModule>()
}
