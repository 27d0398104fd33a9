//! 第二个功能模块

use component_macros::Injectable;
use config_abstractions::ConfigurationSource;
use di_abstractions::{Module, ServiceRegistry, TypeDescriptor};
use di_impl::DefiningUnit;
use infrastructure_common::ModuleError;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Option2 {
    pub value: String,
}

pub trait IWorld: Send + Sync {
    fn say_world(&self) -> String;
}

#[derive(Debug, Clone, Injectable)]
#[injectable(service = dyn IWorld)]
#[implements(dyn IWorld)]
pub struct World {
    option2: Option2,
}

impl World {
    pub fn new(option2: Option2) -> Self {
        Self { option2 }
    }
}

impl IWorld for World {
    fn say_world(&self) -> String {
        self.option2.value.clone()
    }
}

/// 绑定 `Module2:Option2` 配置节
#[derive(Debug, Default, Injectable)]
#[module]
pub struct Module2;

impl Module for Module2 {
    fn configure(
        &self,
        services: &mut dyn ServiceRegistry,
        configuration: Option<&dyn ConfigurationSource>,
    ) -> Result<(), ModuleError> {
        match configuration {
            Some(configuration) => services
                .options_mut()
                .bind_or_default::<Option2>(&configuration.get_section("Module2:Option2"))?,
            None => services
                .options_mut()
                .configure::<Option2>(|option| option.value = String::new()),
        }
        Ok(())
    }
}

pub fn unit() -> DefiningUnit {
    DefiningUnit::new("lily.module2")
        .with_descriptor(TypeDescriptor::interface::<dyn IWorld>())
        .with_type::<World>()
        .with_type::<Module2>()
}
