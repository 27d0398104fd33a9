//! 第一个功能模块

use component_macros::Injectable;
use config_abstractions::ConfigurationSource;
use di_abstractions::{Module, ServiceRegistry, TypeDescriptor};
use di_impl::DefiningUnit;
use infrastructure_common::ModuleError;
use serde::Deserialize;

/// 问候配置
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Option1 {
    pub value: String,
}

/// 问候服务
pub trait IHello: Send + Sync {
    fn say_hello(&self) -> String;
}

#[derive(Debug, Clone, Injectable)]
#[injectable(scoped)]
#[implements(dyn IHello)]
pub struct Hello {
    option1: Option1,
}

impl Hello {
    pub fn new(option1: Option1) -> Self {
        Self { option1 }
    }
}

impl IHello for Hello {
    fn say_hello(&self) -> String {
        self.option1.value.clone()
    }
}

/// 继承 `Hello`，但不参与自动注册
#[derive(Debug, Clone, Injectable)]
#[injectable(ignored)]
#[extends(Hello)]
pub struct IgnoredHello {
    inner: Hello,
}

/// 继承 `Hello` 的接口，以瞬时生命周期注册
#[derive(Debug, Clone, Injectable)]
#[injectable(transient)]
#[extends(Hello)]
pub struct TransitHello {
    inner: Hello,
}

impl TransitHello {
    pub fn new(option1: Option1) -> Self {
        Self {
            inner: Hello::new(option1),
        }
    }
}

impl IHello for TransitHello {
    fn say_hello(&self) -> String {
        self.inner.say_hello()
    }
}

/// 绑定 `Module1:Option1` 配置节
#[derive(Debug, Default, Injectable)]
#[module]
pub struct Module1;

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
            None => services
                .options_mut()
                .configure::<Option1>(|option| option.value = String::new()),
        }
        Ok(())
    }
}

pub fn unit() -> DefiningUnit {
    DefiningUnit::new("lily.module1")
        .with_descriptor(TypeDescriptor::interface::<dyn IHello>())
        .with_type::<Hello>()
        .with_type::<IgnoredHello>()
        .with_type::<TransitHello>()
        .with_type::<Module1>()
}
