//! # Dependency Injection Abstractions
//!
//! 自动注册层的抽象定义。
//!
//! ## 核心接口
//!
//! - [`TypeDescriptor`] / [`Describe`] - 类型上的注册声明
//! - [`TypeCatalog`] - 声明查找与定义单元归属
//! - [`InterfaceMatcher`] - 接口匹配规则
//! - [`Module`] - 配置模块
//! - [`ServiceRegistry`] - 外部容器的绑定存储
//! - [`ScanObserver`] - 扫描过程观察者

pub mod catalog;
pub mod declaration;
pub mod descriptor;
pub mod matcher;
pub mod module;
pub mod observer;
pub mod options;
pub mod registry;

pub use catalog::*;
pub use declaration::*;
pub use descriptor::*;
pub use matcher::*;
pub use module::*;
pub use observer::*;
pub use options::*;
pub use registry::*;

pub use infrastructure_common::{Lifetime, TypeKey};
