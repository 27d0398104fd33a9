//! # 自动注册实现
//!
//! 提供基于声明的自动注册的具体实现。
//!
//! ## 主要组件
//!
//! - [`ServiceCollection`] - 内存中的服务注册表
//! - [`DefiningUnit`] / [`UnitCatalog`] - 定义单元与类型目录
//! - [`ScanSession`] - 扫描会话跟踪状态
//! - [`RegistrationEngine`] - 注册引擎
//! - [`ServiceLoader`] - 加载入口
//! - [`RecordingObserver`] - 记录扫描事件的观察者

pub mod catalog;
pub mod collection;
pub mod engine;
pub mod loader;
pub mod observer;
pub mod session;

pub use catalog::*;
pub use collection::*;
pub use engine::*;
pub use loader::*;
pub use observer::*;
pub use session::*;
