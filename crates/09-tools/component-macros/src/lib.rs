//! # Component Macros
//!
//! 这个 crate 提供把注册声明附加到类型上的派生宏。
//!
//! ## 核心宏
//!
//! - [`Injectable`](derive@Injectable) - 生成 `di_abstractions::Describe` 实现
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::Injectable;
//!
//! pub trait IHello {}
//!
//! #[derive(Default, Injectable)]
//! #[injectable(scoped)]
//! #[implements(dyn IHello)]
//! pub struct Hello;
//!
//! impl IHello for Hello {}
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod injectable;
mod utils;

/// 注册声明派生宏
///
/// 为类型实现 `Describe`，把辅助属性转换成类型描述符中的声明。
///
/// # 辅助属性
///
/// - `#[injectable]` - 服务声明，默认 `Singleton`
/// - `#[injectable(singleton | scoped | transient)]` - 指定生命周期
/// - `#[injectable(service = dyn IWorld)]` - 指定服务类型，默认 `Transient`
/// - `#[injectable(ignored)]` - 排除自动注册
/// - `#[depends_on(TypeA, TypeB)]` - 依赖声明，可重复
/// - `#[implements(dyn IHello)]` - 实现的接口，按声明顺序
/// - `#[extends(Base)]` - 基类，继承基类的声明和接口
/// - `#[module]` - 模块类型，需要实现 `Module + Default`
/// - `#[abstract_type]` - 抽象类型，不参与注册
///
/// 非 `pub` 类型视为内部类型，不参与注册。
///
/// # 示例
///
/// ```rust,ignore
/// #[derive(Default, Injectable)]
/// #[injectable(service = dyn IWorld)]
/// pub struct World;
/// ```
#[proc_macro_derive(
    Injectable,
    attributes(injectable, depends_on, implements, extends, module, abstract_type)
)]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    injectable::derive_injectable_impl(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
