//! 宏工具函数

use proc_macro2::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{Attribute, Result, Token, Type};

/// 生命周期参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifetimeArg {
    Singleton,
    Scoped,
    Transient,
}

impl LifetimeArg {
    /// 从标识符解析生命周期
    pub fn from_ident(ident: &str) -> Option<Self> {
        match ident {
            "singleton" => Some(Self::Singleton),
            "scoped" => Some(Self::Scoped),
            "transient" => Some(Self::Transient),
            _ => None,
        }
    }

    /// 生成生命周期表达式
    pub fn to_tokens(self) -> TokenStream {
        match self {
            Self::Singleton => quote! { ::di_abstractions::Lifetime::Singleton },
            Self::Scoped => quote! { ::di_abstractions::Lifetime::Scoped },
            Self::Transient => quote! { ::di_abstractions::Lifetime::Transient },
        }
    }
}

/// 解析以逗号分隔的类型列表，例如 `#[implements(dyn IHello, dyn IWorld)]`
pub fn parse_type_list(attr: &Attribute) -> Result<Vec<Type>> {
    let types = attr.parse_args_with(Punctuated::<Type, Token![,]>::parse_terminated)?;
    if types.is_empty() {
        return Err(syn::Error::new_spanned(attr, "至少需要指定一个类型"));
    }
    Ok(types.into_iter().collect())
}

/// 生成类型标识表达式
pub fn type_key(ty: &Type) -> TokenStream {
    quote! { ::di_abstractions::TypeKey::of::<#ty>() }
}
