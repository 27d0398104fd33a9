//! 注册声明派生宏实现

use crate::utils::{parse_type_list, type_key, LifetimeArg};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Result, Type, Visibility};

/// 服务声明参数
#[derive(Debug, Default)]
pub struct InjectableArgs {
    /// 生命周期
    pub lifetime: Option<LifetimeArg>,
    /// 显式服务类型
    pub service: Option<Type>,
    /// 是否忽略
    pub ignored: bool,
}

impl InjectableArgs {
    /// 从 `#[injectable(...)]` 属性解析参数
    pub fn from_attribute(attr: &Attribute) -> Result<Self> {
        let mut args = Self::default();

        // 不带参数的 `#[injectable]`
        if matches!(attr.meta, syn::Meta::Path(_)) {
            return Ok(args);
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("ignored") {
                args.ignored = true;
                return Ok(());
            }
            if meta.path.is_ident("service") {
                if args.service.is_some() {
                    return Err(meta.error("服务类型只能指定一次"));
                }
                args.service = Some(meta.value()?.parse()?);
                return Ok(());
            }

            let lifetime = meta
                .path
                .get_ident()
                .and_then(|ident| LifetimeArg::from_ident(&ident.to_string()));
            match lifetime {
                Some(_) if args.lifetime.is_some() => Err(meta.error("生命周期只能指定一次")),
                Some(lifetime) => {
                    args.lifetime = Some(lifetime);
                    Ok(())
                }
                None => Err(meta.error(
                    "不支持的参数，可用参数: singleton, scoped, transient, service = <类型>, ignored",
                )),
            }
        })?;

        Ok(args)
    }

    /// 生成服务声明表达式
    ///
    /// 未指定生命周期时：指定了服务类型为 `Transient`，否则为 `Singleton`。
    pub fn to_declaration(&self) -> TokenStream {
        if self.ignored {
            return quote! { ::di_abstractions::ServiceDeclaration::ignored() };
        }

        let default_lifetime = if self.service.is_some() {
            LifetimeArg::Transient
        } else {
            LifetimeArg::Singleton
        };
        let lifetime = self.lifetime.unwrap_or(default_lifetime).to_tokens();

        match &self.service {
            Some(service) => {
                let service_key = type_key(service);
                quote! {
                    ::di_abstractions::ServiceDeclaration::new(#lifetime).with_service(#service_key)
                }
            }
            None => quote! { ::di_abstractions::ServiceDeclaration::new(#lifetime) },
        }
    }
}

/// 派生 `Describe` 实现
pub fn derive_injectable_impl(input: DeriveInput) -> Result<TokenStream> {
    if let Data::Union(_) = &input.data {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Injectable 不支持 union 类型",
        ));
    }
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Injectable 不支持泛型类型，请为具体类型手动实现 Describe",
        ));
    }

    let name = &input.ident;
    let mut calls = Vec::new();

    if !matches!(input.vis, Visibility::Public(_)) {
        calls.push(quote! { .internal() });
    }

    for attr in &input.attrs {
        let Some(ident) = attr.path().get_ident() else {
            continue;
        };

        match ident.to_string().as_str() {
            "injectable" => {
                let declaration = InjectableArgs::from_attribute(attr)?.to_declaration();
                calls.push(quote! { .service(#declaration) });
            }
            "depends_on" => {
                let keys = parse_type_list(attr)?.iter().map(type_key).collect::<Vec<_>>();
                calls.push(quote! { .depends_on([#(#keys),*]) });
            }
            "implements" => {
                for interface in parse_type_list(attr)? {
                    calls.push(quote! { .implements::<#interface>() });
                }
            }
            "extends" => {
                let base: Type = attr.parse_args()?;
                calls.push(quote! { .extends::<#base>() });
            }
            "module" => {
                attr.meta.require_path_only()?;
                calls.push(quote! { .module::<Self>() });
            }
            "abstract_type" => {
                attr.meta.require_path_only()?;
                calls.push(quote! { .abstract_type() });
            }
            _ => {}
        }
    }

    Ok(quote! {
        impl ::di_abstractions::Describe for #name {
            fn describe() -> ::di_abstractions::TypeDescriptor {
                ::di_abstractions::TypeDescriptor::class::<Self>()
                    #(#calls)*
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn args(attr: Attribute) -> InjectableArgs {
        InjectableArgs::from_attribute(&attr).unwrap()
    }

    #[test]
    fn test_bare_injectable_is_singleton() {
        let declaration = args(parse_quote!(#[injectable])).to_declaration().to_string();
        assert!(declaration.contains("Singleton"));
    }

    #[test]
    fn test_service_type_defaults_to_transient() {
        let parsed = args(parse_quote!(#[injectable(service = dyn IWorld)]));
        assert!(parsed.service.is_some());

        let declaration = parsed.to_declaration().to_string();
        assert!(declaration.contains("Transient"));
        assert!(declaration.contains("IWorld"));
    }

    #[test]
    fn test_explicit_lifetime_and_ignored() {
        let scoped = args(parse_quote!(#[injectable(service = dyn IHello, scoped)]));
        assert_eq!(scoped.lifetime, Some(LifetimeArg::Scoped));

        let ignored = args(parse_quote!(#[injectable(ignored)]));
        assert!(ignored.to_declaration().to_string().contains("ignored"));
    }

    #[test]
    fn test_invalid_arguments_are_rejected() {
        let attr: Attribute = parse_quote!(#[injectable(eternal)]);
        assert!(InjectableArgs::from_attribute(&attr).is_err());

        let attr: Attribute = parse_quote!(#[injectable(scoped, transient)]);
        assert!(InjectableArgs::from_attribute(&attr).is_err());
    }

    #[test]
    fn test_generic_types_are_rejected() {
        let input: DeriveInput = parse_quote! {
            #[injectable]
            pub struct Repository<T> { items: Vec<T> }
        };
        assert!(derive_injectable_impl(input).is_err());
    }

    #[test]
    fn test_private_types_are_internal() {
        let input: DeriveInput = parse_quote! {
            #[injectable]
            struct Hidden;
        };
        let output = derive_injectable_impl(input).unwrap().to_string();
        assert!(output.contains("internal"));
    }
}
