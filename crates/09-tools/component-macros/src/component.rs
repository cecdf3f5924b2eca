//! `#[derive(Component)]` 实现

use crate::utils::parse_lit_str;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{punctuated::Punctuated, DeriveInput, Result, Token, Type};

/// `#[component(...)]` 参数
#[derive(Default)]
pub struct ComponentArgs {
    /// 自定义组件名称
    pub name: Option<String>,
    /// 对外暴露的接口视图
    pub provides: Vec<Type>,
    /// 组件自行实现了 `InjectionListener`
    pub on_injected: bool,
    /// 组件自行实现了 `TeardownListener`
    pub on_teardown: bool,
}

impl ComponentArgs {
    /// 从结构体属性中收集参数，多个 `#[component]` 属性会合并
    pub fn from_input(input: &DeriveInput) -> Result<Self> {
        let mut args = Self::default();

        for attr in input.attrs.iter().filter(|a| a.path().is_ident("component")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    args.name = Some(parse_lit_str(meta.value()?)?.value());
                } else if meta.path.is_ident("provides") {
                    let content;
                    syn::parenthesized!(content in meta.input);
                    let types = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
                    args.provides.extend(types);
                } else if meta.path.is_ident("on_injected") {
                    args.on_injected = true;
                } else if meta.path.is_ident("on_teardown") {
                    args.on_teardown = true;
                } else {
                    return Err(meta.error("未知的 component 参数"));
                }
                Ok(())
            })?;
        }

        Ok(args)
    }
}

pub fn derive_component_impl(input: DeriveInput) -> Result<TokenStream> {
    let args = ComponentArgs::from_input(&input)?;
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let name_fn = args.name.as_ref().map(|name| {
        quote! {
            fn name(&self) -> &'static str {
                #name
            }
        }
    });

    let injection_fn = args.on_injected.then(|| {
        quote! {
            fn injection_listener(&self) -> ::core::option::Option<&dyn ::infrastructure_common::InjectionListener> {
                ::core::option::Option::Some(self)
            }
        }
    });

    let teardown_fn = args.on_teardown.then(|| {
        quote! {
            fn teardown_listener(&self) -> ::core::option::Option<&dyn ::infrastructure_common::TeardownListener> {
                ::core::option::Option::Some(self)
            }
        }
    });

    let interfaces_fn = (!args.provides.is_empty()).then(|| {
        let casts = args.provides.iter().map(|ty| {
            quote! {
                ::infrastructure_common::InterfaceCast::new::<#ty>(|instance| {
                    instance
                        .downcast::<Self>()
                        .ok()
                        .map(|this| {
                            ::std::boxed::Box::new(this as ::std::sync::Arc<#ty>)
                                as ::infrastructure_common::AnyView
                        })
                })
            }
        });
        quote! {
            fn interfaces() -> ::std::vec::Vec<::infrastructure_common::InterfaceCast> {
                ::std::vec![#(#casts),*]
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::infrastructure_common::Component for #struct_name #ty_generics #where_clause {
            #name_fn
            #injection_fn
            #teardown_fn
            #interfaces_fn
        }
    })
}
