//! `#[derive(Injectable)]` 实现
//!
//! 为每个 `#[inject]` 字段生成字段描述和访问器；`#[inject(base)]` 字段被视为
//! 嵌入的基础组件，其字段作为继承字段排在自身字段之后。
//! 非泛型类型同时提交到编译期类型清单。

use crate::utils::{field_has_attribute, find_attribute, has_generics, named_fields, parse_lit_str};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Ident, Result, Type};

/// 场景注入策略参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePolicy {
    Ignore,
    OnlyWhenActive,
    Always,
}

impl ScenePolicy {
    fn parse(value: &syn::LitStr) -> Result<Self> {
        match value.value().as_str() {
            "ignore" => Ok(Self::Ignore),
            "only_when_active" => Ok(Self::OnlyWhenActive),
            "always" => Ok(Self::Always),
            _ => Err(syn::Error::new_spanned(
                value,
                "scene 只接受 \"ignore\"、\"only_when_active\" 或 \"always\"",
            )),
        }
    }

    fn tokens(self) -> TokenStream {
        match self {
            Self::Ignore => quote! { ::infrastructure_common::SceneInjection::Ignore },
            Self::OnlyWhenActive => quote! { ::infrastructure_common::SceneInjection::OnlyWhenActive },
            Self::Always => quote! { ::infrastructure_common::SceneInjection::Always },
        }
    }
}

/// `#[injectable(...)]` 参数
#[derive(Debug, Default)]
pub struct InjectableArgs {
    /// 可被场景发现时的注入策略
    pub scene: Option<ScenePolicy>,
    /// 不提交到编译期类型清单
    pub no_scan: bool,
}

impl InjectableArgs {
    pub fn from_input(input: &DeriveInput) -> Result<Self> {
        let mut args = Self::default();

        for attr in input.attrs.iter().filter(|a| a.path().is_ident("injectable")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("scene") {
                    args.scene = Some(if meta.input.peek(syn::Token![=]) {
                        ScenePolicy::parse(&parse_lit_str(meta.value()?)?)?
                    } else {
                        ScenePolicy::Always
                    });
                } else if meta.path.is_ident("no_scan") {
                    args.no_scan = true;
                } else {
                    return Err(meta.error("未知的 injectable 参数"));
                }
                Ok(())
            })?;
        }

        Ok(args)
    }
}

enum InjectField<'a> {
    Slot { ident: &'a Ident, ty: &'a Type },
    Base { ident: &'a Ident, ty: &'a Type },
}

fn classify(field: &Field) -> Result<Option<InjectField<'_>>> {
    let Some(attr) = find_attribute(&field.attrs, "inject") else {
        return Ok(None);
    };
    let Some(ident) = field.ident.as_ref() else {
        return Ok(None);
    };

    let mut base = false;
    if !matches!(attr.meta, syn::Meta::Path(_)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("base") {
                base = true;
                Ok(())
            } else {
                Err(meta.error("未知的 inject 参数"))
            }
        })?;
    }

    let ty = &field.ty;
    Ok(Some(if base {
        InjectField::Base { ident, ty }
    } else {
        InjectField::Slot { ident, ty }
    }))
}

pub fn derive_injectable_impl(input: DeriveInput) -> Result<TokenStream> {
    let args = InjectableArgs::from_input(&input)?;
    let struct_name = &input.ident;

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            struct_name,
            "#[derive(Injectable)] 只支持结构体",
        ));
    };
    let fields = named_fields(struct_name, &data.fields, "Injectable")?;

    let mut own = Vec::new();
    let mut inherited = Vec::new();
    for field in fields.named.iter().filter(|f| field_has_attribute(f, "inject")) {
        match classify(field)? {
            Some(InjectField::Slot { ident, ty }) => {
                let name = ident.to_string();
                own.push(quote! {
                    fields.push(::di_abstractions::InjectableField::new(
                        owner,
                        #name,
                        <#ty as ::di_abstractions::InjectSlot>::declared_type(),
                        ::di_abstractions::FieldAccessor::new(|target| {
                            target
                                .downcast_ref::<Self>()
                                .map(|this| &this.#ident as &dyn ::di_abstractions::InjectSlot)
                        }),
                    ));
                });
            }
            Some(InjectField::Base { ident, ty }) => {
                let name = ident.to_string();
                inherited.push(quote! {
                    fields.extend(
                        <#ty as ::di_abstractions::Injectable>::injectable_type().inherited_by(
                            #name,
                            |target| {
                                target
                                    .downcast_ref::<Self>()
                                    .map(|this| &this.#ident as &dyn ::std::any::Any)
                            },
                        ),
                    );
                });
            }
            None => {}
        }
    }

    let scene = args.scene.map(|policy| {
        let policy = policy.tokens();
        quote! { .with_scene(#policy) }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let injectable_impl = quote! {
        impl #impl_generics ::di_abstractions::Injectable for #struct_name #ty_generics #where_clause {
            fn injectable_type() -> ::di_abstractions::InjectableTypeInfo {
                let owner = ::infrastructure_common::TypeInfo::of::<Self>();
                #[allow(unused_mut)]
                let mut fields = ::std::vec::Vec::new();
                #(#own)*
                #(#inherited)*
                ::di_abstractions::InjectableTypeInfo::new(owner, fields) #scene
            }
        }
    };

    // 泛型类型没有唯一的 TypeId，只能通过 TypeCacheBuilder::register 显式加入
    let registration = (!args.no_scan && !has_generics(&input.generics)).then(|| {
        quote! {
            const _: () = {
                #[::di_abstractions::__private::linkme::distributed_slice(::di_abstractions::INJECTABLE_TYPES)]
                #[linkme(crate = ::di_abstractions::__private::linkme)]
                static __INJECTABLE_REGISTRATION: ::di_abstractions::InjectableRegistration =
                    ::di_abstractions::InjectableRegistration {
                        type_name: ::core::concat!(::core::module_path!(), "::", ::core::stringify!(#struct_name)),
                        describe: <#struct_name as ::di_abstractions::Injectable>::injectable_type,
                    };
            };
        }
    });

    Ok(quote! {
        #injectable_impl
        #registration
    })
}
