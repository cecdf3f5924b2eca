//! 宏工具函数

use syn::{Attribute, Field, Fields, FieldsNamed, Generics, Ident, Lit, LitStr, Result};

/// 取出具名字段，其他结构形式返回错误
pub fn named_fields<'a>(ident: &Ident, fields: &'a Fields, derive: &str) -> Result<&'a FieldsNamed> {
    match fields {
        Fields::Named(named) => Ok(named),
        _ => Err(syn::Error::new_spanned(
            ident,
            format!("#[derive({derive})] 只支持具名字段的结构体"),
        )),
    }
}

/// 检查字段是否有特定属性
pub fn field_has_attribute(field: &Field, attr_name: &str) -> bool {
    find_attribute(&field.attrs, attr_name).is_some()
}

/// 查找属性
pub fn find_attribute<'a>(attrs: &'a [Attribute], attr_name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.path().is_ident(attr_name))
}

/// 类型是否带有泛型参数
pub fn has_generics(generics: &Generics) -> bool {
    !generics.params.is_empty()
}

/// 解析字符串字面量
pub fn parse_lit_str(input: syn::parse::ParseStream<'_>) -> Result<LitStr> {
    match input.parse::<Lit>()? {
        Lit::Str(lit_str) => Ok(lit_str),
        other => Err(syn::Error::new_spanned(other, "需要字符串字面量")),
    }
}
