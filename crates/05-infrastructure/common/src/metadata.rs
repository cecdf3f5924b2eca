//! 元数据定义
//!
//! 提供组件和类型的元数据信息

use std::any::TypeId;
use std::fmt;

/// 类型信息
///
/// 由 [`TypeId`] 唯一标识，名称只用于日志和错误信息。
/// 支持 `dyn Trait` 这类非定长类型，接口视图也用它来标识。
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    /// 类型ID
    pub id: TypeId,
    /// 完整类型名称（含模块路径）
    pub name: &'static str,
}

impl TypeInfo {
    /// 从类型获取类型信息
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// 是否为指定类型
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl std::hash::Hash for TypeInfo {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
