//! 依赖解析抽象接口
//!
//! 提供按类型解析已注册实例视图的能力

use infrastructure_common::{AnyView, DependencyError, TypeInfo};
use std::sync::Arc;

/// 依赖解析器 trait
pub trait DependencyResolver: Send + Sync {
    /// 解析指定类型：先按具体类型精确匹配，再查找声明了该视图的实例
    fn resolve_view(&self, requested: &TypeInfo) -> Result<AnyView, DependencyError>;

    /// 所有能以指定类型查看的实例，按注册顺序
    fn resolve_all_views(&self, requested: &TypeInfo) -> Vec<AnyView>;
}

impl dyn DependencyResolver {
    /// 解析指定类型的实例
    pub fn resolve<T: ?Sized + 'static>(&self) -> Result<Arc<T>, DependencyError> {
        downcast_view(self.resolve_view(&TypeInfo::of::<T>())?)
    }

    /// 解析所有兼容实例
    pub fn resolve_all<T: ?Sized + 'static>(&self) -> Vec<Arc<T>> {
        self.resolve_all_views(&TypeInfo::of::<T>())
            .into_iter()
            .filter_map(|view| downcast_view(view).ok())
            .collect()
    }
}

/// 把装箱视图还原为 `Arc<T>`
pub fn downcast_view<T: ?Sized + 'static>(view: AnyView) -> Result<Arc<T>, DependencyError> {
    view.downcast::<Arc<T>>()
        .map(|typed| *typed)
        .map_err(|_| DependencyError::ViewMismatch {
            expected: std::any::type_name::<Arc<T>>(),
        })
}
