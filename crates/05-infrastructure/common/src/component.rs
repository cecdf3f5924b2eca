//! 组件基础接口定义
//!
//! 提供所有可注册、可注入对象必须实现的基础 trait

use crate::lifecycle::{InjectionListener, TeardownListener};
use crate::metadata::TypeInfo;
use downcast_rs::{impl_downcast, DowncastSync};
use std::any::Any;
use std::sync::Arc;

/// 类型擦除后的实例句柄
pub type AnyInstance = Arc<dyn Any + Send + Sync>;

/// 类型擦除后的视图，内部是某个 `Arc<X>`
pub type AnyView = Box<dyn Any + Send + Sync>;

/// 视图转换函数：把实例转换为 `Arc<X>` 并装箱
pub type ViewCast = fn(AnyInstance) -> Option<AnyView>;

/// 组件基础 trait
///
/// 注册表中的服务和被注入的目标都必须实现此 trait。
/// 通常由 `#[derive(Component)]` 生成。
pub trait Component: DowncastSync {
    /// 组件名称
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// 组件的具体运行时类型
    fn component_type(&self) -> TypeInfo {
        TypeInfo::of::<Self>()
    }

    /// 注入完成通知能力
    fn injection_listener(&self) -> Option<&dyn InjectionListener> {
        None
    }

    /// 注册表拆除通知能力
    fn teardown_listener(&self) -> Option<&dyn TeardownListener> {
        None
    }

    /// 组件对外暴露的接口视图（除自身具体类型之外）
    fn interfaces() -> Vec<InterfaceCast>
    where
        Self: Sized,
    {
        Vec::new()
    }
}

impl_downcast!(sync Component);

/// 接口视图声明
///
/// 描述一个已注册实例可以被看作哪种类型（通常是 `dyn Trait`）。
/// 按接口类型查找依赖时，注册表依靠它完成 `Arc<T>` 到 `Arc<dyn Trait>` 的转换。
#[derive(Clone, Copy)]
pub struct InterfaceCast {
    /// 视图类型
    pub interface: TypeInfo,
    cast: ViewCast,
}

impl InterfaceCast {
    /// 创建接口视图，`cast` 必须产出装箱的 `Arc<I>`
    pub fn new<I: ?Sized + 'static>(cast: ViewCast) -> Self {
        Self {
            interface: TypeInfo::of::<I>(),
            cast,
        }
    }

    /// 具体类型自身的视图
    pub fn exact<T: Any + Send + Sync>() -> Self {
        Self::new::<T>(exact_view::<T>)
    }

    /// 应用转换
    pub fn apply(&self, instance: AnyInstance) -> Option<AnyView> {
        (self.cast)(instance)
    }
}

impl std::fmt::Debug for InterfaceCast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterfaceCast")
            .field("interface", &self.interface)
            .field("cast", &"<function>")
            .finish()
    }
}

fn exact_view<T: Any + Send + Sync>(instance: AnyInstance) -> Option<AnyView> {
    instance
        .downcast::<T>()
        .ok()
        .map(|typed| Box::new(typed) as AnyView)
}

/// 判断两个组件句柄是否指向同一个对象
pub fn same_instance(a: &dyn Component, b: &dyn Component) -> bool {
    std::ptr::eq(
        a as *const dyn Component as *const (),
        b as *const dyn Component as *const (),
    )
}
