//! # Component Macros
//!
//! 这个 crate 提供组件实现和可注入字段描述的派生宏。
//!
//! ## 核心宏
//!
//! - [`Component`](derive@Component) - 实现 `Component` trait，声明接口视图和生命周期通知
//! - [`Injectable`](derive@Injectable) - 生成可注入字段描述并提交到编译期类型清单
//!
//! ## 使用示例
//!
//! ```ignore
//! use component_macros::{Component, Injectable};
//! use di_abstractions::Inject;
//!
//! #[derive(Default, Component)]
//! #[component(provides(dyn Sound))]
//! pub struct AudioService;
//!
//! #[derive(Default, Component, Injectable)]
//! #[injectable(scene = "only_when_active")]
//! pub struct Player {
//!     #[inject]
//!     sound: Inject<dyn Sound>,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod component;
mod injectable;
mod utils;

/// 组件派生宏
///
/// 为结构体实现 `infrastructure_common::Component`。
///
/// # 参数
///
/// - `name = "custom_name"` - 自定义组件名称
/// - `provides(dyn A, dyn B)` - 注册后可按这些接口类型查找
/// - `on_injected` - 组件实现了 `InjectionListener`
/// - `on_teardown` - 组件实现了 `TeardownListener`
///
/// # 示例
///
/// ```ignore
/// #[derive(Component)]
/// #[component(provides(dyn Sound), on_teardown)]
/// pub struct AudioService;
/// ```
#[proc_macro_derive(Component, attributes(component))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    component::derive_component_impl(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// 可注入类型派生宏
///
/// 为具名字段结构体实现 `di_abstractions::Injectable`。
///
/// # 字段属性
///
/// - `#[inject]` - 字段类型为 `Inject<T>`，按 `T` 解析依赖
/// - `#[inject(base)]` - 字段是嵌入的基础组件，其可注入字段作为继承字段
///
/// # 结构体属性
///
/// - `#[injectable(scene)]` - 可被场景发现，注入策略为 `Always`
/// - `#[injectable(scene = "ignore" | "only_when_active" | "always")]` - 可被场景发现，并指定注入策略
/// - `#[injectable(no_scan)]` - 不提交到编译期类型清单
///
/// 泛型类型不会自动提交，需要通过 `TypeCacheBuilder::register` 显式加入。
#[proc_macro_derive(Injectable, attributes(inject, injectable))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    injectable::derive_injectable_impl(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
