//! # Infrastructure Common
//!
//! 字段注入容器的公共 traits 和类型。
//!
//! ## 核心组件
//!
//! - [`Component`] - 可注册、可注入对象的基础 trait
//! - [`InjectionListener`] / [`TeardownListener`] - 可选的生命周期通知能力
//! - [`SceneInjection`] - 场景注入策略
//! - [`TypeInfo`] - 类型标识
//!
//! ## 设计原则
//!
//! - 基于 Rust 类型系统的编译时安全，不依赖运行时反射
//! - 注册表不拥有实例的生命周期，只持有共享句柄

pub mod component;
pub mod discovery;
pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use component::*;
pub use discovery::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
