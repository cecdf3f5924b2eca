//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义字段注入的数据结构和核心接口。
//!
//! ## 核心接口
//!
//! - [`Inject`] / [`InjectSlot`] - 注入槽
//! - [`Injectable`] / [`InjectableTypeInfo`] - 编译期生成的字段描述
//! - [`TypeIntrospection`] - 类型缓存接口
//! - [`ComponentRegistry`] / [`DependencyResolver`] - 注册表与解析接口
//! - [`ObjectDiscovery`] - 场景对象发现接口

pub mod container;
pub mod discovery;
pub mod injectable;
pub mod registry;
pub mod resolver;
pub mod scanner;

pub use container::*;
pub use discovery::*;
pub use injectable::*;
pub use registry::*;
pub use resolver::*;
pub use scanner::*;

#[doc(hidden)]
pub mod __private {
    pub use linkme;
}
