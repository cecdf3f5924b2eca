//! # 依赖注入具体实现
//!
//! 提供类型缓存、依赖注册表、字段注入器和容器的具体实现。
//!
//! ## 组成
//!
//! - [`TypeCache`] - 启动时构建的可注入类型缓存
//! - [`DependencyRegistry`] - 每个具体类型一个实例的注册表
//! - [`Injector`] - 单个对象注入和三种批量注入
//! - [`DependencyContainer`] - 组合以上部件的容器
//! - [`Scene`] / [`SceneNode`] - 内存对象图，实现 [`ObjectDiscovery`](di_abstractions::ObjectDiscovery)

mod bulk;
pub mod cache;
pub mod container;
pub mod injector;
pub mod registry;
pub mod scene;
pub mod settings;

pub use cache::{TypeCache, TypeCacheBuilder};
pub use container::DependencyContainer;
pub use injector::Injector;
pub use registry::DependencyRegistry;
pub use scene::{NodeDiscovery, Scene, SceneNode};
pub use settings::{load_container_config, ENV_PREFIX};
