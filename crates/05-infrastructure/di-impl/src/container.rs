//! 依赖注入容器
//!
//! 把类型缓存、注册表和注入器组合在一起，供应用代码直接使用。

use crate::cache::TypeCache;
use crate::injector::Injector;
use crate::registry::DependencyRegistry;
use crate::settings::load_container_config;
use di_abstractions::{
    BulkInjectionReport, ComponentRegistry, ContainerConfig, InjectionReport, ObjectDiscovery,
};
use infrastructure_common::{Component, ConfigResult, DependencyError, DiscoveredObject};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// 依赖注入容器
///
/// 典型用法：注册服务、自注入、注入场景对象，结束时拆除。
///
/// ```ignore
/// let container = DependencyContainer::from_config(ContainerConfig::default());
/// container.add(Arc::new(AudioService::default()))?;
/// container.self_inject();
/// container.inject_discovered(&scene);
/// container.teardown();
/// ```
#[derive(Debug)]
pub struct DependencyContainer {
    config: ContainerConfig,
    cache: Arc<TypeCache>,
    registry: Arc<DependencyRegistry>,
    injector: Injector,
}

impl DependencyContainer {
    /// 使用给定类型缓存和默认配置创建容器
    pub fn new(cache: Arc<TypeCache>) -> Self {
        Self::with_config(cache, ContainerConfig::default())
    }

    /// 使用给定类型缓存和配置创建容器
    pub fn with_config(cache: Arc<TypeCache>, config: ContainerConfig) -> Self {
        let registry = DependencyRegistry::with_policy(config.ambiguity);
        let injector = Injector::new(cache.clone(), registry.clone());
        info!(
            "创建依赖注入容器: {} 个可注入类型, 歧义策略 {:?}",
            cache.len(),
            config.ambiguity
        );

        Self {
            config,
            cache,
            registry,
            injector,
        }
    }

    /// 按配置创建容器，`scan_types` 为真时扫描编译期类型清单
    pub fn from_config(config: ContainerConfig) -> Self {
        let cache = if config.scan_types {
            TypeCache::scan()
        } else {
            TypeCache::empty()
        };
        Self::with_config(Arc::new(cache), config)
    }

    /// 从配置文件和环境变量加载配置并创建容器
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        Ok(Self::from_config(load_container_config(path)?))
    }

    /// 容器配置
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 类型缓存
    pub fn cache(&self) -> &Arc<TypeCache> {
        &self.cache
    }

    /// 依赖注册表
    pub fn registry(&self) -> &Arc<DependencyRegistry> {
        &self.registry
    }

    /// 字段注入器
    pub fn injector(&self) -> &Injector {
        &self.injector
    }

    /// 注册实例
    pub fn add<T: Component>(&self, instance: Arc<T>) -> Result<(), DependencyError> {
        self.registry.add(instance)
    }

    /// 获取实例
    pub fn get<T: ?Sized + 'static>(&self) -> Option<Arc<T>> {
        self.registry.get::<T>()
    }

    /// 获取所有兼容实例
    pub fn get_all<T: ?Sized + 'static>(&self) -> Vec<Arc<T>> {
        self.registry.get_all::<T>()
    }

    /// 向单个对象注入
    pub fn inject_into(&self, target: &dyn Component) -> InjectionReport {
        self.injector.inject_into(target)
    }

    /// 注册表自注入
    pub fn self_inject(&self) -> BulkInjectionReport {
        self.injector.self_inject()
    }

    /// 对候选对象注入
    pub fn inject_candidates<I>(&self, candidates: I) -> BulkInjectionReport
    where
        I: IntoIterator<Item = DiscoveredObject>,
    {
        self.injector.inject_candidates(candidates)
    }

    /// 对场景中发现的对象注入
    pub fn inject_discovered(&self, discovery: &dyn ObjectDiscovery) -> BulkInjectionReport {
        self.injector.inject_discovered(discovery)
    }

    /// 拆除注册表
    ///
    /// 通知并清空注册表后，按配置清空原注册实例上的注入槽，
    /// 使互相引用的实例能够被释放。
    pub fn teardown(&self) {
        let instances = self.registry.instances();
        self.registry.teardown();

        if self.config.release_on_teardown {
            let released: usize = instances
                .iter()
                .map(|instance| self.injector.release(instance.as_ref()))
                .sum();
            info!("已清空 {} 个注入槽", released);
        }
    }
}
