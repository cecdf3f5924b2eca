//! 批量注入
//!
//! 三种批量方式共用 [`Injector::inject_into`]：
//! 对注册表内所有实例自注入、对调用方给出的候选对象注入、对场景中发现的对象注入。

use crate::injector::Injector;
use di_abstractions::{BulkInjectionReport, ObjectDiscovery};
use infrastructure_common::{DiscoveredObject, SceneInjection};
use tracing::{debug, info};

impl Injector {
    /// 对注册表中的每个实例执行注入，包括注册表自身
    ///
    /// 实例之间可以互相依赖，注入顺序不影响结果。
    pub fn self_inject(&self) -> BulkInjectionReport {
        let mut bulk = BulkInjectionReport::default();
        for instance in self.registry.instances() {
            bulk.record(&self.inject_into(instance.as_ref()));
        }

        info!(
            "注册表自注入完成: {} 个实例, {} 个未满足的依赖",
            bulk.injected, bulk.unmet
        );
        bulk
    }

    /// 对候选对象注入
    ///
    /// 已注册的实例（按对象身份）被跳过，它们只在自注入时处理。
    /// 其余候选按其类型的场景注入策略和激活状态决定是否注入。
    pub fn inject_candidates<I>(&self, candidates: I) -> BulkInjectionReport
    where
        I: IntoIterator<Item = DiscoveredObject>,
    {
        let mut bulk = BulkInjectionReport::default();
        for candidate in candidates {
            if self.accepts(&candidate) {
                bulk.record(&self.inject_into(candidate.object.as_ref()));
            } else {
                bulk.skip();
            }
        }
        bulk
    }

    /// 对场景中发现的对象注入
    ///
    /// 对缓存中每个可被场景发现的类型，向发现器查询该类型的实例。
    pub fn inject_discovered(&self, discovery: &dyn ObjectDiscovery) -> BulkInjectionReport {
        let mut bulk = BulkInjectionReport::default();
        for info in self.cache.scene_types() {
            let found = discovery.instances_of(&info.type_info);
            debug!(
                "{} 发现 {} 个 {} 实例",
                discovery.name(),
                found.len(),
                info.type_info
            );
            bulk.merge(self.inject_candidates(found));
        }

        info!(
            "场景注入完成: 注入 {} 个, 跳过 {} 个, {} 个未满足的依赖",
            bulk.injected, bulk.skipped, bulk.unmet
        );
        bulk
    }

    fn accepts(&self, candidate: &DiscoveredObject) -> bool {
        let object = candidate.object.as_ref();
        let object_type = object.component_type();

        if self.registry.contains_instance(object) {
            debug!("跳过已注册实例: {}", object_type);
            return false;
        }

        let policy = self
            .cache
            .injectable_type(object_type.id)
            .map_or(SceneInjection::Always, |info| info.scene_injection());
        if !policy.permits(candidate.active) {
            debug!(
                "按场景注入策略跳过: {} ({:?}, active={})",
                object_type, policy, candidate.active
            );
            return false;
        }

        true
    }
}
