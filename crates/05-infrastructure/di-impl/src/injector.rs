//! 字段注入器
//!
//! 对单个目标对象按字段描述逐个解析依赖并写入注入槽。

use crate::cache::panic_message;
use di_abstractions::{
    ComponentRegistry, InjectSlot, InjectableTypeInfo, InjectionReport, TypeIntrospection,
    UnmetDependency,
};
use infrastructure_common::{BoxError, Component, DependencyError, TypeInfo};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// 字段注入器
///
/// 只读取类型缓存，只通过注册表解析依赖，本身不持有可变状态。
#[derive(Clone)]
pub struct Injector {
    pub(crate) cache: Arc<dyn TypeIntrospection>,
    pub(crate) registry: Arc<dyn ComponentRegistry>,
}

impl Injector {
    /// 创建注入器
    pub fn new(cache: Arc<dyn TypeIntrospection>, registry: Arc<dyn ComponentRegistry>) -> Self {
        Self { cache, registry }
    }

    /// 注册表
    pub fn registry(&self) -> &Arc<dyn ComponentRegistry> {
        &self.registry
    }

    /// 向目标对象注入依赖
    ///
    /// 按缓存的字段顺序逐个解析。缺失或有歧义的依赖记录警告并保留字段原值，
    /// 不影响其余字段。无论结果如何，结束后都会调用目标的注入完成通知（如果有），
    /// 通知返回错误或 panic 只记录错误日志。
    pub fn inject_into(&self, target: &dyn Component) -> InjectionReport {
        let target_type = target.component_type();
        let mut report = InjectionReport::new(target_type);

        match self.cache.injectable_type(target_type.id) {
            Some(info) => self.inject_fields(target, info, &mut report),
            None => debug!("类型没有可注入字段: {}", target_type),
        }

        if let Some(listener) = target.injection_listener() {
            report.notified = true;
            notify_listener("注入完成通知", target_type, || listener.on_injected());
        }

        report
    }

    fn inject_fields(
        &self,
        target: &dyn Component,
        info: &InjectableTypeInfo,
        report: &mut InjectionReport,
    ) {
        let object = target.as_any();

        for field in info.fields() {
            let outcome = field
                .slot(object)
                .ok_or(DependencyError::ViewMismatch {
                    expected: info.type_info.name,
                })
                .and_then(|slot| {
                    let view = self.registry.resolve_view(&field.declared)?;
                    slot.assign(view)
                });

            match outcome {
                Ok(()) => {
                    debug!("注入字段: {}.{} <- {}", info.type_info, field.path, field.declared);
                    report.assigned.push(field.path.clone());
                }
                Err(reason) => {
                    warn!(
                        target_type = info.type_info.name,
                        field = %field.path,
                        declared_type = field.declared.name,
                        "依赖未满足: {}",
                        reason
                    );
                    report.unmet.push(UnmetDependency {
                        field: field.path.clone(),
                        declared: field.declared,
                        reason,
                    });
                }
            }
        }
    }

    /// 清空目标对象上所有已写入的注入槽，返回清空的数量
    pub fn release(&self, target: &dyn Component) -> usize {
        let Some(info) = self.cache.injectable_type(target.component_type().id) else {
            return 0;
        };
        let object = target.as_any();

        let mut released = 0;
        for slot in info.fields().iter().filter_map(|field| field.slot(object)) {
            if slot.is_assigned() {
                slot.release();
                released += 1;
            }
        }
        released
    }
}

/// 调用使用方的通知回调
///
/// 回调返回的错误和发生的 panic 都被记录为错误日志，不向调用方传播。
pub(crate) fn notify_listener<F>(event: &str, target: TypeInfo, callback: F)
where
    F: FnOnce() -> Result<(), BoxError>,
{
    match panic::catch_unwind(AssertUnwindSafe(callback)) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("{}失败: {}, 错误: {}", event, target, e),
        Err(payload) => error!(
            "{}发生 panic: {}, 错误: {}",
            event,
            target,
            panic_message(&*payload)
        ),
    }
}

impl std::fmt::Debug for Injector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Injector")
            .field("types", &self.cache.type_count())
            .finish()
    }
}
