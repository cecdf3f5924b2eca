//! 依赖注册表
//!
//! 每个具体类型最多一个实例。按类型查找时先精确匹配具体类型，
//! 再在各实例声明的接口视图中查找。注册表自身作为第一项注册。

use crate::injector::notify_listener;
use di_abstractions::{
    downcast_view, AmbiguityPolicy, ComponentRegistry, DependencyResolver, ServiceRegistration,
};
use infrastructure_common::{
    same_instance, AnyView, Component, DependencyError, InterfaceCast, TypeInfo,
};
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tracing::{debug, info, warn};

/// 实例句柄
///
/// 注册表自身的条目只持有弱引用，避免自引用造成的循环。
enum ServiceHandle {
    Shared(Arc<dyn Component>),
    Own(Weak<dyn Component>),
}

impl ServiceHandle {
    fn get(&self) -> Option<Arc<dyn Component>> {
        match self {
            Self::Shared(instance) => Some(instance.clone()),
            Self::Own(weak) => weak.upgrade(),
        }
    }
}

struct ServiceEntry {
    type_info: TypeInfo,
    handle: ServiceHandle,
    views: Vec<InterfaceCast>,
}

impl ServiceEntry {
    fn provides(&self, requested: &TypeInfo) -> bool {
        self.views.iter().any(|view| view.interface == *requested)
    }

    fn view(&self, requested: &TypeInfo) -> Option<AnyView> {
        let cast = self.views.iter().find(|view| view.interface == *requested)?;
        let instance = self.handle.get()?;
        cast.apply(instance.into_any_arc())
    }
}

#[derive(Default)]
struct Entries {
    list: Vec<ServiceEntry>,
    index: HashMap<TypeId, usize>,
}

impl Entries {
    fn push(&mut self, entry: ServiceEntry) {
        self.index.insert(entry.type_info.id, self.list.len());
        self.list.push(entry);
    }

    fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }
}

/// 依赖注册表实现
pub struct DependencyRegistry {
    entries: RwLock<Entries>,
    ambiguity: AmbiguityPolicy,
}

impl DependencyRegistry {
    /// 创建注册表，歧义时拒绝解析
    pub fn new() -> Arc<Self> {
        Self::with_policy(AmbiguityPolicy::default())
    }

    /// 创建使用指定歧义策略的注册表
    pub fn with_policy(ambiguity: AmbiguityPolicy) -> Arc<Self> {
        Arc::new_cyclic(|weak: &Weak<Self>| {
            let own: Weak<dyn Component> = weak.clone();
            let mut views = vec![InterfaceCast::exact::<Self>()];
            views.extend(<Self as Component>::interfaces());

            let mut entries = Entries::default();
            entries.push(ServiceEntry {
                type_info: TypeInfo::of::<Self>(),
                handle: ServiceHandle::Own(own),
                views,
            });

            Self {
                entries: RwLock::new(entries),
                ambiguity,
            }
        })
    }

    /// 歧义策略
    pub fn ambiguity_policy(&self) -> AmbiguityPolicy {
        self.ambiguity
    }

    /// 注册实例
    ///
    /// 同一具体类型已注册时返回 [`DependencyError::DuplicateType`]，已有条目不受影响。
    pub fn add<T: Component>(&self, instance: Arc<T>) -> Result<(), DependencyError> {
        self.register(ServiceRegistration::of(instance))
    }

    /// 获取实例，找不到或存在歧义时返回 `None`
    pub fn get<T: ?Sized + 'static>(&self) -> Option<Arc<T>> {
        self.resolve::<T>().ok()
    }

    /// 解析实例
    pub fn resolve<T: ?Sized + 'static>(&self) -> Result<Arc<T>, DependencyError> {
        downcast_view(self.resolve_view(&TypeInfo::of::<T>())?)
    }

    /// 所有能以 `T` 查看的实例，按注册顺序
    pub fn get_all<T: ?Sized + 'static>(&self) -> Vec<Arc<T>> {
        self.resolve_all_views(&TypeInfo::of::<T>())
            .into_iter()
            .filter_map(|view| downcast_view(view).ok())
            .collect()
    }

    /// 是否注册了具体类型 `T`
    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.entries.read().index.contains_key(&TypeId::of::<T>())
    }

    /// 已注册实例数量（包括注册表自身）
    pub fn len(&self) -> usize {
        self.entries.read().list.len()
    }

    /// 注册表是否为空（拆除后为真）
    pub fn is_empty(&self) -> bool {
        self.entries.read().list.is_empty()
    }
}

impl DependencyResolver for DependencyRegistry {
    fn resolve_view(&self, requested: &TypeInfo) -> Result<AnyView, DependencyError> {
        let entries = self.entries.read();

        if let Some(&i) = entries.index.get(&requested.id) {
            if let Some(view) = entries.list[i].view(requested) {
                return Ok(view);
            }
        }

        let candidates: Vec<&ServiceEntry> = entries
            .list
            .iter()
            .filter(|entry| entry.provides(requested))
            .collect();

        let chosen = match candidates.as_slice() {
            [] => None,
            [only] => Some(*only),
            [first, ..] => match self.ambiguity {
                AmbiguityPolicy::Reject => {
                    return Err(DependencyError::Ambiguous {
                        type_name: requested.name,
                        candidates: candidates.iter().map(|c| c.type_info.name).collect(),
                    });
                }
                AmbiguityPolicy::FirstRegistered => {
                    warn!(
                        "依赖 {} 有 {} 个候选实例，使用最先注册的 {}",
                        requested,
                        candidates.len(),
                        first.type_info
                    );
                    Some(*first)
                }
            },
        };

        chosen
            .and_then(|entry| entry.view(requested))
            .ok_or(DependencyError::NotRegistered {
                type_name: requested.name,
            })
    }

    fn resolve_all_views(&self, requested: &TypeInfo) -> Vec<AnyView> {
        self.entries
            .read()
            .list
            .iter()
            .filter_map(|entry| entry.view(requested))
            .collect()
    }
}

impl ComponentRegistry for DependencyRegistry {
    fn register(&self, registration: ServiceRegistration) -> Result<(), DependencyError> {
        let mut entries = self.entries.write();
        let type_info = registration.type_info;

        if entries.index.contains_key(&type_info.id) {
            warn!("组件类型重复注册: {}", type_info);
            return Err(DependencyError::DuplicateType {
                type_name: type_info.name,
            });
        }

        entries.push(ServiceEntry {
            type_info,
            handle: ServiceHandle::Shared(registration.instance),
            views: registration.views,
        });
        info!("注册组件实例: {}", type_info);
        Ok(())
    }

    fn instances(&self) -> Vec<Arc<dyn Component>> {
        self.entries
            .read()
            .list
            .iter()
            .filter_map(|entry| entry.handle.get())
            .collect()
    }

    fn contains_instance(&self, candidate: &dyn Component) -> bool {
        self.entries.read().list.iter().any(|entry| {
            entry
                .handle
                .get()
                .is_some_and(|instance| same_instance(instance.as_ref(), candidate))
        })
    }

    fn registered_types(&self) -> Vec<TypeInfo> {
        self.entries
            .read()
            .list
            .iter()
            .map(|entry| entry.type_info)
            .collect()
    }

    fn teardown(&self) {
        let instances = self.instances();
        info!("拆除注册表: {} 个实例", instances.len());

        for instance in &instances {
            if let Some(listener) = instance.teardown_listener() {
                debug!("通知拆除: {}", instance.component_type());
                notify_listener("拆除通知", instance.component_type(), || {
                    listener.on_teardown()
                });
            }
        }

        self.entries.write().clear();
        info!("注册表已清空");
    }
}

impl Component for DependencyRegistry {
    fn name(&self) -> &'static str {
        "DependencyRegistry"
    }

    fn interfaces() -> Vec<InterfaceCast> {
        vec![
            InterfaceCast::new::<dyn ComponentRegistry>(|instance| {
                instance
                    .downcast::<Self>()
                    .ok()
                    .map(|this| Box::new(this as Arc<dyn ComponentRegistry>) as AnyView)
            }),
            InterfaceCast::new::<dyn DependencyResolver>(|instance| {
                instance
                    .downcast::<Self>()
                    .ok()
                    .map(|this| Box::new(this as Arc<dyn DependencyResolver>) as AnyView)
            }),
        ]
    }
}

impl std::fmt::Debug for DependencyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyRegistry")
            .field("types", &self.registered_types())
            .field("ambiguity", &self.ambiguity)
            .finish()
    }
}
