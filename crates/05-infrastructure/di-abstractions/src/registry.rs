//! 组件注册表抽象接口

use crate::resolver::DependencyResolver;
use infrastructure_common::{Component, DependencyError, InterfaceCast, TypeInfo};
use std::sync::Arc;

/// 组件注册表 trait
///
/// 每个具体类型最多一个实例。注册表只持有共享句柄，不负责创建或销毁实例。
pub trait ComponentRegistry: DependencyResolver {
    /// 注册实例
    fn register(&self, registration: ServiceRegistration) -> Result<(), DependencyError>;

    /// 当前所有已注册实例，按注册顺序
    fn instances(&self) -> Vec<Arc<dyn Component>>;

    /// 该对象本身是否已注册（按对象身份，而非类型）
    fn contains_instance(&self, candidate: &dyn Component) -> bool;

    /// 已注册的具体类型，按注册顺序
    fn registered_types(&self) -> Vec<TypeInfo>;

    /// 通知所有实现了拆除能力的实例，然后清空注册表
    fn teardown(&self);
}

/// 服务注册信息
pub struct ServiceRegistration {
    /// 实例
    pub instance: Arc<dyn Component>,
    /// 具体类型
    pub type_info: TypeInfo,
    /// 可用视图，第一项总是具体类型自身
    pub views: Vec<InterfaceCast>,
}

impl ServiceRegistration {
    /// 为实例创建注册信息，收集其具体类型视图和声明的接口视图
    pub fn of<T: Component>(instance: Arc<T>) -> Self {
        let mut views = vec![InterfaceCast::exact::<T>()];
        views.extend(T::interfaces());

        Self {
            instance,
            type_info: TypeInfo::of::<T>(),
            views,
        }
    }
}

impl std::fmt::Debug for ServiceRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistration")
            .field("type_info", &self.type_info)
            .field("views", &self.views)
            .field("instance", &"<component>")
            .finish()
    }
}
