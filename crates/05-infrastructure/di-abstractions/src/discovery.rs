//! 对象发现抽象接口
//!
//! 场景遍历依赖宿主环境的对象图，核心只通过这个接口使用它

use infrastructure_common::{DiscoveredObject, TypeInfo};

/// 对象发现器 trait
pub trait ObjectDiscovery {
    /// 返回当前可达的、具体类型恰好为 `component_type` 的所有实例
    ///
    /// 子类型不在此列，它们在各自的类型条目下被单独发现。
    fn instances_of(&self, component_type: &TypeInfo) -> Vec<DiscoveredObject>;

    /// 获取发现器名称
    fn name(&self) -> &str {
        "object-discovery"
    }
}
