//! 类型内省抽象接口
//!
//! 注入器和批量驱动只通过这个窄接口读取类型缓存

use crate::injectable::InjectableTypeInfo;
use std::any::TypeId;

/// 类型内省 trait
///
/// 构建完成后只读，并发读取无需加锁。
pub trait TypeIntrospection: Send + Sync {
    /// 查找类型的可注入信息，没有可注入字段的类型返回 `None`
    fn injectable_type(&self, type_id: TypeId) -> Option<&InjectableTypeInfo>;

    /// 所有可被场景发现的类型，按缓存顺序
    fn scene_types(&self) -> Vec<&InjectableTypeInfo>;

    /// 已缓存的类型数量
    fn type_count(&self) -> usize;
}
