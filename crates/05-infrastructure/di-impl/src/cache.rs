//! 可注入类型缓存
//!
//! 启动时构建一次，之后只读。扫描来源是编译期类型清单 [`INJECTABLE_TYPES`]，
//! 泛型类型等无法进入清单的类型通过 [`TypeCacheBuilder::register`] 显式加入。

use di_abstractions::{Injectable, InjectableTypeInfo, TypeIntrospection, INJECTABLE_TYPES};
use infrastructure_common::ComponentError;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, warn};

type Describe = fn() -> InjectableTypeInfo;

/// 可注入类型缓存
///
/// 只收录至少有一个可注入字段的类型，字段顺序在构建时固定。
#[derive(Debug, Default)]
pub struct TypeCache {
    types: Vec<InjectableTypeInfo>,
    index: HashMap<TypeId, usize>,
}

impl TypeCache {
    /// 扫描编译期类型清单构建缓存
    pub fn scan() -> Self {
        Self::builder().scan().build()
    }

    /// 空缓存
    pub fn empty() -> Self {
        Self::default()
    }

    /// 创建构建器
    pub fn builder() -> TypeCacheBuilder {
        TypeCacheBuilder::default()
    }

    /// 查找类型信息
    pub fn get(&self, type_id: TypeId) -> Option<&InjectableTypeInfo> {
        self.index.get(&type_id).map(|&i| &self.types[i])
    }

    /// 查找 `T` 的类型信息
    pub fn get_of<T: Any>(&self) -> Option<&InjectableTypeInfo> {
        self.get(TypeId::of::<T>())
    }

    /// 是否收录了该类型
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.index.contains_key(&type_id)
    }

    /// 所有已收录类型，按收录顺序
    pub fn types(&self) -> &[InjectableTypeInfo] {
        &self.types
    }

    /// 已收录类型数量
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// 缓存是否为空
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn insert(&mut self, info: InjectableTypeInfo) {
        let type_id = info.type_info.id;
        if !info.has_fields() {
            debug!("跳过没有可注入字段的类型: {}", info.type_info);
            return;
        }
        if self.index.contains_key(&type_id) {
            debug!("类型已在缓存中: {}", info.type_info);
            return;
        }

        debug!(
            "缓存可注入类型: {} ({} 个字段)",
            info.type_info,
            info.fields().len()
        );
        self.index.insert(type_id, self.types.len());
        self.types.push(info);
    }
}

impl TypeIntrospection for TypeCache {
    fn injectable_type(&self, type_id: TypeId) -> Option<&InjectableTypeInfo> {
        self.get(type_id)
    }

    fn scene_types(&self) -> Vec<&InjectableTypeInfo> {
        self.types
            .iter()
            .filter(|info| info.is_scene_discoverable())
            .collect()
    }

    fn type_count(&self) -> usize {
        self.len()
    }
}

/// 类型缓存构建器
#[derive(Default)]
pub struct TypeCacheBuilder {
    sources: Vec<(&'static str, Describe)>,
}

impl TypeCacheBuilder {
    /// 加入编译期类型清单中的所有类型
    pub fn scan(mut self) -> Self {
        debug!("扫描编译期类型清单: {} 项", INJECTABLE_TYPES.len());
        self.sources.extend(
            INJECTABLE_TYPES
                .iter()
                .map(|registration| (registration.type_name, registration.describe)),
        );
        self
    }

    /// 显式加入一个类型
    pub fn register<T: Injectable>(mut self) -> Self {
        self.sources
            .push((std::any::type_name::<T>(), T::injectable_type as Describe));
        self
    }

    /// 构建缓存
    ///
    /// 描述函数发生 panic 的类型被跳过并记录警告，不影响其他类型。
    pub fn build(self) -> TypeCache {
        let mut cache = TypeCache::default();
        let mut failed = 0;

        for (type_name, describe) in self.sources {
            match panic::catch_unwind(AssertUnwindSafe(describe)) {
                Ok(info) => cache.insert(info),
                Err(payload) => {
                    failed += 1;
                    let error = ComponentError::scan_failed(type_name, panic_message(&*payload));
                    warn!("{}", error);
                }
            }
        }

        info!(
            "类型缓存构建完成: {} 个可注入类型, {} 个失败",
            cache.len(),
            failed
        );
        cache
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "未知错误".to_string()
    }
}
