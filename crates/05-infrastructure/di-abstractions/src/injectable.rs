//! 可注入字段描述
//!
//! 每个可注入类型在编译期生成一份字段描述列表（通常由 `#[derive(Injectable)]` 生成），
//! 注入器据此定位字段并写入依赖，不需要运行时反射。

use infrastructure_common::{
    AnyView, Component, DependencyError, SceneInjection, TypeInfo,
};
use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// 注入槽
///
/// 可注入字段的类型。注入通过 `&self` 完成，因此已共享的服务对象
/// 也能在自注入阶段被写入依赖。
pub struct Inject<T: ?Sized> {
    value: RwLock<Option<Arc<T>>>,
}

impl<T: ?Sized> Inject<T> {
    /// 创建空的注入槽
    pub fn new() -> Self {
        Self {
            value: RwLock::new(None),
        }
    }

    /// 获取已注入的依赖
    pub fn get(&self) -> Option<Arc<T>> {
        self.value.read().clone()
    }

    /// 是否已注入
    pub fn is_set(&self) -> bool {
        self.value.read().is_some()
    }

    /// 手动写入依赖
    pub fn set(&self, value: Arc<T>) {
        *self.value.write() = Some(value);
    }

    /// 取出依赖，注入槽恢复为空
    pub fn take(&self) -> Option<Arc<T>> {
        self.value.write().take()
    }
}

impl<T: ?Sized> Default for Inject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Inject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inject")
            .field("type", &std::any::type_name::<T>())
            .field("set", &self.is_set())
            .finish()
    }
}

/// 类型擦除的注入槽接口
pub trait InjectSlot: Send + Sync {
    /// 槽声明的依赖类型
    fn declared_type() -> TypeInfo
    where
        Self: Sized;

    /// 槽声明的依赖类型（对象安全版本）
    fn slot_type(&self) -> TypeInfo;

    /// 写入一个装箱的 `Arc<X>` 视图
    fn assign(&self, view: AnyView) -> Result<(), DependencyError>;

    /// 是否已写入
    fn is_assigned(&self) -> bool;

    /// 清空
    fn release(&self);
}

impl<T: ?Sized + Send + Sync + 'static> InjectSlot for Inject<T> {
    fn declared_type() -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn slot_type(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn assign(&self, view: AnyView) -> Result<(), DependencyError> {
        let value = view
            .downcast::<Arc<T>>()
            .map_err(|_| DependencyError::ViewMismatch {
                expected: std::any::type_name::<Arc<T>>(),
            })?;
        self.set(*value);
        Ok(())
    }

    fn is_assigned(&self) -> bool {
        self.is_set()
    }

    fn release(&self) {
        self.take();
    }
}

type AccessFn = dyn for<'a> Fn(&'a dyn Any) -> Option<&'a dyn InjectSlot> + Send + Sync;
type ProjectFn = dyn for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Any> + Send + Sync;

/// 字段访问器：从目标对象定位到某个注入槽
#[derive(Clone)]
pub struct FieldAccessor(Arc<AccessFn>);

impl FieldAccessor {
    /// 创建访问器，目标类型不匹配时返回 `None`
    pub fn new<F>(access: F) -> Self
    where
        F: for<'a> Fn(&'a dyn Any) -> Option<&'a dyn InjectSlot> + Send + Sync + 'static,
    {
        Self(Arc::new(access))
    }

    /// 定位注入槽
    pub fn access<'a>(&self, target: &'a dyn Any) -> Option<&'a dyn InjectSlot> {
        (*self.0)(target)
    }

    fn through(&self, project: Arc<ProjectFn>) -> Self {
        let inner = self.clone();
        Self::new(move |target| (*project)(target).and_then(|base| inner.access(base)))
    }
}

impl fmt::Debug for FieldAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldAccessor(<function>)")
    }
}

/// 可注入字段
#[derive(Debug, Clone)]
pub struct InjectableField {
    /// 声明该字段的类型
    pub owner: TypeInfo,
    /// 字段名
    pub name: &'static str,
    /// 从目标对象出发的访问路径，继承字段形如 `base.audio`
    pub path: String,
    /// 字段声明的依赖类型
    pub declared: TypeInfo,
    accessor: FieldAccessor,
}

impl InjectableField {
    /// 创建字段描述
    pub fn new(
        owner: TypeInfo,
        name: &'static str,
        declared: TypeInfo,
        accessor: FieldAccessor,
    ) -> Self {
        Self {
            owner,
            name,
            path: name.to_string(),
            declared,
            accessor,
        }
    }

    /// 定位目标对象上的注入槽
    pub fn slot<'a>(&self, target: &'a dyn Any) -> Option<&'a dyn InjectSlot> {
        self.accessor.access(target)
    }
}

/// 可注入类型信息
///
/// 构建后只读。字段顺序：自身字段在前（按声明顺序），继承字段在后。
#[derive(Debug, Clone)]
pub struct InjectableTypeInfo {
    /// 类型
    pub type_info: TypeInfo,
    fields: Vec<InjectableField>,
    scene: Option<SceneInjection>,
}

impl InjectableTypeInfo {
    /// 创建类型信息，访问路径重复的字段只保留第一次出现
    pub fn new(type_info: TypeInfo, fields: Vec<InjectableField>) -> Self {
        let mut seen = HashSet::new();
        let fields = fields
            .into_iter()
            .filter(|field| seen.insert(field.path.clone()))
            .collect();

        Self {
            type_info,
            fields,
            scene: None,
        }
    }

    /// 标记为可被场景发现的组件类型
    pub fn with_scene(mut self, policy: SceneInjection) -> Self {
        self.scene = Some(policy);
        self
    }

    /// 可注入字段
    pub fn fields(&self) -> &[InjectableField] {
        &self.fields
    }

    /// 是否存在可注入字段
    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }

    /// 是否可被场景发现
    pub fn is_scene_discoverable(&self) -> bool {
        self.scene.is_some()
    }

    /// 场景注入策略，未声明时为 [`SceneInjection::Always`]
    pub fn scene_injection(&self) -> SceneInjection {
        self.scene.unwrap_or_default()
    }

    /// 把本类型的字段作为继承字段并入外层类型
    ///
    /// `via` 是外层类型中保存本类型的字段名，`project` 从外层对象取出该字段。
    pub fn inherited_by<P>(self, via: &'static str, project: P) -> Vec<InjectableField>
    where
        P: for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Any> + Send + Sync + 'static,
    {
        let project: Arc<ProjectFn> = Arc::new(project);
        self.fields
            .into_iter()
            .map(|field| InjectableField {
                path: format!("{via}.{}", field.path),
                accessor: field.accessor.through(project.clone()),
                ..field
            })
            .collect()
    }
}

/// 可注入类型
///
/// 提供编译期生成的字段描述。通常由 `#[derive(Injectable)]` 实现。
pub trait Injectable: Component + Sized {
    /// 类型信息
    fn injectable_type() -> InjectableTypeInfo;
}

/// 编译期类型清单中的一项
pub struct InjectableRegistration {
    /// 类型名称
    pub type_name: &'static str,
    /// 构建类型信息
    pub describe: fn() -> InjectableTypeInfo,
}

/// 所有链接进进程的可注入类型
///
/// `#[derive(Injectable)]` 为每个非泛型类型提交一项，类型缓存扫描时遍历它。
#[linkme::distributed_slice]
pub static INJECTABLE_TYPES: [InjectableRegistration] = [..];
