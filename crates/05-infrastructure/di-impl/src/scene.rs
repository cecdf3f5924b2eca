//! 内存场景
//!
//! 一个简单的对象图，节点上挂载组件、可以嵌套子节点。
//! 节点只有在自身和所有祖先都处于激活状态时，其上的组件才算激活。

use di_abstractions::ObjectDiscovery;
use infrastructure_common::{Component, DiscoveredObject, TypeInfo};
use std::sync::Arc;

/// 场景节点
#[derive(Clone)]
pub struct SceneNode {
    name: String,
    active: bool,
    components: Vec<Arc<dyn Component>>,
    children: Vec<SceneNode>,
}

impl SceneNode {
    /// 创建激活状态的空节点
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
            components: Vec::new(),
            children: Vec::new(),
        }
    }

    /// 设置节点自身的激活状态
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// 挂载组件
    pub fn with_component<T: Component>(mut self, component: Arc<T>) -> Self {
        self.components.push(component);
        self
    }

    /// 添加子节点
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// 节点名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 节点自身的激活状态，不考虑祖先
    pub fn is_active_self(&self) -> bool {
        self.active
    }

    /// 挂在本节点上的组件
    pub fn components(&self) -> &[Arc<dyn Component>] {
        &self.components
    }

    /// 子节点
    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    /// 以本节点为范围的发现器
    ///
    /// `include_children` 为 `false` 时只发现本节点上的组件。
    /// 本节点被视为根，祖先的激活状态不在考虑范围内。
    pub fn discovery(&self, include_children: bool) -> NodeDiscovery<'_> {
        NodeDiscovery {
            node: self,
            include_children,
        }
    }

    fn collect(
        &self,
        component_type: &TypeInfo,
        parent_active: bool,
        include_children: bool,
        found: &mut Vec<DiscoveredObject>,
    ) {
        let active = parent_active && self.active;
        found.extend(
            self.components
                .iter()
                .filter(|component| component.component_type() == *component_type)
                .map(|component| DiscoveredObject {
                    object: component.clone(),
                    active,
                }),
        );

        if include_children {
            for child in &self.children {
                child.collect(component_type, active, true, found);
            }
        }
    }
}

impl std::fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneNode")
            .field("name", &self.name)
            .field("active", &self.active)
            .field("components", &self.components.len())
            .field("children", &self.children)
            .finish()
    }
}

/// 单个节点范围内的发现器
#[derive(Debug, Clone, Copy)]
pub struct NodeDiscovery<'a> {
    node: &'a SceneNode,
    include_children: bool,
}

impl ObjectDiscovery for NodeDiscovery<'_> {
    fn instances_of(&self, component_type: &TypeInfo) -> Vec<DiscoveredObject> {
        let mut found = Vec::new();
        self.node
            .collect(component_type, true, self.include_children, &mut found);
        found
    }

    fn name(&self) -> &str {
        self.node.name()
    }
}

/// 场景：若干根节点
#[derive(Debug, Clone, Default)]
pub struct Scene {
    name: String,
    roots: Vec<SceneNode>,
}

impl Scene {
    /// 创建空场景
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roots: Vec::new(),
        }
    }

    /// 添加根节点
    pub fn with_root(mut self, root: SceneNode) -> Self {
        self.roots.push(root);
        self
    }

    /// 根节点
    pub fn roots(&self) -> &[SceneNode] {
        &self.roots
    }
}

impl ObjectDiscovery for Scene {
    fn instances_of(&self, component_type: &TypeInfo) -> Vec<DiscoveredObject> {
        let mut found = Vec::new();
        for root in &self.roots {
            root.collect(component_type, true, true, &mut found);
        }
        found
    }

    fn name(&self) -> &str {
        &self.name
    }
}
