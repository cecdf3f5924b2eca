//! 场景发现相关类型
//!
//! 场景遍历本身由宿主环境提供，这里只定义双方交换的数据。

use crate::component::Component;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// 场景注入策略
///
/// 声明在可被场景发现的组件类型上，决定批量场景注入是否作用于该类型的实例。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneInjection {
    /// 从不通过场景发现注入
    Ignore,
    /// 仅在实例处于激活状态时注入
    OnlyWhenActive,
    /// 总是注入
    #[default]
    Always,
}

impl SceneInjection {
    /// 对给定激活状态的实例是否应当注入
    pub fn permits(self, active: bool) -> bool {
        match self {
            Self::Ignore => false,
            Self::OnlyWhenActive => active,
            Self::Always => true,
        }
    }
}

/// 发现器返回的候选对象
#[derive(Clone)]
pub struct DiscoveredObject {
    /// 对象
    pub object: Arc<dyn Component>,
    /// 宿主环境是否认为该对象处于激活状态
    pub active: bool,
}

impl DiscoveredObject {
    /// 创建激活状态的候选对象
    pub fn active(object: Arc<dyn Component>) -> Self {
        Self {
            object,
            active: true,
        }
    }

    /// 创建未激活的候选对象
    pub fn inactive(object: Arc<dyn Component>) -> Self {
        Self {
            object,
            active: false,
        }
    }
}

impl fmt::Debug for DiscoveredObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoveredObject")
            .field("object", &self.object.component_type())
            .field("active", &self.active)
            .finish()
    }
}
