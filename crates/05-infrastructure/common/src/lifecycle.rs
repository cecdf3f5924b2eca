//! 组件生命周期通知
//!
//! 两种可选能力，组件通过 [`Component`](crate::Component) 的
//! `injection_listener` / `teardown_listener` 暴露给容器。

use crate::errors::BoxError;

/// 注入完成通知
///
/// 每次对该对象的注入结束后调用一次，无论是否有未满足的依赖。
/// 返回的错误只会被记录，不会中断调用方的批量注入。
pub trait InjectionListener: Send + Sync {
    /// 注入完成
    fn on_injected(&self) -> Result<(), BoxError>;
}

/// 注册表拆除通知
///
/// 注册表拆除时，对每个已注册实例恰好调用一次。
pub trait TeardownListener: Send + Sync {
    /// 注册表拆除
    fn on_teardown(&self) -> Result<(), BoxError>;
}
