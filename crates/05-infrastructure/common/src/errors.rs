//! 错误类型定义

use thiserror::Error;

/// 消费方回调返回的错误类型
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 依赖注入错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DependencyError {
    #[error("组件类型重复注册: {type_name}")]
    DuplicateType { type_name: &'static str },

    #[error("组件未注册: {type_name}")]
    NotRegistered { type_name: &'static str },

    #[error("依赖解析存在歧义: {type_name}, 候选: {candidates:?}")]
    Ambiguous {
        type_name: &'static str,
        candidates: Vec<&'static str>,
    },

    #[error("注入视图类型不匹配: 期望 {expected}")]
    ViewMismatch { expected: &'static str },
}

impl DependencyError {
    /// 是否为配置错误（调用方的用法错误，而不是运行期缺失的依赖）
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::DuplicateType { .. })
    }
}

/// 组件错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    #[error("类型扫描失败: {type_name}, 原因: {message}")]
    ScanFailed {
        type_name: &'static str,
        message: String,
    },
}

impl ComponentError {
    /// 创建扫描错误
    pub fn scan_failed(type_name: &'static str, message: impl Into<String>) -> Self {
        Self::ScanFailed {
            type_name,
            message: message.into(),
        }
    }
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置加载失败: {source}")]
    LoadFailed { source: BoxError },
}

impl ConfigError {
    /// 包装底层加载错误
    pub fn load_failed(source: impl Into<BoxError>) -> Self {
        Self::LoadFailed {
            source: source.into(),
        }
    }
}

/// 结果类型别名
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
