//! 容器配置与注入报告
//!
//! 配置只调整容器自身的行为，不参与服务装配。

use infrastructure_common::{DependencyError, TypeInfo};
use serde::{Deserialize, Serialize};

/// 多个候选实例都能满足接口查找时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// 视为未满足的依赖，不做猜测
    #[default]
    Reject,
    /// 取注册顺序中的第一个，并记录警告
    FirstRegistered,
}

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 接口查找的歧义处理方式
    pub ambiguity: AmbiguityPolicy,
    /// 构建容器时是否扫描编译期类型清单
    pub scan_types: bool,
    /// 拆除时是否清空已注册实例上的注入槽
    pub release_on_teardown: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            ambiguity: AmbiguityPolicy::Reject,
            scan_types: true,
            release_on_teardown: true,
        }
    }
}

/// 未满足的依赖
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmetDependency {
    /// 字段访问路径
    pub field: String,
    /// 字段声明的依赖类型
    pub declared: TypeInfo,
    /// 原因
    pub reason: DependencyError,
}

/// 单个目标的注入结果
#[derive(Debug, Clone)]
pub struct InjectionReport {
    /// 目标的具体类型
    pub target: TypeInfo,
    /// 已写入的字段访问路径
    pub assigned: Vec<String>,
    /// 未满足的依赖
    pub unmet: Vec<UnmetDependency>,
    /// 是否调用了注入完成通知
    pub notified: bool,
}

impl InjectionReport {
    /// 创建空报告
    pub fn new(target: TypeInfo) -> Self {
        Self {
            target,
            assigned: Vec::new(),
            unmet: Vec::new(),
            notified: false,
        }
    }

    /// 所有字段都已满足
    pub fn is_complete(&self) -> bool {
        self.unmet.is_empty()
    }
}

/// 批量注入结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkInjectionReport {
    /// 执行了注入的目标数量
    pub injected: usize,
    /// 按规则跳过的候选数量
    pub skipped: usize,
    /// 未满足的依赖总数
    pub unmet: usize,
}

impl BulkInjectionReport {
    /// 计入一个目标的注入结果
    pub fn record(&mut self, report: &InjectionReport) {
        self.injected += 1;
        self.unmet += report.unmet.len();
    }

    /// 计入一个被跳过的候选
    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    /// 合并另一批结果
    pub fn merge(&mut self, other: Self) {
        self.injected += other.injected;
        self.skipped += other.skipped;
        self.unmet += other.unmet;
    }
}
