//! 容器配置加载
//!
//! 来源优先级从低到高：默认值、配置文件、`INJECT_` 前缀的环境变量。

use di_abstractions::ContainerConfig;
use infrastructure_common::{ConfigError, ConfigResult};
use std::path::Path;
use tracing::{debug, error};

/// 环境变量前缀，例如 `INJECT_AMBIGUITY=first_registered`
pub const ENV_PREFIX: &str = "INJECT";

/// 加载容器配置
///
/// 指定的文件必须存在，格式按扩展名识别。未出现的键取默认值。
pub fn load_container_config(path: Option<&Path>) -> ConfigResult<ContainerConfig> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        debug!("添加容器配置文件: {}", path.display());
        builder = builder.add_source(config::File::from(path).required(true));
    }

    let settings = builder
        .add_source(config::Environment::with_prefix(ENV_PREFIX).prefix_separator("_"))
        .build()
        .map_err(|e| {
            error!("容器配置构建失败: {}", e);
            ConfigError::load_failed(e)
        })?;

    let config: ContainerConfig = settings.try_deserialize().map_err(|e| {
        error!("容器配置绑定失败: {}", e);
        ConfigError::load_failed(e)
    })?;

    debug!("容器配置: {:?}", config);
    Ok(config)
}
