//! 自动注册配置选项

use crate::scanner::RegistrationStrategy;
use infrastructure_common::{ConfigError, ConfigResult, Lifetime};
use serde::{Deserialize, Serialize};

/// 自动注册选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationOptions {
    /// 注册发现结果时使用的生命周期
    pub default_lifetime: Lifetime,
    /// 契约选择策略
    pub strategy: RegistrationStrategy,
    /// 需要扫描安装器的代码单元
    pub code_units: Vec<String>,
}

impl Default for RegistrationOptions {
    fn default() -> Self {
        Self {
            default_lifetime: Lifetime::Scoped,
            strategy: RegistrationStrategy::DefaultInterface,
            code_units: Vec::new(),
        }
    }
}

impl RegistrationOptions {
    /// 校验选项
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(position) = self.code_units.iter().position(|unit| unit.trim().is_empty()) {
            return Err(ConfigError::ValidationError {
                message: format!("code_units[{}] 不能为空", position),
            });
        }
        Ok(())
    }
}
