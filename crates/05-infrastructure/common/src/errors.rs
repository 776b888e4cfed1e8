//! 错误类型定义

use thiserror::Error;

/// 类型发现错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    #[error("基础契约无效: {type_name} ({kind}), 必须是接口或类")]
    InvalidContract { type_name: String, kind: String },

    #[error("类型未实现任何接口: {type_name}")]
    NoInterface { type_name: String },

    #[error("类型没有基类: {type_name}")]
    NoBaseType { type_name: String },

    #[error("代码单元不存在: {code_unit}")]
    CodeUnitNotFound { code_unit: String },

    #[error("泛型参数数量不匹配: {type_name}, 期望 {expected}, 实际 {actual}")]
    GenericArityMismatch {
        type_name: String,
        expected: usize,
        actual: usize,
    },
}

impl DiscoveryError {
    /// 创建基础契约无效错误
    pub fn invalid_contract(type_name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::InvalidContract {
            type_name: type_name.into(),
            kind: kind.into(),
        }
    }

    /// 创建代码单元不存在错误
    pub fn code_unit_not_found(code_unit: impl Into<String>) -> Self {
        Self::CodeUnitNotFound {
            code_unit: code_unit.into(),
        }
    }
}

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("组件未注册: {type_name}")]
    ComponentNotRegistered { type_name: String },

    #[error("组件创建失败: {type_name}, 原因: {source}")]
    ComponentCreationFailed {
        type_name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl DependencyError {
    /// 创建组件创建失败错误
    pub fn creation_failed(
        type_name: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ComponentCreationFailed {
            type_name: type_name.into(),
            source: source.into(),
        }
    }
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

/// 结果类型别名
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
