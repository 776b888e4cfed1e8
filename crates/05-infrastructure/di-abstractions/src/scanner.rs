//! 服务扫描抽象接口
//!
//! 定义发现请求、契约选择策略以及发现结果

use infrastructure_common::{DiscoveryError, DiscoveryResult, TypeDescriptor, TypeKind};
use serde::{Deserialize, Serialize};

/// 基础契约
///
/// 作为匹配目标的类型，只能是接口或类，可以是开放泛型定义。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseContract(TypeDescriptor);

impl BaseContract {
    /// 校验并创建基础契约
    pub fn new(contract: TypeDescriptor) -> DiscoveryResult<Self> {
        match contract.kind() {
            TypeKind::Interface | TypeKind::Class => Ok(Self(contract)),
            kind => Err(DiscoveryError::invalid_contract(
                contract.name(),
                kind.to_string(),
            )),
        }
    }

    /// 契约类型
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.0
    }

    /// 是否为开放泛型定义
    pub fn is_generic_type_definition(&self) -> bool {
        self.0.is_generic_type_definition()
    }
}

/// 发现请求
#[derive(Debug, Clone)]
pub struct DiscoveryRequest {
    type_in_code_unit: TypeDescriptor,
    base_contract: BaseContract,
}

impl DiscoveryRequest {
    /// 创建发现请求
    ///
    /// `type_in_code_unit` 只用来确定扫描哪个代码单元。
    pub fn new(type_in_code_unit: TypeDescriptor, base_contract: BaseContract) -> Self {
        Self {
            type_in_code_unit,
            base_contract,
        }
    }

    /// 用于定位代码单元的类型
    pub fn type_in_code_unit(&self) -> &TypeDescriptor {
        &self.type_in_code_unit
    }

    /// 基础契约
    pub fn base_contract(&self) -> &BaseContract {
        &self.base_contract
    }
}

/// 服务引用：服务契约与实现类型的配对
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceReference {
    /// 注册时使用的服务契约
    pub service: TypeDescriptor,
    /// 具体实现类型，总是非抽象类
    pub implementation: TypeDescriptor,
}

impl ServiceReference {
    /// 创建服务引用
    pub fn new(service: TypeDescriptor, implementation: TypeDescriptor) -> Self {
        Self {
            service,
            implementation,
        }
    }
}

/// 单次扫描的契约选择策略
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractStrategy {
    /// 以实现类型自身作为契约
    SelfType,
    /// 以实现的第一个接口作为契约
    DefaultInterface,
    /// 以直接基类作为契约
    BaseClass,
    /// 所有实现都使用同一个指定契约
    Explicit(TypeDescriptor),
}

/// 注册策略，可以组合多次扫描
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStrategy {
    /// 注册为自身
    #[serde(rename = "self")]
    SelfType,
    /// 注册为第一个接口
    DefaultInterface,
    /// 注册为基类
    BaseClass,
    /// 先注册为第一个接口，再注册为自身
    DefaultInterfaceAndSelf,
    /// 先注册为基类，再注册为自身
    BaseClassAndSelf,
}

impl RegistrationStrategy {
    /// 展开为按顺序执行的扫描策略，组合策略先执行主策略再执行自身策略
    pub fn passes(self) -> Vec<ContractStrategy> {
        match self {
            Self::SelfType => vec![ContractStrategy::SelfType],
            Self::DefaultInterface => vec![ContractStrategy::DefaultInterface],
            Self::BaseClass => vec![ContractStrategy::BaseClass],
            Self::DefaultInterfaceAndSelf => vec![
                ContractStrategy::DefaultInterface,
                ContractStrategy::SelfType,
            ],
            Self::BaseClassAndSelf => {
                vec![ContractStrategy::BaseClass, ContractStrategy::SelfType]
            }
        }
    }
}

impl Default for RegistrationStrategy {
    fn default() -> Self {
        Self::DefaultInterface
    }
}

/// 服务发现 trait
pub trait ServiceDiscovery: Send + Sync {
    /// 按注册策略发现服务引用
    fn discover(
        &self,
        request: &DiscoveryRequest,
        strategy: RegistrationStrategy,
    ) -> DiscoveryResult<Vec<ServiceReference>>;

    /// 按给定的扫描序列发现服务引用，各次扫描结果按顺序拼接
    fn discover_passes(
        &self,
        request: &DiscoveryRequest,
        passes: &[ContractStrategy],
    ) -> DiscoveryResult<Vec<ServiceReference>>;
}
