//! 契约选择

use di_abstractions::ContractStrategy;
use infrastructure_common::{DiscoveryError, DiscoveryResult, TypeDescriptor};

/// 按策略计算候选类型注册时使用的服务契约
pub fn select_contract(
    candidate: &TypeDescriptor,
    strategy: &ContractStrategy,
) -> DiscoveryResult<TypeDescriptor> {
    match strategy {
        ContractStrategy::SelfType => Ok(candidate.clone()),
        ContractStrategy::DefaultInterface => candidate
            .interfaces()
            .into_iter()
            .next()
            .ok_or_else(|| DiscoveryError::NoInterface {
                type_name: candidate.name().to_string(),
            }),
        ContractStrategy::BaseClass => {
            candidate
                .base_type()
                .cloned()
                .ok_or_else(|| DiscoveryError::NoBaseType {
                    type_name: candidate.name().to_string(),
                })
        }
        ContractStrategy::Explicit(contract) => Ok(contract.clone()),
    }
}
