//! 候选类型匹配规则

use di_abstractions::BaseContract;
use infrastructure_common::TypeDescriptor;

/// 候选类型是否是基础契约的子类型
///
/// 基础契约是开放泛型定义时，只检查候选类型实现的泛型接口的定义是否与契约相同；
/// 开放泛型基类不参与匹配。其他情况按可赋值关系判断。
pub fn is_qualifying(candidate: &TypeDescriptor, base: &BaseContract) -> bool {
    let contract = base.descriptor();
    if contract.is_generic_type_definition() {
        return candidate
            .interfaces()
            .iter()
            .filter(|interface| interface.is_generic_type())
            .filter_map(TypeDescriptor::generic_type_definition)
            .any(|definition| &definition == contract);
    }

    contract.is_assignable_from(candidate)
}

/// 候选类型是否可以作为实现注册：必须是非抽象类
pub fn is_registrable_implementation(candidate: &TypeDescriptor) -> bool {
    candidate.is_class() && !candidate.is_abstract()
}
