//! 类型目录抽象接口
//!
//! 提供按代码单元枚举导出类型的能力

use infrastructure_common::{CodeUnitId, DiscoveryResult, TypeDescriptor};

/// 类型目录 trait
///
/// 引擎只读取目录，不修改它。返回的类型顺序即扫描顺序。
pub trait TypeCatalog: Send + Sync {
    /// 获取代码单元公开导出的类型，保持注册顺序
    fn exported_types(&self, code_unit: &CodeUnitId) -> DiscoveryResult<Vec<TypeDescriptor>>;

    /// 检查目录中是否存在指定代码单元
    fn contains_code_unit(&self, code_unit: &CodeUnitId) -> bool;
}
