//! 内存类型目录实现

use di_abstractions::TypeCatalog;
use infrastructure_common::{CodeUnitId, DiscoveryError, DiscoveryResult, TypeDescriptor};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// 内存中的类型目录
///
/// 通过显式注册导出类型来代替运行时反射，类型按注册顺序枚举。
#[derive(Debug, Default)]
pub struct InMemoryTypeCatalog {
    code_units: RwLock<HashMap<CodeUnitId, Vec<TypeDescriptor>>>,
}

impl InMemoryTypeCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 声明一个代码单元（可以没有导出类型）
    pub fn add_code_unit(&self, code_unit: impl Into<CodeUnitId>) {
        self.code_units.write().entry(code_unit.into()).or_default();
    }

    /// 导出类型到它所属的代码单元，重复导出会被忽略
    pub fn export(&self, descriptor: &TypeDescriptor) {
        let mut code_units = self.code_units.write();
        let types = code_units.entry(descriptor.code_unit().clone()).or_default();
        if !types.contains(descriptor) {
            debug!("导出类型: {} -> {}", descriptor.name(), descriptor.code_unit());
            types.push(descriptor.clone());
        }
    }

    /// 批量导出类型
    pub fn export_all<'a>(&self, descriptors: impl IntoIterator<Item = &'a TypeDescriptor>) {
        for descriptor in descriptors {
            self.export(descriptor);
        }
    }

    /// 已声明的代码单元数量
    pub fn code_unit_count(&self) -> usize {
        self.code_units.read().len()
    }
}

impl TypeCatalog for InMemoryTypeCatalog {
    fn exported_types(&self, code_unit: &CodeUnitId) -> DiscoveryResult<Vec<TypeDescriptor>> {
        self.code_units
            .read()
            .get(code_unit)
            .cloned()
            .ok_or_else(|| DiscoveryError::code_unit_not_found(code_unit.as_str()))
    }

    fn contains_code_unit(&self, code_unit: &CodeUnitId) -> bool {
        self.code_units.read().contains_key(code_unit)
    }
}
