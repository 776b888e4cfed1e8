//! 内存服务集合实现

use di_abstractions::{ServiceCollection, ServiceDescriptor};
use infrastructure_common::TypeDescriptor;
use tracing::{debug, info};

/// 按注册顺序保存服务描述符的服务集合
#[derive(Debug, Default, Clone)]
pub struct ServiceCollectionImpl {
    descriptors: Vec<ServiceDescriptor>,
}

impl ServiceCollectionImpl {
    /// 创建空的服务集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 查找服务契约的所有描述符
    pub fn find(&self, service: &TypeDescriptor) -> Vec<&ServiceDescriptor> {
        self.descriptors
            .iter()
            .filter(|d| &d.service == service)
            .collect()
    }

    /// 迭代描述符
    pub fn iter(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.descriptors.iter()
    }
}

impl ServiceCollection for ServiceCollectionImpl {
    fn add(&mut self, descriptor: ServiceDescriptor) {
        debug!(
            "注册服务: {} -> {:?} ({})",
            descriptor.service, descriptor.implementation, descriptor.lifetime
        );
        self.descriptors.push(descriptor);
    }

    fn replace(&mut self, descriptor: ServiceDescriptor) -> Option<ServiceDescriptor> {
        let removed = self
            .descriptors
            .iter()
            .position(|d| d.service == descriptor.service)
            .map(|index| self.descriptors.remove(index));
        info!("替换服务: {}", descriptor.service);
        self.descriptors.push(descriptor);
        removed
    }

    fn remove_by_generic_definition(&mut self, definition: &TypeDescriptor) -> usize {
        let before = self.descriptors.len();
        self.descriptors.retain(|d| {
            !(d.service.is_generic_type()
                && d.service.generic_type_definition().as_ref() == Some(definition))
        });
        let removed = before - self.descriptors.len();
        info!("按泛型定义 {} 移除了 {} 个服务", definition, removed);
        removed
    }

    fn descriptors(&self) -> Vec<ServiceDescriptor> {
        self.descriptors.clone()
    }

    fn contains(&self, service: &TypeDescriptor) -> bool {
        self.descriptors.iter().any(|d| &d.service == service)
    }

    fn len(&self) -> usize {
        self.descriptors.len()
    }
}
