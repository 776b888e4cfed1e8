//! 宿主容器抽象接口
//!
//! 发现结果最终以 [`ServiceDescriptor`] 的形式交给宿主容器的服务集合

use crate::installer::ServicesInstaller;
use crate::scanner::ServiceReference;
use infrastructure_common::{DependencyError, Lifetime, TypeDescriptor};
use std::any::Any;
use std::sync::Arc;

/// 服务工厂函数类型
pub type ServiceFactoryFn =
    Arc<dyn Fn() -> Result<Arc<dyn Any + Send + Sync>, DependencyError> + Send + Sync>;

/// 服务实现来源
#[derive(Clone)]
pub enum ServiceImplementation {
    /// 由容器按实现类型创建
    Type(TypeDescriptor),
    /// 由工厂函数创建
    Factory(ServiceFactoryFn),
}

impl std::fmt::Debug for ServiceImplementation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Type(implementation) => f.debug_tuple("Type").field(implementation).finish(),
            Self::Factory(_) => f.write_str("Factory(<function>)"),
        }
    }
}

/// 服务描述符
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    /// 服务契约
    pub service: TypeDescriptor,
    /// 实现来源
    pub implementation: ServiceImplementation,
    /// 生命周期
    pub lifetime: Lifetime,
}

impl ServiceDescriptor {
    /// 以实现类型创建描述符
    pub fn new(service: TypeDescriptor, implementation: TypeDescriptor, lifetime: Lifetime) -> Self {
        Self {
            service,
            implementation: ServiceImplementation::Type(implementation),
            lifetime,
        }
    }

    /// 以工厂函数创建描述符
    pub fn with_factory(service: TypeDescriptor, factory: ServiceFactoryFn, lifetime: Lifetime) -> Self {
        Self {
            service,
            implementation: ServiceImplementation::Factory(factory),
            lifetime,
        }
    }

    /// 从服务引用创建描述符
    pub fn from_reference(reference: &ServiceReference, lifetime: Lifetime) -> Self {
        Self::new(
            reference.service.clone(),
            reference.implementation.clone(),
            lifetime,
        )
    }

    /// 实现类型，工厂注册返回 `None`
    pub fn implementation_type(&self) -> Option<&TypeDescriptor> {
        match &self.implementation {
            ServiceImplementation::Type(implementation) => Some(implementation),
            ServiceImplementation::Factory(_) => None,
        }
    }
}

/// 服务集合 trait
///
/// 宿主容器的注册入口，保持注册顺序
pub trait ServiceCollection: Send + Sync {
    /// 追加服务描述符
    fn add(&mut self, descriptor: ServiceDescriptor);

    /// 移除第一个相同服务契约的描述符并追加新描述符，返回被移除的描述符
    fn replace(&mut self, descriptor: ServiceDescriptor) -> Option<ServiceDescriptor>;

    /// 移除所有服务契约由指定开放泛型定义构造的描述符，返回移除数量
    fn remove_by_generic_definition(&mut self, definition: &TypeDescriptor) -> usize;

    /// 获取所有描述符
    fn descriptors(&self) -> Vec<ServiceDescriptor>;

    /// 是否已注册指定服务契约
    fn contains(&self, service: &TypeDescriptor) -> bool;

    /// 描述符数量
    fn len(&self) -> usize;

    /// 是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 服务集合扩展方法
pub trait ServiceCollectionExt: ServiceCollection {
    /// 以指定生命周期注册所有服务引用
    fn add_references(&mut self, references: &[ServiceReference], lifetime: Lifetime) {
        for reference in references {
            self.add(ServiceDescriptor::from_reference(reference, lifetime));
        }
    }

    /// 以瞬时生命周期注册
    fn add_transient(&mut self, references: &[ServiceReference]) {
        self.add_references(references, Lifetime::Transient);
    }

    /// 以作用域生命周期注册
    fn add_scoped(&mut self, references: &[ServiceReference]) {
        self.add_references(references, Lifetime::Scoped);
    }

    /// 以单例生命周期注册
    fn add_singleton(&mut self, references: &[ServiceReference]) {
        self.add_references(references, Lifetime::Singleton);
    }

    /// 替换服务契约的实现类型
    fn replace_with(
        &mut self,
        service: &TypeDescriptor,
        implementation: &TypeDescriptor,
        lifetime: Lifetime,
    ) -> Option<ServiceDescriptor> {
        self.replace(ServiceDescriptor::new(
            service.clone(),
            implementation.clone(),
            lifetime,
        ))
    }

    /// 以工厂函数替换服务契约的实现
    fn replace_with_factory(
        &mut self,
        service: &TypeDescriptor,
        factory: ServiceFactoryFn,
        lifetime: Lifetime,
    ) -> Option<ServiceDescriptor> {
        self.replace(ServiceDescriptor::with_factory(
            service.clone(),
            factory,
            lifetime,
        ))
    }

    /// 按顺序执行安装器
    fn install(&mut self, installers: &[Arc<dyn ServicesInstaller>])
    where
        Self: Sized,
    {
        for installer in installers {
            installer.install(self);
        }
    }
}

impl<T: ServiceCollection + ?Sized> ServiceCollectionExt for T {}
