//! 安装器注册表
//!
//! 按代码单元扫描并缓存服务安装器

use dashmap::DashMap;
use di_abstractions::{installer_contract, InstallerFactoryFn, ServicesInstaller, TypeCatalog};
use infrastructure_common::{
    CodeUnitId, DependencyError, DependencyResult, DiscoveryResult, TypeDescriptor,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 已发现的安装器列表
pub type InstallerList = Arc<Vec<Arc<dyn ServicesInstaller>>>;

/// 安装器工厂注册表
///
/// 为目录中的安装器类型登记创建函数
#[derive(Default)]
pub struct InstallerFactoryRegistry {
    factories: DashMap<TypeDescriptor, InstallerFactoryFn>,
}

impl InstallerFactoryRegistry {
    /// 创建空的工厂注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册创建函数，已存在时覆盖
    pub fn register<F>(&self, installer: &TypeDescriptor, factory: F)
    where
        F: Fn() -> DependencyResult<Arc<dyn ServicesInstaller>> + Send + Sync + 'static,
    {
        self.factories.insert(installer.clone(), Arc::new(factory));
    }

    /// 以 `Default` 构造注册安装器
    pub fn register_default<T>(&self, installer: &TypeDescriptor)
    where
        T: ServicesInstaller + Default + 'static,
    {
        self.register(installer, || Ok(Arc::new(T::default()) as Arc<dyn ServicesInstaller>));
    }

    /// 是否已注册指定类型的创建函数
    pub fn contains(&self, installer: &TypeDescriptor) -> bool {
        self.factories.contains_key(installer)
    }

    /// 创建安装器实例
    pub fn create(&self, installer: &TypeDescriptor) -> DependencyResult<Arc<dyn ServicesInstaller>> {
        let factory = self
            .factories
            .get(installer)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| DependencyError::ComponentNotRegistered {
                type_name: installer.name().to_string(),
            })?;
        factory()
    }
}

impl std::fmt::Debug for InstallerFactoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallerFactoryRegistry")
            .field("factories", &self.factories.len())
            .finish()
    }
}

/// 安装器注册表
///
/// 每个代码单元第一次查询时扫描，之后总是返回同一个缓存列表，缓存不会失效。
/// 并发首次查询时允许重复扫描，先写入缓存的结果胜出。
pub struct InstallerRegistry {
    catalog: Arc<dyn TypeCatalog>,
    factories: Arc<InstallerFactoryRegistry>,
    cache: DashMap<CodeUnitId, InstallerList>,
}

impl InstallerRegistry {
    /// 创建新的安装器注册表
    pub fn new(catalog: Arc<dyn TypeCatalog>, factories: Arc<InstallerFactoryRegistry>) -> Self {
        Self {
            catalog,
            factories,
            cache: DashMap::new(),
        }
    }

    /// 获取代码单元中的安装器（带缓存）
    pub fn get_installers(&self, code_unit: &CodeUnitId) -> DiscoveryResult<InstallerList> {
        if let Some(cached) = self.cache.get(code_unit) {
            debug!("安装器缓存命中: {}", code_unit);
            return Ok(cached.value().clone());
        }

        let scanned = Arc::new(self.scan(code_unit)?);
        let entry = self.cache.entry(code_unit.clone()).or_insert(scanned);
        Ok(entry.value().clone())
    }

    /// 获取某个类型所在代码单元中的安装器（带缓存）
    pub fn contains(&self, type_in_code_unit: &TypeDescriptor) -> DiscoveryResult<InstallerList> {
        self.get_installers(type_in_code_unit.code_unit())
    }

    /// 扫描代码单元中的安装器（不使用缓存）
    ///
    /// 可赋值给安装器契约的类按目录顺序创建，创建失败的条目被跳过。
    pub fn scan(&self, code_unit: &CodeUnitId) -> DiscoveryResult<Vec<Arc<dyn ServicesInstaller>>> {
        let contract = installer_contract();
        let mut installers = Vec::new();

        for candidate in self.catalog.exported_types(code_unit)? {
            if !candidate.is_class() || !contract.is_assignable_from(&candidate) {
                continue;
            }
            match self.factories.create(&candidate) {
                Ok(installer) => installers.push(installer),
                Err(e) => warn!("跳过无法创建的安装器 {}: {}", candidate.name(), e),
            }
        }

        info!("代码单元 {} 扫描到 {} 个安装器", code_unit, installers.len());
        Ok(installers)
    }

    /// 已缓存的代码单元数量
    pub fn cached_code_units(&self) -> usize {
        self.cache.len()
    }
}

impl std::fmt::Debug for InstallerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallerRegistry")
            .field("factories", &self.factories)
            .field("cached_code_units", &self.cache.len())
            .finish()
    }
}
