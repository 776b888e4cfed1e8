//! 服务发现引擎
//!
//! 从类型目录中筛选具体实现类型，并按契约选择策略生成服务引用。
//!
//! ```rust,ignore
//! let engine = DiscoveryEngine::new(catalog);
//! let references = engine
//!     .from_code_unit_of(&bar)
//!     .based_on(&base)?
//!     .with_default_interface_and_self()?;
//! services.add_scoped(&references);
//! ```

use crate::matching::{is_qualifying, is_registrable_implementation};
use crate::selector::select_contract;
use di_abstractions::{
    BaseContract, ContractStrategy, DiscoveryRequest, RegistrationStrategy, ServiceDiscovery,
    ServiceReference, TypeCatalog,
};
use infrastructure_common::{DiscoveryResult, TypeDescriptor};
use std::sync::Arc;
use tracing::{debug, info};

/// 服务发现引擎
#[derive(Clone)]
pub struct DiscoveryEngine {
    catalog: Arc<dyn TypeCatalog>,
}

impl DiscoveryEngine {
    /// 创建新的发现引擎
    pub fn new(catalog: Arc<dyn TypeCatalog>) -> Self {
        Self { catalog }
    }

    /// 引擎使用的类型目录
    pub fn catalog(&self) -> &Arc<dyn TypeCatalog> {
        &self.catalog
    }

    /// 以某个类型所在的代码单元作为扫描范围
    pub fn from_code_unit_of(&self, type_in_code_unit: &TypeDescriptor) -> CodeUnitReference<'_> {
        CodeUnitReference {
            engine: self,
            type_in_code_unit: type_in_code_unit.clone(),
        }
    }

    /// 筛选候选实现：匹配基础契约的非抽象类，保持目录顺序
    pub fn candidates(&self, request: &DiscoveryRequest) -> DiscoveryResult<Vec<TypeDescriptor>> {
        let code_unit = request.type_in_code_unit().code_unit();
        let base = request.base_contract();
        info!("扫描代码单元: {}, 基础契约: {}", code_unit, base.descriptor());

        let candidates: Vec<TypeDescriptor> = self
            .catalog
            .exported_types(code_unit)?
            .into_iter()
            .filter(|t| is_qualifying(t, base))
            .filter(is_registrable_implementation)
            .collect();

        debug!("发现 {} 个候选实现", candidates.len());
        Ok(candidates)
    }

    fn map_pass(
        candidates: &[TypeDescriptor],
        strategy: &ContractStrategy,
        references: &mut Vec<ServiceReference>,
    ) -> DiscoveryResult<()> {
        debug!("执行契约映射: {:?}", strategy);
        for candidate in candidates {
            let service = select_contract(candidate, strategy)?;
            references.push(ServiceReference::new(service, candidate.clone()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for DiscoveryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryEngine")
            .field("catalog", &"<dyn TypeCatalog>")
            .finish()
    }
}

impl ServiceDiscovery for DiscoveryEngine {
    fn discover(
        &self,
        request: &DiscoveryRequest,
        strategy: RegistrationStrategy,
    ) -> DiscoveryResult<Vec<ServiceReference>> {
        self.discover_passes(request, &strategy.passes())
    }

    fn discover_passes(
        &self,
        request: &DiscoveryRequest,
        passes: &[ContractStrategy],
    ) -> DiscoveryResult<Vec<ServiceReference>> {
        let candidates = self.candidates(request)?;
        let mut references = Vec::with_capacity(candidates.len() * passes.len());
        for pass in passes {
            Self::map_pass(&candidates, pass, &mut references)?;
        }
        Ok(references)
    }
}

/// 代码单元引用，流式 API 的起点
#[derive(Debug)]
pub struct CodeUnitReference<'a> {
    engine: &'a DiscoveryEngine,
    type_in_code_unit: TypeDescriptor,
}

impl<'a> CodeUnitReference<'a> {
    /// 指定基础契约
    ///
    /// 契约不是接口或类时立即失败，不访问类型目录。
    pub fn based_on(self, contract: &TypeDescriptor) -> DiscoveryResult<Services<'a>> {
        let base = BaseContract::new(contract.clone())?;
        Ok(Services {
            engine: self.engine,
            request: DiscoveryRequest::new(self.type_in_code_unit, base),
        })
    }
}

/// 已配置的发现请求
#[derive(Debug)]
pub struct Services<'a> {
    engine: &'a DiscoveryEngine,
    request: DiscoveryRequest,
}

impl Services<'_> {
    /// 发现请求
    pub fn request(&self) -> &DiscoveryRequest {
        &self.request
    }

    /// 注册为自身
    pub fn with_self(&self) -> DiscoveryResult<Vec<ServiceReference>> {
        self.with_strategy(RegistrationStrategy::SelfType)
    }

    /// 注册为第一个接口
    pub fn with_default_interface(&self) -> DiscoveryResult<Vec<ServiceReference>> {
        self.with_strategy(RegistrationStrategy::DefaultInterface)
    }

    /// 注册为基类
    pub fn with_base_class(&self) -> DiscoveryResult<Vec<ServiceReference>> {
        self.with_strategy(RegistrationStrategy::BaseClass)
    }

    /// 先注册为第一个接口，再注册为自身，不去重
    pub fn with_default_interface_and_self(&self) -> DiscoveryResult<Vec<ServiceReference>> {
        self.with_strategy(RegistrationStrategy::DefaultInterfaceAndSelf)
    }

    /// 先注册为基类，再注册为自身，不去重
    pub fn with_base_class_and_self(&self) -> DiscoveryResult<Vec<ServiceReference>> {
        self.with_strategy(RegistrationStrategy::BaseClassAndSelf)
    }

    /// 所有实现都注册到同一个指定契约
    pub fn with_service(&self, contract: &TypeDescriptor) -> DiscoveryResult<Vec<ServiceReference>> {
        self.engine
            .discover_passes(&self.request, &[ContractStrategy::Explicit(contract.clone())])
    }

    /// 按注册策略发现
    pub fn with_strategy(
        &self,
        strategy: RegistrationStrategy,
    ) -> DiscoveryResult<Vec<ServiceReference>> {
        self.engine.discover(&self.request, strategy)
    }
}
