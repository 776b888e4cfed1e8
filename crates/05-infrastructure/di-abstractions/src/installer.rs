//! 服务安装器抽象接口

use crate::container::ServiceCollection;
use infrastructure_common::{DependencyResult, TypeDescriptor};
use std::sync::Arc;

/// 服务安装器 trait
///
/// 一个安装器向服务集合注册一个或多个服务
pub trait ServicesInstaller: Send + Sync {
    /// 注册服务
    fn install(&self, services: &mut dyn ServiceCollection);
}

/// 安装器创建函数类型
pub type InstallerFactoryFn =
    Arc<dyn Fn() -> DependencyResult<Arc<dyn ServicesInstaller>> + Send + Sync>;

/// 安装器能力对应的接口描述符
///
/// 目录中可赋值给该接口的类才会被当作安装器扫描。
pub fn installer_contract() -> TypeDescriptor {
    TypeDescriptor::interface_of::<dyn ServicesInstaller>().build()
}
