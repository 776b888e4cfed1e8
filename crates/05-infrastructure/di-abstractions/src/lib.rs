//! # Dependency Injection Abstractions
//!
//! 服务自动注册的抽象层，定义类型目录、服务发现和宿主容器的核心接口。
//!
//! ## 核心接口
//!
//! - [`TypeCatalog`] - 代码单元导出类型目录
//! - [`ServiceDiscovery`] - 服务发现接口
//! - [`ServicesInstaller`] - 服务安装器接口
//! - [`ServiceCollection`] - 宿主容器的服务集合接口

pub mod catalog;
pub mod scanner;
pub mod installer;
pub mod container;
pub mod options;

pub use catalog::*;
pub use scanner::*;
pub use installer::*;
pub use container::*;
pub use options::*;
