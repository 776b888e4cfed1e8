//! # 服务自动注册实现
//!
//! 提供基于约定的服务发现引擎、安装器注册表以及内存服务集合。
//!
//! - [`DiscoveryEngine`] - 从类型目录发现 `(服务契约, 实现类型)` 配对
//! - [`InstallerRegistry`] - 按代码单元缓存的安装器扫描
//! - [`ServiceCollectionImpl`] - 接收注册结果的服务集合
//! - [`InMemoryTypeCatalog`] - 显式注册的类型目录

pub mod catalog;
pub mod collection;
pub mod engine;
pub mod installer_registry;
pub mod matching;
pub mod options;
pub mod selector;

pub use catalog::InMemoryTypeCatalog;
pub use collection::ServiceCollectionImpl;
pub use engine::{CodeUnitReference, DiscoveryEngine, Services};
pub use installer_registry::{InstallerFactoryRegistry, InstallerList, InstallerRegistry};
pub use matching::{is_qualifying, is_registrable_implementation};
pub use options::{load_registration_options, load_registration_options_with_prefix};
pub use selector::select_contract;
