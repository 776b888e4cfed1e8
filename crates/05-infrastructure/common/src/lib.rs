//! # Infrastructure Common
//!
//! 这个 crate 提供了服务自动注册所需的公共类型。
//!
//! ## 核心类型
//!
//! - [`TypeDescriptor`] - 已加载类型的描述句柄
//! - [`CodeUnitId`] - 代码单元（crate）标识
//! - [`Lifetime`] - 服务生命周期
//! - [`DiscoveryError`] - 类型发现错误
//!
//! ## 设计原则
//!
//! - 不依赖运行时反射，类型信息由显式注册的目录提供
//! - 类型描述符廉价克隆，可在线程间共享
//! - 约定优于配置

pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
