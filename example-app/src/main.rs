//! # 示例应用程序
//!
//! 演示如何用类型目录、发现引擎和安装器完成基于约定的服务自动注册

use anyhow::Context;
use clap::{Parser, ValueEnum};
use di_abstractions::{
    installer_contract, RegistrationOptions, RegistrationStrategy, ServiceCollection,
    ServiceCollectionExt, ServiceImplementation, ServicesInstaller,
};
use di_impl::{
    load_registration_options, DiscoveryEngine, InMemoryTypeCatalog, InstallerFactoryRegistry,
    InstallerRegistry, ServiceCollectionImpl,
};
use infrastructure_common::{CodeUnitId, TypeDescriptor};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "基于约定的服务自动注册示例")]
struct Args {
    /// 配置文件路径（默认尝试 config/registration）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 覆盖配置中的注册策略
    #[arg(short, long, value_enum)]
    strategy: Option<StrategyArg>,

    /// 日志过滤器
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    #[value(name = "self")]
    SelfType,
    DefaultInterface,
    BaseClass,
    DefaultInterfaceAndSelf,
    BaseClassAndSelf,
}

impl From<StrategyArg> for RegistrationStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::SelfType => Self::SelfType,
            StrategyArg::DefaultInterface => Self::DefaultInterface,
            StrategyArg::BaseClass => Self::BaseClass,
            StrategyArg::DefaultInterfaceAndSelf => Self::DefaultInterfaceAndSelf,
            StrategyArg::BaseClassAndSelf => Self::BaseClassAndSelf,
        }
    }
}

/// 示例业务类型
mod shop {
    /// 通知发送
    pub trait Notifier: Send + Sync {
        fn notify(&self, message: &str) -> String;
    }

    /// 审计标记
    pub trait Auditable {}

    /// 通知器公共基类
    #[allow(dead_code)]
    pub struct NotifierBase;

    #[derive(Default)]
    pub struct EmailNotifier;

    impl Notifier for EmailNotifier {
        fn notify(&self, message: &str) -> String {
            format!("email: {}", message)
        }
    }

    impl Auditable for EmailNotifier {}

    #[derive(Default)]
    pub struct SmsNotifier;

    impl Notifier for SmsNotifier {
        fn notify(&self, message: &str) -> String {
            format!("sms: {}", message)
        }
    }

    /// 注册通知器的安装器
    #[allow(dead_code)]
    pub struct ShopInstaller;
}

/// 示例代码单元中的类型描述符
#[derive(Clone)]
struct ShopTypes {
    notifier: TypeDescriptor,
    auditable: TypeDescriptor,
    notifier_base: TypeDescriptor,
    installer: TypeDescriptor,
}

fn build_catalog() -> (InMemoryTypeCatalog, ShopTypes) {
    let notifier = TypeDescriptor::interface_of::<dyn shop::Notifier>().build();
    let auditable = TypeDescriptor::interface_of::<dyn shop::Auditable>().build();
    let notifier_base = TypeDescriptor::class_of::<shop::NotifierBase>()
        .abstract_type()
        .build();
    let email = TypeDescriptor::class_of::<shop::EmailNotifier>()
        .extends(&notifier_base)
        .implements(&notifier)
        .implements(&auditable)
        .build();
    let sms = TypeDescriptor::class_of::<shop::SmsNotifier>()
        .extends(&notifier_base)
        .implements(&notifier)
        .build();
    let installer = TypeDescriptor::class_of::<shop::ShopInstaller>()
        .implements(&installer_contract())
        .build();

    let catalog = InMemoryTypeCatalog::new();
    catalog.export_all([&notifier, &auditable, &notifier_base, &email, &sms, &installer]);

    let types = ShopTypes {
        notifier,
        auditable,
        notifier_base,
        installer,
    };
    (catalog, types)
}

/// 按配置注册所有通知器，并把可审计的实现额外注册到审计契约
struct ConfiguredShopInstaller {
    engine: DiscoveryEngine,
    types: ShopTypes,
    options: RegistrationOptions,
}

impl ServicesInstaller for ConfiguredShopInstaller {
    fn install(&self, services: &mut dyn ServiceCollection) {
        let notifiers = self
            .engine
            .from_code_unit_of(&self.types.notifier)
            .based_on(&self.types.notifier_base)
            .and_then(|s| s.with_strategy(self.options.strategy));
        match notifiers {
            Ok(references) => services.add_references(&references, self.options.default_lifetime),
            Err(e) => error!("通知器注册失败: {}", e),
        }

        let audited = self
            .engine
            .from_code_unit_of(&self.types.auditable)
            .based_on(&self.types.auditable)
            .and_then(|s| s.with_self());
        match audited {
            Ok(references) => services.add_singleton(&references),
            Err(e) => error!("审计服务注册失败: {}", e),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log_level).context("无效的日志过滤器")?)
        .init();

    let mut options =
        load_registration_options(args.config.as_deref()).context("加载注册配置失败")?;
    if let Some(strategy) = args.strategy {
        options.strategy = strategy.into();
    }
    info!("注册配置: {:?}", options);

    let (catalog, types) = build_catalog();
    let catalog = Arc::new(catalog);
    let engine = DiscoveryEngine::new(catalog.clone());

    let factories = Arc::new(InstallerFactoryRegistry::new());
    {
        let engine = engine.clone();
        let installer = types.installer.clone();
        let types = types.clone();
        let options = options.clone();
        factories.register(&installer, move || {
            Ok(Arc::new(ConfiguredShopInstaller {
                engine: engine.clone(),
                types: types.clone(),
                options: options.clone(),
            }) as Arc<dyn ServicesInstaller>)
        });
    }
    let registry = InstallerRegistry::new(catalog, factories);

    let code_units: Vec<CodeUnitId> = if options.code_units.is_empty() {
        vec![types.installer.code_unit().clone()]
    } else {
        options.code_units.iter().map(|unit| CodeUnitId::from(unit.as_str())).collect()
    };

    let mut services = ServiceCollectionImpl::new();
    for unit in &code_units {
        let installers = registry
            .get_installers(unit)
            .with_context(|| format!("扫描代码单元 {} 失败", unit))?;
        services.install(&installers);
    }

    info!("共注册 {} 个服务", services.len());
    for descriptor in services.iter() {
        let implementation = match &descriptor.implementation {
            ServiceImplementation::Type(t) => t.short_name().to_string(),
            ServiceImplementation::Factory(_) => "<factory>".to_string(),
        };
        println!(
            "{:<10} {:<24} -> {}",
            descriptor.lifetime,
            descriptor.service.short_name(),
            implementation
        );
    }

    for descriptor in services.find(&types.notifier) {
        if let Some(notifier) = descriptor.implementation_type().and_then(activate_notifier) {
            info!("{}", notifier.notify("订单已发货"));
        }
    }
    Ok(())
}

/// 按实现类型创建通知器实例
fn activate_notifier(implementation: &TypeDescriptor) -> Option<Box<dyn shop::Notifier>> {
    let name = implementation.name();
    if name == std::any::type_name::<shop::EmailNotifier>() {
        Some(Box::<shop::EmailNotifier>::default())
    } else if name == std::any::type_name::<shop::SmsNotifier>() {
        Some(Box::<shop::SmsNotifier>::default())
    } else {
        None
    }
}
