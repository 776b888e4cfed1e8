//! Centralized integration tests for the registration crates
use di_abstractions::{
    installer_contract, RegistrationOptions, RegistrationStrategy, ServiceCollection,
    ServiceCollectionExt, ServicesInstaller,
};
use di_impl::{
    DiscoveryEngine, InMemoryTypeCatalog, InstallerFactoryRegistry, InstallerRegistry,
    ServiceCollectionImpl,
};
use infrastructure_common::{CodeUnitId, Lifetime, TypeDescriptor};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio_test::assert_ok;

/// 测试用的代码单元
struct App {
    catalog: Arc<InMemoryTypeCatalog>,
    foo: TypeDescriptor,
    base: TypeDescriptor,
    bar: TypeDescriptor,
    baz: TypeDescriptor,
}

fn app() -> App {
    let foo = TypeDescriptor::interface("app::IFoo").build();
    let base = TypeDescriptor::class("app::Base").abstract_type().build();
    let bar = TypeDescriptor::class("app::Bar")
        .extends(&base)
        .implements(&foo)
        .build();
    let baz = TypeDescriptor::class("app::Baz").extends(&base).build();

    let catalog = Arc::new(InMemoryTypeCatalog::new());
    catalog.export_all([&foo, &base, &bar, &baz]);

    App {
        catalog,
        foo,
        base,
        bar,
        baz,
    }
}

/// 以基类注册 `Base` 的全部实现
struct BaseInstaller {
    engine: DiscoveryEngine,
    base: TypeDescriptor,
}

impl ServicesInstaller for BaseInstaller {
    fn install(&self, services: &mut dyn ServiceCollection) {
        let references = self
            .engine
            .from_code_unit_of(&self.base)
            .based_on(&self.base)
            .and_then(|s| s.with_base_class_and_self())
            .unwrap_or_default();
        services.add_scoped(&references);
    }
}

/// 以第一个接口注册 `IFoo` 的全部实现
struct FooInstaller {
    engine: DiscoveryEngine,
    foo: TypeDescriptor,
}

impl ServicesInstaller for FooInstaller {
    fn install(&self, services: &mut dyn ServiceCollection) {
        if let Ok(references) = self
            .engine
            .from_code_unit_of(&self.foo)
            .based_on(&self.foo)
            .and_then(|s| s.with_default_interface())
        {
            services.add_singleton(&references);
        }
    }
}

fn installer_type(name: &str) -> TypeDescriptor {
    TypeDescriptor::class(name)
        .implements(&installer_contract())
        .build()
}

fn registry_with_installers(app: &App) -> (InstallerRegistry, Arc<InstallerFactoryRegistry>) {
    let engine = DiscoveryEngine::new(app.catalog.clone());
    let base_installer = installer_type("app::BaseInstaller");
    let foo_installer = installer_type("app::FooInstaller");
    let abstract_installer = TypeDescriptor::class("app::AbstractInstaller")
        .abstract_type()
        .implements(&installer_contract())
        .build();
    app.catalog
        .export_all([&base_installer, &abstract_installer, &foo_installer]);

    let factories = Arc::new(InstallerFactoryRegistry::new());
    let (e, base) = (engine.clone(), app.base.clone());
    factories.register(&base_installer, move || {
        Ok(Arc::new(BaseInstaller {
            engine: e.clone(),
            base: base.clone(),
        }) as Arc<dyn ServicesInstaller>)
    });
    let (e, foo) = (engine, app.foo.clone());
    factories.register(&foo_installer, move || {
        Ok(Arc::new(FooInstaller {
            engine: e.clone(),
            foo: foo.clone(),
        }) as Arc<dyn ServicesInstaller>)
    });

    (InstallerRegistry::new(app.catalog.clone(), factories.clone()), factories)
}

#[test]
fn test_installers_register_in_discovery_order() {
    let app = app();
    let (registry, _) = registry_with_installers(&app);

    let installers = assert_ok!(registry.contains(&app.bar));
    assert_eq!(installers.len(), 2);

    let mut services = ServiceCollectionImpl::new();
    services.install(&installers);

    let registered: Vec<(String, String, Lifetime)> = services
        .iter()
        .map(|d| {
            (
                d.service.short_name().to_string(),
                d.implementation_type().map(|t| t.short_name().to_string()).unwrap_or_default(),
                d.lifetime,
            )
        })
        .collect();

    let expected = vec![
        ("Base", "Bar", Lifetime::Scoped),
        ("Base", "Baz", Lifetime::Scoped),
        ("Bar", "Bar", Lifetime::Scoped),
        ("Baz", "Baz", Lifetime::Scoped),
        ("IFoo", "Bar", Lifetime::Singleton),
    ]
    .into_iter()
    .map(|(s, i, l)| (s.to_string(), i.to_string(), l))
    .collect::<Vec<_>>();
    assert_eq!(registered, expected);
}

#[test]
fn test_cached_installers_are_stale_by_design() {
    let app = app();
    let (registry, factories) = registry_with_installers(&app);
    let unit = CodeUnitId::from("app");

    let first = assert_ok!(registry.get_installers(&unit));
    assert_eq!(first.len(), 2);

    let late = installer_type("app::LateInstaller");
    let (engine, foo) = (DiscoveryEngine::new(app.catalog.clone()), app.foo.clone());
    factories.register(&late, move || {
        Ok(Arc::new(FooInstaller {
            engine: engine.clone(),
            foo: foo.clone(),
        }) as Arc<dyn ServicesInstaller>)
    });
    app.catalog.export(&late);

    let second = assert_ok!(registry.get_installers(&unit));
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.len(), 2);
    assert_eq!(assert_ok!(registry.scan(&unit)).len(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_access_shares_one_list() {
    let app = app();
    let installer = installer_type("app::CountedInstaller");
    app.catalog.export(&installer);

    let created = Arc::new(AtomicUsize::new(0));
    let factories = Arc::new(InstallerFactoryRegistry::new());
    let counter = created.clone();
    let engine = DiscoveryEngine::new(app.catalog.clone());
    let foo = app.foo.clone();
    factories.register(&installer, move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(FooInstaller {
            engine: engine.clone(),
            foo: foo.clone(),
        }) as Arc<dyn ServicesInstaller>)
    });

    let registry = Arc::new(InstallerRegistry::new(app.catalog.clone(), factories));
    let unit = CodeUnitId::from("app");

    let mut handles = Vec::new();
    for _ in 0..16 {
        let registry = registry.clone();
        let unit = unit.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            registry.get_installers(&unit)
        }));
    }

    let mut lists = Vec::new();
    for handle in handles {
        lists.push(assert_ok!(handle.await.unwrap()));
    }

    let cached = assert_ok!(registry.get_installers(&unit));
    assert!(lists.iter().all(|list| Arc::ptr_eq(list, &cached)));
    assert_eq!(registry.cached_code_units(), 1);
    assert!(created.load(Ordering::SeqCst) >= 1);
}

#[test]
fn test_options_drive_discovery_and_lifetime() {
    let app = app();
    let engine = DiscoveryEngine::new(app.catalog.clone());
    let options = RegistrationOptions {
        default_lifetime: Lifetime::Transient,
        strategy: RegistrationStrategy::DefaultInterfaceAndSelf,
        code_units: vec!["app".to_string()],
    };

    let references = assert_ok!(engine
        .from_code_unit_of(&app.baz)
        .based_on(&app.foo)
        .and_then(|s| s.with_strategy(options.strategy)));

    let mut services = ServiceCollectionImpl::new();
    services.add_references(&references, options.default_lifetime);

    assert_eq!(services.len(), 2);
    assert!(services.contains(&app.foo));
    assert!(services.contains(&app.bar));
    assert!(!services.contains(&app.baz));
    assert!(services.iter().all(|d| d.lifetime == Lifetime::Transient));
}
