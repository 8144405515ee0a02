//! 工厂加载的跨 crate 集成测试
use factories_abstractions::{
    FactoriesLoader, FactoryDefinition, LoaderScope, ResourceHandle, ResourceLocator,
    FACTORIES_RESOURCE_LOCATION,
};
use factories_common::{factory_type, ResourceError};
use factories_impl::{
    FactoriesLoaderBuilder, FactoriesLoaderImpl, FactoryCatalogImpl, InMemoryResourceLocator,
    LoaderConfig,
};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

static INIT_LOGGER: Once = Once::new();

fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// 应用监听器
trait ApplicationListener: Send + Sync {
    fn event(&self) -> &'static str;
}

factory_type!(dyn ApplicationListener => "org.example.event.ApplicationListener");

struct StartupListener;

impl ApplicationListener for StartupListener {
    fn event(&self) -> &'static str {
        "startup"
    }
}

struct ShutdownListener;

impl ApplicationListener for ShutdownListener {
    fn event(&self) -> &'static str {
        "shutdown"
    }
}

fn listener_catalog() -> anyhow::Result<Arc<FactoryCatalogImpl>> {
    let catalog = FactoryCatalogImpl::with_definitions([
        FactoryDefinition::new("org.example.StartupListener")
            .with_priority(1)
            .provides::<dyn ApplicationListener, _>(|| Ok(Box::new(StartupListener))),
        FactoryDefinition::new("org.example.ShutdownListener")
            .provides::<dyn ApplicationListener, _>(|| Ok(Box::new(ShutdownListener))),
    ])?;
    Ok(Arc::new(catalog))
}

/// 延迟读取并统计枚举次数的定位器
#[derive(Debug)]
struct SlowLocator {
    inner: InMemoryResourceLocator,
    enumerations: Arc<AtomicUsize>,
}

impl ResourceLocator for SlowLocator {
    fn find_resources(&self, location: &str) -> Result<Vec<ResourceHandle>, ResourceError> {
        self.enumerations.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        self.inner.find_resources(location)
    }

    fn read_resource(&self, handle: &ResourceHandle) -> Result<String, ResourceError> {
        self.inner.read_resource(handle)
    }

    fn name(&self) -> &str {
        "SlowLocator"
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_loads_share_one_snapshot() -> anyhow::Result<()> {
    init_test_logger();
    let enumerations = Arc::new(AtomicUsize::new(0));
    let locator = SlowLocator {
        inner: InMemoryResourceLocator::new().with_resource(
            "app.jar",
            FACTORIES_RESOURCE_LOCATION,
            "org.example.event.ApplicationListener=org.example.StartupListener\n",
        ),
        enumerations: Arc::clone(&enumerations),
    };
    let loader = Arc::new(
        FactoriesLoaderImpl::builder()
            .with_default_scope(LoaderScope::new("concurrent", Arc::new(locator)))
            .with_catalog(listener_catalog()?)
            .build(),
    );

    let mut handles = Vec::new();
    for _ in 0..8 {
        let loader = Arc::clone(&loader);
        handles.push(tokio::task::spawn_blocking(move || loader.load_all(None)));
    }

    let mut snapshots = Vec::new();
    for handle in handles {
        snapshots.push(handle.await??);
    }

    let first = &snapshots[0];
    assert!(snapshots.iter().all(|snapshot| Arc::ptr_eq(first, snapshot)));
    assert_eq!(
        first.get("org.example.event.ApplicationListener"),
        ["org.example.StartupListener"]
    );
    assert!(enumerations.load(Ordering::SeqCst) >= 1);

    // 缓存后不再枚举
    let settled = enumerations.load(Ordering::SeqCst);
    loader.load_all(None)?;
    assert_eq!(enumerations.load(Ordering::SeqCst), settled);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_instantiation_across_scopes() -> anyhow::Result<()> {
    init_test_logger();
    let loader = Arc::new(
        FactoriesLoaderImpl::builder()
            .with_catalog(listener_catalog()?)
            .build(),
    );
    let startup = Arc::new(LoaderScope::new(
        "startup",
        Arc::new(InMemoryResourceLocator::new().with_resource(
            "startup.jar",
            FACTORIES_RESOURCE_LOCATION,
            "org.example.event.ApplicationListener=org.example.StartupListener",
        )),
    ));
    let lifecycle = Arc::new(LoaderScope::new(
        "lifecycle",
        Arc::new(InMemoryResourceLocator::new().with_resource(
            "lifecycle.jar",
            FACTORIES_RESOURCE_LOCATION,
            "org.example.event.ApplicationListener=\
             org.example.ShutdownListener,org.example.StartupListener",
        )),
    ));

    let mut handles = Vec::new();
    for scope in [&startup, &lifecycle, &startup, &lifecycle] {
        let loader = Arc::clone(&loader);
        let scope = Arc::clone(scope);
        handles.push(tokio::task::spawn_blocking(move || {
            loader
                .load_factories::<dyn ApplicationListener>(Some(&scope))
                .map(|listeners| listeners.iter().map(|l| l.event()).collect::<Vec<_>>())
        }));
    }

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await??);
    }

    assert_eq!(results[0], vec!["startup"]);
    assert_eq!(results[1], vec!["startup", "shutdown"]);
    assert_eq!(results[0], results[2]);
    assert_eq!(results[1], results[3]);
    assert!(loader.is_cached(Some(&startup)));
    assert!(loader.is_cached(Some(&lifecycle)));
    // 默认作用域未被访问
    assert!(!loader.is_cached(None));
    Ok(())
}

#[tokio::test]
async fn test_loader_built_from_config_file() -> anyhow::Result<()> {
    init_test_logger();
    let temp = TempDir::new()?;
    for (module, content) in [
        (
            "core",
            "org.example.event.ApplicationListener=org.example.StartupListener\n",
        ),
        (
            "web",
            "! Web 模块监听器\norg.example.event.ApplicationListener : org.example.ShutdownListener\n",
        ),
    ] {
        let dir = temp.path().join("modules").join(module).join("META-INF");
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("spring.factories"), content)?;
    }

    let config_path = temp.path().join("factories.toml");
    let pattern = temp.path().join("modules").join("*");
    fs::write(
        &config_path,
        format!(
            "scope_name = \"modules\"\nsearch_paths = [{:?}]\n",
            pattern.display().to_string()
        ),
    )?;

    let config = LoaderConfig::load(Some(&config_path))?;
    assert_eq!(config.scope_name, "modules");

    let loader = FactoriesLoaderBuilder::from_config(&config)?
        .with_catalog(listener_catalog()?)
        .build();
    assert_eq!(loader.default_scope().name(), "modules");

    let names = loader.load_factory_names_of::<dyn ApplicationListener>(None)?;
    assert_eq!(
        names,
        vec!["org.example.StartupListener", "org.example.ShutdownListener"]
    );

    let events: Vec<_> = loader
        .load_factories::<dyn ApplicationListener>(None)?
        .iter()
        .map(|listener| listener.event())
        .collect();
    assert_eq!(events, vec!["startup", "shutdown"]);
    Ok(())
}
