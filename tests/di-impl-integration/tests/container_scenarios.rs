//! 容器集成测试：注册、解析、注入与拆除

use component_macros::{Component, Injectable};
use di_abstractions::{AmbiguityPolicy, ComponentRegistry, ContainerConfig, DependencyResolver, Inject};
use di_impl::{DependencyContainer, DependencyRegistry, TypeCache};
use infrastructure_common::{
    AnyView, BoxError, Component, DependencyError, InjectionListener, InterfaceCast,
    TeardownListener, TypeInfo,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

trait Sound: Send + Sync {
    fn play(&self) -> &'static str;
}

#[derive(Debug, Default, Component)]
#[component(provides(dyn Sound))]
struct ServiceX;

impl Sound for ServiceX {
    fn play(&self) -> &'static str {
        "x"
    }
}

#[derive(Default, Component)]
#[component(provides(dyn Sound))]
struct Mixer;

impl Sound for Mixer {
    fn play(&self) -> &'static str {
        "mixer"
    }
}

#[derive(Default, Component, Injectable)]
struct ServiceY {
    #[inject]
    x: Inject<ServiceX>,
}

#[derive(Default, Component, Injectable)]
#[component(on_injected)]
struct ServiceZ {
    #[inject]
    y: Inject<ServiceY>,
    injected: AtomicUsize,
}

impl InjectionListener for ServiceZ {
    fn on_injected(&self) -> Result<(), BoxError> {
        self.injected.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default, Component, Injectable)]
struct Ping {
    #[inject]
    pong: Inject<Pong>,
}

#[derive(Default, Component, Injectable)]
struct Pong {
    #[inject]
    ping: Inject<Ping>,
}

#[derive(Default, Component, Injectable)]
struct Behaviour {
    #[inject]
    x: Inject<ServiceX>,
}

#[derive(Default, Component, Injectable)]
struct Player {
    #[inject(base)]
    base: Behaviour,
    #[inject]
    sound: Inject<dyn Sound>,
}

#[derive(Component, Injectable)]
struct Holder<T: Send + Sync + 'static> {
    #[inject]
    value: Inject<T>,
}

#[derive(Default, Component)]
#[component(name = "recorder", on_teardown)]
struct Recorder {
    calls: AtomicUsize,
}

impl TeardownListener for Recorder {
    fn on_teardown(&self) -> Result<(), BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default, Component)]
#[component(on_teardown)]
struct FailingCloser {
    calls: AtomicUsize,
}

impl TeardownListener for FailingCloser {
    fn on_teardown(&self) -> Result<(), BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err("关闭失败".into())
    }
}

#[derive(Default, Component, Injectable)]
#[component(on_injected)]
struct Grumpy {
    #[inject]
    x: Inject<ServiceX>,
}

impl InjectionListener for Grumpy {
    fn on_injected(&self) -> Result<(), BoxError> {
        Err("拒绝通知".into())
    }
}

#[derive(Default, Component, Injectable)]
#[component(on_injected)]
struct Crashing {
    #[inject]
    x: Inject<ServiceX>,
}

impl InjectionListener for Crashing {
    fn on_injected(&self) -> Result<(), BoxError> {
        panic!("注入通知崩溃");
    }
}

#[derive(Default, Component)]
#[component(on_teardown)]
struct CrashingCloser;

impl TeardownListener for CrashingCloser {
    fn on_teardown(&self) -> Result<(), BoxError> {
        panic!("拆除通知崩溃");
    }
}

/// 手写的组件：可以被看作 `ServiceX`，但本身不是 `ServiceX`
struct Proxy {
    inner: Arc<ServiceX>,
}

impl Component for Proxy {
    fn interfaces() -> Vec<InterfaceCast> {
        vec![InterfaceCast::new::<ServiceX>(|instance| {
            instance
                .downcast::<Self>()
                .ok()
                .map(|this| Box::new(this.inner.clone()) as AnyView)
        })]
    }
}

fn container() -> DependencyContainer {
    DependencyContainer::new(Arc::new(TypeCache::scan()))
}

#[test]
fn test_self_inject_wires_exact_instance() {
    let container = container();
    let x = Arc::new(ServiceX);
    let y = Arc::new(ServiceY::default());
    container.add(x.clone()).unwrap();
    container.add(y.clone()).unwrap();

    let bulk = container.self_inject();

    assert!(Arc::ptr_eq(&y.x.get().unwrap(), &x));
    assert_eq!(bulk.unmet, 0);
    assert_eq!(bulk.injected, 3);
}

#[test]
fn test_unregistered_target_with_unmet_dependency() {
    let container = container();
    container.add(Arc::new(ServiceX)).unwrap();
    let z = ServiceZ::default();

    let report = container.inject_into(&z);

    assert_eq!(report.unmet.len(), 1);
    assert_eq!(report.unmet[0].field, "y");
    assert_eq!(report.unmet[0].declared, TypeInfo::of::<ServiceY>());
    assert!(!z.y.is_set());
    assert!(report.notified);
    assert_eq!(z.injected.load(Ordering::SeqCst), 1);
}

#[test]
fn test_mutual_dependencies_resolve_both_ways() {
    let container = container();
    let ping = Arc::new(Ping::default());
    let pong = Arc::new(Pong::default());
    container.add(ping.clone()).unwrap();
    container.add(pong.clone()).unwrap();

    container.self_inject();

    assert!(Arc::ptr_eq(&ping.pong.get().unwrap(), &pong));
    assert!(Arc::ptr_eq(&pong.ping.get().unwrap(), &ping));
    container.teardown();
}

#[test]
fn test_duplicate_add_keeps_first_instance() -> anyhow::Result<()> {
    let container = container();
    let first = Arc::new(ServiceX);
    container.add(first.clone())?;

    let err = container.add(Arc::new(ServiceX)).unwrap_err();

    assert!(err.is_configuration_error());
    assert!(Arc::ptr_eq(&container.get::<ServiceX>().unwrap(), &first));
    Ok(())
}

#[test]
fn test_exact_match_wins_over_assignable() {
    let registry = DependencyRegistry::new();
    let hidden = Arc::new(ServiceX);
    registry
        .add(Arc::new(Proxy {
            inner: hidden.clone(),
        }))
        .unwrap();
    assert!(Arc::ptr_eq(&registry.get::<ServiceX>().unwrap(), &hidden));

    let exact = Arc::new(ServiceX);
    registry.add(exact.clone()).unwrap();

    assert!(Arc::ptr_eq(&registry.get::<ServiceX>().unwrap(), &exact));
    assert_eq!(registry.get_all::<ServiceX>().len(), 2);
}

#[test]
fn test_interface_lookup_by_candidate_count() {
    let container = container();
    assert!(container.get::<dyn Sound>().is_none());

    container.add(Arc::new(ServiceX)).unwrap();
    assert_eq!(container.get::<dyn Sound>().unwrap().play(), "x");

    container.add(Arc::new(Mixer)).unwrap();
    assert!(container.get::<dyn Sound>().is_none());
    assert!(matches!(
        container.registry().resolve::<dyn Sound>(),
        Err(DependencyError::Ambiguous { .. })
    ));
    let all: Vec<_> = container
        .get_all::<dyn Sound>()
        .iter()
        .map(|s| s.play())
        .collect();
    assert_eq!(all, vec!["x", "mixer"]);
}

#[test]
fn test_ambiguous_field_is_reported_unmet() {
    let container = container();
    container.add(Arc::new(ServiceX)).unwrap();
    container.add(Arc::new(Mixer)).unwrap();
    let player = Player::default();

    let report = container.inject_into(&player);

    assert_eq!(report.assigned, vec!["base.x".to_string()]);
    assert_eq!(report.unmet.len(), 1);
    assert!(matches!(
        report.unmet[0].reason,
        DependencyError::Ambiguous { .. }
    ));
}

#[test]
fn test_first_registered_policy_picks_insertion_order() {
    let config = ContainerConfig {
        ambiguity: AmbiguityPolicy::FirstRegistered,
        ..ContainerConfig::default()
    };
    let container = DependencyContainer::from_config(config);
    container.add(Arc::new(Mixer)).unwrap();
    container.add(Arc::new(ServiceX)).unwrap();

    assert_eq!(container.get::<dyn Sound>().unwrap().play(), "mixer");
}

#[test]
fn test_inherited_fields_are_injected() {
    let container = container();
    let x = Arc::new(ServiceX);
    container.add(x.clone()).unwrap();
    let player = Player::default();

    let report = container.inject_into(&player);

    assert_eq!(
        report.assigned,
        vec!["sound".to_string(), "base.x".to_string()]
    );
    assert!(Arc::ptr_eq(&player.base.x.get().unwrap(), &x));
    assert_eq!(player.sound.get().unwrap().play(), "x");
}

#[test]
fn test_repeated_scan_keeps_fields_deduplicated() {
    let cache = TypeCache::builder()
        .scan()
        .scan()
        .register::<Player>()
        .build();

    let info = cache.get_of::<Player>().unwrap();
    let paths: Vec<_> = info.fields().iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["sound", "base.x"]);
    assert_eq!(
        cache
            .types()
            .iter()
            .filter(|t| t.type_info.is::<Player>())
            .count(),
        1
    );
}

#[test]
fn test_generic_type_needs_explicit_registration() {
    assert!(TypeCache::scan().get_of::<Holder<ServiceX>>().is_none());

    let cache = TypeCache::builder()
        .scan()
        .register::<Holder<ServiceX>>()
        .build();
    let container = DependencyContainer::new(Arc::new(cache));
    container.add(Arc::new(ServiceX)).unwrap();
    let holder = Holder::<ServiceX> {
        value: Inject::new(),
    };

    container.inject_into(&holder);

    assert!(holder.value.is_set());
}

#[test]
fn test_failing_listener_does_not_abort_batch() {
    let container = container();
    let grumpy = Arc::new(Grumpy::default());
    let y = Arc::new(ServiceY::default());
    container.add(grumpy.clone()).unwrap();
    container.add(y.clone()).unwrap();
    container.add(Arc::new(ServiceX)).unwrap();

    let bulk = container.self_inject();

    assert_eq!(bulk.injected, 4);
    assert!(grumpy.x.is_set());
    assert!(y.x.is_set());
}

#[test]
fn test_panicking_listeners_do_not_abort_batch_or_teardown() {
    let container = container();
    let recorder = Arc::new(Recorder::default());
    let y = Arc::new(ServiceY::default());
    container.add(Arc::new(Crashing::default())).unwrap();
    container.add(Arc::new(CrashingCloser)).unwrap();
    container.add(y.clone()).unwrap();
    container.add(recorder.clone()).unwrap();
    container.add(Arc::new(ServiceX)).unwrap();

    let bulk = container.self_inject();
    assert_eq!(bulk.injected, 6);
    assert!(y.x.is_set());

    container.teardown();
    assert_eq!(recorder.calls.load(Ordering::SeqCst), 1);
    assert!(container.registry().is_empty());
}

#[test]
fn test_teardown_notifies_each_instance_once() {
    let container = container();
    let recorder = Arc::new(Recorder::default());
    let closer = Arc::new(FailingCloser::default());
    container.add(recorder.clone()).unwrap();
    container.add(closer.clone()).unwrap();
    container.add(Arc::new(ServiceX)).unwrap();
    assert_eq!(recorder.name(), "recorder");

    container.teardown();

    assert_eq!(recorder.calls.load(Ordering::SeqCst), 1);
    assert_eq!(closer.calls.load(Ordering::SeqCst), 1);
    assert!(container.registry().is_empty());
    assert!(container.get::<Recorder>().is_none());
    assert!(container.get::<ServiceX>().is_none());
    assert!(container.get::<DependencyRegistry>().is_none());
}

#[test]
fn test_registry_resolves_itself_through_interfaces() {
    let container = container();
    let resolver = container.get::<dyn DependencyResolver>().unwrap();
    let registry = resolver.resolve::<dyn ComponentRegistry>().unwrap();

    assert_eq!(registry.registered_types(), vec![TypeInfo::of::<DependencyRegistry>()]);
}
