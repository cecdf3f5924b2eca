//! 场景注入集成测试：候选过滤、场景发现与配置加载

use component_macros::{Component, Injectable};
use di_abstractions::{AmbiguityPolicy, Inject};
use di_impl::{DependencyContainer, Scene, SceneNode, TypeCache};
use infrastructure_common::DiscoveredObject;
use std::io::Write;
use std::sync::Arc;

#[derive(Default, Component)]
struct AudioService;

#[derive(Default, Component, Injectable)]
#[injectable(scene)]
struct AlwaysView {
    #[inject]
    audio: Inject<AudioService>,
}

#[derive(Default, Component, Injectable)]
#[injectable(scene = "only_when_active")]
struct ActiveView {
    #[inject]
    audio: Inject<AudioService>,
}

#[derive(Default, Component, Injectable)]
#[injectable(scene = "ignore")]
struct IgnoredView {
    #[inject]
    audio: Inject<AudioService>,
}

/// 有可注入字段但不可被场景发现
#[derive(Default, Component, Injectable)]
struct Hidden {
    #[inject]
    audio: Inject<AudioService>,
}

fn container() -> DependencyContainer {
    let container = DependencyContainer::new(Arc::new(TypeCache::scan()));
    container.add(Arc::new(AudioService)).unwrap();
    container
}

#[test]
fn test_scene_policies_and_active_state() {
    let container = container();
    let awake = Arc::new(ActiveView::default());
    let asleep = Arc::new(ActiveView::default());
    let ignored = Arc::new(IgnoredView::default());
    let always = Arc::new(AlwaysView::default());
    let hidden = Arc::new(Hidden::default());

    let scene = Scene::new("level").with_root(
        SceneNode::new("root")
            .with_component(awake.clone())
            .with_component(ignored.clone())
            .with_component(hidden.clone())
            .with_child(
                SceneNode::new("disabled")
                    .with_active(false)
                    .with_child(
                        SceneNode::new("nested")
                            .with_component(asleep.clone())
                            .with_component(always.clone()),
                    ),
            ),
    );

    let bulk = container.inject_discovered(&scene);

    assert_eq!(bulk.injected, 2);
    assert_eq!(bulk.skipped, 2);
    assert!(awake.audio.is_set());
    assert!(always.audio.is_set());
    assert!(!asleep.audio.is_set());
    assert!(!ignored.audio.is_set());
    assert!(!hidden.audio.is_set());
}

#[test]
fn test_node_discovery_limits_scope() {
    let container = container();
    let own = Arc::new(AlwaysView::default());
    let child = Arc::new(AlwaysView::default());
    let node = SceneNode::new("player")
        .with_component(own.clone())
        .with_child(SceneNode::new("weapon").with_component(child.clone()));

    container.inject_discovered(&node.discovery(false));
    assert!(own.audio.is_set());
    assert!(!child.audio.is_set());

    container.inject_discovered(&node.discovery(true));
    assert!(child.audio.is_set());
}

#[test]
fn test_registered_candidate_is_skipped() {
    let container = container();
    let registered = Arc::new(AlwaysView::default());
    let loose = Arc::new(AlwaysView::default());
    container.add(registered.clone()).unwrap();

    let bulk = container.inject_candidates(vec![
        DiscoveredObject::active(registered.clone()),
        DiscoveredObject::inactive(loose.clone()),
    ]);

    assert_eq!(bulk.injected, 1);
    assert_eq!(bulk.skipped, 1);
    assert!(!registered.audio.is_set());
    assert!(loose.audio.is_set());
}

#[test]
fn test_container_from_config_file() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(file, "ambiguity = \"first_registered\"")?;
    writeln!(file, "scan_types = false")?;

    let container = DependencyContainer::load(Some(file.path()))?;

    assert_eq!(container.config().ambiguity, AmbiguityPolicy::FirstRegistered);
    assert!(container.cache().is_empty());
    assert_eq!(
        container.registry().ambiguity_policy(),
        AmbiguityPolicy::FirstRegistered
    );
    Ok(())
}
