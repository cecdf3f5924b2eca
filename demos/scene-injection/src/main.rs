//! 场景注入演示
//!
//! 注册几个服务，自注入后对一个内存场景做批量注入，最后拆除容器。
//!
//! ```text
//! cargo run -p scene-injection-demo -- demos/scene-injection/container.toml
//! RUST_LOG=debug INJECT_AMBIGUITY=first_registered cargo run -p scene-injection-demo
//! ```

use component_macros::{Component, Injectable};
use di_abstractions::Inject;
use di_impl::{DependencyContainer, Scene, SceneNode};
use infrastructure_common::{BoxError, InjectionListener, TeardownListener};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

trait Sound: Send + Sync {
    fn play(&self, clip: &str);
}

#[derive(Default, Component)]
#[component(name = "audio", provides(dyn Sound), on_teardown)]
struct AudioService;

impl Sound for AudioService {
    fn play(&self, clip: &str) {
        info!("播放: {}", clip);
    }
}

impl TeardownListener for AudioService {
    fn on_teardown(&self) -> Result<(), BoxError> {
        info!("音频服务关闭");
        Ok(())
    }
}

#[derive(Default, Component, Injectable)]
struct ScoreService {
    #[inject]
    sound: Inject<dyn Sound>,
}

impl ScoreService {
    fn add(&self, points: u32) {
        if let Some(sound) = self.sound.get() {
            sound.play(&format!("+{points}"));
        }
    }
}

/// 所有角色共用的基础行为
#[derive(Default, Component, Injectable)]
struct Behaviour {
    #[inject]
    sound: Inject<dyn Sound>,
}

#[derive(Default, Component, Injectable)]
#[component(on_injected)]
#[injectable(scene = "only_when_active")]
struct Enemy {
    #[inject(base)]
    base: Behaviour,
    #[inject]
    score: Inject<ScoreService>,
}

impl InjectionListener for Enemy {
    fn on_injected(&self) -> Result<(), BoxError> {
        if let (Some(sound), Some(score)) = (self.base.sound.get(), self.score.get()) {
            sound.play("enemy-spawn");
            score.add(10);
        }
        Ok(())
    }
}

#[derive(Default, Component, Injectable)]
#[injectable(scene)]
struct Hud {
    #[inject]
    score: Inject<ScoreService>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let container = DependencyContainer::load(config_path.as_deref())?;

    container.add(Arc::new(AudioService))?;
    container.add(Arc::new(ScoreService::default()))?;
    let bulk = container.self_inject();
    info!("自注入: {:?}", bulk);

    let scene = Scene::new("level-1").with_root(
        SceneNode::new("world")
            .with_component(Arc::new(Hud::default()))
            .with_child(SceneNode::new("spawn-a").with_component(Arc::new(Enemy::default())))
            .with_child(
                SceneNode::new("spawn-b")
                    .with_active(false)
                    .with_component(Arc::new(Enemy::default())),
            ),
    );
    let bulk = container.inject_discovered(&scene);
    info!(
        "场景注入: 注入 {} 个, 跳过 {} 个, 未满足 {} 个",
        bulk.injected, bulk.skipped, bulk.unmet
    );

    container.teardown();
    Ok(())
}
