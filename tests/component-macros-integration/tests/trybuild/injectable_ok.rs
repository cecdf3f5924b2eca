use component_macros::{Component, Injectable};
use di_abstractions::{Inject, Injectable};

#[derive(Default, Component)]
struct Audio;

#[derive(Default, Component, Injectable)]
struct Behaviour {
    #[inject]
    audio: Inject<Audio>,
}

#[derive(Default, Component, Injectable)]
#[injectable(scene = "always", no_scan)]
struct Player {
    #[inject(base)]
    base: Behaviour,
    #[inject]
    audio: Inject<Audio>,
    score: u32,
}

fn main() {
    let info = Player::injectable_type();
    assert_eq!(info.fields().len(), 2);
    assert!(info.is_scene_discoverable());
    let player = Player::default();
    assert_eq!(player.score, 0);
    assert!(!player.audio.is_set());
    assert!(!player.base.audio.is_set());
}
