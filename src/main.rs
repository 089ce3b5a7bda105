//! Main binary for running the showcase standalone.
//!
//! For embedding the showcase in your own app, add [`vitrine::ShowcasePlugin`]
//! after `DefaultPlugins`.

use bevy::prelude::*;
use vitrine::ShowcasePlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "vitrine".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(ShowcasePlugin)
        .run();
}
