mod intro;
mod modal;

pub use intro::*;
pub use modal::*;

use bevy::prelude::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(IntroPlugin).add_plugins(ModalPlugin);
    }
}
