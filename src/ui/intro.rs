//! Intro loading overlay
//!
//! Shown while tracked assets resolve; the scroll choreography only starts
//! once this disappears.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::stage::{RequiredAssets, ShowcaseState};

pub struct IntroPlugin;

impl Plugin for IntroPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            EguiPrimaryContextPass,
            draw_intro_overlay.run_if(in_state(ShowcaseState::Loading)),
        );
    }
}

/// Full-screen overlay with a progress bar over the tracked assets.
fn draw_intro_overlay(mut contexts: EguiContexts, required: Res<RequiredAssets>) -> Result {
    let ctx = contexts.ctx_mut()?;
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(egui::Color32::WHITE))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.45);
                ui.heading("vitrine");
                ui.add_space(12.0);
                ui.add(
                    egui::ProgressBar::new(required.fraction())
                        .desired_width(220.0)
                        .show_percentage(),
                );
            });
        });
    Ok(())
}
