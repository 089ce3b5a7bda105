//! Contact section
//!
//! The tail of the scroll track fades in a "CONTACT" headline and then the
//! contact form. The two ramps are independent: text over 0.86..1.0 (hidden
//! until its ramp clears a threshold so a fully transparent headline is never
//! rendered), form over 0.95..1.0 (mounted only while its ramp is positive,
//! drawn at the ramp's value as opacity, and ignoring the pointer below half
//! opacity so nothing invisible is clickable).
//!
//! Submission goes through the [`ContactGateway`] boundary; the HTTP POST a
//! deployment performs behind it is an external collaborator. The bundled
//! gateway accepts immediately and logs, which exercises the whole
//! pending/success/error machine offline.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Mutex;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use serde::Serialize;

use crate::anim::ramp;
use crate::compositor::portal_layer;
use crate::constants::contact;
use crate::scroll::ScrollProgress;
use crate::stage::{RequiredAssets, ShowcaseState};

/// Marker component for the "CONTACT" headline quad
#[derive(Component)]
pub struct ContactText;

/// The two independent tail ramps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactRamps {
    pub text: f32,
    pub form: f32,
}

/// Sample both ramps at a scroll offset.
pub fn contact_ramps(offset: f32) -> ContactRamps {
    ContactRamps {
        text: ramp(offset, contact::START_OFFSET, contact::FULL_OFFSET),
        form: ramp(offset, contact::FORM_START_OFFSET, contact::FULL_OFFSET),
    }
}

/// The headline renders only once its ramp has visibly started.
pub fn text_visible(offset: f32, ramps: ContactRamps) -> bool {
    offset >= contact::START_OFFSET && ramps.text > contact::TEXT_THRESHOLD
}

/// The form exists only while its ramp is positive.
pub fn form_mounted(form_progress: f32) -> bool {
    form_progress > 0.0
}

/// The form takes pointer input only at readable opacity.
pub fn form_interactable(form_progress: f32) -> bool {
    form_progress >= contact::INTERACT_THRESHOLD
}

/// Wire payload for a submission: `{name, email, type, message}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub inquiry: String,
    pub message: String,
}

/// Require-all validation, mirroring the form's client-side rule.
pub fn validate_form(
    name: &str,
    email: &str,
    inquiry: &str,
    message: &str,
) -> Result<ContactPayload, &'static str> {
    if name.is_empty() || email.is_empty() || inquiry.is_empty() || message.is_empty() {
        return Err("Please fill in every field.");
    }
    Ok(ContactPayload {
        name: name.to_string(),
        email: email.to_string(),
        inquiry: inquiry.to_string(),
        message: message.to_string(),
    })
}

/// Terminal result of a submission, per the collaborator's response contract.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// HTTP 200 `{message, id}`
    Accepted { message: String, id: u64 },
    /// HTTP 4xx/5xx `{error}`
    Rejected { error: String },
}

/// Receiver half of an in-flight submission.
pub struct SubmissionTicket {
    receiver: Mutex<Receiver<SubmitOutcome>>,
}

impl SubmissionTicket {
    pub fn try_take(&self) -> Option<SubmitOutcome> {
        let receiver = self.receiver.lock().ok()?;
        match receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(SubmitOutcome::Rejected {
                error: "The message could not be sent.".to_string(),
            }),
        }
    }
}

/// Boundary to the external submission collaborator.
pub trait ContactGateway: Send + Sync {
    fn submit(&self, payload: &ContactPayload) -> SubmissionTicket;
}

/// Gateway resource; a deployment swaps in its real transport here.
#[derive(Resource)]
pub struct ContactGatewayHandle(pub Box<dyn ContactGateway>);

/// Offline gateway: logs the payload and accepts immediately.
pub struct AcceptAllGateway {
    counter: AtomicU64,
}

impl Default for AcceptAllGateway {
    fn default() -> Self {
        Self { counter: AtomicU64::new(1) }
    }
}

impl ContactGateway for AcceptAllGateway {
    fn submit(&self, payload: &ContactPayload) -> SubmissionTicket {
        let id = self.counter.fetch_add(1, Ordering::Relaxed);
        info!("contact submission #{id} accepted locally from {}", payload.email);
        let (sender, receiver) = channel();
        let _ = sender.send(SubmitOutcome::Accepted {
            message: "Your message has been sent!".to_string(),
            id,
        });
        SubmissionTicket { receiver: Mutex::new(receiver) }
    }
}

/// Current form fields and status machine.
#[derive(Resource, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub inquiry: String,
    pub message: String,
    pub status: SubmitStatus,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Success(String),
    Error(String),
}

/// At most one submission is in flight; a new submit replaces a settled one.
#[derive(Resource, Default)]
pub struct PendingSubmission(pub Option<SubmissionTicket>);

pub struct ContactPlugin;

impl Plugin for ContactPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ContactForm>()
            .init_resource::<PendingSubmission>()
            .insert_resource(ContactGatewayHandle(Box::new(AcceptAllGateway::default())))
            .add_systems(Startup, spawn_contact_text)
            .add_systems(
                Update,
                (fade_contact_text, poll_submission).run_if(in_state(ShowcaseState::Running)),
            )
            .add_systems(
                EguiPrimaryContextPass,
                draw_contact_form.run_if(in_state(ShowcaseState::Running)),
            );
    }
}

/// Spawn the headline quad on the portal layer, behind the form.
fn spawn_contact_text(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut required: ResMut<RequiredAssets>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let glyph: Handle<Image> = asset_server.load(contact::TEXT_IMAGE_PATH);
    required.track(&glyph);

    commands.spawn((
        ContactText,
        Mesh3d(meshes.add(Rectangle::new(contact::TEXT_SIZE.x, contact::TEXT_SIZE.y))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::BLACK.with_alpha(0.0),
            base_color_texture: Some(glyph),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        })),
        Transform::from_xyz(0.0, 0.0, contact::GROUP_Z + contact::TEXT_Z),
        Visibility::Hidden,
        portal_layer(),
    ));
}

/// Fade the headline with its ramp; keep it unmounted below the threshold.
fn fade_contact_text(
    progress: Res<ScrollProgress>,
    mut text_query: Query<(&mut Visibility, &MeshMaterial3d<StandardMaterial>), With<ContactText>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Ok((mut visibility, material_handle)) = text_query.single_mut() else {
        return;
    };
    let ramps = contact_ramps(progress.offset);
    *visibility = if text_visible(progress.offset, ramps) {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    if let Some(material) = materials.get_mut(&material_handle.0) {
        material.base_color.set_alpha(ramps.text);
    }
}

/// Draw the form while mounted, at the ramp's opacity, pointer-gated.
fn draw_contact_form(
    mut contexts: EguiContexts,
    progress: Res<ScrollProgress>,
    mut form: ResMut<ContactForm>,
    gateway: Res<ContactGatewayHandle>,
    mut pending: ResMut<PendingSubmission>,
) -> Result {
    let ramps = contact_ramps(progress.offset);
    if !form_mounted(ramps.form) {
        return Ok(());
    }
    let ctx = contexts.ctx_mut()?;

    egui::Window::new("Start Your Project")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 60.0])
        .interactable(form_interactable(ramps.form))
        .show(ctx, |ui| {
            ui.set_opacity(ramps.form);
            ui.label("Tell us about your idea.");
            ui.separator();

            egui::Grid::new("contact_fields")
                .num_columns(2)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Name");
                    ui.text_edit_singleline(&mut form.name);
                    ui.end_row();

                    ui.label("Email");
                    ui.text_edit_singleline(&mut form.email);
                    ui.end_row();

                    ui.label("Inquiry");
                    egui::ComboBox::from_id_salt("inquiry_type")
                        .selected_text(match form.inquiry.as_str() {
                            "template" => "Buy a design template",
                            "custom" => "Commission a custom site",
                            "other" => "Something else",
                            _ => "Choose a service",
                        })
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut form.inquiry, "template".to_string(), "Buy a design template");
                            ui.selectable_value(&mut form.inquiry, "custom".to_string(), "Commission a custom site");
                            ui.selectable_value(&mut form.inquiry, "other".to_string(), "Something else");
                        });
                    ui.end_row();
                });

            ui.label("Message");
            ui.text_edit_multiline(&mut form.message);

            match &form.status {
                SubmitStatus::Success(message) => {
                    ui.colored_label(egui::Color32::from_rgb(60, 160, 90), message);
                }
                SubmitStatus::Error(message) => {
                    ui.colored_label(egui::Color32::from_rgb(200, 80, 80), message);
                }
                _ => {}
            }

            let submitting = form.status == SubmitStatus::Submitting;
            let label = if submitting { "SENDING..." } else { "SEND MESSAGE" };
            if ui.add_enabled(!submitting, egui::Button::new(label)).clicked() {
                match validate_form(&form.name, &form.email, &form.inquiry, &form.message) {
                    Ok(payload) => {
                        pending.0 = Some(gateway.0.submit(&payload));
                        form.status = SubmitStatus::Submitting;
                    }
                    Err(error) => form.status = SubmitStatus::Error(error.to_string()),
                }
            }
        });
    Ok(())
}

/// Resolve the in-flight submission when its outcome arrives.
fn poll_submission(mut pending: ResMut<PendingSubmission>, mut form: ResMut<ContactForm>) {
    let Some(ticket) = pending.0.as_ref() else {
        return;
    };
    let Some(outcome) = ticket.try_take() else {
        return;
    };
    pending.0 = None;
    match outcome {
        SubmitOutcome::Accepted { message, id } => {
            info!("contact submission #{id} confirmed");
            form.status = SubmitStatus::Success(message);
            form.name.clear();
            form.email.clear();
            form.inquiry.clear();
            form.message.clear();
        }
        SubmitOutcome::Rejected { error } => {
            warn!("contact submission rejected: {error}");
            form.status = SubmitStatus::Error(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramps_at_the_section_entrance() {
        // Right at the text start: ramp is zero, nothing shows yet
        let ramps = contact_ramps(0.86);
        assert_eq!(ramps.text, 0.0);
        assert_eq!(ramps.form, 0.0);
        assert!(!text_visible(0.86, ramps));
        assert!(!form_mounted(ramps.form));
    }

    #[test]
    fn deep_in_the_section_text_shows_and_the_form_mounts() {
        let ramps = contact_ramps(0.96);
        assert!((ramps.text - (0.96 - 0.86) / 0.14).abs() < 1e-5);
        assert!(text_visible(0.96, ramps));
        assert!((ramps.form - 0.2).abs() < 1e-5);
        assert!(form_mounted(ramps.form));
        // Still below the pointer threshold at 0.2 opacity
        assert!(!form_interactable(ramps.form));
    }

    #[test]
    fn form_takes_input_only_at_readable_opacity() {
        assert!(!form_interactable(0.49));
        assert!(form_interactable(0.5));
        let ramps = contact_ramps(0.98);
        assert!(form_interactable(ramps.form));
    }

    #[test]
    fn validation_requires_every_field() {
        assert!(validate_form("", "a@b.c", "custom", "hi").is_err());
        assert!(validate_form("Ann", "", "custom", "hi").is_err());
        assert!(validate_form("Ann", "a@b.c", "", "hi").is_err());
        assert!(validate_form("Ann", "a@b.c", "custom", "").is_err());

        let payload = validate_form("Ann", "a@b.c", "custom", "hi").unwrap();
        assert_eq!(payload.inquiry, "custom");
    }

    #[test]
    fn payload_serializes_with_the_wire_field_names() {
        let payload = validate_form("Ann", "a@b.c", "template", "hello").unwrap();
        let text = ron::to_string(&payload).unwrap();
        assert!(text.contains("type:"), "{text}");
        assert!(!text.contains("inquiry"), "{text}");
    }

    #[test]
    fn offline_gateway_resolves_immediately_with_success() {
        let gateway = AcceptAllGateway::default();
        let payload = validate_form("Ann", "a@b.c", "other", "hello").unwrap();
        let ticket = gateway.submit(&payload);
        match ticket.try_take() {
            Some(SubmitOutcome::Accepted { id, .. }) => assert_eq!(id, 1),
            other => panic!("unexpected outcome: {other:?}"),
        }
        // Drained: nothing further arrives
        assert!(matches!(
            ticket.try_take(),
            Some(SubmitOutcome::Rejected { .. }) | None
        ));
    }
}
