//! Static showcase content
//!
//! The two galleries and their modals share one structural shape: an ordered
//! set of eight entries (id, image, title, blurb). Defaults are built in;
//! `assets/content.ron` can override them, and a malformed manifest logs a
//! warning and keeps the defaults.

use std::fs;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Which gallery an item (and a selection) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GalleryKind {
    Projects,
    Templates,
}

/// One gallery/modal entry. Immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEntry {
    pub id: u32,
    pub title: String,
    pub image: String,
    pub blurb: String,
}

/// On-disk shape of `assets/content.ron`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentManifest {
    pub projects: Vec<ContentEntry>,
    pub templates: Vec<ContentEntry>,
}

/// Content tables consumed by the galleries and the modal UI.
#[derive(Resource, Debug, Clone)]
pub struct ContentLibrary {
    pub projects: Vec<ContentEntry>,
    pub templates: Vec<ContentEntry>,
}

impl ContentLibrary {
    pub fn entries(&self, kind: GalleryKind) -> &[ContentEntry] {
        match kind {
            GalleryKind::Projects => &self.projects,
            GalleryKind::Templates => &self.templates,
        }
    }

    /// Look up one entry by gallery and id.
    pub fn entry(&self, kind: GalleryKind, id: u32) -> Option<&ContentEntry> {
        self.entries(kind).iter().find(|entry| entry.id == id)
    }
}

fn default_entries(prefix: &str, blurb: &str) -> Vec<ContentEntry> {
    (1..=8)
        .map(|id| ContentEntry {
            id,
            title: format!("{prefix} {id:02}"),
            image: format!("images/img{id}.jpg"),
            blurb: blurb.to_string(),
        })
        .collect()
}

impl Default for ContentLibrary {
    fn default() -> Self {
        Self {
            projects: default_entries("Project", "A commissioned site built end to end."),
            templates: default_entries("Template", "A ready-made design, yours to adapt."),
        }
    }
}

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ContentLibrary>()
            .add_systems(PreStartup, load_content_manifest);
    }
}

/// Replace the built-in tables with `assets/content.ron` when present and
/// well-formed.
fn load_content_manifest(mut library: ResMut<ContentLibrary>) {
    let path = "assets/content.ron";
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(_) => {
            info!("no content manifest at {path}, using built-in content");
            return;
        }
    };
    match ron::from_str::<ContentManifest>(&text) {
        Ok(manifest) if !manifest.projects.is_empty() && !manifest.templates.is_empty() => {
            info!(
                "content manifest loaded: {} projects, {} templates",
                manifest.projects.len(),
                manifest.templates.len()
            );
            library.projects = manifest.projects;
            library.templates = manifest.templates;
        }
        Ok(_) => warn!("content manifest has an empty table, keeping built-in content"),
        Err(err) => warn!("failed to parse {path}: {err}, keeping built-in content"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_library_has_eight_of_each() {
        let library = ContentLibrary::default();
        assert_eq!(library.projects.len(), 8);
        assert_eq!(library.templates.len(), 8);
    }

    #[test]
    fn lookup_resolves_by_kind_and_id() {
        let library = ContentLibrary::default();
        let entry = library.entry(GalleryKind::Projects, 3).unwrap();
        assert_eq!(entry.title, "Project 03");
        assert_eq!(entry.image, "images/img3.jpg");
        assert!(library.entry(GalleryKind::Templates, 99).is_none());
    }

    #[test]
    fn manifest_parses_from_ron() {
        let text = r#"(
            projects: [(id: 1, title: "One", image: "images/one.jpg", blurb: "first")],
            templates: [(id: 2, title: "Two", image: "images/two.jpg", blurb: "second")],
        )"#;
        let manifest: ContentManifest = ron::from_str(text).unwrap();
        assert_eq!(manifest.projects[0].id, 1);
        assert_eq!(manifest.templates[0].image, "images/two.jpg");
    }
}
