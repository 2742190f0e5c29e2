//! Web app manifest data model
//!
//! The structures mirror the subset of the W3C Web App Manifest that the
//! generated `manifest.json` uses. Field order is the serialization order.

use crate::branding::BrandingAnswers;
use crate::location::AssetsLocation;
use crate::sizes::{manifest_entries, SizeSpec};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "manifest.json";

/// Root structure of `manifest.json`
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ManifestDocument {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub theme_color: String,
    pub background_color: String,

    /// Always `"standalone"`
    pub display: &'static str,

    /// Always `"portrait"`
    pub orientation: &'static str,

    pub scope: &'static str,

    /// Tagged so analytics can tell installed launches apart
    pub start_url: &'static str,

    pub icons: Vec<IconEntry>,
}

/// Individual icon declared by the manifest
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct IconEntry {
    /// URL relative to the serving root, e.g. `/assets/icon-192x192.png`
    pub src: String,

    /// `"{width}x{height}"`
    pub sizes: String,

    /// MIME type; `image/png` for every entry, `.ico` favicons included,
    /// since their payload is PNG encoded
    #[serde(rename = "type")]
    pub mime_type: &'static str,

    /// `"any"` or `"any maskable"`
    pub purpose: &'static str,
}

impl IconEntry {
    pub fn from_spec(spec: &SizeSpec, location: &AssetsLocation) -> Self {
        Self {
            src: location.icon_src(spec.file_name),
            sizes: spec.dimension.to_string(),
            mime_type: "image/png",
            purpose: if spec.is_maskable() {
                "any maskable"
            } else {
                "any"
            },
        }
    }
}

/// Build the manifest for `branding` with icons under `location`
pub fn build_manifest(branding: &BrandingAnswers, location: &AssetsLocation) -> ManifestDocument {
    ManifestDocument {
        name: branding.name.clone(),
        short_name: branding.short_name.clone(),
        description: branding.description.clone(),
        theme_color: branding.theme_color.to_string(),
        background_color: branding.background_color.to_string(),
        display: "standalone",
        orientation: "portrait",
        scope: "/",
        start_url: "/?source=pwa",
        icons: manifest_entries()
            .map(|spec| IconEntry::from_spec(spec, location))
            .collect(),
    }
}

impl ManifestDocument {
    /// Pretty JSON with a trailing newline
    pub fn to_json(&self) -> Result<String> {
        let mut json =
            serde_json::to_string_pretty(self).context("Failed to serialize manifest.json")?;
        json.push('\n');
        Ok(json)
    }
}

/// Writes `manifest.json` into `public_dir`, creating the directory if needed
pub fn write_manifest(public_dir: &Path, manifest: &ManifestDocument) -> Result<PathBuf> {
    std::fs::create_dir_all(public_dir)
        .with_context(|| format!("Can't create {}", public_dir.display()))?;

    let manifest_path = public_dir.join(MANIFEST_FILE);
    std::fs::write(&manifest_path, manifest.to_json()?)
        .context("Failed to write manifest.json file")?;

    log!("manifest"; "✓ Generated {}", manifest_path.display());
    Ok(manifest_path)
}
