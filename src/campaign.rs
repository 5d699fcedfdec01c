//! # Campaign Data Model
//!
//! The shared, progressively-filled record describing one campaign in
//! progress. Owned and mutated exclusively by the wizard orchestrator; the
//! canvas engine only ever receives a read-only snapshot at session open.
//!
//! Field names serialize in camelCase so saved campaigns match the wire shape
//! used by the gateway contracts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::VitrinaError;
use crate::platform::Platform;

/// Pixel dimensions of a composition target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Reject zero-sized dimensions.
    pub fn validate(&self) -> Result<(), VitrinaError> {
        if self.width == 0 || self.height == 0 {
            return Err(VitrinaError::Validation(format!(
                "customDimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One campaign in progress.
///
/// Every field is optional; the wizard fills them in step by step. The single
/// cross-field invariant: `template` is only meaningful together with
/// `platform` — selecting a new platform clears any previously selected
/// template (enforced by the wizard, see [`crate::wizard::Wizard`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignData {
    /// Uploaded image reference (data URI or URL). Replaced on re-upload.
    pub image: Option<String>,
    /// Text description of the image, set by analysis.
    pub description: Option<String>,
    /// Visual tags from analysis. Insertion order irrelevant.
    pub tags: Option<Vec<String>>,
    /// Chosen or AI-derived theme label.
    pub theme: Option<String>,
    pub audience: Option<String>,
    pub budget: Option<String>,
    pub platform: Option<Platform>,
    /// Explicit size overriding the platform default.
    pub custom_dimensions: Option<Dimensions>,
    pub launch_date: Option<NaiveDate>,
    /// Selected template id; must exist in the current platform's catalog.
    pub template: Option<String>,
    pub headline: Option<String>,
    pub body_text: Option<String>,
    pub cta: Option<String>,
    pub target_audience: Option<String>,
    pub post_time: Option<String>,
    /// Flattened PNG produced by the canvas engine's export, base64-free raw bytes.
    #[serde(skip)]
    pub exported: Option<Vec<u8>>,
}

impl CampaignData {
    /// The effective composition size: explicit custom dimensions win,
    /// otherwise the platform's default, otherwise the global 800×600 fallback.
    pub fn dimensions(&self) -> Dimensions {
        if let Some(dims) = self.custom_dimensions {
            return dims;
        }
        self.platform
            .map(Platform::default_dimensions)
            .unwrap_or(crate::platform::FALLBACK_DIMENSIONS)
    }
}

/// Optional free-form details collected at the details step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignDetails {
    pub description: Option<String>,
    pub audience: Option<String>,
    pub budget: Option<String>,
    pub launch_date: Option<NaiveDate>,
}
