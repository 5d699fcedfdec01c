//! # AI Recommendation Gateway
//!
//! The boundary abstraction wrapping the external theme-extraction and
//! template-recommendation service. The wizard depends only on the
//! [`RecommendationGateway`] trait; the concrete client is constructed at the
//! composition root and injected — no ambient global state, no persisted key.
//!
//! Failure contract: any HTTP or parse problem surfaces as
//! [`VitrinaError::Gateway`] with no structured body guaranteed. Callers are
//! expected to absorb it and continue on the documented fallback path.

mod mock;
mod openai;

pub use mock::MockGateway;
pub use openai::{GatewayConfig, OpenAiGateway};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::catalog::TemplateEntry;
use crate::error::VitrinaError;
use crate::platform::Platform;

/// Upper bound on ranked recommendations returned by a gateway.
pub const MAX_RECOMMENDATIONS: usize = 6;

/// Theme extraction response: what the service inferred from the uploaded image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeExtraction {
    pub themes: Vec<String>,
    pub primary_theme: String,
    pub mood: String,
    pub color_palette: Vec<String>,
    pub target_audience: String,
    pub keywords: Vec<String>,
}

/// One ranked template recommendation (best first in the returned sequence).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRecommendation {
    pub template_id: String,
    pub template_name: String,
    pub description: String,
    /// Suitability in [1, 10]; clamped on ingestion.
    pub suitability_score: u8,
    pub reasoning: String,
    pub design_style: String,
}

/// The slice of a catalog entry the recommendation request carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSummary {
    pub id: String,
    pub name: String,
    pub style: String,
}

impl From<&TemplateEntry> for TemplateSummary {
    fn from(entry: &TemplateEntry) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            style: entry.style.clone(),
        }
    }
}

/// Asynchronous capability boundary for the external AI service.
///
/// Tests substitute a deterministic fake ([`MockGateway`]); production uses
/// [`OpenAiGateway`].
#[async_trait]
pub trait RecommendationGateway: Send + Sync {
    /// Analyze an uploaded image (plus pre-computed description/tags) and
    /// suggest campaign themes.
    async fn extract_themes(
        &self,
        image_url: &str,
        description: &str,
        tags: &[String],
    ) -> Result<ThemeExtraction, VitrinaError>;

    /// Rank the available templates for a platform against the extracted
    /// themes. At most [`MAX_RECOMMENDATIONS`] results, best first.
    async fn recommend_templates(
        &self,
        platform: Platform,
        extraction: &ThemeExtraction,
        available: &[TemplateSummary],
    ) -> Result<Vec<TemplateRecommendation>, VitrinaError>;
}

/// Normalize a raw recommendation list: clamp scores into [1, 10] and
/// truncate to the maximum count. Order is preserved (the service ranks).
pub(crate) fn normalize_recommendations(
    mut recs: Vec<TemplateRecommendation>,
) -> Vec<TemplateRecommendation> {
    recs.truncate(MAX_RECOMMENDATIONS);
    for rec in &mut recs {
        rec.suitability_score = rec.suitability_score.clamp(1, 10);
    }
    recs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, score: u8) -> TemplateRecommendation {
        TemplateRecommendation {
            template_id: id.into(),
            template_name: id.into(),
            description: String::new(),
            suitability_score: score,
            reasoning: String::new(),
            design_style: String::new(),
        }
    }

    #[test]
    fn normalize_clamps_and_truncates() {
        let raw = vec![
            rec("a", 0),
            rec("b", 11),
            rec("c", 5),
            rec("d", 10),
            rec("e", 1),
            rec("f", 7),
            rec("g", 9),
        ];
        let recs = normalize_recommendations(raw);
        assert_eq!(recs.len(), MAX_RECOMMENDATIONS);
        assert_eq!(recs[0].suitability_score, 1);
        assert_eq!(recs[1].suitability_score, 10);
        // Ranked order preserved
        assert_eq!(recs[2].template_id, "c");
    }

    #[test]
    fn extraction_serde_uses_camel_case() {
        let json = r##"{
            "themes": ["luxury"],
            "primaryTheme": "luxury",
            "mood": "elegant",
            "colorPalette": ["#000000"],
            "targetAudience": "affluent shoppers",
            "keywords": ["premium"]
        }"##;
        let extraction: ThemeExtraction = serde_json::from_str(json).unwrap();
        assert_eq!(extraction.primary_theme, "luxury");
        assert_eq!(extraction.color_palette.len(), 1);
    }
}
