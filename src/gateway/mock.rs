//! Deterministic offline gateway for tests and `--offline` CLI runs.
//!
//! Produces the same canned analysis for every image and ranks templates by
//! their position in the available list, so wizard flows are reproducible
//! without network access.

use async_trait::async_trait;

use super::{
    MAX_RECOMMENDATIONS, RecommendationGateway, TemplateRecommendation, TemplateSummary,
    ThemeExtraction,
};
use crate::error::VitrinaError;
use crate::platform::Platform;

/// Offline stand-in for the AI service.
#[derive(Debug, Default, Clone)]
pub struct MockGateway;

impl MockGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RecommendationGateway for MockGateway {
    async fn extract_themes(
        &self,
        _image_url: &str,
        description: &str,
        tags: &[String],
    ) -> Result<ThemeExtraction, VitrinaError> {
        let themes = if tags.is_empty() {
            vec![
                "lifestyle".to_string(),
                "premium".to_string(),
                "modern".to_string(),
                "elegant".to_string(),
                "youthful".to_string(),
            ]
        } else {
            tags.to_vec()
        };
        let primary_theme = themes[0].clone();
        Ok(ThemeExtraction {
            themes,
            primary_theme,
            mood: if description.is_empty() {
                "clean and aspirational".to_string()
            } else {
                "confident".to_string()
            },
            color_palette: vec![
                "#1a1a2e".to_string(),
                "#e9c46a".to_string(),
                "#f4f1de".to_string(),
            ],
            target_audience: "Style-conscious adults 18-35".to_string(),
            keywords: vec![
                "aspirational".to_string(),
                "quality".to_string(),
                "authentic".to_string(),
            ],
        })
    }

    async fn recommend_templates(
        &self,
        _platform: Platform,
        extraction: &ThemeExtraction,
        available: &[TemplateSummary],
    ) -> Result<Vec<TemplateRecommendation>, VitrinaError> {
        // Catalog order stands in for ranking; scores step down from 9.
        Ok(available
            .iter()
            .take(MAX_RECOMMENDATIONS)
            .enumerate()
            .map(|(i, t)| TemplateRecommendation {
                template_id: t.id.clone(),
                template_name: t.name.clone(),
                description: format!("{} suits a {} campaign", t.name, extraction.primary_theme),
                suitability_score: 9u8.saturating_sub(i as u8 / 2).max(1),
                reasoning: format!(
                    "Matches the {} mood and the {} theme",
                    extraction.mood, extraction.primary_theme
                ),
                design_style: t.style.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str) -> TemplateSummary {
        TemplateSummary {
            id: id.into(),
            name: id.into(),
            style: "style".into(),
        }
    }

    #[tokio::test]
    async fn extraction_is_deterministic() {
        let gateway = MockGateway::new();
        let a = gateway.extract_themes("img", "", &[]).await.unwrap();
        let b = gateway.extract_themes("img", "", &[]).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.primary_theme, "lifestyle");
    }

    #[tokio::test]
    async fn recommendations_cap_at_six_and_stay_in_range() {
        let gateway = MockGateway::new();
        let extraction = gateway.extract_themes("img", "", &[]).await.unwrap();
        let available: Vec<_> = (0..10).map(|i| summary(&format!("t{}", i))).collect();
        let recs = gateway
            .recommend_templates(Platform::InstagramFeed, &extraction, &available)
            .await
            .unwrap();
        assert_eq!(recs.len(), MAX_RECOMMENDATIONS);
        assert!(recs.iter().all(|r| (1..=10).contains(&r.suitability_score)));
        assert_eq!(recs[0].template_id, "t0");
    }
}
