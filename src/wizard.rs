//! # Wizard Orchestrator
//!
//! The step-sequencing state machine that turns user actions into campaign
//! progress. One transition operation per step; each validates its input,
//! records it in the owned [`CampaignData`], optionally awaits the
//! recommendation gateway, and advances the state.
//!
//! | State               | Reached by                                   |
//! |---------------------|----------------------------------------------|
//! | `Setup`             | construction, `start_over`                   |
//! | `Upload`            | `begin`                                      |
//! | `Analyzing`         | `submit_image` (while the AI call is out)    |
//! | `ThemeSelection`    | analysis failure (manual fallback)           |
//! | `PlatformSelection` | analysis success, `select_theme`             |
//! | `DetailsEntry`      | `select_platform`, `edit_details`            |
//! | `TemplateSelection` | `submit_details` / `skip_details`, `regenerate` |
//! | `Composition`       | `select_template`, details re-entry          |
//!
//! Two principles govern the AI boundary: gateway failure is never fatal
//! (every failure lands on a manual path that still reaches `Composition`),
//! and a response that arrives after a newer submission superseded it is
//! discarded via a monotonic generation counter rather than merged.

use tracing::{debug, warn};

use crate::campaign::{CampaignData, CampaignDetails, Dimensions};
use crate::catalog::{self, TemplateEntry};
use crate::error::VitrinaError;
use crate::gateway::{
    RecommendationGateway, TemplateRecommendation, TemplateSummary, ThemeExtraction,
};
use crate::platform::Platform;

/// Recommendations and catalog listings are paged in fixed windows of 6.
pub const PAGE_SIZE: usize = 6;

/// Current step of the campaign flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    Setup,
    Upload,
    Analyzing,
    ThemeSelection,
    PlatformSelection,
    DetailsEntry,
    TemplateSelection,
    Composition,
}

/// Outcome of `submit_image`'s asynchronous analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    /// Themes extracted and merged; the flow moved to `PlatformSelection`.
    Extracted(ThemeExtraction),
    /// The gateway failed; the flow moved to the manual `ThemeSelection` step.
    Fallback { reason: String },
    /// A newer submission superseded this one while the call was in flight;
    /// nothing was merged.
    Superseded,
}

/// One entry of the template picker: either an AI recommendation (with a
/// score) or a plain catalog listing.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateChoice {
    pub id: String,
    pub name: String,
    pub style: String,
    pub suitability_score: Option<u8>,
}

impl From<&TemplateRecommendation> for TemplateChoice {
    fn from(rec: &TemplateRecommendation) -> Self {
        Self {
            id: rec.template_id.clone(),
            name: rec.template_name.clone(),
            style: rec.design_style.clone(),
            suitability_score: Some(rec.suitability_score),
        }
    }
}

impl From<&TemplateEntry> for TemplateChoice {
    fn from(entry: &TemplateEntry) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            style: entry.style.clone(),
            suitability_score: None,
        }
    }
}

/// The campaign flow state machine. Owns the campaign record and all cached
/// gateway responses for the session.
pub struct Wizard<G: RecommendationGateway> {
    gateway: G,
    state: WizardState,
    data: CampaignData,
    extraction: Option<ThemeExtraction>,
    recommendations: Option<Vec<TemplateRecommendation>>,
    page: usize,
    /// Bumped on every gateway-invoking submission; a completed call whose
    /// generation no longer matches is stale and gets dropped.
    generation: u64,
}

impl<G: RecommendationGateway> Wizard<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: WizardState::Setup,
            data: CampaignData::default(),
            extraction: None,
            recommendations: None,
            page: 0,
            generation: 0,
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn data(&self) -> &CampaignData {
        &self.data
    }

    /// Cached extraction from the last successful analysis, if any.
    pub fn extraction(&self) -> Option<&ThemeExtraction> {
        self.extraction.as_ref()
    }

    fn ensure_state(&self, allowed: &[WizardState], operation: &str) -> Result<(), VitrinaError> {
        if allowed.contains(&self.state) {
            return Ok(());
        }
        Err(VitrinaError::Validation(format!(
            "{} is not available in {:?}",
            operation, self.state
        )))
    }

    // ===== TRANSITIONS =====

    /// Leave `Setup` and start collecting input.
    pub fn begin(&mut self) -> Result<WizardState, VitrinaError> {
        self.ensure_state(&[WizardState::Setup], "begin")?;
        self.state = WizardState::Upload;
        Ok(self.state)
    }

    /// Store the uploaded image and run theme extraction.
    ///
    /// The wizard sits in `Analyzing` for the duration of the call. Success
    /// merges the extraction and advances to `PlatformSelection`; gateway
    /// failure is absorbed into the manual `ThemeSelection` fallback. A
    /// re-submission while a call is in flight supersedes it; the superseded
    /// call's response is discarded.
    pub async fn submit_image(&mut self, image: &str) -> Result<Analysis, VitrinaError> {
        self.ensure_state(
            &[
                WizardState::Upload,
                WizardState::Analyzing,
                WizardState::ThemeSelection,
            ],
            "submitImage",
        )?;
        if image.trim().is_empty() {
            return Err(VitrinaError::Validation("image must not be empty".into()));
        }

        self.data.image = Some(image.to_string());
        self.state = WizardState::Analyzing;
        self.generation += 1;
        let generation = self.generation;

        let description = self.data.description.clone().unwrap_or_default();
        let tags = self.data.tags.clone().unwrap_or_default();
        let result = self.gateway.extract_themes(image, &description, &tags).await;

        if generation != self.generation {
            debug!(generation, "discarding superseded analysis response");
            return Ok(Analysis::Superseded);
        }

        match result {
            Ok(extraction) => {
                self.data.tags = Some(extraction.themes.clone());
                self.data.theme = Some(extraction.primary_theme.clone());
                self.data.target_audience = Some(extraction.target_audience.clone());
                self.extraction = Some(extraction.clone());
                self.state = WizardState::PlatformSelection;
                Ok(Analysis::Extracted(extraction))
            }
            Err(err) => {
                warn!(error = %err, "theme extraction failed, falling back to manual selection");
                self.extraction = None;
                self.state = WizardState::ThemeSelection;
                Ok(Analysis::Fallback {
                    reason: err.to_string(),
                })
            }
        }
    }

    /// Manual fallback when analysis failed: pick a theme by hand.
    pub fn select_theme(&mut self, theme: &str) -> Result<WizardState, VitrinaError> {
        self.ensure_state(&[WizardState::ThemeSelection], "selectTheme")?;
        if theme.trim().is_empty() {
            return Err(VitrinaError::Validation("theme must not be empty".into()));
        }
        self.data.theme = Some(theme.trim().to_string());
        self.state = WizardState::PlatformSelection;
        Ok(self.state)
    }

    /// Choose the target platform, optionally overriding its default size.
    ///
    /// A platform change invalidates any previously selected template and the
    /// cached recommendation list, since both are platform-scoped.
    pub fn select_platform(
        &mut self,
        platform: Platform,
        custom_dimensions: Option<Dimensions>,
    ) -> Result<WizardState, VitrinaError> {
        self.ensure_state(
            &[WizardState::PlatformSelection, WizardState::DetailsEntry],
            "selectPlatform",
        )?;
        if let Some(dims) = custom_dimensions {
            dims.validate()?;
        }

        if self.data.platform != Some(platform) {
            self.data.template = None;
            self.recommendations = None;
            self.page = 0;
        }
        self.data.platform = Some(platform);
        self.data.custom_dimensions = custom_dimensions;
        self.state = WizardState::DetailsEntry;
        Ok(self.state)
    }

    /// Merge the optional details and move on to template selection (or
    /// straight back to `Composition` when re-entered via `edit_details` with
    /// platform and template already chosen).
    pub async fn submit_details(
        &mut self,
        details: CampaignDetails,
    ) -> Result<WizardState, VitrinaError> {
        self.ensure_state(&[WizardState::DetailsEntry], "submitDetails")?;
        if details.description.is_some() {
            self.data.description = details.description;
        }
        if details.audience.is_some() {
            self.data.audience = details.audience;
        }
        if details.budget.is_some() {
            self.data.budget = details.budget;
        }
        if details.launch_date.is_some() {
            self.data.launch_date = details.launch_date;
        }
        self.advance_from_details().await
    }

    /// Skip the details step entirely.
    pub async fn skip_details(&mut self) -> Result<WizardState, VitrinaError> {
        self.ensure_state(&[WizardState::DetailsEntry], "skipDetails")?;
        self.advance_from_details().await
    }

    async fn advance_from_details(&mut self) -> Result<WizardState, VitrinaError> {
        if self.data.platform.is_some() && self.data.template.is_some() {
            // Details re-entry: platform and template survive the edit.
            self.state = WizardState::Composition;
            return Ok(self.state);
        }
        self.state = WizardState::TemplateSelection;
        self.page = 0;
        self.fetch_recommendations().await;
        Ok(self.state)
    }

    /// Populate the recommendation cache if an extraction is available.
    /// Gateway failure (or the manual path's missing extraction) leaves the
    /// cache empty and the full catalog listing takes over.
    async fn fetch_recommendations(&mut self) {
        let (Some(platform), Some(extraction)) = (self.data.platform, self.extraction.clone())
        else {
            self.recommendations = None;
            return;
        };
        self.generation += 1;
        let generation = self.generation;

        let available: Vec<TemplateSummary> = catalog::templates_for_platform(platform)
            .iter()
            .map(TemplateSummary::from)
            .collect();
        let result = self
            .gateway
            .recommend_templates(platform, &extraction, &available)
            .await;

        if generation != self.generation {
            debug!(generation, "discarding superseded recommendation response");
            return;
        }
        match result {
            Ok(recs) => {
                debug!(count = recs.len(), "cached template recommendations");
                self.recommendations = Some(recs);
            }
            Err(err) => {
                warn!(error = %err, "template recommendation failed, showing full catalog");
                self.recommendations = None;
            }
        }
    }

    /// Pick a template for the current platform and move to composition.
    ///
    /// The id must exist in the platform's catalog or in the cached
    /// recommendation list. Selection merges the template's ad copy into the
    /// campaign; an audience already set by analysis is kept.
    pub fn select_template(&mut self, template_id: &str) -> Result<WizardState, VitrinaError> {
        self.ensure_state(
            &[WizardState::TemplateSelection, WizardState::Composition],
            "selectTemplate",
        )?;
        let platform = self.data.platform.ok_or_else(|| {
            VitrinaError::Validation("a platform must be selected first".into())
        })?;

        let recommended = self
            .recommendations
            .as_ref()
            .is_some_and(|recs| recs.iter().any(|r| r.template_id == template_id));
        if !recommended && !catalog::template_exists(platform, template_id) {
            return Err(VitrinaError::NotFound(format!(
                "template '{}' is not available for {}",
                template_id, platform
            )));
        }

        let copy = catalog::copy_for_template(template_id);
        self.data.template = Some(template_id.to_string());
        self.data.headline = Some(copy.headline);
        self.data.body_text = Some(copy.body_text);
        self.data.cta = Some(copy.cta);
        self.data.post_time = Some(copy.post_time);
        if self.data.target_audience.is_none() {
            self.data.target_audience = Some(copy.target_audience);
        }
        self.state = WizardState::Composition;
        Ok(self.state)
    }

    /// Re-rank templates without re-running image analysis. Reuses the cached
    /// extraction; campaign fields already set are untouched.
    pub async fn regenerate(&mut self) -> Result<WizardState, VitrinaError> {
        self.ensure_state(
            &[WizardState::Composition, WizardState::TemplateSelection],
            "regenerate",
        )?;
        self.state = WizardState::TemplateSelection;
        self.page = 0;
        self.fetch_recommendations().await;
        Ok(self.state)
    }

    /// Jump back to the details step without discarding platform or template.
    pub fn edit_details(&mut self) -> Result<WizardState, VitrinaError> {
        if self.state == WizardState::Setup {
            return Err(VitrinaError::Validation(
                "editDetails is not available in Setup".into(),
            ));
        }
        self.state = WizardState::DetailsEntry;
        Ok(self.state)
    }

    /// Reset to an empty campaign at `Setup`.
    pub fn start_over(&mut self) -> WizardState {
        self.data = CampaignData::default();
        self.extraction = None;
        self.recommendations = None;
        self.page = 0;
        self.generation += 1;
        self.state = WizardState::Setup;
        self.state
    }

    /// Store the canvas engine's export back into the campaign record.
    pub fn store_export(&mut self, png: Vec<u8>) -> Result<(), VitrinaError> {
        self.ensure_state(&[WizardState::Composition], "storeExport")?;
        self.data.exported = Some(png);
        Ok(())
    }

    // ===== PAGINATION =====

    fn choices(&self) -> Vec<TemplateChoice> {
        if let Some(recs) = &self.recommendations {
            return recs.iter().map(TemplateChoice::from).collect();
        }
        self.data
            .platform
            .map(|platform| {
                catalog::templates_for_platform(platform)
                    .iter()
                    .map(TemplateChoice::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The current page of template choices: cached recommendations if
    /// present, otherwise the platform catalog in catalog order. Paging only
    /// re-slices; it never re-fetches.
    pub fn template_page(&self) -> Vec<TemplateChoice> {
        self.choices()
            .into_iter()
            .skip(self.page * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect()
    }

    pub fn has_more(&self) -> bool {
        self.choices().len() > (self.page + 1) * PAGE_SIZE
    }

    /// Advance to the next page if one exists.
    pub fn show_more(&mut self) -> bool {
        if self.has_more() {
            self.page += 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockGateway;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    /// Gateway that fails every call, for fallback-path coverage.
    struct DownGateway;

    #[async_trait]
    impl RecommendationGateway for DownGateway {
        async fn extract_themes(
            &self,
            _image_url: &str,
            _description: &str,
            _tags: &[String],
        ) -> Result<ThemeExtraction, VitrinaError> {
            Err(VitrinaError::Gateway("service unavailable".into()))
        }

        async fn recommend_templates(
            &self,
            _platform: Platform,
            _extraction: &ThemeExtraction,
            _available: &[TemplateSummary],
        ) -> Result<Vec<TemplateRecommendation>, VitrinaError> {
            Err(VitrinaError::Gateway("service unavailable".into()))
        }
    }

    async fn wizard_at_platform_selection() -> Wizard<MockGateway> {
        let mut wizard = Wizard::new(MockGateway::new());
        wizard.begin().unwrap();
        let analysis = wizard.submit_image("data:image/png;base64,xyz").await.unwrap();
        assert!(matches!(analysis, Analysis::Extracted(_)));
        wizard
    }

    // ── happy path ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn full_flow_reaches_composition() {
        let mut wizard = wizard_at_platform_selection().await;
        assert_eq!(wizard.state(), WizardState::PlatformSelection);

        wizard.select_platform(Platform::InstagramFeed, None).unwrap();
        assert_eq!(wizard.state(), WizardState::DetailsEntry);

        wizard.skip_details().await.unwrap();
        assert_eq!(wizard.state(), WizardState::TemplateSelection);
        assert!(!wizard.template_page().is_empty());

        wizard.select_template("hero-overlay").unwrap();
        assert_eq!(wizard.state(), WizardState::Composition);
        assert_eq!(wizard.data().template.as_deref(), Some("hero-overlay"));
        // Ad copy merged on selection
        assert_eq!(wizard.data().headline.as_deref(), Some("Make It Unmissable"));
        assert_eq!(wizard.data().dimensions(), Dimensions::new(1080, 1080));
    }

    #[tokio::test]
    async fn analysis_merges_extraction_fields() {
        let wizard = wizard_at_platform_selection().await;
        assert_eq!(wizard.data().theme.as_deref(), Some("lifestyle"));
        assert!(wizard.data().tags.as_ref().unwrap().contains(&"premium".to_string()));
        assert!(wizard.data().target_audience.is_some());
    }

    // ── fallback paths ──────────────────────────────────────────────────

    #[tokio::test]
    async fn gateway_failure_still_reaches_composition() {
        let mut wizard = Wizard::new(DownGateway);
        wizard.begin().unwrap();
        let analysis = wizard.submit_image("img").await.unwrap();
        assert!(matches!(analysis, Analysis::Fallback { .. }));
        assert_eq!(wizard.state(), WizardState::ThemeSelection);

        wizard.select_theme("minimalist").unwrap();
        wizard.select_platform(Platform::FacebookFeed, None).unwrap();
        wizard.skip_details().await.unwrap();
        // No recommendations cached; the full catalog stands in.
        let page = wizard.template_page();
        assert_eq!(page.len(), PAGE_SIZE);
        assert!(page.iter().all(|c| c.suitability_score.is_none()));
        wizard.select_template("facebook-event").unwrap();
        assert_eq!(wizard.state(), WizardState::Composition);
    }

    #[tokio::test]
    async fn validation_errors_leave_state_unchanged() {
        let mut wizard = wizard_at_platform_selection().await;
        let err = wizard.select_platform(Platform::Custom, Some(Dimensions::new(0, 500)));
        assert!(matches!(err, Err(VitrinaError::Validation(_))));
        assert_eq!(wizard.state(), WizardState::PlatformSelection);
        assert_eq!(wizard.data().platform, None);
    }

    #[tokio::test]
    async fn unknown_template_is_not_found() {
        let mut wizard = wizard_at_platform_selection().await;
        wizard.select_platform(Platform::InstagramFeed, None).unwrap();
        wizard.skip_details().await.unwrap();
        let err = wizard.select_template("story-poll");
        assert!(matches!(err, Err(VitrinaError::NotFound(_))));
        assert_eq!(wizard.state(), WizardState::TemplateSelection);
    }

    // ── platform/template invariant ─────────────────────────────────────

    #[tokio::test]
    async fn platform_change_invalidates_template() {
        let mut wizard = wizard_at_platform_selection().await;
        wizard
            .select_platform(Platform::Custom, Some(Dimensions::new(500, 500)))
            .unwrap();
        wizard.skip_details().await.unwrap();
        wizard.select_template("hero-overlay").unwrap();
        assert!(wizard.data().template.is_some());

        wizard.edit_details().unwrap();
        wizard.select_platform(Platform::InstagramFeed, None).unwrap();
        assert_eq!(wizard.data().template, None);
        assert_eq!(wizard.data().dimensions(), Dimensions::new(1080, 1080));
    }

    #[tokio::test]
    async fn reselecting_same_platform_keeps_template() {
        let mut wizard = wizard_at_platform_selection().await;
        wizard.select_platform(Platform::InstagramFeed, None).unwrap();
        wizard.skip_details().await.unwrap();
        wizard.select_template("modern-minimal").unwrap();

        wizard.edit_details().unwrap();
        wizard.select_platform(Platform::InstagramFeed, None).unwrap();
        assert_eq!(wizard.data().template.as_deref(), Some("modern-minimal"));
    }

    // ── details re-entry ────────────────────────────────────────────────

    #[tokio::test]
    async fn details_reentry_returns_to_composition() {
        let mut wizard = wizard_at_platform_selection().await;
        wizard.select_platform(Platform::InstagramFeed, None).unwrap();
        wizard.skip_details().await.unwrap();
        wizard.select_template("hero-overlay").unwrap();

        wizard.edit_details().unwrap();
        assert_eq!(wizard.state(), WizardState::DetailsEntry);
        let state = wizard
            .submit_details(CampaignDetails {
                budget: Some("$500".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(state, WizardState::Composition);
        assert_eq!(wizard.data().budget.as_deref(), Some("$500"));
        assert_eq!(wizard.data().template.as_deref(), Some("hero-overlay"));
    }

    // ── regeneration ────────────────────────────────────────────────────

    #[tokio::test]
    async fn regenerate_reuses_extraction_and_keeps_data() {
        let mut wizard = wizard_at_platform_selection().await;
        wizard.select_platform(Platform::InstagramFeed, None).unwrap();
        wizard.skip_details().await.unwrap();
        wizard.select_template("hero-overlay").unwrap();

        let before = wizard.data().clone();
        wizard.regenerate().await.unwrap();
        assert_eq!(wizard.state(), WizardState::TemplateSelection);
        assert_eq!(*wizard.data(), before);
        assert!(wizard.template_page().iter().all(|c| c.suitability_score.is_some()));
    }

    // ── pagination ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn catalog_pagination_reslices_without_refetch() {
        let mut wizard = Wizard::new(DownGateway);
        wizard.begin().unwrap();
        wizard.submit_image("img").await.unwrap();
        wizard.select_theme("bold").unwrap();
        wizard.select_platform(Platform::InstagramFeed, None).unwrap();
        wizard.skip_details().await.unwrap();

        // 6 universal + 6 platform entries: exactly two pages.
        let first = wizard.template_page();
        assert_eq!(first.len(), PAGE_SIZE);
        assert_eq!(first[0].id, "hero-overlay");
        assert!(wizard.has_more());
        assert!(wizard.show_more());
        let second = wizard.template_page();
        assert_eq!(second[0].id, "modern-minimal");
        assert!(!wizard.has_more());
        assert!(!wizard.show_more());
    }

    #[tokio::test]
    async fn recommendation_pages_cap_at_six() {
        let mut wizard = wizard_at_platform_selection().await;
        wizard.select_platform(Platform::InstagramFeed, None).unwrap();
        wizard.skip_details().await.unwrap();
        assert!(wizard.template_page().len() <= PAGE_SIZE);
        assert!(!wizard.has_more());
    }

    // ── reset ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn start_over_clears_everything() {
        let mut wizard = wizard_at_platform_selection().await;
        wizard.select_platform(Platform::TiktokFeed, None).unwrap();
        wizard.start_over();
        assert_eq!(wizard.state(), WizardState::Setup);
        assert_eq!(*wizard.data(), CampaignData::default());
        assert!(wizard.extraction().is_none());
    }

    #[tokio::test]
    async fn operations_out_of_order_are_rejected() {
        let mut wizard = Wizard::new(MockGateway::new());
        assert!(wizard.select_template("hero-overlay").is_err());
        assert!(wizard.select_theme("bold").is_err());
        assert!(wizard.store_export(vec![1, 2, 3]).is_err());
        assert_eq!(wizard.state(), WizardState::Setup);
    }
}
