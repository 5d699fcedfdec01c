//! OpenAI-backed gateway: chat-completions over HTTPS via reqwest.
//!
//! The client is explicitly constructed with its configuration and owned by
//! the composition root. Prompts ask for strict JSON bodies; the first
//! choice's content is parsed directly, with a fenced-code-block fallback for
//! models that wrap their JSON.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{
    MAX_RECOMMENDATIONS, RecommendationGateway, TemplateRecommendation, TemplateSummary,
    ThemeExtraction, normalize_recommendations,
};
use crate::error::VitrinaError;
use crate::platform::Platform;

/// Configuration for the OpenAI gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl GatewayConfig {
    /// Default model and endpoint with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "gpt-4.1-2025-04-14".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }
}

/// Gateway client calling the OpenAI chat-completions API.
pub struct OpenAiGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl OpenAiGateway {
    /// Create a gateway with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, VitrinaError> {
        let client = reqwest::Client::builder()
            .user_agent("vitrina/0.1")
            .build()
            .map_err(|e| VitrinaError::Gateway(format!("HTTP client error: {}", e)))?;
        Ok(Self { client, config })
    }

    /// Verify the API key by listing models. Network or auth failures map to
    /// `Ok(false)`; only client construction problems error.
    pub async fn check_api_key(&self) -> bool {
        let url = format!("{}/models", self.config.base_url);
        match self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!("API key check failed: {}", e);
                false
            }
        }
    }

    /// POST a chat completion and return the first choice's content.
    async fn complete(
        &self,
        body: serde_json::Value,
    ) -> Result<String, VitrinaError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| VitrinaError::Gateway(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(VitrinaError::Gateway(format!(
                "HTTP {} from completion endpoint",
                response.status()
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| VitrinaError::Gateway(format!("unreadable response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| VitrinaError::Gateway("empty completion".to_string()))
    }
}

/// Strip a Markdown code fence if the model wrapped its JSON in one.
fn unfence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

fn parse_body<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, VitrinaError> {
    serde_json::from_str(unfence(content))
        .map_err(|e| VitrinaError::Gateway(format!("unparseable completion body: {}", e)))
}

#[async_trait]
impl RecommendationGateway for OpenAiGateway {
    async fn extract_themes(
        &self,
        image_url: &str,
        description: &str,
        tags: &[String],
    ) -> Result<ThemeExtraction, VitrinaError> {
        let prompt = format!(
            "Analyze this image and extracted data to suggest marketing campaign themes:\n\n\
             Image Description: {}\n\
             Image Tags: {}\n\n\
             Based on this information, provide:\n\
             1. 5-7 relevant marketing themes\n\
             2. The primary theme that would work best\n\
             3. The overall mood/tone\n\
             4. Suggested color palette (3-5 colors)\n\
             5. Target audience\n\
             6. Marketing keywords\n\n\
             Respond in JSON format with the structure:\n\
             {{\"themes\": [\"theme1\", ...], \"primaryTheme\": \"main theme\", \
             \"mood\": \"mood description\", \"colorPalette\": [\"#color1\", ...], \
             \"targetAudience\": \"audience description\", \"keywords\": [\"keyword1\", ...]}}",
            description,
            tags.join(", ")
        );

        let body = json!({
            "model": self.config.model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": prompt },
                    { "type": "image_url", "image_url": { "url": image_url } }
                ]
            }],
            "max_tokens": 800,
            "temperature": 0.7,
        });

        let content = self.complete(body).await?;
        parse_body(&content)
    }

    async fn recommend_templates(
        &self,
        platform: Platform,
        extraction: &ThemeExtraction,
        available: &[TemplateSummary],
    ) -> Result<Vec<TemplateRecommendation>, VitrinaError> {
        let listing = available
            .iter()
            .map(|t| format!("- {}: {} ({})", t.id, t.name, t.style))
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!(
            "You are a marketing design expert. Recommend the best design templates for this campaign:\n\n\
             Platform: {}\n\
             Primary Theme: {}\n\
             All Themes: {}\n\
             Mood: {}\n\
             Target Audience: {}\n\
             Keywords: {}\n\n\
             Available Templates:\n{}\n\n\
             Rank and recommend the top {} templates. For each recommendation, provide:\n\
             - Template ID\n\
             - Suitability score (1-10)\n\
             - Reasoning for the recommendation\n\
             - How well it matches the theme and platform\n\n\
             Respond in JSON format as an array:\n\
             [{{\"templateId\": \"template-id\", \"templateName\": \"template name\", \
             \"description\": \"why this works\", \"suitabilityScore\": 8, \
             \"reasoning\": \"detailed explanation\", \"designStyle\": \"style description\"}}]",
            platform,
            extraction.primary_theme,
            extraction.themes.join(", "),
            extraction.mood,
            extraction.target_audience,
            extraction.keywords.join(", "),
            listing,
            MAX_RECOMMENDATIONS,
        );

        let body = json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": 1000,
            "temperature": 0.3,
        });

        let content = self.complete(body).await?;
        let recs: Vec<TemplateRecommendation> = parse_body(&content)?;
        Ok(normalize_recommendations(recs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfence_handles_plain_and_fenced() {
        assert_eq!(unfence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(unfence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(unfence("```\n[1,2]\n```"), "[1,2]");
    }

    #[test]
    fn parse_body_rejects_prose() {
        let result: Result<ThemeExtraction, _> = parse_body("Sorry, I cannot help with that.");
        assert!(matches!(result, Err(VitrinaError::Gateway(_))));
    }

    #[test]
    fn config_defaults() {
        let config = GatewayConfig::new("sk-test");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert!(!config.model.is_empty());
    }
}
