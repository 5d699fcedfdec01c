//! # Template Catalog
//!
//! The static library of design templates, queried by platform, by category,
//! or by free-text search. Pure lookup — no logic of its own; consumed by the
//! wizard (validation, fallback listings) and the gateway (the
//! `availableTemplates` request field).
//!
//! Two kinds of entries:
//! - **Platform-specific** templates tied to one placement (e.g.
//!   `story-poll` for Instagram Story).
//! - **Universal** layout templates (`hero-overlay`, `split-layout`, ...)
//!   offered on every platform; they are materialized per requested platform.

use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEntry {
    pub id: String,
    pub name: String,
    /// Style description, also fed to the recommendation gateway.
    pub style: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub platform: Platform,
    pub category: String,
    pub source: String,
}

/// Static ad copy associated with a template, merged into the campaign when
/// the template is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdCopy {
    pub headline: String,
    pub body_text: String,
    pub cta: String,
    pub target_audience: String,
    pub post_time: String,
}

/// (id, name, style, category, image_url)
type PlatformRow = (&'static str, &'static str, &'static str, &'static str, Option<&'static str>);

/// Platform-specific template data.
const PLATFORM_TEMPLATES: &[(Platform, &[PlatformRow])] = &[
    (Platform::InstagramFeed, &[
        ("modern-minimal", "Modern Minimal", "Clean, minimal design with bold typography", "minimal", Some("/templates/modern-minimal.png")),
        ("vibrant-gradient", "Vibrant Gradient", "Colorful gradient backgrounds with dynamic elements", "colorful", Some("/templates/vibrant-gradient.png")),
        ("product-grid", "Product Grid", "Professional product display with pricing", "ecommerce", Some("/templates/product-grid.png")),
        ("lifestyle-story", "Lifestyle Story", "Authentic lifestyle photography layout", "lifestyle", None),
        ("brand-announcement", "Brand Announcement", "Bold announcement design with call-to-action", "promotional", None),
        ("user-testimonial", "User Testimonial", "Social proof template with customer quotes", "testimonial", None),
    ]),
    (Platform::InstagramStory, &[
        ("story-poll", "Interactive Poll", "Engaging poll template with custom graphics", "interactive", Some("/templates/story-poll.png")),
        ("story-tutorial", "Tutorial Steps", "Step-by-step tutorial layout", "educational", Some("/templates/story-tutorial.png")),
        ("story-behind-scenes", "Behind the Scenes", "Casual behind-the-scenes template", "lifestyle", None),
        ("story-promotion", "Flash Sale", "Urgent promotional design with countdown", "promotional", None),
    ]),
    (Platform::FacebookFeed, &[
        ("facebook-event", "Event Announcement", "Professional event promotion layout", "event", None),
        ("facebook-community", "Community Post", "Engaging community discussion starter", "community", None),
        ("facebook-video-cover", "Video Thumbnail", "Eye-catching video cover design", "video", None),
    ]),
    (Platform::TiktokFeed, &[
        ("tiktok-challenge", "Challenge Template", "Trendy challenge participation design", "trending", None),
        ("tiktok-tutorial", "Quick Tutorial", "Fast-paced tutorial template", "educational", None),
        ("tiktok-comedy", "Comedy Skit", "Humorous content template", "entertainment", None),
    ]),
    (Platform::PinterestPin, &[
        ("pinterest-diy", "DIY Guide", "Step-by-step DIY project layout", "diy", None),
        ("pinterest-recipe", "Recipe Card", "Beautiful recipe presentation", "food", None),
        ("pinterest-quote", "Inspirational Quote", "Motivational quote with beautiful typography", "inspirational", None),
        ("pinterest-infographic", "Info Graphics", "Data visualization template", "educational", None),
    ]),
    (Platform::GoogleMrec, &[
        ("google-cta", "Call to Action", "High-converting CTA design", "promotional", None),
    ]),
    (Platform::GoogleLeaderboard, &[
        ("google-brand", "Brand Awareness", "Professional brand showcase", "branding", None),
    ]),
    (Platform::MailchimpBanner, &[
        ("email-newsletter", "Newsletter Header", "Professional newsletter design", "newsletter", None),
        ("email-promotion", "Promotional Banner", "Sales and promotion template", "promotional", None),
    ]),
    (Platform::ShopifyHero, &[
        ("shopify-hero-banner", "Hero Banner", "High-impact hero section design", "ecommerce", None),
        ("shopify-collection-grid", "Collection Showcase", "Product collection display", "ecommerce", None),
    ]),
];

/// Universal layout templates, available on every platform.
/// (id, name, style, category)
const UNIVERSAL_TEMPLATES: &[(&str, &str, &str, &str)] = &[
    ("hero-overlay", "Hero Overlay", "Bold text overlay on your image", "layout"),
    ("split-layout", "Split Layout", "Image on one side, content on the other", "layout"),
    ("minimal-frame", "Minimal Frame", "Clean border with centered image", "minimal"),
    ("testimonial-style", "Testimonial Style", "Quote bubble with your image", "testimonial"),
    ("product-showcase", "Product Showcase", "Feature highlights around your image", "ecommerce"),
    ("dynamic-burst", "Dynamic Burst", "Energetic design with motion elements", "promotional"),
];

fn platform_entry(platform: Platform, row: &PlatformRow) -> TemplateEntry {
    TemplateEntry {
        id: row.0.to_string(),
        name: row.1.to_string(),
        style: row.2.to_string(),
        image_url: row.4.map(str::to_string),
        platform,
        category: row.3.to_string(),
        source: "internal".to_string(),
    }
}

fn universal_entry(platform: Platform, row: &(&str, &str, &str, &str)) -> TemplateEntry {
    TemplateEntry {
        id: row.0.to_string(),
        name: row.1.to_string(),
        style: row.2.to_string(),
        image_url: None,
        platform,
        category: row.3.to_string(),
        source: "builtin".to_string(),
    }
}

/// Every platform-specific catalog entry, in catalog order.
pub fn all_templates() -> Vec<TemplateEntry> {
    PLATFORM_TEMPLATES
        .iter()
        .flat_map(|(platform, rows)| rows.iter().map(|row| platform_entry(*platform, row)))
        .collect()
}

/// Templates available for one platform: universal layouts first, then the
/// platform's own entries, in catalog order.
pub fn templates_for_platform(platform: Platform) -> Vec<TemplateEntry> {
    let mut entries: Vec<TemplateEntry> = UNIVERSAL_TEMPLATES
        .iter()
        .map(|row| universal_entry(platform, row))
        .collect();
    entries.extend(
        PLATFORM_TEMPLATES
            .iter()
            .filter(|(p, _)| *p == platform)
            .flat_map(|(p, rows)| rows.iter().map(|row| platform_entry(*p, row))),
    );
    entries
}

/// Platform-specific templates matching a category.
pub fn templates_by_category(category: &str) -> Vec<TemplateEntry> {
    all_templates()
        .into_iter()
        .filter(|t| t.category.eq_ignore_ascii_case(category))
        .collect()
}

/// Case-insensitive substring search over name, style, and category.
pub fn search_templates(query: &str) -> Vec<TemplateEntry> {
    let needle = query.to_lowercase();
    all_templates()
        .into_iter()
        .filter(|t| {
            t.name.to_lowercase().contains(&needle)
                || t.style.to_lowercase().contains(&needle)
                || t.category.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Whether a template id is valid for the given platform.
pub fn template_exists(platform: Platform, id: &str) -> bool {
    templates_for_platform(platform).iter().any(|t| t.id == id)
}

/// Ad copy for a template, used to pre-fill the campaign's generated fields.
/// Unknown ids get the default block.
pub fn copy_for_template(id: &str) -> AdCopy {
    let (headline, body_text, cta, target_audience, post_time) = match id {
        "hero-overlay" => (
            "Make It Unmissable",
            "Put your message front and center with a bold statement your audience can't scroll past.",
            "See It Now",
            "Broad awareness audiences",
            "Tuesday-Thursday 7-9 PM",
        ),
        "split-layout" => (
            "Two Sides, One Story",
            "Pair your product with the words that sell it. Clarity converts.",
            "Learn More",
            "Comparison shoppers 25-45",
            "Monday-Wednesday 10 AM-12 PM",
        ),
        "minimal-frame" => (
            "Simply Beautiful",
            "Less is more. Experience the power of simplicity in every detail.",
            "Discover More",
            "Design-conscious individuals 25-45",
            "Monday-Wednesday 10 AM-12 PM",
        ),
        "testimonial-style" | "user-testimonial" => (
            "Real Results, Real People",
            "See why our community can't stop talking about their amazing transformations.",
            "Join the Community",
            "Previous customers and lookalikes",
            "Friday-Sunday 6-8 PM",
        ),
        "product-showcase" | "product-grid" => (
            "Built for the Spotlight",
            "Every feature, front and center. Give your product the stage it deserves.",
            "Shop Now",
            "High-intent shoppers",
            "Thursday-Saturday 12-2 PM",
        ),
        "dynamic-burst" => (
            "Don't Blink",
            "High energy, zero hesitation. Catch the moment before it's gone.",
            "Get Started",
            "Trend-driven audiences 18-30",
            "Friday-Sunday 6-8 PM",
        ),
        _ => (
            "Transform Your Look Today",
            "Discover the secret to radiant confidence. Join thousands who've already made the change.",
            "Start Now",
            "Engaged audiences 18-35",
            "Tuesday-Thursday 7-9 PM",
        ),
    };
    AdCopy {
        headline: headline.to_string(),
        body_text: body_text.to_string(),
        cta: cta.to_string(),
        target_audience: target_audience.to_string(),
        post_time: post_time.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn universal_templates_on_every_platform() {
        for &platform in Platform::all() {
            let entries = templates_for_platform(platform);
            assert!(entries.iter().any(|t| t.id == "hero-overlay"));
            assert!(entries.iter().any(|t| t.id == "dynamic-burst"));
        }
    }

    #[test]
    fn platform_templates_only_on_their_platform() {
        assert!(template_exists(Platform::InstagramStory, "story-poll"));
        assert!(!template_exists(Platform::FacebookFeed, "story-poll"));
    }

    #[test]
    fn universal_layouts_precede_platform_entries() {
        let entries = templates_for_platform(Platform::InstagramFeed);
        let hero = entries.iter().position(|t| t.id == "hero-overlay").unwrap();
        let minimal = entries.iter().position(|t| t.id == "modern-minimal").unwrap();
        assert!(hero < minimal);
    }

    #[test]
    fn search_is_case_insensitive_over_all_fields() {
        assert!(search_templates("GRADIENT").iter().any(|t| t.id == "vibrant-gradient"));
        assert!(search_templates("step-by-step").iter().any(|t| t.id == "story-tutorial"));
        assert!(search_templates("ecommerce").iter().any(|t| t.id == "shopify-hero-banner"));
        assert!(search_templates("zzz-no-match").is_empty());
    }

    #[test]
    fn category_query_matches_platform_entries() {
        let promos = templates_by_category("promotional");
        assert!(promos.iter().any(|t| t.id == "story-promotion"));
        assert!(promos.iter().all(|t| t.category == "promotional"));
    }

    #[test]
    fn every_universal_template_has_copy() {
        for &(id, ..) in UNIVERSAL_TEMPLATES {
            let copy = copy_for_template(id);
            assert!(!copy.headline.is_empty());
            assert!(!copy.cta.is_empty());
        }
        // Unknown ids fall back rather than panicking.
        assert!(!copy_for_template("nonexistent").headline.is_empty());
    }
}
