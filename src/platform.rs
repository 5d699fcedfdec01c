//! # Platform Definitions
//!
//! The closed set of advertising platform/placement identifiers and their
//! default pixel dimensions. A platform is both the campaign's target surface
//! and the key into the template catalog.
//!
//! ## Default Dimensions
//!
//! | Platform | Size |
//! |----------|------|
//! | FACEBOOK_FEED | 1200×630 |
//! | FACEBOOK_STORY | 1080×1920 |
//! | INSTAGRAM_FEED | 1080×1080 |
//! | INSTAGRAM_STORY | 1080×1920 |
//! | TIKTOK_FEED | 1080×1920 |
//! | PINTEREST_PIN | 1000×1500 |
//! | GOOGLE_MREC | 300×250 |
//! | GOOGLE_LEADERBOARD | 728×90 |
//! | GOOGLE_SQUARE | 250×250 |
//! | MAILCHIMP_BANNER | 600×300 |
//! | SHOPIFY_HERO | 1920×600 |
//!
//! Any platform not in the table falls back to 800×600.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::campaign::Dimensions;

/// Advertising platform and placement.
///
/// Serialized in SCREAMING_SNAKE_CASE to match the wire format used by the
/// catalog and gateway contracts (e.g. `"INSTAGRAM_FEED"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    FacebookFeed,
    FacebookStory,
    InstagramFeed,
    InstagramStory,
    TiktokFeed,
    PinterestPin,
    Custom,
    GoogleMrec,
    GoogleLargerec,
    GoogleLeaderboard,
    GoogleHalfpage,
    GoogleLargemobile,
    GoogleSquare,
    GoogleLandscape,
    MailchimpBanner,
    MailchimpLargeBanner,
    MailchimpMobileBanner,
    KlaviyoBanner,
    KlaviyoLargeBanner,
    KlaviyoMobileBanner,
    ShopifyProduct,
    ShopifyCollection,
    ShopifyHero,
}

/// Fallback size for platforms without an entry in the dimension table.
pub const FALLBACK_DIMENSIONS: Dimensions = Dimensions {
    width: 800,
    height: 600,
};

impl Platform {
    /// All platforms, in catalog order.
    pub fn all() -> &'static [Platform] {
        use Platform::*;
        &[
            FacebookFeed,
            FacebookStory,
            InstagramFeed,
            InstagramStory,
            TiktokFeed,
            PinterestPin,
            Custom,
            GoogleMrec,
            GoogleLargerec,
            GoogleLeaderboard,
            GoogleHalfpage,
            GoogleLargemobile,
            GoogleSquare,
            GoogleLandscape,
            MailchimpBanner,
            MailchimpLargeBanner,
            MailchimpMobileBanner,
            KlaviyoBanner,
            KlaviyoLargeBanner,
            KlaviyoMobileBanner,
            ShopifyProduct,
            ShopifyCollection,
            ShopifyHero,
        ]
    }

    /// Default pixel dimensions for this platform, used when the campaign
    /// carries no explicit custom dimensions.
    pub fn default_dimensions(self) -> Dimensions {
        use Platform::*;
        match self {
            FacebookFeed => Dimensions::new(1200, 630),
            FacebookStory => Dimensions::new(1080, 1920),
            InstagramFeed => Dimensions::new(1080, 1080),
            InstagramStory => Dimensions::new(1080, 1920),
            TiktokFeed => Dimensions::new(1080, 1920),
            PinterestPin => Dimensions::new(1000, 1500),
            GoogleMrec => Dimensions::new(300, 250),
            GoogleLeaderboard => Dimensions::new(728, 90),
            GoogleSquare => Dimensions::new(250, 250),
            MailchimpBanner => Dimensions::new(600, 300),
            ShopifyHero => Dimensions::new(1920, 600),
            _ => FALLBACK_DIMENSIONS,
        }
    }

    /// The SCREAMING_SNAKE_CASE identifier (wire/CLI form).
    pub fn id(self) -> &'static str {
        use Platform::*;
        match self {
            FacebookFeed => "FACEBOOK_FEED",
            FacebookStory => "FACEBOOK_STORY",
            InstagramFeed => "INSTAGRAM_FEED",
            InstagramStory => "INSTAGRAM_STORY",
            TiktokFeed => "TIKTOK_FEED",
            PinterestPin => "PINTEREST_PIN",
            Custom => "CUSTOM",
            GoogleMrec => "GOOGLE_MREC",
            GoogleLargerec => "GOOGLE_LARGEREC",
            GoogleLeaderboard => "GOOGLE_LEADERBOARD",
            GoogleHalfpage => "GOOGLE_HALFPAGE",
            GoogleLargemobile => "GOOGLE_LARGEMOBILE",
            GoogleSquare => "GOOGLE_SQUARE",
            GoogleLandscape => "GOOGLE_LANDSCAPE",
            MailchimpBanner => "MAILCHIMP_BANNER",
            MailchimpLargeBanner => "MAILCHIMP_LARGE_BANNER",
            MailchimpMobileBanner => "MAILCHIMP_MOBILE_BANNER",
            KlaviyoBanner => "KLAVIYO_BANNER",
            KlaviyoLargeBanner => "KLAVIYO_LARGE_BANNER",
            KlaviyoMobileBanner => "KLAVIYO_MOBILE_BANNER",
            ShopifyProduct => "SHOPIFY_PRODUCT",
            ShopifyCollection => "SHOPIFY_COLLECTION",
            ShopifyHero => "SHOPIFY_HERO",
        }
    }

    /// Human-readable display name (e.g. "Instagram Feed").
    pub fn label(self) -> String {
        let mut label = String::new();
        for (i, word) in self.id().split('_').enumerate() {
            if i > 0 {
                label.push(' ');
            }
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                label.push(first);
                label.extend(chars.map(|c| c.to_ascii_lowercase()));
            }
        }
        label
    }

    /// Marketing channel grouping, used by listings.
    pub fn category(self) -> &'static str {
        use Platform::*;
        match self {
            FacebookFeed | FacebookStory | InstagramFeed | InstagramStory | TiktokFeed
            | PinterestPin => "Social Media",
            GoogleMrec | GoogleLargerec | GoogleLeaderboard | GoogleHalfpage
            | GoogleLargemobile | GoogleSquare | GoogleLandscape => "Google Ads",
            MailchimpBanner | MailchimpLargeBanner | MailchimpMobileBanner | KlaviyoBanner
            | KlaviyoLargeBanner | KlaviyoMobileBanner => "Email Marketing",
            ShopifyProduct | ShopifyCollection | ShopifyHero => "E-commerce",
            Custom => "Custom",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::all()
            .iter()
            .copied()
            .find(|p| p.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown platform '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dimensions_match_table() {
        assert_eq!(
            Platform::FacebookFeed.default_dimensions(),
            Dimensions::new(1200, 630)
        );
        assert_eq!(
            Platform::InstagramFeed.default_dimensions(),
            Dimensions::new(1080, 1080)
        );
        assert_eq!(
            Platform::InstagramStory.default_dimensions(),
            Dimensions::new(1080, 1920)
        );
        assert_eq!(
            Platform::GoogleLeaderboard.default_dimensions(),
            Dimensions::new(728, 90)
        );
        assert_eq!(
            Platform::ShopifyHero.default_dimensions(),
            Dimensions::new(1920, 600)
        );
    }

    #[test]
    fn unlisted_platforms_fall_back() {
        assert_eq!(Platform::Custom.default_dimensions(), FALLBACK_DIMENSIONS);
        assert_eq!(
            Platform::KlaviyoBanner.default_dimensions(),
            Dimensions::new(800, 600)
        );
        assert_eq!(
            Platform::GoogleHalfpage.default_dimensions(),
            Dimensions::new(800, 600)
        );
    }

    #[test]
    fn id_round_trips_through_from_str() {
        for &platform in Platform::all() {
            assert_eq!(platform.id().parse::<Platform>().unwrap(), platform);
        }
    }

    #[test]
    fn serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&Platform::InstagramFeed).unwrap();
        assert_eq!(json, "\"INSTAGRAM_FEED\"");
        let back: Platform = serde_json::from_str("\"MAILCHIMP_LARGE_BANNER\"").unwrap();
        assert_eq!(back, Platform::MailchimpLargeBanner);
    }

    #[test]
    fn labels_are_title_cased() {
        assert_eq!(Platform::InstagramFeed.label(), "Instagram Feed");
        assert_eq!(Platform::GoogleMrec.label(), "Google Mrec");
    }

    #[test]
    fn all_platforms_have_a_category() {
        for &platform in Platform::all() {
            assert!(!platform.category().is_empty());
        }
    }
}
