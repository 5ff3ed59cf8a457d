use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Platforms a portfolio can link out to. Enum order drives the order of
/// the rendered link map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Github,
    Linkedin,
    Instagram,
    Behance,
    Youtube,
    Website,
    Twitter,
}

/// Canonical social-link shape: one ordered platform → URL mapping.
pub type SocialLinks = BTreeMap<SocialPlatform, String>;

/// One profile per user; `id` is the auth identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub bio: String,
    pub avatar_url: Option<String>,
    pub social_links: Json<SocialLinks>,
    pub theme: String,
    pub username: String,
    pub subscription_plan: String,
    pub subscription_status: String,
    pub subscription_ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile save request. Older client revisions sent social links as flat
/// top-level fields instead of the `social_links` map; both shapes are
/// accepted here and folded into the canonical mapping.
#[derive(Debug, Deserialize)]
pub struct ProfilePayload {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub social_links: Option<SocialLinks>,
    #[serde(flatten)]
    legacy: LegacySocialFields,
}

#[derive(Debug, Default, Deserialize)]
struct LegacySocialFields {
    #[serde(default)]
    github: Option<String>,
    #[serde(default)]
    linkedin: Option<String>,
    #[serde(default)]
    instagram: Option<String>,
    #[serde(default)]
    behance: Option<String>,
    #[serde(default)]
    youtube: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    twitter: Option<String>,
}

impl ProfilePayload {
    /// Canonical link map. The explicit `social_links` map wins; flat
    /// legacy fields fill in anything it does not mention. Empty URLs are
    /// dropped rather than stored.
    pub fn canonical_social_links(&self) -> SocialLinks {
        let mut links = SocialLinks::new();

        let legacy_pairs = [
            (SocialPlatform::Github, &self.legacy.github),
            (SocialPlatform::Linkedin, &self.legacy.linkedin),
            (SocialPlatform::Instagram, &self.legacy.instagram),
            (SocialPlatform::Behance, &self.legacy.behance),
            (SocialPlatform::Youtube, &self.legacy.youtube),
            (SocialPlatform::Website, &self.legacy.website),
            (SocialPlatform::Twitter, &self.legacy.twitter),
        ];
        for (platform, url) in legacy_pairs {
            if let Some(url) = url {
                if !url.trim().is_empty() {
                    links.insert(platform, url.trim().to_string());
                }
            }
        }

        if let Some(explicit) = &self.social_links {
            for (platform, url) in explicit {
                if url.trim().is_empty() {
                    links.remove(platform);
                } else {
                    links.insert(*platform, url.trim().to_string());
                }
            }
        }

        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_from(json: serde_json::Value) -> ProfilePayload {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_explicit_social_links_map() {
        let p = payload_from(serde_json::json!({
            "name": "Ada",
            "role": "Engineer",
            "social_links": { "github": "https://github.com/ada" }
        }));
        let links = p.canonical_social_links();
        assert_eq!(
            links.get(&SocialPlatform::Github).map(String::as_str),
            Some("https://github.com/ada")
        );
    }

    #[test]
    fn test_legacy_flat_fields_fold_into_map() {
        let p = payload_from(serde_json::json!({
            "name": "Ada",
            "role": "Engineer",
            "github": "https://github.com/ada",
            "website": "https://ada.dev"
        }));
        let links = p.canonical_social_links();
        assert_eq!(links.len(), 2);
        assert!(links.contains_key(&SocialPlatform::Github));
        assert!(links.contains_key(&SocialPlatform::Website));
    }

    #[test]
    fn test_explicit_map_wins_over_legacy_field() {
        let p = payload_from(serde_json::json!({
            "name": "Ada",
            "role": "Engineer",
            "github": "https://github.com/old",
            "social_links": { "github": "https://github.com/new" }
        }));
        let links = p.canonical_social_links();
        assert_eq!(
            links.get(&SocialPlatform::Github).map(String::as_str),
            Some("https://github.com/new")
        );
    }

    #[test]
    fn test_empty_urls_are_dropped() {
        let p = payload_from(serde_json::json!({
            "name": "Ada",
            "role": "Engineer",
            "github": "  ",
            "social_links": { "linkedin": "" }
        }));
        assert!(p.canonical_social_links().is_empty());
    }

    #[test]
    fn test_link_map_orders_by_platform() {
        let p = payload_from(serde_json::json!({
            "name": "Ada",
            "role": "Engineer",
            "social_links": {
                "twitter": "https://twitter.com/ada",
                "github": "https://github.com/ada",
                "youtube": "https://youtube.com/@ada"
            }
        }));
        let platforms: Vec<_> = p.canonical_social_links().into_keys().collect();
        assert_eq!(
            platforms,
            vec![
                SocialPlatform::Github,
                SocialPlatform::Youtube,
                SocialPlatform::Twitter
            ]
        );
    }

    #[test]
    fn test_unknown_platform_is_rejected() {
        let result: Result<ProfilePayload, _> = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "role": "Engineer",
            "social_links": { "myspace": "https://myspace.com/ada" }
        }));
        assert!(result.is_err());
    }
}
