use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Proficiency levels. The one enumeration shared by every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Expert,
}

impl SkillLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "beginner" => Some(SkillLevel::Beginner),
            "intermediate" => Some(SkillLevel::Intermediate),
            "expert" => Some(SkillLevel::Expert),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Expert => "expert",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub level: String,
    pub created_at: DateTime<Utc>,
}

/// Skill create/update request. Older client revisions sent `skill_name`
/// instead of `name`; the alias keeps both shapes valid at the boundary.
#[derive(Debug, Deserialize)]
pub struct SkillPayload {
    #[serde(alias = "skill_name")]
    pub name: String,
    pub level: String,
}

/// Case-insensitive duplicate check against the stored collection.
/// Best-effort only — two racing requests can still create duplicates
/// upstream; no storage constraint is assumed.
pub fn has_duplicate_name(skills: &[SkillRow], name: &str) -> bool {
    skills.iter().any(|s| s.name.eq_ignore_ascii_case(name))
}

/// Same check for renames: ignores the row being edited.
pub fn has_duplicate_name_excluding(skills: &[SkillRow], name: &str, exclude: Uuid) -> bool {
    skills
        .iter()
        .any(|s| s.id != exclude && s.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(name: &str) -> SkillRow {
        SkillRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            level: "intermediate".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_level_parse_known_values() {
        assert_eq!(SkillLevel::parse("beginner"), Some(SkillLevel::Beginner));
        assert_eq!(
            SkillLevel::parse("intermediate"),
            Some(SkillLevel::Intermediate)
        );
        assert_eq!(SkillLevel::parse("expert"), Some(SkillLevel::Expert));
    }

    #[test]
    fn test_level_parse_rejects_unknown() {
        assert_eq!(SkillLevel::parse("ninja"), None);
        assert_eq!(SkillLevel::parse(""), None);
        assert_eq!(SkillLevel::parse("Expert"), None);
    }

    #[test]
    fn test_duplicate_detection_is_case_insensitive() {
        let skills = vec![skill("react")];
        assert!(has_duplicate_name(&skills, "React"));
        assert!(has_duplicate_name(&skills, "REACT"));
        assert!(!has_duplicate_name(&skills, "Vue"));
    }

    #[test]
    fn test_duplicate_detection_on_empty_collection() {
        assert!(!has_duplicate_name(&[], "React"));
    }

    #[test]
    fn test_rename_ignores_the_edited_row() {
        let existing = skill("React");
        let id = existing.id;
        let skills = vec![existing, skill("Rust")];
        assert!(!has_duplicate_name_excluding(&skills, "react", id));
        assert!(has_duplicate_name_excluding(&skills, "rust", id));
    }

    #[test]
    fn test_skill_payload_accepts_legacy_field_name() {
        let p: SkillPayload =
            serde_json::from_value(serde_json::json!({ "skill_name": "Rust", "level": "expert" }))
                .unwrap();
        assert_eq!(p.name, "Rust");
    }
}
