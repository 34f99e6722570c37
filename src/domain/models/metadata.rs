use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LoadLevel, MenuDocument};

/// Title recorded when the document carries none.
pub const DEFAULT_TITLE: &str = "Untitled";
/// Model name recorded when the document carries none.
pub const DEFAULT_MODEL: &str = "Unknown";

const DEFAULT_NUMBER: &str = "0";

/// Denormalized summary of a menu kept in the index, so listing and search
/// never have to fetch full documents.
///
/// Numeric fields are kept in string form and load levels comma-joined,
/// matching the index format as the generator side wrote it. Derived once
/// from the document at save time, never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuMetadata {
    pub load_levels: String,
    pub duration: String,
    pub notes: String,
    /// RFC 3339 creation timestamp, stamped at save time.
    pub created_at: String,
    pub total_time: String,
    pub intensity: String,
    pub target_skills: Vec<String>,
    pub title: String,
    pub model: String,
}

impl MenuMetadata {
    /// Derives the summary from a full document, stamping the creation time.
    pub fn from_document(document: &MenuDocument) -> Self {
        Self {
            load_levels: document
                .load_levels
                .as_deref()
                .map(LoadLevel::join)
                .unwrap_or_default(),
            duration: document
                .duration
                .map(format_number)
                .unwrap_or_else(|| DEFAULT_NUMBER.to_string()),
            notes: document.notes.clone().unwrap_or_default(),
            created_at: Utc::now().to_rfc3339(),
            total_time: document
                .total_time
                .map(format_number)
                .unwrap_or_else(|| DEFAULT_NUMBER.to_string()),
            intensity: document.intensity.clone().unwrap_or_default(),
            target_skills: document.target_skills.clone().unwrap_or_default(),
            title: document
                .title
                .clone()
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            model: document
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    /// Stored duration decoded back to minutes; unparseable strings read
    /// as 0.
    pub fn duration_minutes(&self) -> f64 {
        parse_number(&self.duration)
    }

    pub fn total_time_minutes(&self) -> f64 {
        parse_number(&self.total_time)
    }

    pub fn load_level_set(&self) -> Vec<LoadLevel> {
        LoadLevel::split(&self.load_levels)
    }

    /// Lower-cased haystack for keyword scoring: title, notes, and target
    /// skills.
    pub fn search_text(&self) -> String {
        let mut text = format!("{} {}", self.title, self.notes);
        for skill in &self.target_skills {
            text.push(' ');
            text.push_str(skill);
        }
        text.to_lowercase()
    }

    /// Creation timestamp decoded to UTC. Unparseable values pin to the
    /// Unix epoch so they sort last rather than poisoning the ordering.
    pub fn created_at_utc(&self) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// A flattened listing entry: an index entry's id merged with its metadata,
/// string fields decoded back to their semantic types.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: String,
    pub title: String,
    pub load_levels: Vec<LoadLevel>,
    pub duration: f64,
    pub total_time: f64,
    pub intensity: String,
    pub target_skills: Vec<String>,
    pub notes: String,
    pub model: String,
    pub created_at: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn new(id: impl Into<String>, metadata: &MenuMetadata) -> Self {
        Self {
            id: id.into(),
            title: metadata.title.clone(),
            load_levels: metadata.load_level_set(),
            duration: metadata.duration_minutes(),
            total_time: metadata.total_time_minutes(),
            intensity: metadata.intensity.clone(),
            target_skills: metadata.target_skills.clone(),
            notes: metadata.notes.clone(),
            model: metadata.model.clone(),
            created_at: metadata.created_at_utc(),
        }
    }
}

/// Whole minutes print without a fractional part ("30", not "30.0");
/// the generator wrote integers and lookups must decode to the same number.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn parse_number(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_applies_defaults() {
        let metadata = MenuMetadata::from_document(&MenuDocument::default());

        assert_eq!(metadata.title, DEFAULT_TITLE);
        assert_eq!(metadata.model, DEFAULT_MODEL);
        assert_eq!(metadata.duration, "0");
        assert_eq!(metadata.total_time, "0");
        assert_eq!(metadata.load_levels, "");
        assert_eq!(metadata.notes, "");
        assert_eq!(metadata.intensity, "");
        assert!(metadata.target_skills.is_empty());
        assert!(!metadata.created_at.is_empty());
    }

    #[test]
    fn numbers_survive_the_string_form() {
        let doc = MenuDocument {
            duration: Some(30.0),
            total_time: Some(27.5),
            ..Default::default()
        };
        let metadata = MenuMetadata::from_document(&doc);

        assert_eq!(metadata.duration, "30");
        assert_eq!(metadata.duration_minutes(), 30.0);
        assert_eq!(metadata.total_time, "27.5");
        assert_eq!(metadata.total_time_minutes(), 27.5);
    }

    #[test]
    fn garbage_numbers_read_as_zero() {
        let metadata = MenuMetadata {
            duration: "soon".to_string(),
            ..Default::default()
        };
        assert_eq!(metadata.duration_minutes(), 0.0);
    }

    #[test]
    fn search_text_is_lower_cased_and_includes_skills() {
        let metadata = MenuMetadata {
            title: "Sprint Set".to_string(),
            notes: "Kick focus".to_string(),
            target_skills: vec!["Endurance".to_string()],
            ..Default::default()
        };
        let text = metadata.search_text();

        assert!(text.contains("sprint set"));
        assert!(text.contains("kick focus"));
        assert!(text.contains("endurance"));
    }

    #[test]
    fn unparseable_timestamp_pins_to_epoch() {
        let metadata = MenuMetadata {
            created_at: "yesterday".to_string(),
            ..Default::default()
        };
        assert_eq!(metadata.created_at_utc(), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn history_record_decodes_semantic_types() {
        let doc = MenuDocument {
            title: Some("Distance Day".to_string()),
            duration: Some(45.0),
            load_levels: Some(vec![LoadLevel::B, LoadLevel::C]),
            ..Default::default()
        };
        let metadata = MenuMetadata::from_document(&doc);
        let record = HistoryRecord::new("m1", &metadata);

        assert_eq!(record.id, "m1");
        assert_eq!(record.duration, 45.0);
        assert_eq!(record.load_levels, vec![LoadLevel::B, LoadLevel::C]);
        assert_eq!(record.created_at, metadata.created_at_utc());
    }
}
