use serde::{Deserialize, Serialize};

use super::LoadLevel;

/// Rest between repetitions: seconds, or free text such as "easy choice".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rest {
    Seconds(f64),
    Text(String),
}

impl Rest {
    pub fn seconds(&self) -> Option<f64> {
        match self {
            Rest::Seconds(s) => Some(*s),
            Rest::Text(_) => None,
        }
    }
}

/// A single drill within a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub description: String,
    pub distance: f64,
    pub sets: u32,
    /// Circuit/lap label, e.g. "1'40/100m".
    pub circle: String,
    pub rest: Rest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Execution time in minutes.
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSection {
    pub name: String,
    pub items: Vec<MenuItem>,
    pub total_time: f64,
}

/// A full generated training menu, as written to the blob store.
/// Immutable once saved; there is no update operation.
///
/// Wire names are camelCase to round-trip what the generator side emits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub sections: Vec<MenuSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<f64>,
    /// Requested duration in minutes, echoed back by the generator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_levels: Option<Vec<LoadLevel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Name of the model that generated the menu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl MenuDocument {
    /// True when any section name contains one of `markers`.
    /// Section names are lower-cased first; markers must be lower-case.
    pub fn has_section_matching(&self, markers: &[&str]) -> bool {
        self.sections.iter().any(|section| {
            let name = section.name.to_lowercase();
            markers.iter().any(|marker| name.contains(marker))
        })
    }
}
