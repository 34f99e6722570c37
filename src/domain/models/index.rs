use serde::{Deserialize, Serialize};

use super::MenuMetadata;

/// How [`MenuIndex::find`] treats a query id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdMatch {
    /// Exact ids only.
    Exact,
    /// Exact match first across the whole index; only when nothing matches
    /// exactly, fall back to the legacy loose rule: first entry whose id
    /// contains, or is contained by, the query id.
    #[default]
    ExactThenLoose,
}

/// One saved menu as recorded in the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    pub id: String,
    pub metadata: MenuMetadata,
    /// URL the full document is readable from, exactly as the blob store
    /// returned it. Older index documents may lack the field; it then
    /// deserializes to the empty string, meaning "no URL recorded".
    #[serde(default)]
    pub menu_data_url: String,
}

/// The single document enumerating every saved menu; the source of truth
/// for what menus exist.
///
/// Append-only: entries are never removed or rewritten. Ids are expected
/// unique but never enforced; duplicates resolve to the first occurrence in
/// index order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuIndex {
    pub menus: Vec<IndexEntry>,
}

impl MenuIndex {
    pub fn push(&mut self, entry: IndexEntry) {
        self.menus.push(entry);
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    /// First entry matching `id` under `policy`. Both tiers scan in index
    /// order, so duplicate ids resolve deterministically.
    pub fn find(&self, id: &str, policy: IdMatch) -> Option<&IndexEntry> {
        if let Some(entry) = self.menus.iter().find(|e| e.id == id) {
            return Some(entry);
        }

        match policy {
            IdMatch::Exact => None,
            IdMatch::ExactThenLoose => self
                .menus
                .iter()
                .find(|e| e.id.contains(id) || id.contains(e.id.as_str())),
        }
    }
}
