use serde::{Deserialize, Serialize};

use super::MenuDocument;

/// A similarity-search hit: the full document and its heuristic score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuMatch {
    document: MenuDocument,
    score: u32,
}

impl MenuMatch {
    pub fn new(document: MenuDocument, score: u32) -> Self {
        Self { document, score }
    }

    pub fn document(&self) -> &MenuDocument {
        &self.document
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn into_document(self) -> MenuDocument {
        self.document
    }

    pub fn display_line(&self) -> String {
        let title = self.document.title.as_deref().unwrap_or("Untitled");
        format!("{} (score: {})", title, self.score)
    }
}
