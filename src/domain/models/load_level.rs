use serde::{Deserialize, Serialize};

/// The fixed load-level alphabet menu generators emit.
pub const LOAD_LEVEL_ALPHABET: &[&str] = &["A", "B", "C"];

/// Training load level. The index stores levels comma-joined ("A,B");
/// [`LoadLevel::join`] and [`LoadLevel::split`] convert between the two
/// forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadLevel {
    A,
    B,
    C,
}

impl LoadLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadLevel::A => "A",
            LoadLevel::B => "B",
            LoadLevel::C => "C",
        }
    }

    /// Parses a single token. Only exact matches against the alphabet count
    /// (case-insensitive); partial or decorated tokens never do.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("A") {
            Some(LoadLevel::A)
        } else if token.eq_ignore_ascii_case("B") {
            Some(LoadLevel::B)
        } else if token.eq_ignore_ascii_case("C") {
            Some(LoadLevel::C)
        } else {
            None
        }
    }

    /// Comma-joins levels into the index's denormalized string form.
    pub fn join(levels: &[LoadLevel]) -> String {
        levels
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Splits the denormalized form back into levels, dropping anything
    /// outside the alphabet.
    pub fn split(joined: &str) -> Vec<LoadLevel> {
        joined.split(',').filter_map(LoadLevel::parse).collect()
    }
}

impl std::fmt::Display for LoadLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_exact_but_case_insensitive() {
        assert_eq!(LoadLevel::parse("A"), Some(LoadLevel::A));
        assert_eq!(LoadLevel::parse("b"), Some(LoadLevel::B));
        assert_eq!(LoadLevel::parse(" C "), Some(LoadLevel::C));
        assert_eq!(LoadLevel::parse("AB"), None);
        assert_eq!(LoadLevel::parse("A+"), None);
        assert_eq!(LoadLevel::parse("D"), None);
        assert_eq!(LoadLevel::parse(""), None);
    }

    #[test]
    fn join_and_split_round_trip() {
        let levels = vec![LoadLevel::A, LoadLevel::C];
        let joined = LoadLevel::join(&levels);
        assert_eq!(joined, "A,C");
        assert_eq!(LoadLevel::split(&joined), levels);
    }

    #[test]
    fn split_drops_unknown_symbols() {
        assert_eq!(
            LoadLevel::split("A,x,B,,D"),
            vec![LoadLevel::A, LoadLevel::B]
        );
        assert!(LoadLevel::split("").is_empty());
    }
}
