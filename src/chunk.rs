//! Splitting raw input into data chunks

use serde::{Deserialize, Serialize};

/// How raw text is split into chunks before hashing
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "mode", content = "value")]
pub enum Chunker {
    /// Split on runs of whitespace, dropping empty tokens
    #[default]
    Whitespace,
    /// Split on an exact delimiter, keeping empty pieces
    Delimiter(String),
    /// One chunk per line
    Lines,
}

impl Chunker {
    /// Split `input` into chunks, in order
    pub fn chunk<'a>(&self, input: &'a str) -> Vec<&'a str> {
        match self {
            Chunker::Whitespace => input.split_whitespace().collect(),
            Chunker::Delimiter(delimiter) if delimiter.is_empty() => vec![input],
            Chunker::Delimiter(delimiter) => input.split(delimiter.as_str()).collect(),
            Chunker::Lines => input.lines().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_chunks() {
        let chunks = Chunker::Whitespace.chunk("  The quick\tbrown\n fox ");
        assert_eq!(chunks, vec!["The", "quick", "brown", "fox"]);
        assert!(Chunker::Whitespace.chunk("   ").is_empty());
    }

    #[test]
    fn test_delimiter_keeps_empty_pieces() {
        let chunker = Chunker::Delimiter(",".into());
        assert_eq!(chunker.chunk("a,,b"), vec!["a", "", "b"]);
        assert_eq!(Chunker::Delimiter(String::new()).chunk("ab"), vec!["ab"]);
    }

    #[test]
    fn test_lines() {
        assert_eq!(Chunker::Lines.chunk("one\ntwo\r\nthree"), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Chunker::Delimiter("|".into())).unwrap();
        assert_eq!(json, r#"{"mode":"delimiter","value":"|"}"#);
        let back: Chunker = serde_json::from_str(r#"{"mode":"whitespace"}"#).unwrap();
        assert_eq!(back, Chunker::Whitespace);
    }
}
