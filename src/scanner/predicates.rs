//! Content predicates over evidence text
//!
//! Every predicate is a pure function of the content it is given. Empty
//! content is valid input.

/// Keywords that indicate a device-side crash in a run log
pub const CRASH_KEYWORDS: [&str; 3] = ["fatal error", "beginning of crash", "fatal signal"];

/// Marker written to the event transcript once a UE attaches
pub const CONNECTION_SUCCESS_MARKER: &str = "1/2 UE connected to eNB/gNB";

/// Marker that proves an RRC Setup was transmitted during the run
pub const RRC_SETUP_MARKER: &str = "[M] TX --> RRC Setup";

/// Case-insensitive check for any of `keywords` anywhere in `content`
pub fn contains_any_keyword<S: AsRef<str>>(content: &str, keywords: &[S]) -> bool {
    let haystack = content.to_lowercase();
    keywords
        .iter()
        .any(|keyword| haystack.contains(&keyword.as_ref().to_lowercase()))
}

/// Case-sensitive exact substring check
pub fn contains_marker(content: &str, marker: &str) -> bool {
    content.contains(marker)
}

/// True when `content` is empty or whitespace only
pub fn is_blank(content: &str) -> bool {
    content.trim().is_empty()
}

/// A named predicate, so verdicts can record which tests fired
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    AnyKeyword { name: &'static str, keywords: Vec<String> },
    Marker { name: &'static str, marker: String },
    Blank,
}

impl Predicate {
    pub fn any_keyword<S: Into<String>>(name: &'static str, keywords: impl IntoIterator<Item = S>) -> Self {
        Predicate::AnyKeyword {
            name,
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    pub fn marker(name: &'static str, marker: impl Into<String>) -> Self {
        Predicate::Marker {
            name,
            marker: marker.into(),
        }
    }

    pub fn evaluate(&self, content: &str) -> bool {
        match self {
            Predicate::AnyKeyword { keywords, .. } => contains_any_keyword(content, keywords.as_slice()),
            Predicate::Marker { marker, .. } => contains_marker(content, marker),
            Predicate::Blank => is_blank(content),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Predicate::AnyKeyword { name, .. } | Predicate::Marker { name, .. } => *name,
            Predicate::Blank => "blank",
        }
    }
}
