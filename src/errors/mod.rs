use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors: any of these aborts the run.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid API description in {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("failed to serialize report: {0}")]
    Report(#[source] serde_json::Error),

    /// The output sink could not be created or written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = GenError> = std::result::Result<T, E>;

/// Why a single function could not be marshalled. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Unsupported {
    Arg { name: String, ty: String },
    Return { ty: String },
}

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arg { ty, .. } => write!(f, "Unknown arg: {}", ty),
            Self::Return { ty } => write!(f, "Unknown ret: {}", ty),
        }
    }
}

/// Terminal `Skipped` state of a function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    Unsupported(Unsupported),
    /// `structSetter` whose derived name lacks the setter prefix, or whose
    /// receiver is on the skip-list.
    SetterNameFiltered,
    SetterWithoutReceiver,
    ConstructorTargetUnknown { stem: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(u) => write!(f, "{}", u),
            Self::SetterNameFiltered => write!(f, "setter does not follow the naming convention"),
            Self::SetterWithoutReceiver => write!(f, "setter has no receiver argument"),
            Self::ConstructorTargetUnknown { stem } => {
                write!(f, "no struct matches constructor prefix '{}'", stem)
            }
        }
    }
}

impl From<Unsupported> for SkipReason {
    fn from(u: Unsupported) -> Self {
        Self::Unsupported(u)
    }
}

/// A console diagnostic produced while generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub function: String,
    pub problem: Unsupported,
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    pub fn new(function: impl Into<String>, problem: Unsupported) -> Self {
        Self {
            function: function.into(),
            problem,
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.problem)
    }
}

/// Accumulates diagnostics in the order functions are visited.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Compute Levenshtein distance for "did you mean" suggestions
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() { return b_chars.len(); }
    if b_chars.is_empty() { return a_chars.len(); }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut row = vec![0; b_chars.len() + 1];

    for (i, ca) in a_chars.iter().enumerate() {
        row[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            row[j + 1] = (prev[j + 1] + 1).min(row[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut row);
    }

    prev[b_chars.len()]
}

/// Known names within `max_distance` of `target`, closest first.
pub fn find_similar_names<'a, I>(target: &str, candidates: I, max_distance: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut results: Vec<(&str, usize)> = candidates
        .into_iter()
        .map(|c| (c, levenshtein_distance(target, c)))
        .filter(|(_, dist)| *dist <= max_distance && *dist > 0)
        .collect();

    results.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    results.into_iter().take(3).map(|(name, _)| name.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_display() {
        let arg = Unsupported::Arg { name: "x".into(), ty: "unknownType".into() };
        assert_eq!(arg.to_string(), "Unknown arg: unknownType");

        let ret = Unsupported::Return { ty: "ImFontGlyph".into() };
        assert_eq!(ret.to_string(), "Unknown ret: ImFontGlyph");
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("float*", "float*"), 0);
    }

    #[test]
    fn test_similar_names() {
        let known = ["const char*", "char*", "float*", "int*"];
        let similar = find_similar_names("cont char*", known.iter().copied(), 2);
        assert_eq!(similar.first().map(String::as_str), Some("const char*"));
    }

    #[test]
    fn test_collector_keeps_order() {
        let mut collector = DiagnosticCollector::new();
        collector.add(Diagnostic::new("a", Unsupported::Return { ty: "A".into() }));
        collector.add(Diagnostic::new("b", Unsupported::Return { ty: "B".into() }));

        let names: Vec<_> = collector.into_diagnostics().into_iter().map(|d| d.function).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
