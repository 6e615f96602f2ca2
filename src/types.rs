use serde::Serialize;

/// Raw unified-diff text for one changed file
#[derive(Debug, Clone)]
pub struct FileDiff {
    /// File path in the new version
    pub path: String,
    /// Unified-diff patch text
    pub patch: String,
}

/// One detected `rubocop:disable` occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path
    pub file: String,
    /// Line number in the final file (1-indexed)
    pub line: u32,
    /// Cop names listed after the directive, in source order.
    /// Empty when the directive names no cops.
    pub disabled_rules: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
}

/// A review annotation request. Inline annotations carry a file and line;
/// the run summary carries neither.
#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    pub severity: Severity,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl Annotation {
    pub fn inline(file: String, line: u32, body: String) -> Self {
        Self {
            severity: Severity::Warning,
            body,
            file: Some(file),
            line: Some(line),
        }
    }

    pub fn summary(body: String) -> Self {
        Self {
            severity: Severity::Warning,
            body,
            file: None,
            line: None,
        }
    }

    /// Whether this annotation is attached to a file location
    pub fn is_inline(&self) -> bool {
        self.file.is_some()
    }
}
