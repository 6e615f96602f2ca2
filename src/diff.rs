use std::fmt;

/// One line added in the new version of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedLine {
    /// Raw line text, including the leading `+` marker
    pub content: String,
    /// Position in the final file (1-indexed)
    pub line_number: u32,
}

#[derive(Debug)]
pub enum DiffError {
    /// Hunk header with no parseable new-file start line
    MalformedHunkHeader(String),
}

impl fmt::Display for DiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffError::MalformedHunkHeader(header) => {
                write!(f, "Malformed hunk header '{}': no new-file start line", header)
            }
        }
    }
}

impl std::error::Error for DiffError {}

/// Parse one file's unified-diff patch into its added lines.
///
/// Each hunk header `@@ -a,b +c,d @@` seeds a running line counter with the
/// new-file start `c` (the count `d` may be absent). In the hunk body, a `+`
/// line is recorded at the current counter and advances it, a `-` line does
/// neither, and any other line advances the counter without being recorded.
/// Text before the first hunk header is ignored, so an empty patch yields an
/// empty sequence.
///
/// Returns an error when a hunk header has no parseable start line, since
/// line attribution for that hunk would be impossible.
pub fn parse_patch(patch: &str) -> Result<Vec<AddedLine>, DiffError> {
    let mut added = Vec::new();
    let mut counter: Option<u32> = None;

    for line in patch.lines() {
        if line.starts_with("@@") {
            counter = Some(parse_new_start(line)?);
        } else if let Some(current) = counter {
            if line.starts_with('+') {
                added.push(AddedLine {
                    content: line.to_string(),
                    line_number: current,
                });
                counter = Some(current + 1);
            } else if line.starts_with('-') {
                // removal: the new-file counter stays put
            } else {
                counter = Some(current + 1);
            }
        }
    }

    Ok(added)
}

/// Extract the new-file start line from a hunk header like `@@ -10,3 +20,4 @@`
fn parse_new_start(header: &str) -> Result<u32, DiffError> {
    let rest = header
        .find('+')
        .map(|i| &header[i + 1..])
        .ok_or_else(|| DiffError::MalformedHunkHeader(header.to_string()))?;
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits
        .parse()
        .map_err(|_| DiffError::MalformedHunkHeader(header.to_string()))
}
