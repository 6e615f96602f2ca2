/// Literal suppression marker, matched case-sensitively anywhere in a line
const DISABLE_MARKER: &str = "# rubocop:disable";

/// Scan one added line for a `# rubocop:disable` directive.
///
/// Returns the cop names listed after the marker, comma-separated and in
/// source order, or `None` when the marker is absent. A bare marker with no
/// cop names is still a hit and yields an empty list.
pub fn scan_line(content: &str) -> Option<Vec<String>> {
    let pos = content.find(DISABLE_MARKER)?;
    let after = &content[pos + DISABLE_MARKER.len()..];

    let cops = after
        .split(',')
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    Some(cops)
}
