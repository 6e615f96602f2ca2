use crate::types::FileDiff;
use std::process::Command;
use tracing::debug;

/// Resolve the base reference for git diff operations.
///
/// - Empty string: auto-detect HEAD or ^ based on uncommitted changes
/// - "^" or "~" prefix: relative to HEAD
/// - Otherwise: commit hash or reference
pub fn resolve_base(diff_base: &str) -> String {
    let base = if diff_base.is_empty() {
        debug!("Base is empty, checking for uncommitted changes");
        let has_uncommitted = Command::new("git")
            .args(["diff", "--quiet", "HEAD"])
            .status()
            .map(|s| !s.success())
            .unwrap_or(false);
        let detected = if has_uncommitted { "HEAD" } else { "^" };
        debug!("Auto-detected base: {}", detected);
        detected
    } else {
        diff_base
    };

    if base.starts_with('~') || base.starts_with('^') {
        format!("HEAD{}", base)
    } else {
        base.to_string()
    }
}

/// List files changed relative to the base commit
pub fn changed_files(base: &str) -> std::io::Result<Vec<String>> {
    let output = Command::new("git")
        .args(["diff", "--name-only", base])
        .output()?;

    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|s| s.to_string())
        .collect())
}

/// Collect per-file patches for the changed files
pub fn file_diffs(base: &str, files: &[String]) -> Vec<FileDiff> {
    let mut diffs = Vec::new();

    for file in files {
        if let Ok(output) = Command::new("git")
            .args(["diff", base, "--", file])
            .output()
        {
            if output.status.success() {
                let patch = String::from_utf8_lossy(&output.stdout).to_string();
                if !patch.is_empty() {
                    diffs.push(FileDiff {
                        path: file.clone(),
                        patch,
                    });
                }
            }
        }
    }

    diffs
}
