use crate::config::RunConfig;
use crate::diff::{self, DiffError};
use crate::docs::{self, CachedDocs, DocsLookup};
use crate::render;
use crate::scanner;
use crate::types::{Annotation, FileDiff, Violation};
use futures::StreamExt;
use tracing::{debug, info, trace};

/// Keep only diffs whose path contains none of the ignore substrings
pub fn filter_paths<'a>(files: &'a [FileDiff], ignore_paths: &[String]) -> Vec<&'a FileDiff> {
    files
        .iter()
        .filter(|file| {
            let ignored = ignore_paths
                .iter()
                .any(|ignore| file.path.contains(ignore.as_str()));
            if ignored {
                debug!("Skipping {} (matches ignore path)", file.path);
            }
            !ignored
        })
        .collect()
}

/// Detect `rubocop:disable` occurrences across the given diffs.
///
/// Violations come out in file order and, within a file, in ascending line
/// order, which the added-line walk guarantees. A malformed hunk header
/// fails the run since line attribution would be unverifiable.
pub fn detect_violations(files: &[&FileDiff]) -> Result<Vec<Violation>, DiffError> {
    let mut violations = Vec::new();
    for file in files {
        let added = diff::parse_patch(&file.patch)?;
        trace!("{}: {} added lines", file.path, added.len());
        for line in added {
            if let Some(cops) = scanner::scan_line(&line.content) {
                violations.push(Violation {
                    file: file.path.clone(),
                    line: line.line_number,
                    disabled_rules: cops,
                });
            }
        }
    }
    Ok(violations)
}

/// Run the whole pipeline: filter paths, parse diffs, scan added lines,
/// resolve cop docs, and format annotations.
///
/// Emits one inline warning annotation per violation plus exactly one
/// summary annotation when at least one violation exists. Zero violations
/// is a normal, empty completion.
pub async fn run(
    files: &[FileDiff],
    config: &RunConfig,
    docs_lookup: &dyn DocsLookup,
) -> Result<Vec<Annotation>, DiffError> {
    let kept = filter_paths(files, &config.ignore_paths);
    debug!("{} of {} diffs kept after path filter", kept.len(), files.len());

    let violations = detect_violations(&kept)?;
    info!("Found {} rubocop:disable occurrence(s)", violations.len());
    if violations.is_empty() {
        return Ok(Vec::new());
    }

    // Resolve docs with bounded concurrency; `buffered` keeps violation
    // order no matter which lookups finish first.
    let cached = CachedDocs::new(docs_lookup);
    let resolved: Vec<Vec<String>> = futures::stream::iter(violations.iter())
        .map(|violation| {
            let cached = &cached;
            async move {
                let mut displays = Vec::with_capacity(violation.disabled_rules.len());
                for cop in &violation.disabled_rules {
                    displays.push(docs::display_rule(cached, cop).await);
                }
                displays
            }
        })
        .buffered(config.max_parallel_lookups.max(1))
        .collect()
        .await;

    let mut annotations: Vec<Annotation> = violations
        .iter()
        .zip(resolved)
        .map(|(violation, rules)| {
            trace!(
                "Violation at {}:{} -> {:?}",
                violation.file, violation.line, rules
            );
            Annotation::inline(
                violation.file.clone(),
                violation.line,
                render::inline_body(&rules, &config.message),
            )
        })
        .collect();

    annotations.push(Annotation::summary(render::summary_body(
        &config.tag_reviewers,
    )));
    Ok(annotations)
}

/// Log annotations to the console
pub fn print_annotations(annotations: &[Annotation]) {
    if annotations.is_empty() {
        info!("No rubocop:disable directives found");
        return;
    }

    for line in render::format_annotations(annotations).lines() {
        info!("{}", line);
    }
}

/// Write annotations to a `.md` or `.json` file
pub fn write_output(path: &str, annotations: &[Annotation]) -> anyhow::Result<()> {
    let content = if path.ends_with(".json") {
        serde_json::to_string_pretty(annotations)?
    } else if path.ends_with(".md") {
        render::format_annotations(annotations)
    } else {
        anyhow::bail!("Output file must end with .md or .json");
    };

    std::fs::write(path, content)?;
    info!("Annotations written to {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::NoDocs;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct StaticDocs(HashMap<String, String>);

    #[async_trait]
    impl DocsLookup for StaticDocs {
        async fn docs_url(&self, cop: &str) -> String {
            self.0.get(cop).cloned().unwrap_or_default()
        }
    }

    fn diff_with(lines: &str) -> String {
        format!("@@ -1,1 +1,2 @@\n context\n{}", lines)
    }

    fn file(path: &str, patch: String) -> FileDiff {
        FileDiff {
            path: path.into(),
            patch,
        }
    }

    #[test]
    fn test_filter_paths_substring_match() {
        let files = vec![
            file("app/models/user.rb", String::new()),
            file("vendor/gems/x.rb", String::new()),
        ];
        let kept = filter_paths(&files, &["vendor/".into()]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].path, "app/models/user.rb");
    }

    #[test]
    fn test_empty_ignore_set_passes_everything() {
        let files = vec![file("a.rb", String::new()), file("b.rb", String::new())];
        assert_eq!(filter_paths(&files, &[]).len(), 2);
    }

    #[test]
    fn test_detect_violations_extracts_cops() {
        let files = vec![file(
            "app/a.rb",
            diff_with("+  foo() # rubocop:disable Metrics/MethodLength"),
        )];
        let kept: Vec<&FileDiff> = files.iter().collect();
        let violations = detect_violations(&kept).unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].file, "app/a.rb");
        assert_eq!(violations[0].line, 2);
        assert_eq!(violations[0].disabled_rules, vec!["Metrics/MethodLength"]);
    }

    #[tokio::test]
    async fn test_zero_violations_means_zero_annotations() {
        let files = vec![file("app/a.rb", diff_with("+x = 1"))];
        let annotations = run(&files, &RunConfig::default(), &NoDocs).await.unwrap();
        assert!(annotations.is_empty());
    }

    #[tokio::test]
    async fn test_two_files_get_two_inline_plus_one_summary() {
        let files = vec![
            file("app/a.rb", diff_with("+x = 1 # rubocop:disable A")),
            file("app/b.rb", diff_with("+y = 2 # rubocop:disable B")),
        ];
        let config = RunConfig {
            tag_reviewers: vec!["alice".into(), "bob".into()],
            ..RunConfig::default()
        };
        let annotations = run(&files, &config, &NoDocs).await.unwrap();
        assert_eq!(annotations.len(), 3);
        assert!(annotations[0].is_inline());
        assert!(annotations[1].is_inline());
        assert_eq!(annotations[0].file.as_deref(), Some("app/a.rb"));
        assert_eq!(annotations[1].file.as_deref(), Some("app/b.rb"));
        assert!(!annotations[2].is_inline());
        assert!(annotations[2].body.contains("cc @alice, @bob"));
    }

    #[tokio::test]
    async fn test_ignored_file_never_contributes_violations() {
        let files = vec![file(
            "copwatch.toml",
            diff_with("+# rubocop:disable Everything"),
        )];
        let annotations = run(&files, &RunConfig::default(), &NoDocs).await.unwrap();
        assert!(annotations.is_empty());
    }

    #[tokio::test]
    async fn test_resolved_cops_link_to_docs() {
        let docs = StaticDocs(HashMap::from([(
            "A".to_string(),
            "https://docs.example/A".to_string(),
        )]));
        let files = vec![file("app/a.rb", diff_with("+x = 1 # rubocop:disable A, B"))];
        let annotations = run(&files, &RunConfig::default(), &docs).await.unwrap();
        assert_eq!(annotations.len(), 2);
        assert!(annotations[0].body.contains("- [A](https://docs.example/A)"));
        assert!(annotations[0].body.contains("- B"));
    }

    #[tokio::test]
    async fn test_annotation_order_is_file_then_line() {
        let patch = "@@ -1,1 +1,4 @@\n context\n+a # rubocop:disable A\n+b\n+c # rubocop:disable C";
        let files = vec![
            file("app/z.rb", patch.to_string()),
            file("app/a.rb", diff_with("+x # rubocop:disable X")),
        ];
        let annotations = run(&files, &RunConfig::default(), &NoDocs).await.unwrap();
        // input file order, then ascending line order within a file
        assert_eq!(annotations[0].file.as_deref(), Some("app/z.rb"));
        assert_eq!(annotations[0].line, Some(2));
        assert_eq!(annotations[1].file.as_deref(), Some("app/z.rb"));
        assert_eq!(annotations[1].line, Some(4));
        assert_eq!(annotations[2].file.as_deref(), Some("app/a.rb"));
    }

    #[tokio::test]
    async fn test_malformed_hunk_header_fails_the_run() {
        let files = vec![file("app/a.rb", "@@ broken @@\n+x".to_string())];
        assert!(run(&files, &RunConfig::default(), &NoDocs).await.is_err());
    }
}
