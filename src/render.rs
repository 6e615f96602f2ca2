use crate::types::Annotation;

/// Build the inline annotation body for one violation's resolved cop list.
///
/// Phrasing depends on how many cops the directive named: none, one inline,
/// or a bulleted list. The configured message follows as a blockquote.
pub fn inline_body(rules: &[String], message: &str) -> String {
    let detected = match rules {
        [] => "Detected `rubocop:disable`".to_string(),
        [rule] => format!("Detected `rubocop:disable` for {}", rule),
        _ => {
            let mut text = String::from("Detected `rubocop:disable` for the following cops:");
            for rule in rules {
                text.push_str(&format!("\n- {}", rule));
            }
            text
        }
    };
    format!("{}\n\n> {}", detected, message)
}

/// Build the run summary body, tagging reviewers when configured.
/// With no reviewers the `cc` clause is omitted entirely.
pub fn summary_body(tag_reviewers: &[String]) -> String {
    let detected = "Detected use of `rubocop:disable` directive.";
    if tag_reviewers.is_empty() {
        return detected.to_string();
    }

    let tags: Vec<String> = tag_reviewers.iter().map(|r| format!("@{}", r)).collect();
    format!("{} cc {}", detected, tags.join(", "))
}

/// Render annotations as Markdown for console or `.md` output
pub fn format_annotations(annotations: &[Annotation]) -> String {
    if annotations.is_empty() {
        return "No rubocop:disable directives found".to_string();
    }

    let mut output = String::new();
    for annotation in annotations {
        match (&annotation.file, annotation.line) {
            (Some(file), Some(line)) => {
                output.push_str(&format!("# {}:{}\n\n{}\n\n", file, line, annotation.body));
            }
            _ => {
                output.push_str(&format!("# Summary\n\n{}\n\n", annotation.body));
            }
        }
    }
    output.trim_end().to_string()
}
