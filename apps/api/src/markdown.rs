//! Markdown Normalizer — strips the lightweight markup the models leave in
//! their output so the document exporter sees plain prose.
//!
//! Removes `#` heading prefixes (a run of one or more at line start,
//! followed by whitespace) and `**` / `__` bold markers. Idempotent.

/// Normalizes model output to plain text.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut first = true;
    for line in text.split('\n') {
        if !first {
            out.push('\n');
        }
        first = false;
        out.push_str(&strip_bold_markers(strip_heading_prefix(line)));
    }
    out
}

/// Strips leading runs of `#` characters, each followed by whitespace,
/// until none remain, so one pass removes stacked prefixes like `## # `.
/// A `#` run with no following whitespace is left alone.
fn strip_heading_prefix(line: &str) -> &str {
    let mut current = line;
    loop {
        let after_markers = current.trim_start_matches('#');
        if after_markers.len() == current.len() {
            return current; // no markers
        }
        let stripped = after_markers.trim_start_matches([' ', '\t']);
        if stripped.len() == after_markers.len() {
            return current; // markers not followed by whitespace
        }
        current = stripped;
    }
}

/// Removes every `**` and `__` occurrence.
fn strip_bold_markers(line: &str) -> String {
    line.replace("**", "").replace("__", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_markers_are_removed() {
        assert_eq!(normalize("# Title"), "Title");
        assert_eq!(normalize("### Section Heading"), "Section Heading");
    }

    #[test]
    fn test_bold_markers_are_removed() {
        assert_eq!(normalize("**Led** a team of __12__"), "Led a team of 12");
    }

    #[test]
    fn test_plain_text_is_identity() {
        let text = "PROFESSIONAL SUMMARY\nSeasoned HR leader with 15 years of experience.";
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn test_nested_heading_runs_are_fully_stripped() {
        // A heading prefix left behind by a first strip is still a heading
        // prefix; one pass must remove the whole stack.
        assert_eq!(normalize("## # Title"), "Title");
        assert_eq!(normalize("# ## ### Deep"), "Deep");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "# Heading\n**bold** text\nplain",
            "## A\n### B\n#C no space",
            "## # Title",
            "__x__ ** unbalanced",
            "",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_hash_without_whitespace_is_kept() {
        // "#1 performer" is prose, not a heading.
        assert_eq!(normalize("#1 performer in region"), "#1 performer in region");
    }

    #[test]
    fn test_mid_line_hashes_are_kept() {
        assert_eq!(normalize("C# and F# experience"), "C# and F# experience");
    }

    #[test]
    fn test_multiline_mixed() {
        let input = "## EXPERIENCE\n**HR Director** — Acme\n- Reduced attrition by 40%";
        let expected = "EXPERIENCE\nHR Director — Acme\n- Reduced attrition by 40%";
        assert_eq!(normalize(input), expected);
    }
}
