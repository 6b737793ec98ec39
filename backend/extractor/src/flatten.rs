//! Flattening of an analysis result into the artifact text.

use evidex_core::AnalysisResult;

/// Artifact content when analysis recognized zero lines.
pub const NO_TEXT_PLACEHOLDER: &str = "(no text detected)";

/// Lines within a page joined by `"\n"`, pages joined by a blank line.
/// Zero recognized lines anywhere yields the placeholder.
pub fn flatten_text(result: &AnalysisResult) -> String {
    if result.has_no_lines() {
        return NO_TEXT_PLACEHOLDER.to_string();
    }
    result
        .pages
        .iter()
        .map(|page| {
            page.lines
                .iter()
                .map(|line| line.content.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use evidex_core::AnalysisPage;

    #[test]
    fn joins_lines_within_a_page() {
        let result = AnalysisResult {
            pages: vec![AnalysisPage::from_lines(["Total: $50", "Date: 2024-01-01"])],
        };
        assert_eq!(flatten_text(&result), "Total: $50\nDate: 2024-01-01");
    }

    #[test]
    fn joins_pages_with_a_blank_line() {
        let result = AnalysisResult {
            pages: vec![
                AnalysisPage::from_lines(["page one"]),
                AnalysisPage::from_lines(["page two", "continued"]),
            ],
        };
        assert_eq!(flatten_text(&result), "page one\n\npage two\ncontinued");
    }

    #[test]
    fn empty_result_yields_placeholder() {
        assert_eq!(flatten_text(&AnalysisResult::default()), NO_TEXT_PLACEHOLDER);
    }

    #[test]
    fn pages_without_lines_still_yield_placeholder() {
        let result = AnalysisResult {
            pages: vec![AnalysisPage::default(), AnalysisPage::default()],
        };
        assert_eq!(flatten_text(&result), NO_TEXT_PLACEHOLDER);
    }
}
