use serde::{Deserialize, Serialize};

/// Result of one document-analysis call: ordered pages of ordered lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub pages: Vec<AnalysisPage>,
}

/// One page of the analyzed document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisPage {
    pub lines: Vec<AnalysisLine>,
}

/// A single recognized line of text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisLine {
    pub content: String,
}

impl AnalysisResult {
    /// True when no line was recognized on any page.
    pub fn has_no_lines(&self) -> bool {
        self.pages.iter().all(|p| p.lines.is_empty())
    }
}

impl AnalysisPage {
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines
                .into_iter()
                .map(|content| AnalysisLine {
                    content: content.into(),
                })
                .collect(),
        }
    }
}
