//! Score report rendering: fixed-width console table and JSON records.

use lexrel_core::{Comparison, Metrics};
use serde::Serialize;

/// One category/mode score row, ready for table or JSON rendering.
///
/// `metrics` is absent when the category could not be scored (empty set on
/// one side); `error` then carries the reason.
#[derive(Debug, Serialize)]
pub struct CategoryScore {
    pub category: &'static str,
    pub mode: &'static str,
    #[serde(flatten)]
    pub counts: Comparison,
    pub metrics: Option<Metrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CategoryScore {
    /// Score one category, catching the undefined-metric case instead of
    /// letting it abort the other categories.
    pub fn new(category: &'static str, mode: &'static str, counts: Comparison) -> Self {
        match counts.metrics() {
            Ok(m) => Self {
                category,
                mode,
                counts,
                metrics: Some(m),
                error: None,
            },
            Err(e) => Self {
                category,
                mode,
                counts,
                metrics: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Render score rows as a fixed-width table.
pub fn render_table(scores: &[CategoryScore]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<10} {:<12} {:>8} {:>8} {:>8} {:>10} {:>8} {:>8}\n",
        "Category", "Mode", "Correct", "FP", "FN", "Precision", "Recall", "F1"
    ));
    out.push_str(&format!("{:-<79}\n", ""));
    for s in scores {
        match &s.metrics {
            Some(m) => out.push_str(&format!(
                "{:<10} {:<12} {:>8} {:>8} {:>8} {:>10.4} {:>8.4} {:>8.4}\n",
                s.category,
                s.mode,
                s.counts.correct,
                s.counts.false_positive,
                s.counts.false_negative,
                m.precision,
                m.recall,
                m.f1
            )),
            None => out.push_str(&format!(
                "{:<10} {:<12} {:>8} {:>8} {:>8} {:>28}\n",
                s.category,
                s.mode,
                s.counts.correct,
                s.counts.false_positive,
                s.counts.false_negative,
                s.error.as_deref().unwrap_or("metrics unavailable")
            )),
        }
    }
    out
}
