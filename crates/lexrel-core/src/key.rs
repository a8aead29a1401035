//! Composite judgment-item key with numeric-aware ordering.
//!
//! Document and item ids stay as strings (the inputs are CSV) but usually
//! hold integers. The canonical table order compares them numerically when
//! both sides parse, lexicographically otherwise, so "10" sorts after "2"
//! instead of between "1" and "2".

use std::cmp::Ordering;
use std::fmt;

/// Grouping key (document_id, judgment_item_id) for one judgment item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JudgmentKey {
    pub doc_id: String,
    pub item_id: String,
}

impl JudgmentKey {
    pub fn new(doc_id: impl Into<String>, item_id: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            item_id: item_id.into(),
        }
    }
}

impl fmt::Display for JudgmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "document {} item {}", self.doc_id, self.item_id)
    }
}

/// Compare two id strings: numeric when both parse as integers (ties broken
/// by spelling so the order stays consistent with equality), lexicographic
/// otherwise. Numeric ids sort before non-numeric ones.
fn id_cmp(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

impl Ord for JudgmentKey {
    fn cmp(&self, other: &Self) -> Ordering {
        id_cmp(&self.doc_id, &other.doc_id).then_with(|| id_cmp(&self.item_id, &other.item_id))
    }
}

impl PartialOrd for JudgmentKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
