//! Human-readable diff report for mismatched payment relations.

use std::collections::{BTreeSet, HashMap, HashSet};

use thiserror::Error;

use crate::diag::Diagnostics;
use crate::key::JudgmentKey;
use crate::relation::{RelationKind, RelationRow};
use crate::set::PaymentKey;
use crate::table::RelationTable;

/// Marker rendered when a mismatched key has no record on one side.
const NULL_MARKER: &str = "NULL";

/// Original judgment text keyed by judgment item.
pub type TextIndex = HashMap<JudgmentKey, String>;

/// What to do when a mismatched key has no source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingTextPolicy {
    /// Abort the export; every mismatched key must be indexed.
    Fail,
    /// Drop the entry and record an error-severity diagnostic.
    Skip,
}

#[derive(Debug, Error)]
pub enum DiffError {
    #[error("no source text for {0}")]
    MissingSourceText(JudgmentKey),
}

/// Render the payment-relation diff between a parsed and a labeled table.
///
/// Mismatches are the symmetric difference of the type-sensitive payment
/// sets. Each judgment item in it gets one block: the key, the original
/// text, and the full labeled and parsed payment records (`NULL` when a
/// side has no record for that key), closed by a dashed rule. Blocks render
/// in canonical descending key order.
pub fn render_diff(
    predicted: &HashSet<PaymentKey>,
    truth: &HashSet<PaymentKey>,
    parsed: &RelationTable,
    labeled: &RelationTable,
    texts: &TextIndex,
    policy: MissingTextPolicy,
    diags: &mut Diagnostics,
) -> Result<String, DiffError> {
    let mismatched: BTreeSet<JudgmentKey> = predicted
        .symmetric_difference(truth)
        .map(|k| JudgmentKey::new(k.document_id.clone(), k.judgment_item_id.clone()))
        .collect();

    let parsed_index = payment_index(parsed);
    let labeled_index = payment_index(labeled);

    let mut report = String::new();
    for key in mismatched.iter().rev() {
        let text = match texts.get(key) {
            Some(t) => t.as_str(),
            None => match policy {
                MissingTextPolicy::Fail => {
                    return Err(DiffError::MissingSourceText(key.clone()));
                }
                MissingTextPolicy::Skip => {
                    diags.error(key.to_string(), "no source text; diff entry skipped");
                    continue;
                }
            },
        };
        report.push_str(&format!("{key}\n"));
        report.push_str(&format!("text: {text}\n"));
        report.push_str(&format!(
            "labeled: {}\n",
            render_record(labeled_index.get(key).copied())
        ));
        report.push_str(&format!(
            "parsed: {}\n",
            render_record(parsed_index.get(key).copied())
        ));
        report.push_str("--------\n");
    }
    Ok(report)
}

/// Payment rows of a table keyed by judgment item; when an item holds
/// several payment rows the last one wins.
fn payment_index(table: &RelationTable) -> HashMap<JudgmentKey, &RelationRow> {
    let mut index = HashMap::new();
    for row in table.rows() {
        if row.relation_type == RelationKind::Payment {
            index.insert(row.key(), row);
        }
    }
    index
}

fn render_record(row: Option<&RelationRow>) -> String {
    match row {
        Some(r) => format!(
            "payer={:?} payee={:?} amt={} type={}",
            r.payer, r.payee, r.amt, r.pay_type
        ),
        None => NULL_MARKER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::Severity;
    use crate::relation::{PaymentRelation, Relation};
    use crate::set::build_sets;

    fn pay(doc: &str, item: &str, payer: &str, payee: &str, amt: &str, ty: &str) -> Relation {
        Relation::Payment(PaymentRelation {
            key: JudgmentKey::new(doc, item),
            payer: payer.into(),
            payee: payee.into(),
            amt: amt.into(),
            pay_type: ty.into(),
        })
    }

    fn table(relations: Vec<Relation>) -> RelationTable {
        RelationTable::from_relations(relations)
    }

    fn texts_for(keys: &[(&str, &str)]) -> TextIndex {
        keys.iter()
            .map(|(d, i)| (JudgmentKey::new(*d, *i), format!("text for {d}/{i}")))
            .collect()
    }

    fn sets(table: &RelationTable) -> HashSet<PaymentKey> {
        let mut diags = Diagnostics::new();
        build_sets(table, false, "test", &mut diags).payment
    }

    #[test]
    fn matching_tables_render_nothing() {
        let labeled = table(vec![pay("1", "1", "A", "B", "100", "loan")]);
        let parsed = labeled.clone();
        let mut diags = Diagnostics::new();

        let report = render_diff(
            &sets(&parsed),
            &sets(&labeled),
            &parsed,
            &labeled,
            &texts_for(&[("1", "1")]),
            MissingTextPolicy::Fail,
            &mut diags,
        )
        .unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn one_sided_key_renders_null_marker() {
        let labeled = table(vec![pay("1", "1", "A", "B", "100", "loan")]);
        let parsed = table(vec![]);
        let mut diags = Diagnostics::new();

        let report = render_diff(
            &sets(&parsed),
            &sets(&labeled),
            &parsed,
            &labeled,
            &texts_for(&[("1", "1")]),
            MissingTextPolicy::Fail,
            &mut diags,
        )
        .unwrap();

        assert!(report.contains("document 1 item 1"));
        assert!(report.contains("text: text for 1/1"));
        assert!(report.contains("labeled: payer=\"A\" payee=\"B\" amt=100 type=loan"));
        assert!(report.contains("parsed: NULL"));
        assert!(report.contains("--------"));
    }

    #[test]
    fn disagreeing_tuples_make_one_block_per_item() {
        // Same item, different amounts: two mismatched tuples, one block.
        let labeled = table(vec![pay("1", "1", "A", "B", "100", "loan")]);
        let parsed = table(vec![pay("1", "1", "A", "B", "90", "loan")]);
        let mut diags = Diagnostics::new();

        let report = render_diff(
            &sets(&parsed),
            &sets(&labeled),
            &parsed,
            &labeled,
            &texts_for(&[("1", "1")]),
            MissingTextPolicy::Fail,
            &mut diags,
        )
        .unwrap();

        assert_eq!(report.matches("--------").count(), 1);
        assert!(report.contains("labeled: payer=\"A\" payee=\"B\" amt=100 type=loan"));
        assert!(report.contains("parsed: payer=\"A\" payee=\"B\" amt=90 type=loan"));
    }

    #[test]
    fn blocks_render_in_descending_key_order() {
        let labeled = table(vec![
            pay("2", "1", "A", "B", "100", "loan"),
            pay("10", "1", "C", "D", "50", "fine"),
        ]);
        let parsed = table(vec![]);
        let mut diags = Diagnostics::new();

        let report = render_diff(
            &sets(&parsed),
            &sets(&labeled),
            &parsed,
            &labeled,
            &texts_for(&[("2", "1"), ("10", "1")]),
            MissingTextPolicy::Fail,
            &mut diags,
        )
        .unwrap();

        let first = report.find("document 10 item 1").unwrap();
        let second = report.find("document 2 item 1").unwrap();
        assert!(first < second, "document 10 should render before document 2");
    }

    #[test]
    fn missing_text_fails_by_default_policy() {
        let labeled = table(vec![pay("1", "1", "A", "B", "100", "loan")]);
        let parsed = table(vec![]);
        let mut diags = Diagnostics::new();

        let err = render_diff(
            &sets(&parsed),
            &sets(&labeled),
            &parsed,
            &labeled,
            &TextIndex::new(),
            MissingTextPolicy::Fail,
            &mut diags,
        )
        .unwrap_err();
        assert!(matches!(err, DiffError::MissingSourceText(_)));
    }

    #[test]
    fn missing_text_skip_drops_entry_and_records_error() {
        let labeled = table(vec![pay("1", "1", "A", "B", "100", "loan")]);
        let parsed = table(vec![]);
        let mut diags = Diagnostics::new();

        let report = render_diff(
            &sets(&parsed),
            &sets(&labeled),
            &parsed,
            &labeled,
            &TextIndex::new(),
            MissingTextPolicy::Skip,
            &mut diags,
        )
        .unwrap();

        assert!(report.is_empty());
        assert_eq!(diags.len(), 1);
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.context, "document 1 item 1");
    }
}
