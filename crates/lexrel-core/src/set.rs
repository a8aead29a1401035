//! Relation set projections for set-algebra scoring.

use std::collections::HashSet;

use crate::diag::Diagnostics;
use crate::relation::RelationKind;
use crate::table::RelationTable;

/// Set element projected from one payment row.
///
/// `pay_type` is `None` in ignore-type mode so tuples differing only by
/// type compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaymentKey {
    pub document_id: String,
    pub judgment_item_id: String,
    pub payer: String,
    pub payee: String,
    pub amt: String,
    pub pay_type: Option<String>,
}

/// Set element projected from one fee row; `fy_type` is dropped in
/// ignore-type mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeeKey {
    pub document_id: String,
    pub judgment_item_id: String,
    pub fy_payer: String,
    pub fy_amt: String,
    pub fy_type: Option<String>,
    pub fy_share: String,
}

/// Union-set element, namespaced so a payment tuple can never collide with
/// a fee tuple of equal shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelationKey {
    Payment(PaymentKey),
    Fee(FeeKey),
}

/// The two projected sets built from one relation table.
#[derive(Debug, Default)]
pub struct RelationSets {
    pub payment: HashSet<PaymentKey>,
    pub fee: HashSet<FeeKey>,
}

impl RelationSets {
    /// Single set over both categories, for the union score.
    pub fn union(&self) -> HashSet<RelationKey> {
        self.payment
            .iter()
            .cloned()
            .map(RelationKey::Payment)
            .chain(self.fee.iter().cloned().map(RelationKey::Fee))
            .collect()
    }
}

/// Project a relation table into payment and fee tuple sets.
///
/// Duplicate rows are legal in the table but collapse to one set element;
/// any collapse is recorded as a warning naming `source` so the count
/// mismatch stays observable.
pub fn build_sets(
    table: &RelationTable,
    ignore_type: bool,
    source: &str,
    diags: &mut Diagnostics,
) -> RelationSets {
    let mut sets = RelationSets::default();
    let mut payment_rows = 0usize;
    let mut fee_rows = 0usize;

    for row in table.rows() {
        match row.relation_type {
            RelationKind::Payment => {
                payment_rows += 1;
                sets.payment.insert(PaymentKey {
                    document_id: row.document_id.clone(),
                    judgment_item_id: row.judgment_item_id.clone(),
                    payer: row.payer.clone(),
                    payee: row.payee.clone(),
                    amt: row.amt.clone(),
                    pay_type: (!ignore_type).then(|| row.pay_type.clone()),
                });
            }
            RelationKind::Fee => {
                fee_rows += 1;
                sets.fee.insert(FeeKey {
                    document_id: row.document_id.clone(),
                    judgment_item_id: row.judgment_item_id.clone(),
                    fy_payer: row.fy_payer.clone(),
                    fy_amt: row.fy_amt.clone(),
                    fy_type: (!ignore_type).then(|| row.fy_type.clone()),
                    fy_share: row.fy_share.clone(),
                });
            }
        }
    }

    if payment_rows > sets.payment.len() {
        diags.warning(
            source,
            format!(
                "{} duplicate payment rows collapsed ({} rows, {} unique)",
                payment_rows - sets.payment.len(),
                payment_rows,
                sets.payment.len()
            ),
        );
    }
    if fee_rows > sets.fee.len() {
        diags.warning(
            source,
            format!(
                "{} duplicate fee rows collapsed ({} rows, {} unique)",
                fee_rows - sets.fee.len(),
                fee_rows,
                sets.fee.len()
            ),
        );
    }

    sets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::JudgmentKey;
    use crate::relation::{FeeRelation, PaymentRelation, Relation};

    fn pay(doc: &str, item: &str, payer: &str, payee: &str, amt: &str, ty: &str) -> Relation {
        Relation::Payment(PaymentRelation {
            key: JudgmentKey::new(doc, item),
            payer: payer.into(),
            payee: payee.into(),
            amt: amt.into(),
            pay_type: ty.into(),
        })
    }

    fn fee(doc: &str, item: &str, fy_payer: &str, fy_amt: &str, fy_type: &str) -> Relation {
        Relation::Fee(FeeRelation {
            key: JudgmentKey::new(doc, item),
            fy_payer: fy_payer.into(),
            fy_amt: fy_amt.into(),
            fy_type: fy_type.into(),
            fy_share: String::new(),
        })
    }

    #[test]
    fn projects_payment_and_fee_rows() {
        let table = RelationTable::from_relations(vec![
            pay("1", "1", "A", "B", "100", "loan"),
            fee("1", "1", "C", "35", "court"),
        ]);
        let mut diags = Diagnostics::new();
        let sets = build_sets(&table, false, "in.csv", &mut diags);

        assert_eq!(sets.payment.len(), 1);
        assert_eq!(sets.fee.len(), 1);
        assert!(diags.is_empty());

        let key = sets.payment.iter().next().unwrap();
        assert_eq!(key.payer, "A");
        assert_eq!(key.pay_type.as_deref(), Some("loan"));
    }

    #[test]
    fn ignore_type_merges_tuples_differing_only_by_type() {
        let table = RelationTable::from_relations(vec![
            pay("1", "1", "A", "B", "100", "loan"),
            pay("1", "1", "A", "B", "100", "interest"),
        ]);

        let mut diags = Diagnostics::new();
        let exact = build_sets(&table, false, "in.csv", &mut diags);
        assert_eq!(exact.payment.len(), 2);
        assert!(diags.is_empty());

        let loose = build_sets(&table, true, "in.csv", &mut diags);
        assert_eq!(loose.payment.len(), 1);
        // The merge is a collapse, so it must be observable.
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn duplicate_rows_collapse_with_warning_naming_source() {
        let table = RelationTable::from_relations(vec![
            pay("1", "1", "A", "B", "100", "loan"),
            pay("1", "1", "A", "B", "100", "loan"),
        ]);
        let mut diags = Diagnostics::new();
        let sets = build_sets(&table, false, "parsed.csv", &mut diags);

        assert_eq!(sets.payment.len(), 1);
        assert_eq!(diags.len(), 1);
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.context, "parsed.csv");
        assert!(diag.message.contains("1 duplicate payment"), "got: {}", diag.message);
    }

    #[test]
    fn union_keeps_categories_apart() {
        let table = RelationTable::from_relations(vec![
            pay("1", "1", "A", "B", "100", "loan"),
            fee("1", "1", "A", "100", "loan"),
        ]);
        let mut diags = Diagnostics::new();
        let sets = build_sets(&table, false, "in.csv", &mut diags);

        // Same ids and overlapping strings, still two distinct elements.
        assert_eq!(sets.union().len(), 2);
    }
}
