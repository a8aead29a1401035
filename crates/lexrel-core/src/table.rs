//! Canonical relation table: fixed column order, descending key sort.

use std::collections::HashSet;

use crate::relation::{Relation, RelationRow};

/// Normalized relation table, the persisted interchange form between the
/// transform and the scoring stages.
///
/// Rows are kept sorted by (document_id, judgment_item_id) descending. The
/// sort is stable, so canonicalising an already-canonical table is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationTable {
    rows: Vec<RelationRow>,
}

impl RelationTable {
    /// Build a canonical table from grouper output.
    pub fn from_relations(relations: Vec<Relation>) -> Self {
        Self::from_rows(relations.into_iter().map(RelationRow::from).collect())
    }

    /// Wrap flat rows (e.g. read back from a persisted table), restoring
    /// canonical order.
    pub fn from_rows(rows: Vec<RelationRow>) -> Self {
        let mut table = Self { rows };
        table.canonicalize();
        table
    }

    /// Sort by (document_id, judgment_item_id) descending, numeric-aware.
    pub fn canonicalize(&mut self) {
        self.rows.sort_by(|a, b| b.key().cmp(&a.key()));
    }

    pub fn rows(&self) -> &[RelationRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct document ids present in the table.
    pub fn document_ids(&self) -> HashSet<String> {
        self.rows.iter().map(|r| r.document_id.clone()).collect()
    }

    /// Keep only rows whose document id is in `keep`. Used to drop parsed
    /// relations for documents the labeled table never saw.
    pub fn retain_documents(&mut self, keep: &HashSet<String>) {
        self.rows.retain(|r| keep.contains(&r.document_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::JudgmentKey;
    use crate::relation::{FeeRelation, PaymentRelation, RelationKind};

    fn pay(doc: &str, item: &str, payer: &str) -> Relation {
        Relation::Payment(PaymentRelation {
            key: JudgmentKey::new(doc, item),
            payer: payer.into(),
            payee: String::new(),
            amt: "100".into(),
            pay_type: "loan".into(),
        })
    }

    fn fee(doc: &str, item: &str, fy_payer: &str) -> Relation {
        Relation::Fee(FeeRelation {
            key: JudgmentKey::new(doc, item),
            fy_payer: fy_payer.into(),
            fy_amt: "35".into(),
            fy_type: "court".into(),
            fy_share: String::new(),
        })
    }

    fn keys(table: &RelationTable) -> Vec<(String, String)> {
        table
            .rows()
            .iter()
            .map(|r| (r.document_id.clone(), r.judgment_item_id.clone()))
            .collect()
    }

    #[test]
    fn sorts_descending_numeric_aware() {
        let table = RelationTable::from_relations(vec![
            pay("2", "1", "A"),
            pay("10", "1", "B"),
            pay("7", "2", "C"),
            pay("7", "1", "D"),
        ]);
        assert_eq!(
            keys(&table),
            vec![
                ("10".to_string(), "1".to_string()),
                ("7".to_string(), "2".to_string()),
                ("7".to_string(), "1".to_string()),
                ("2".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn canonicalize_is_idempotent() {
        let mut table = RelationTable::from_relations(vec![
            pay("2", "1", "A"),
            fee("2", "1", "B"),
            pay("10", "3", "C"),
        ]);
        let once = table.clone();
        table.canonicalize();
        assert_eq!(table, once);
    }

    #[test]
    fn stable_within_equal_keys() {
        // Payment emitted before fee for the same item stays first.
        let table = RelationTable::from_relations(vec![pay("5", "1", "A"), fee("5", "1", "B")]);
        assert_eq!(table.rows()[0].relation_type, RelationKind::Payment);
        assert_eq!(table.rows()[1].relation_type, RelationKind::Fee);
    }

    #[test]
    fn retain_documents_filters_rows() {
        let mut table = RelationTable::from_relations(vec![
            pay("1", "1", "A"),
            pay("2", "1", "B"),
            pay("3", "1", "C"),
        ]);
        let keep: HashSet<String> = ["1".to_string(), "3".to_string()].into_iter().collect();
        table.retain_documents(&keep);

        assert_eq!(table.len(), 2);
        assert!(table.document_ids().contains("1"));
        assert!(!table.document_ids().contains("2"));
    }
}
