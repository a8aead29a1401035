//! Derived relation records and the canonical flat schema.

use serde::{Deserialize, Serialize};

use crate::amount::normalize_amount;
use crate::key::JudgmentKey;

/// Discriminator between the two relation categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Payment,
    Fee,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Payment => "payment",
            RelationKind::Fee => "fee",
        }
    }
}

/// Payment obligation extracted from one (amt, type) group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRelation {
    pub key: JudgmentKey,
    /// Empty when the group had no payer row.
    pub payer: String,
    /// Empty when the group had no payee row.
    pub payee: String,
    pub amt: String,
    pub pay_type: String,
}

/// Fee obligation copied from one fyPayer row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeRelation {
    pub key: JudgmentKey,
    pub fy_payer: String,
    pub fy_amt: String,
    pub fy_type: String,
    pub fy_share: String,
}

/// Either relation category, as emitted by the grouper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation {
    Payment(PaymentRelation),
    Fee(FeeRelation),
}

impl Relation {
    pub fn key(&self) -> &JudgmentKey {
        match self {
            Relation::Payment(p) => &p.key,
            Relation::Fee(f) => &f.key,
        }
    }
}

/// One row of the normalized relation table, in the canonical column order:
/// document_id, judgment_item_id, relation_type, payer, payee, amt, type,
/// fyPayer, fyAmt, fyType, fyShare.
///
/// Cells that do not apply to the row's category are empty strings, which
/// is how they round-trip through CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRow {
    pub document_id: String,
    pub judgment_item_id: String,
    pub relation_type: RelationKind,
    pub payer: String,
    pub payee: String,
    pub amt: String,
    #[serde(rename = "type")]
    pub pay_type: String,
    #[serde(rename = "fyPayer")]
    pub fy_payer: String,
    #[serde(rename = "fyAmt")]
    pub fy_amt: String,
    #[serde(rename = "fyType")]
    pub fy_type: String,
    #[serde(rename = "fyShare")]
    pub fy_share: String,
}

impl RelationRow {
    pub fn key(&self) -> JudgmentKey {
        JudgmentKey::new(self.document_id.clone(), self.judgment_item_id.clone())
    }

    /// Canonicalise the numeric cells in place (see [`normalize_amount`]).
    pub fn normalize_amounts(&mut self) {
        self.amt = normalize_amount(&self.amt);
        self.fy_amt = normalize_amount(&self.fy_amt);
        self.fy_share = normalize_amount(&self.fy_share);
    }
}

impl From<PaymentRelation> for RelationRow {
    fn from(p: PaymentRelation) -> Self {
        RelationRow {
            document_id: p.key.doc_id,
            judgment_item_id: p.key.item_id,
            relation_type: RelationKind::Payment,
            payer: p.payer,
            payee: p.payee,
            amt: p.amt,
            pay_type: p.pay_type,
            fy_payer: String::new(),
            fy_amt: String::new(),
            fy_type: String::new(),
            fy_share: String::new(),
        }
    }
}

impl From<FeeRelation> for RelationRow {
    fn from(f: FeeRelation) -> Self {
        RelationRow {
            document_id: f.key.doc_id,
            judgment_item_id: f.key.item_id,
            relation_type: RelationKind::Fee,
            payer: String::new(),
            payee: String::new(),
            amt: String::new(),
            pay_type: String::new(),
            fy_payer: f.fy_payer,
            fy_amt: f.fy_amt,
            fy_type: f.fy_type,
            fy_share: f.fy_share,
        }
    }
}

impl From<Relation> for RelationRow {
    fn from(r: Relation) -> Self {
        match r {
            Relation::Payment(p) => p.into(),
            Relation::Fee(f) => f.into(),
        }
    }
}
