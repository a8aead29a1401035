//! Flat annotation records as exported by the labeling tool and the parser.

use serde::Deserialize;

use crate::amount::normalize_amount;
use crate::key::JudgmentKey;

/// Annotation role column values.
///
/// Anything outside the three known roles maps to [`Role::Unknown`] and is
/// ignored by relation extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Role {
    Payer,
    Payee,
    FeePayer,
    Unknown,
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "payer" => Role::Payer,
            "payee" => Role::Payee,
            "fyPayer" => Role::FeePayer,
            _ => Role::Unknown,
        }
    }
}

/// One flat input record from the labeled or parsed annotation table.
///
/// The id columns also accept the upstream export headers `n_doc_id` and
/// `judgmentItemNo`; both spellings land on the canonical field names.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotationRow {
    #[serde(alias = "n_doc_id")]
    pub document_id: String,
    #[serde(alias = "judgmentItemNo")]
    pub judgment_item_id: String,
    pub role: Role,
    pub name: String,
    pub amt: String,
    #[serde(rename = "type")]
    pub pay_type: String,
    #[serde(rename = "fyAmt")]
    pub fy_amt: String,
    #[serde(rename = "fyType")]
    pub fy_type: String,
    #[serde(rename = "fyShare")]
    pub fy_share: String,
}

impl AnnotationRow {
    /// Grouping key for this row.
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
