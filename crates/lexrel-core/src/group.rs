//! Grouping of flat annotation rows into binary relations.
//!
//! Rows partition by judgment item. Within an item, payer/payee rows
//! sub-group by (amt, type) and fold into one payment relation each; every
//! fyPayer row becomes a fee relation as-is.

use std::collections::BTreeMap;

use crate::annotation::{AnnotationRow, Role};
use crate::diag::Diagnostics;
use crate::key::JudgmentKey;
use crate::relation::{FeeRelation, PaymentRelation, Relation};

/// Accumulator for one (amt, type) sub-group within a judgment item.
struct PayGroup {
    amt: String,
    pay_type: String,
    payer: Option<String>,
    payee: Option<String>,
    rows: usize,
}

/// Group flat annotation rows into payment and fee relations.
///
/// A sub-group holding more than two rows means the upstream parser
/// attached too many parties to one amount; that is recorded as a warning
/// naming the judgment item, and extraction proceeds with the first payer
/// and first payee found. A missing payer or payee becomes an empty string.
/// Rows whose role is not payer/payee/fyPayer are ignored. Nothing here
/// aborts processing.
pub fn group(rows: &[AnnotationRow], diags: &mut Diagnostics) -> Vec<Relation> {
    let mut buckets: BTreeMap<JudgmentKey, Vec<&AnnotationRow>> = BTreeMap::new();
    for row in rows {
        buckets.entry(row.key()).or_default().push(row);
    }

    let mut relations = Vec::new();
    for (key, bucket) in &buckets {
        collect_payments(key, bucket, &mut relations, diags);
        collect_fees(key, bucket, &mut relations);
    }
    relations
}

fn collect_payments(
    key: &JudgmentKey,
    bucket: &[&AnnotationRow],
    out: &mut Vec<Relation>,
    diags: &mut Diagnostics,
) {
    // Sub-groups in first-seen order; items hold a handful of rows, so a
    // linear scan beats a map here.
    let mut groups: Vec<PayGroup> = Vec::new();

    for row in bucket {
        if !matches!(row.role, Role::Payer | Role::Payee) {
            continue;
        }
        let idx = match groups
            .iter()
            .position(|g| g.amt == row.amt && g.pay_type == row.pay_type)
        {
            Some(i) => i,
            None => {
                groups.push(PayGroup {
                    amt: row.amt.clone(),
                    pay_type: row.pay_type.clone(),
                    payer: None,
                    payee: None,
                    rows: 0,
                });
                groups.len() - 1
            }
        };
        let g = &mut groups[idx];
        g.rows += 1;
        // First match wins; later rows of an already-filled role are ignored.
        match row.role {
            Role::Payer if g.payer.is_none() => g.payer = Some(row.name.clone()),
            Role::Payee if g.payee.is_none() => g.payee = Some(row.name.clone()),
            _ => {}
        }
    }

    for g in groups {
        if g.rows > 2 {
            diags.warning(
                key.to_string(),
                format!(
                    "{} rows share amt={} type={}; kept first payer/payee",
                    g.rows, g.amt, g.pay_type
                ),
            );
        }
        out.push(Relation::Payment(PaymentRelation {
            key: key.clone(),
            payer: g.payer.unwrap_or_default(),
            payee: g.payee.unwrap_or_default(),
            amt: g.amt,
            pay_type: g.pay_type,
        }));
    }
}

fn collect_fees(key: &JudgmentKey, bucket: &[&AnnotationRow], out: &mut Vec<Relation>) {
    for row in bucket {
        if row.role != Role::FeePayer {
            continue;
        }
        out.push(Relation::Fee(FeeRelation {
            key: key.clone(),
            fy_payer: row.name.clone(),
            fy_amt: row.fy_amt.clone(),
            fy_type: row.fy_type.clone(),
            fy_share: row.fy_share.clone(),
        }));
    }
}
