//! CSV readers and writers for the three table shapes.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use lexrel_core::{AnnotationRow, JudgmentKey, RelationRow, RelationTable, TextIndex};

use crate::StoreError;

/// Read a flat annotation table (labeled or parsed), canonicalising the
/// numeric cells on the way in.
pub fn read_annotation_rows(path: &Path) -> Result<Vec<AnnotationRow>, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let mut row: AnnotationRow = record?;
        row.normalize_amounts();
        rows.push(row);
    }
    info!(rows = rows.len(), path = %path.display(), "loaded annotation table");
    Ok(rows)
}

/// Read a normalized relation table, restoring canonical order and amount
/// spelling.
pub fn read_relation_table(path: &Path) -> Result<RelationTable, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let mut row: RelationRow = record?;
        row.normalize_amounts();
        rows.push(row);
    }
    let table = RelationTable::from_rows(rows);
    info!(rows = table.len(), path = %path.display(), "loaded relation table");
    Ok(table)
}

/// Write a relation table under the canonical column header.
pub fn write_relation_table(path: &Path, table: &RelationTable) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in table.rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!(rows = table.len(), path = %path.display(), "wrote relation table");
    Ok(())
}

/// One row of the raw source-text index.
#[derive(Debug, Deserialize)]
struct TextRecord {
    document_id: String,
    judgment_item_id: String,
    text: String,
}

/// Read the source-text index. When a key repeats, the last row wins.
pub fn read_text_index(path: &Path) -> Result<TextIndex, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let mut index = TextIndex::new();
    for record in reader.deserialize() {
        let rec: TextRecord = record?;
        index.insert(
            JudgmentKey::new(rec.document_id, rec.judgment_item_id),
            rec.text,
        );
    }
    info!(entries = index.len(), path = %path.display(), "loaded text index");
    Ok(index)
}

/// Duplicate-row report for one CSV file (full-row identity, header excluded).
#[derive(Debug)]
pub struct DuplicateReport {
    pub total_rows: usize,
    pub distinct_rows: usize,
    /// Each duplicated row with its occurrence count, in first-seen order.
    pub duplicates: Vec<(Vec<String>, usize)>,
}

impl DuplicateReport {
    /// How many rows would drop if duplicates collapsed to one each.
    pub fn duplicate_rows(&self) -> usize {
        self.total_rows - self.distinct_rows
    }
}

/// Scan a CSV for rows that repeat verbatim.
pub fn find_duplicates(path: &Path) -> Result<DuplicateReport, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let mut counts: HashMap<Vec<String>, usize> = HashMap::new();
    let mut order: Vec<Vec<String>> = Vec::new();
    let mut total = 0usize;
    for record in reader.records() {
        let record = record?;
        let fields: Vec<String> = record.iter().map(str::to_string).collect();
        total += 1;
        let count = counts.entry(fields.clone()).or_insert(0);
        if *count == 0 {
            order.push(fields);
        }
        *count += 1;
    }

    let mut duplicates = Vec::new();
    for fields in order {
        let n = counts[&fields];
        if n > 1 {
            duplicates.push((fields, n));
        }
    }
    Ok(DuplicateReport {
        total_rows: total,
        distinct_rows: counts.len(),
        duplicates,
    })
}
