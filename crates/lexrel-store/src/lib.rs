//! CSV boundary for Lexrel: annotation tables in, relation tables in and
//! out, the raw source-text index, and a duplicate-row scan.

mod error;
mod tables;

pub use error::StoreError;
pub use tables::{
    DuplicateReport, find_duplicates, read_annotation_rows, read_relation_table, read_text_index,
    write_relation_table,
};
