pub mod amount;
pub mod annotation;
pub mod diag;
pub mod diff;
pub mod group;
pub mod key;
pub mod relation;
pub mod score;
pub mod set;
pub mod table;

pub use amount::normalize_amount;
pub use annotation::{AnnotationRow, Role};
pub use diag::{Diagnostic, Diagnostics, Severity};
pub use diff::{DiffError, MissingTextPolicy, TextIndex, render_diff};
pub use group::group;
pub use key::JudgmentKey;
pub use relation::{FeeRelation, PaymentRelation, Relation, RelationKind, RelationRow};
pub use score::{Comparison, MetricError, Metrics, compare};
pub use set::{FeeKey, PaymentKey, RelationKey, RelationSets, build_sets};
pub use table::RelationTable;
