//! Structured diagnostics collected during a pipeline run.
//!
//! Components record data-quality findings here instead of printing them,
//! so tests can assert on them and the CLI can drain them into the log once
//! the run is over.

/// How serious a recorded finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Data-quality anomaly; processing continued with best effort.
    Warning,
    /// A lookup or contract failure that dropped output.
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// One recorded finding: where it happened and what was observed.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The input or key the finding concerns, e.g. a file name or
    /// `document 12 item 3`.
    pub context: String,
    pub message: String,
}

/// Append-only collector threaded through the pipeline stages.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warning(&mut self, context: impl Into<String>, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            severity: Severity::Warning,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn error(&mut self, context: impl Into<String>, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            severity: Severity::Error,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
