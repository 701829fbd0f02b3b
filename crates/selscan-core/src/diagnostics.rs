use serde::Serialize;

/// An advisory warning. Warnings never fail a run; they accompany a
/// degraded-but-valid report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub message: String,
}

/// Ordered collector for the warnings of a single run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(Warning {
            message: message.into(),
        });
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}
