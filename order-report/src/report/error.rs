//! Errors raised by the report pipeline itself

/// Structural problem with the input that makes the report impossible
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// Input had no header row
    EmptyInput,
    /// A field a stage cannot run without is absent after normalization
    MissingRequiredField {
        stage: &'static str,
        field: &'static str,
    },
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::EmptyInput => write!(f, "input has no header row"),
            ReportError::MissingRequiredField { stage, field } => {
                write!(f, "missing required field '{}' (needed by {})", field, stage)
            }
        }
    }
}

impl std::error::Error for ReportError {}
