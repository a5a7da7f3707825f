use crate::domain::services::paths::PathProblem;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Duplicate unit path: {path}")]
    DuplicateUnit { path: String },

    #[error("Unit path has no dot separator: {path:?}")]
    MissingSeparator { path: String },

    #[error("Submodule '{submodule}' does not start with parent module '{module}'")]
    MalformedSubmoduleName { submodule: String, module: String },

    #[error("Duplicate submodule: '{submodule}'")]
    DuplicateSubmodule { submodule: String },

    #[error("Unit path validation failed with {} problem(s)", problems.len())]
    ValidationFailed { problems: Vec<PathProblem> },

    #[error("Invalid input in {source_name}: {message}")]
    InvalidInput {
        source_name: String,
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value:?} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed unit headings or layer hierarchy.
    Structural,
    /// Units that do not fit the declared hierarchy.
    Validation,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GraphError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GraphError::DuplicateUnit { .. }
            | GraphError::MissingSeparator { .. }
            | GraphError::MalformedSubmoduleName { .. }
            | GraphError::DuplicateSubmodule { .. } => ErrorCategory::Structural,
            GraphError::ValidationFailed { .. } => ErrorCategory::Validation,
            GraphError::InvalidInput { .. } | GraphError::SerializationError(_) => {
                ErrorCategory::Input
            }
            GraphError::ConfigError { .. }
            | GraphError::InvalidConfigValueError { .. }
            | GraphError::MissingConfigError { .. } => ErrorCategory::Configuration,
            GraphError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::System => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// Process exit code for a run that ended with this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GraphError::DuplicateUnit { .. } => {
                "Every '### <submodule>.<Unit>' heading must appear only once in the unit descriptions"
            }
            GraphError::MissingSeparator { .. } => {
                "Write unit headings as '### <submodule>.<Unit>'"
            }
            GraphError::MalformedSubmoduleName { .. } => {
                "Prefix every entry of submodule_layers[<module>] with '<module>.'"
            }
            GraphError::DuplicateSubmodule { .. } => {
                "List each submodule exactly once across root_layers and submodule_layers"
            }
            GraphError::ValidationFailed { .. } => {
                "Move each listed unit into a submodule declared in the layer hierarchy"
            }
            GraphError::InvalidInput { .. } | GraphError::SerializationError(_) => {
                "Check that layers.json is valid JSON and units.md is UTF-8 text"
            }
            GraphError::ConfigError { .. }
            | GraphError::InvalidConfigValueError { .. }
            | GraphError::MissingConfigError { .. } => {
                "Pass either --input <FOLDER> or --layers <FILE> --units <FILE>, or fix the config file"
            }
            GraphError::IoError(_) => "Check that the input files exist and the output path is writable",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GraphError::ValidationFailed { problems } => {
                let lines: Vec<String> = problems.iter().map(|p| format!("  - {}", p)).collect();
                format!(
                    "Unit path validation failed:\n{}",
                    lines.join("\n")
                )
            }
            GraphError::IoError(e) => format!("Could not read or write a file: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
