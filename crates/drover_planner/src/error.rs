use std::path::PathBuf;

use thiserror::Error;

use crate::solver::feasibility::Infeasibility;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Instance file not found: {}", path.display())]
    DataNotFound { path: PathBuf },

    #[error("Failed to parse {}, line {line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Unknown {kind} strategy: {name}")]
    UnknownStrategy { kind: &'static str, name: String },

    #[error("No solution possible: {0}")]
    ProvenInfeasible(Infeasibility),

    #[error("No solution could be found")]
    SolverNoSolution,

    #[error("Error occurred while solving: {0}")]
    SolverException(String),

    #[error("Another planning request is already running")]
    Busy,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// A clock value that is not `HH:MM:SS` with zero-padded minutes and seconds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeFormatError {
    #[error("Invalid time '{0}', expected HH:MM:SS")]
    Malformed(String),

    #[error("Invalid time '{value}', {part} is out of range")]
    OutOfRange { value: String, part: String },
}

impl PlannerError {
    pub(crate) fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        PlannerError::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}
