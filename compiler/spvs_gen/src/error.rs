//! Generation outcomes and errors.
//!
//! Local infeasibility ("no operand fits here") is ordinary control flow
//! and travels as [`Outcome::Infeasible`]. Only conditions that end the
//! whole session are [`GenError`]s.

use spvs_ir::Category;

use crate::config::ConfigError;

/// Result of one production attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    Produced(T),
    /// Nothing can be produced for this variant in this context.
    Infeasible,
}

impl<T> Outcome<T> {
    pub fn is_produced(&self) -> bool {
        matches!(self, Outcome::Produced(_))
    }

    pub fn produced(self) -> Option<T> {
        match self {
            Outcome::Produced(value) => Some(value),
            Outcome::Infeasible => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Produced(value) => Outcome::Produced(f(value)),
            Outcome::Infeasible => Outcome::Infeasible,
        }
    }
}

/// Session-ending failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenError {
    /// Expected termination: the session produced too many statements.
    #[error("instruction budget of {limit} statements exceeded")]
    BudgetExceeded { limit: usize },
    /// A production the shader cannot do without failed.
    #[error("could not produce {category} for {context}")]
    Exhausted {
        category: Category,
        context: &'static str,
    },
    /// Weight bookkeeping is broken.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type GenResult<T> = Result<Outcome<T>, GenError>;

/// Unwrap an `Option`, or report the current production as infeasible.
macro_rules! require {
    ($e:expr) => {
        match $e {
            Some(value) => value,
            None => return Ok($crate::error::Outcome::Infeasible),
        }
    };
}

/// Propagate errors and infeasibility of a nested production.
macro_rules! produce {
    ($e:expr) => {
        match $e? {
            $crate::error::Outcome::Produced(value) => value,
            $crate::error::Outcome::Infeasible => return Ok($crate::error::Outcome::Infeasible),
        }
    };
}

pub(crate) use {produce, require};
