#![forbid(unsafe_code)]

//! Error taxonomy shared by every statelens crate.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SelectorError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// A root selector is bound to a feature name the store does not hold.
    #[error("unknown feature: {name}")]
    UnknownFeature { name: String },

    /// The feature exists but its state is not of the type the selector expects.
    #[error("feature {feature} does not hold a value of type {expected}")]
    TypeMismatch {
        feature: String,
        expected: &'static str,
    },

    /// A projector was reached while one of its input slots was still empty.
    ///
    /// This indicates a broken graph, never a recoverable runtime condition.
    #[error("projector of arity {arity} invoked with empty input slot {slot}")]
    IncompleteInputs { arity: usize, slot: usize },

    /// A feature with this name is already registered in the store.
    #[error("feature already registered: {name}")]
    DuplicateFeature { name: String },
}

impl SelectorError {
    #[must_use]
    pub fn unknown_feature(name: impl Into<String>) -> Self {
        Self::UnknownFeature { name: name.into() }
    }

    #[must_use]
    pub fn type_mismatch<T: ?Sized + 'static>(feature: impl Into<String>) -> Self {
        Self::TypeMismatch {
            feature: feature.into(),
            expected: std::any::type_name::<T>(),
        }
    }

    #[must_use]
    pub fn incomplete_inputs(arity: usize, slot: usize) -> Self {
        Self::IncompleteInputs { arity, slot }
    }

    /// Whether the error points at a graph construction bug rather than at
    /// the contents of the store.
    #[must_use]
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::IncompleteInputs { .. })
    }
}
