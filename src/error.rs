use base::error::{ComputeError, ShapeError};
use base::scalar::ElementType;
use thiserror::Error;

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpError {
    #[error("Operator `{name}` is not registered.")]
    NotFound { name: String },
    #[error("Operator `{name}` has no kernel for device `{device}`.")]
    NoKernel { name: String, device: String },
    #[error("Operator `{name}` takes {expected} inputs, but {actual} were given.")]
    Arity {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("Operator `{name}` does not accept element type `{ty}`.")]
    TypeMismatch { name: String, ty: ElementType },
    #[error("Inputs of operator `{name}` must share one element type, got `{lhs}` and `{rhs}`.")]
    MixedTypes {
        name: String,
        lhs: ElementType,
        rhs: ElementType,
    },
    #[error("Operator `{name}` is already registered.")]
    Exist { name: String },
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Compute(#[from] ComputeError),
}
