use crate::scalar::ElementType;
use crate::shape::Shape;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which operand of the operator an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Input {
    Data,
    Clusters,
}

impl std::fmt::Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Data => f.write_str("data"),
            Input::Clusters => f.write_str("clusters"),
        }
    }
}

// planning

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ShapeError {
    #[error("Input `{input}` must be rank 2, but has rank {rank}.")]
    Rank { input: Input, rank: usize },
    #[error("Inner dimensions disagree: `data` has {data} columns, `clusters` has {clusters} rows.")]
    DimensionMismatch { data: usize, clusters: usize },
    #[error("Buffer of length {len} cannot be shaped as {shape}.")]
    Length { shape: Shape, len: usize },
}

// execution

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ComputeError {
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error("Failed to allocate a {rows}x{cols} output matrix.")]
    Allocation { rows: usize, cols: usize },
    #[error("Element type `{ty}` is not supported by the distance kernel.")]
    UnsupportedType { ty: ElementType },
}

// configuration

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum OptionsError {
    #[error("Invalid kernel options: {reason}.")]
    Invalid { reason: String },
}
