//! Pairwise euclidean distance operator.
//!
//! Registers `EuclideanDist` with a shape function for planning and a CPU
//! kernel for execution.
#![allow(clippy::needless_range_loop)]

mod error;
mod kernel;
mod op;
mod tensor;

pub use base::error::{ComputeError, Input, OptionsError, ShapeError};
pub use base::matrix::{Matrix, MatrixView};
pub use base::options::KernelOptions;
pub use base::scalar::{Element, ElementType};
pub use base::shape::{Dim, Shape};
pub use error::OpError;
pub use kernel::{euclidean_dist_def, EuclideanDistOp, EUCLIDEAN_DIST};
pub use op::{Device, Kernel, OpDef, Registry, ShapeFn};
pub use tensor::{Tensor, TensorData, TensorElement};

use std::sync::Arc;

impl Registry {
    /// Registry holding `EuclideanDist` and its CPU kernel.
    pub fn new() -> Self {
        Self::with_options(KernelOptions::default())
    }

    pub fn with_options(options: KernelOptions) -> Self {
        let mut registry = Self::empty();
        let builtin = registry
            .register_op(euclidean_dist_def())
            .and_then(|()| {
                registry.register_kernel(
                    EUCLIDEAN_DIST,
                    Device::Cpu,
                    Arc::new(EuclideanDistOp::new(options)),
                )
            });
        if let Err(e) = builtin {
            unreachable!("registering into an empty registry: {e}");
        }
        registry
    }
}
