use crate::error::OpError;
use crate::op::{Kernel, OpDef};
use crate::tensor::{Tensor, TensorData, TensorElement};
use base::error::{ComputeError, ShapeError};
use base::matrix::{Matrix, MatrixView};
use base::options::KernelOptions;
use base::scalar::{Element, ElementType};
use base::shape::Shape;
use euclidean::{euclidean_distances_with, infer_output_shape};
use log::warn;

pub const EUCLIDEAN_DIST: &str = "EuclideanDist";

const EUCLIDEAN_DIST_DOC: &str = "\
Computes the euclidean distance from every vector in \"data\" to every
vector in \"clusters\". The inputs must be two-dimensional matrices and
the inner dimension of \"data\" must match the inner dimension of \"clusters\".";

pub fn euclidean_dist_def() -> OpDef {
    OpDef::new(EUCLIDEAN_DIST)
        .input("data")
        .input("clusters")
        .output("distances")
        .types(&ElementType::ALL)
        .shape_fn(euclidean_dist_shape)
        .doc(EUCLIDEAN_DIST_DOC)
}

fn euclidean_dist_shape(shapes: &[Shape]) -> Result<Vec<Shape>, ShapeError> {
    Ok(vec![infer_output_shape(&shapes[0], &shapes[1])?])
}

/// CPU kernel of `EuclideanDist`. Shared between calls; carries only options.
#[derive(Debug, Clone, Default)]
pub struct EuclideanDistOp {
    options: KernelOptions,
}

impl EuclideanDistOp {
    pub fn new(options: KernelOptions) -> Self {
        Self { options }
    }
    pub fn options(&self) -> &KernelOptions {
        &self.options
    }
    fn run<T>(
        &self,
        data: &[T],
        clusters: &[T],
        dims: (usize, usize, usize),
    ) -> Result<Tensor, OpError>
    where
        T: Element + TensorElement,
    {
        let (n, d, m) = dims;
        let data = MatrixView::new((n, d), data)?;
        let clusters = MatrixView::new((d, m), clusters)?;
        let output: Matrix<T> = euclidean_distances_with(data, clusters, &self.options)?;
        Ok(Tensor::from(output))
    }
}

impl Kernel for EuclideanDistOp {
    fn compute(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, OpError> {
        let [data, clusters] = inputs else {
            return Err(OpError::Arity {
                name: EUCLIDEAN_DIST.to_string(),
                expected: 2,
                actual: inputs.len(),
            });
        };
        // Concrete shapes are checked again here, whatever planning decided.
        infer_output_shape(&data.shape(), &clusters.shape()).map_err(ComputeError::from)?;
        let dims = (data.dims()[0], data.dims()[1], clusters.dims()[1]);
        let output = match (data.data(), clusters.data()) {
            (TensorData::Half(a), TensorData::Half(b)) => {
                self.run(a.as_slice(), b.as_slice(), dims)?
            }
            (TensorData::Float(a), TensorData::Float(b)) => {
                self.run(a.as_slice(), b.as_slice(), dims)?
            }
            (TensorData::Double(a), TensorData::Double(b)) => {
                self.run(a.as_slice(), b.as_slice(), dims)?
            }
            (TensorData::Int32(a), TensorData::Int32(b)) => {
                self.run(a.as_slice(), b.as_slice(), dims)?
            }
            (a, b) if a.element_type() == b.element_type() => {
                let ty = a.element_type();
                warn!("{EUCLIDEAN_DIST} rejected element type {ty}");
                return Err(ComputeError::UnsupportedType { ty }.into());
            }
            (a, b) => {
                return Err(OpError::MixedTypes {
                    name: EUCLIDEAN_DIST.to_string(),
                    lhs: a.element_type(),
                    rhs: b.element_type(),
                })
            }
        };
        Ok(vec![output])
    }
}
