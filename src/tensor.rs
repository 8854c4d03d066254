use base::error::ShapeError;
use base::matrix::{Matrix, MatrixView};
use base::scalar::ElementType;
use base::shape::Shape;
use half::f16;

#[derive(Debug, Clone, PartialEq)]
pub enum TensorData {
    Half(Vec<f16>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    /// `[re, im]` pairs.
    Complex64(Vec<[f32; 2]>),
    /// `[re, im]` pairs.
    Complex128(Vec<[f64; 2]>),
}

impl TensorData {
    pub fn element_type(&self) -> ElementType {
        match self {
            TensorData::Half(_) => ElementType::Half,
            TensorData::Float(_) => ElementType::Float,
            TensorData::Double(_) => ElementType::Double,
            TensorData::Int32(_) => ElementType::Int32,
            TensorData::Int64(_) => ElementType::Int64,
            TensorData::Complex64(_) => ElementType::Complex64,
            TensorData::Complex128(_) => ElementType::Complex128,
        }
    }
    pub fn len(&self) -> usize {
        match self {
            TensorData::Half(x) => x.len(),
            TensorData::Float(x) => x.len(),
            TensorData::Double(x) => x.len(),
            TensorData::Int32(x) => x.len(),
            TensorData::Int64(x) => x.len(),
            TensorData::Complex64(x) => x.len(),
            TensorData::Complex128(x) => x.len(),
        }
    }
}

/// A dense value of any rank handed over by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    dims: Vec<usize>,
    data: TensorData,
}

impl Tensor {
    pub fn new(dims: Vec<usize>, data: TensorData) -> Result<Self, ShapeError> {
        let elements = dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d));
        if elements != Some(data.len()) {
            return Err(ShapeError::Length {
                shape: Shape::known(&dims),
                len: data.len(),
            });
        }
        Ok(Self { dims, data })
    }
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }
    pub fn rank(&self) -> usize {
        self.dims.len()
    }
    pub fn shape(&self) -> Shape {
        Shape::known(&self.dims)
    }
    pub fn element_type(&self) -> ElementType {
        self.data.element_type()
    }
    pub fn data(&self) -> &TensorData {
        &self.data
    }
    /// Rank-2 view of the buffer, or `None` if the element type is not `T`.
    pub fn as_matrix<T: TensorElement>(&self) -> Option<MatrixView<'_, T>> {
        if self.rank() != 2 {
            return None;
        }
        let slice = T::unwrap_ref(&self.data)?;
        MatrixView::new((self.dims[0], self.dims[1]), slice).ok()
    }
    pub fn to_matrix<T: TensorElement>(&self) -> Option<Matrix<T>> {
        let view = self.as_matrix::<T>()?;
        Matrix::from_vec(view.shape(), view.as_slice().to_vec()).ok()
    }
}

pub trait TensorElement: Copy + 'static {
    fn wrap(x: Vec<Self>) -> TensorData;
    fn unwrap_ref(data: &TensorData) -> Option<&[Self]>;
}

macro_rules! impl_tensor_element {
    ($t:ty, $v:ident) => {
        impl TensorElement for $t {
            fn wrap(x: Vec<Self>) -> TensorData {
                TensorData::$v(x)
            }
            fn unwrap_ref(data: &TensorData) -> Option<&[Self]> {
                match data {
                    TensorData::$v(x) => Some(x),
                    _ => None,
                }
            }
        }
    };
}

impl_tensor_element!(f16, Half);
impl_tensor_element!(f32, Float);
impl_tensor_element!(f64, Double);
impl_tensor_element!(i32, Int32);
impl_tensor_element!(i64, Int64);
impl_tensor_element!([f32; 2], Complex64);
impl_tensor_element!([f64; 2], Complex128);

impl<T: TensorElement> From<Matrix<T>> for Tensor {
    fn from(value: Matrix<T>) -> Self {
        let (rows, cols) = value.shape();
        Tensor {
            dims: vec![rows, cols],
            data: T::wrap(value.into_vec()),
        }
    }
}
