use euclidean_dist::{ElementType, Matrix, Tensor, TensorData};
use half::f16;
use num_traits::{FromBytes, ToPrimitive};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

fn invalid_data<E>(err: E) -> std::io::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    std::io::Error::new(std::io::ErrorKind::InvalidData, err)
}

fn read_vecs<T>(path: &Path) -> std::io::Result<Vec<Vec<T>>>
where
    T: Sized + FromBytes<Bytes = [u8; 4]>,
{
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut buf = [0u8; 4];
    let mut vecs = Vec::new();
    loop {
        let count = reader.read(&mut buf)?;
        if count == 0 {
            break;
        }
        if count < buf.len() {
            reader.read_exact(&mut buf[count..])?;
        }
        let dim = u32::from_le_bytes(buf) as usize;
        let mut vec = Vec::with_capacity(dim);
        for _ in 0..dim {
            reader.read_exact(&mut buf)?;
            vec.push(T::from_le_bytes(&buf));
        }
        vecs.push(vec);
    }
    Ok(vecs)
}

fn widen<T: ToPrimitive>(rows: Vec<Vec<T>>) -> Vec<Vec<f64>> {
    rows.into_iter()
        .map(|row| row.iter().map(|x| x.to_f64().unwrap_or(f64::NAN)).collect())
        .collect()
}

/// Reads a matrix, one row per record. `.json` holds an array of rows.
pub fn read_matrix(path: &Path) -> std::io::Result<Matrix<f64>> {
    let rows = match path.extension().and_then(OsStr::to_str) {
        Some("fvecs") => widen(read_vecs::<f32>(path)?),
        Some("ivecs") => widen(read_vecs::<i32>(path)?),
        Some("json") => {
            let reader = BufReader::new(File::open(path)?);
            serde_json::from_reader::<_, Vec<Vec<f64>>>(reader).map_err(invalid_data)?
        }
        _ => return Err(std::io::ErrorKind::Unsupported.into()),
    };
    Matrix::from_rows(rows.as_slice()).map_err(invalid_data)
}

/// Narrows a matrix to the requested element type. Complex values get a zero
/// imaginary part.
pub fn to_tensor(matrix: &Matrix<f64>, ty: ElementType) -> Tensor {
    let data = match ty {
        ElementType::Half => TensorData::Half(matrix.map(|&x| f16::from_f64(x)).into_vec()),
        ElementType::Float => TensorData::Float(matrix.map(|&x| x as f32).into_vec()),
        ElementType::Double => TensorData::Double(matrix.as_slice().to_vec()),
        ElementType::Int32 => TensorData::Int32(matrix.map(|&x| x.round() as i32).into_vec()),
        ElementType::Int64 => TensorData::Int64(matrix.map(|&x| x.round() as i64).into_vec()),
        ElementType::Complex64 => {
            TensorData::Complex64(matrix.map(|&x| [x as f32, 0.0]).into_vec())
        }
        ElementType::Complex128 => {
            TensorData::Complex128(matrix.map(|&x| [x, 0.0]).into_vec())
        }
    };
    let (rows, cols) = matrix.shape();
    match Tensor::new(vec![rows, cols], data) {
        Ok(tensor) => tensor,
        Err(_) => unreachable!("element count is preserved"),
    }
}

/// Rows of a real-valued tensor, widened for printing.
pub fn to_rows(tensor: &Tensor) -> Option<Vec<Vec<f64>>> {
    let matrix = match tensor.data() {
        TensorData::Half(_) => tensor.to_matrix::<f16>()?.map(|&x| f16::to_f64(x)),
        TensorData::Float(_) => tensor.to_matrix::<f32>()?.map(|&x| f64::from(x)),
        TensorData::Double(_) => tensor.to_matrix::<f64>()?,
        TensorData::Int32(_) => tensor.to_matrix::<i32>()?.map(|&x| f64::from(x)),
        TensorData::Int64(_) => tensor.to_matrix::<i64>()?.map(|&x| x as f64),
        TensorData::Complex64(_) | TensorData::Complex128(_) => return None,
    };
    Some(matrix.to_rows())
}
