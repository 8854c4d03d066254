#![allow(clippy::needless_range_loop)]

mod infer;

pub use infer::infer_output_shape;

use base::error::{ComputeError, ShapeError};
use base::matrix::{Matrix, MatrixView};
use base::options::KernelOptions;
use base::scalar::Element;
use log::{debug, warn};
use rayon::prelude::*;

/// Distance from every row of `data` (N×D) to every column of `clusters`
/// (D×M), as an N×M matrix.
pub fn euclidean_distances<T: Element>(
    data: MatrixView<'_, T>,
    clusters: MatrixView<'_, T>,
) -> Result<Matrix<T>, ComputeError> {
    euclidean_distances_with(data, clusters, &KernelOptions::default())
}

pub fn euclidean_distances_with<T: Element>(
    data: MatrixView<'_, T>,
    clusters: MatrixView<'_, T>,
    options: &KernelOptions,
) -> Result<Matrix<T>, ComputeError> {
    let (n, d) = data.shape();
    let (d_c, m) = clusters.shape();
    if d != d_c {
        warn!("rejected {n}x{d} data against {d_c}x{m} clusters");
        return Err(ShapeError::DimensionMismatch {
            data: d,
            clusters: d_c,
        }
        .into());
    }
    let mut output = Matrix::<T>::try_zeros((n, m))?;
    if n == 0 || m == 0 {
        return Ok(output);
    }
    let queries = widen(data)?;
    let references = widen_transposed(clusters)?;
    if options.is_parallel(n, m, d) {
        debug!(
            "euclidean distances {n}x{m}x{d} ({}) on {} threads",
            T::TYPE,
            options.threads
        );
        let result = rayon::ThreadPoolBuilder::new()
            .num_threads(options.threads as usize)
            .build_scoped(|pool| {
                pool.install(|| {
                    output
                        .as_mut_slice()
                        .par_chunks_mut(m)
                        .enumerate()
                        .for_each(|(i, row)| fill_row(row, &queries[(i,)], &references));
                })
            });
        match result {
            Ok(()) => return Ok(output),
            Err(e) => warn!("failed to build the worker pool, falling back to one thread: {e}"),
        }
    } else {
        debug!("euclidean distances {n}x{m}x{d} ({})", T::TYPE);
    }
    for i in 0..n {
        fill_row(&mut output[(i,)], &queries[(i,)], &references);
    }
    Ok(output)
}

/// Squared differences summed in increasing feature order, then the root.
fn fill_row<T: Element>(out: &mut [T], query: &[f64], references: &Matrix<f64>) {
    for k in 0..out.len() {
        let reference = &references[(k,)];
        let mut sum = 0.0f64;
        for d in 0..query.len() {
            let diff = query[d] - reference[d];
            sum += diff * diff;
        }
        out[k] = T::from_f64(sum.sqrt());
    }
}

fn widen<T: Element>(x: MatrixView<'_, T>) -> Result<Matrix<f64>, ComputeError> {
    let mut result = Matrix::<f64>::try_zeros(x.shape())?;
    for (r, &v) in result.as_mut_slice().iter_mut().zip(x.as_slice()) {
        *r = v.to_f64();
    }
    Ok(result)
}

/// Reference vectors are columns of `clusters`; lay them out as rows.
fn widen_transposed<T: Element>(x: MatrixView<'_, T>) -> Result<Matrix<f64>, ComputeError> {
    let (rows, cols) = x.shape();
    let mut result = Matrix::<f64>::try_zeros((cols, rows))?;
    for i in 0..rows {
        let row = x.row(i);
        for j in 0..cols {
            result[(j, i)] = row[j].to_f64();
        }
    }
    Ok(result)
}
