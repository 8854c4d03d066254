use base::error::{Input, ShapeError};
use base::shape::Shape;

/// Output shape of `EuclideanDist` for the declared input shapes.
///
/// Both inputs must be rank 2. `data[1]` and `clusters[0]` are unified: two
/// known, different sizes are rejected, while an unknown size on either side
/// is accepted here and left for the kernel to check against real data.
pub fn infer_output_shape(data: &Shape, clusters: &Shape) -> Result<Shape, ShapeError> {
    check_rank(Input::Data, data)?;
    check_rank(Input::Clusters, clusters)?;
    data.dim(1)
        .merge(clusters.dim(0))
        .map_err(|(data, clusters)| ShapeError::DimensionMismatch { data, clusters })?;
    Ok(Shape::matrix(data.dim(0), clusters.dim(1)))
}

fn check_rank(input: Input, shape: &Shape) -> Result<(), ShapeError> {
    if shape.rank() != 2 {
        return Err(ShapeError::Rank {
            input,
            rank: shape.rank(),
        });
    }
    Ok(())
}
