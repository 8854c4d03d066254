use euclidean_dist::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn float_tensor(rows: usize, cols: usize, data: Vec<f32>) -> Tensor {
    Tensor::new(vec![rows, cols], TensorData::Float(data)).unwrap()
}

#[test]
fn test_planning_then_execution() {
    let registry = Registry::new();
    let planned = registry
        .infer_shape(EUCLIDEAN_DIST, &[Shape::known(&[2, 2]), Shape::known(&[2, 1])])
        .unwrap();
    assert_eq!(planned, vec![Shape::known(&[2, 1])]);

    let data = float_tensor(2, 2, vec![0.0, 0.0, 3.0, 4.0]);
    let clusters = float_tensor(2, 1, vec![0.0, 0.0]);
    let output = registry
        .execute(EUCLIDEAN_DIST, Device::Cpu, &[data, clusters])
        .unwrap();
    assert_eq!(output[0].shape(), planned[0]);
    assert_eq!(
        output[0].to_matrix::<f32>().unwrap().to_rows(),
        vec![vec![0.0], vec![5.0]]
    );
}

#[test]
fn test_unknown_dimension_is_deferred() {
    let registry = Registry::new();
    let planned = registry
        .infer_shape(
            EUCLIDEAN_DIST,
            &[Shape::matrix(Dim::Known(2), Dim::Unknown), Shape::known(&[4, 5])],
        )
        .unwrap();
    assert_eq!(planned, vec![Shape::known(&[2, 5])]);

    let data = float_tensor(2, 3, vec![0.0; 6]);
    let clusters = float_tensor(4, 5, vec![0.0; 20]);
    assert_eq!(
        registry.execute(EUCLIDEAN_DIST, Device::Cpu, &[data, clusters]),
        Err(OpError::Compute(ComputeError::Shape(
            ShapeError::DimensionMismatch {
                data: 3,
                clusters: 4
            }
        )))
    );
}

#[test]
fn test_planning_rejections() {
    let registry = Registry::new();
    assert_eq!(
        registry.infer_shape(
            EUCLIDEAN_DIST,
            &[Shape::known(&[2, 3]), Shape::known(&[4, 5])]
        ),
        Err(OpError::Shape(ShapeError::DimensionMismatch {
            data: 3,
            clusters: 4
        }))
    );
    assert_eq!(
        registry.infer_shape(
            EUCLIDEAN_DIST,
            &[Shape::known(&[2, 3, 1]), Shape::known(&[3, 5])]
        ),
        Err(OpError::Shape(ShapeError::Rank {
            input: Input::Data,
            rank: 3
        }))
    );
    assert!(matches!(
        registry.infer_shape("MatMul", &[]),
        Err(OpError::NotFound { .. })
    ));
}

#[test]
fn test_execution_rejections() {
    let registry = Registry::new();
    let data = float_tensor(1, 1, vec![1.0]);
    assert!(matches!(
        registry.execute(EUCLIDEAN_DIST, Device::Cpu, &[data.clone()]),
        Err(OpError::Arity {
            expected: 2,
            actual: 1,
            ..
        })
    ));
    let clusters = Tensor::new(vec![1, 1], TensorData::Int32(vec![1])).unwrap();
    assert!(matches!(
        registry.execute(EUCLIDEAN_DIST, Device::Cpu, &[data, clusters]),
        Err(OpError::MixedTypes {
            lhs: ElementType::Float,
            rhs: ElementType::Int32,
            ..
        })
    ));
    let complex = Tensor::new(vec![1, 1], TensorData::Complex128(vec![[0.0, 1.0]])).unwrap();
    assert_eq!(
        registry.execute(EUCLIDEAN_DIST, Device::Cpu, &[complex.clone(), complex]),
        Err(OpError::Compute(ComputeError::UnsupportedType {
            ty: ElementType::Complex128
        }))
    );
}

#[test]
fn test_registration() {
    let mut registry = Registry::empty();
    let data = float_tensor(1, 1, vec![1.0]);
    assert!(matches!(
        registry.execute(EUCLIDEAN_DIST, Device::Cpu, &[data.clone(), data.clone()]),
        Err(OpError::NotFound { .. })
    ));
    registry.register_op(euclidean_dist_def()).unwrap();
    assert!(matches!(
        registry.register_op(euclidean_dist_def()),
        Err(OpError::Exist { .. })
    ));
    assert!(matches!(
        registry.execute(EUCLIDEAN_DIST, Device::Cpu, &[data.clone(), data.clone()]),
        Err(OpError::NoKernel { .. })
    ));
    registry
        .register_kernel(
            EUCLIDEAN_DIST,
            Device::Cpu,
            std::sync::Arc::new(EuclideanDistOp::default()),
        )
        .unwrap();
    let output = registry
        .execute(EUCLIDEAN_DIST, Device::Cpu, &[data.clone(), data])
        .unwrap();
    assert_eq!(output[0].data(), &TensorData::Float(vec![0.0]));
    assert!(registry
        .op(EUCLIDEAN_DIST)
        .unwrap()
        .documentation()
        .contains("euclidean distance"));
}

#[test]
fn test_random_double_matches_definition() {
    let mut rng = StdRng::seed_from_u64(2024);
    let registry = Registry::with_options(KernelOptions {
        threads: 2,
        parallel_threshold: 64,
    });
    let (n, d, m) = (9, 5, 7);
    let a = (0..n * d).map(|_| rng.gen_range(-1.0..1.0)).collect::<Vec<f64>>();
    let b = (0..d * m).map(|_| rng.gen_range(-1.0..1.0)).collect::<Vec<f64>>();
    let data = Tensor::new(vec![n, d], TensorData::Double(a.clone())).unwrap();
    let clusters = Tensor::new(vec![d, m], TensorData::Double(b.clone())).unwrap();
    let output = registry
        .execute(EUCLIDEAN_DIST, Device::Cpu, &[data, clusters])
        .unwrap();
    let output = output[0].to_matrix::<f64>().unwrap();
    assert_eq!(output.shape(), (n, m));
    for i in 0..n {
        for k in 0..m {
            let r = (0..d)
                .map(|j| (a[i * d + j] - b[j * m + k]).powi(2))
                .sum::<f64>()
                .sqrt();
            assert!((output[(i, k)] - r).abs() < 1e-12);
            assert!(output[(i, k)] >= 0.0);
        }
    }
}
