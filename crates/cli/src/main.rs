use euclidean_dist::{Device, Registry, EUCLIDEAN_DIST};
use log::{debug, error, info};
use std::error::Error;
use std::path::Path;
use std::time::Instant;

use crate::args::{Arguments, ComputeArguments, InferArguments, SubCommandEnum};
use crate::read::{read_matrix, to_rows, to_tensor};

mod args;
mod read;

fn infer(infer: InferArguments) -> Result<(), Box<dyn Error>> {
    let [data, clusters] = infer.get_shapes()?;
    let registry = Registry::new();
    let shapes = registry.infer_shape(EUCLIDEAN_DIST, &[data, clusters])?;
    for shape in shapes {
        println!("{shape}");
    }
    Ok(())
}

fn compute(compute: ComputeArguments) -> Result<(), Box<dyn Error>> {
    let ty = compute.get_element_type()?;
    let options = compute.get_kernel_options()?;
    debug!("kernel options: {options:?}");
    let data = read_matrix(Path::new(&compute.data))?;
    let clusters = read_matrix(Path::new(&compute.clusters))?;
    info!(
        "loaded {}x{} data and {}x{} clusters as {ty}",
        data.rows(),
        data.cols(),
        clusters.rows(),
        clusters.cols()
    );
    let registry = Registry::with_options(options);
    let inputs = [to_tensor(&data, ty), to_tensor(&clusters, ty)];
    let start_time = Instant::now();
    let outputs = registry.execute(EUCLIDEAN_DIST, Device::Cpu, &inputs)?;
    info!("computed distances in {:?}", start_time.elapsed());
    for output in outputs {
        let rows = to_rows(&output).ok_or("output is not real-valued")?;
        println!("{}", serde_json::to_string(&rows)?);
    }
    Ok(())
}

fn main() {
    let args: Arguments = argh::from_env();
    let mut log_builder = env_logger::builder();
    if args.verbose {
        log_builder.filter_level(log::LevelFilter::Debug);
    } else {
        log_builder.filter_level(log::LevelFilter::Info);
    }
    log_builder.init();
    debug!("arguments: {args:#?}");

    let result = match args.cmd {
        SubCommandEnum::Infer(x) => infer(x),
        SubCommandEnum::Compute(x) => compute(x),
    };
    if let Err(err) = result {
        error!("{err}");
        std::process::exit(1);
    }
}
