use argh::FromArgs;
use log::warn;
use std::fs;

use euclidean_dist::{ElementType, KernelOptions, Shape};

#[derive(Debug, Eq, PartialEq)]
pub struct ArgumentParseError;

impl std::fmt::Display for ArgumentParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("failed to parse arguments")
    }
}

impl std::error::Error for ArgumentParseError {}

fn shape_from_str(s: &str) -> Result<Shape, ArgumentParseError> {
    s.parse::<Shape>().map_err(|err| {
        warn!("failed to parse the shape `{s}`: {err}");
        ArgumentParseError
    })
}

#[derive(FromArgs, Debug, PartialEq)]
#[argh(subcommand)]
pub enum SubCommandEnum {
    Infer(InferArguments),
    Compute(ComputeArguments),
}

#[derive(FromArgs, Debug, PartialEq)]
/// infer the output shape from the input shapes
#[argh(subcommand, name = "infer")]
pub struct InferArguments {
    /// shape of `data`, e.g. `5,10` or `?,10`
    #[argh(option)]
    pub data: String,

    /// shape of `clusters`, e.g. `10,3`
    #[argh(option)]
    pub clusters: String,
}

impl InferArguments {
    pub fn get_shapes(&self) -> Result<[Shape; 2], ArgumentParseError> {
        Ok([shape_from_str(&self.data)?, shape_from_str(&self.clusters)?])
    }
}

#[derive(FromArgs, Debug, PartialEq)]
/// compute the distance matrix
#[argh(subcommand, name = "compute")]
pub struct ComputeArguments {
    /// query matrix file (`.json`, `.fvecs` or `.ivecs`), one row per vector
    #[argh(option)]
    pub data: String,

    /// reference matrix file, one column per vector
    #[argh(option)]
    pub clusters: String,

    /// element type: [`half`, `float`, `double`, `int32`, `int64`, `complex64`, `complex128`]
    #[argh(option, default = "String::from(\"double\")")]
    pub dtype: String,

    /// kernel options file in TOML
    #[argh(option)]
    pub config: Option<String>,

    /// override the kernel threads number
    #[argh(option)]
    pub threads: Option<u16>,
}

impl ComputeArguments {
    pub fn get_element_type(&self) -> Result<ElementType, ArgumentParseError> {
        ElementType::from_name(&self.dtype).ok_or_else(|| {
            warn!("unknown element type `{}`", self.dtype);
            ArgumentParseError
        })
    }

    pub fn get_kernel_options(&self) -> Result<KernelOptions, ArgumentParseError> {
        let mut options: KernelOptions = match &self.config {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|err| {
                    warn!("failed to read the options file {path}: {err}");
                    ArgumentParseError
                })?;
                toml::from_str(&content).map_err(|err| {
                    warn!("failed to parse the TOML kernel options: {err}");
                    ArgumentParseError
                })?
            }
            None => KernelOptions::default(),
        };
        if let Some(num) = self.threads {
            options.threads = num;
        }
        options.check().map_err(|err| {
            warn!("{err}");
            ArgumentParseError
        })?;
        Ok(options)
    }
}

#[derive(FromArgs, Debug)]
/// pairwise euclidean distance CLI
pub struct Arguments {
    #[argh(subcommand)]
    pub cmd: SubCommandEnum,

    /// verbose
    #[argh(switch, short = 'v')]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compute(threads: Option<u16>, dtype: &str) -> ComputeArguments {
        ComputeArguments {
            data: String::from("data.json"),
            clusters: String::from("clusters.json"),
            dtype: dtype.to_string(),
            config: None,
            threads,
        }
    }

    #[test]
    fn parse_shapes() {
        let infer = InferArguments {
            data: String::from("?,10"),
            clusters: String::from("10x3"),
        };
        let [data, clusters] = infer.get_shapes().unwrap();
        assert_eq!(data.to_string(), "[?, 10]");
        assert_eq!(clusters, Shape::known(&[10, 3]));
        let bad = InferArguments {
            data: String::from("a,b"),
            clusters: String::from("1,1"),
        };
        assert_eq!(bad.get_shapes(), Err(ArgumentParseError));
    }

    #[test]
    fn kernel_options_override() {
        assert_eq!(
            compute(None, "double").get_kernel_options(),
            Ok(KernelOptions::default())
        );
        assert_eq!(
            compute(Some(8), "double").get_kernel_options().unwrap().threads,
            8
        );
        assert_eq!(
            compute(Some(0), "double").get_kernel_options(),
            Err(ArgumentParseError)
        );
    }

    #[test]
    fn element_types() {
        assert_eq!(
            compute(None, "half").get_element_type(),
            Ok(ElementType::Half)
        );
        assert_eq!(
            compute(None, "bfloat16").get_element_type(),
            Err(ArgumentParseError)
        );
    }
}
