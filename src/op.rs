use crate::error::OpError;
use crate::tensor::Tensor;
use base::error::ShapeError;
use base::scalar::ElementType;
use base::shape::Shape;
use log::debug;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

pub type ShapeFn = fn(&[Shape]) -> Result<Vec<Shape>, ShapeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Device {
    Cpu,
}

impl Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Device::Cpu => f.write_str("CPU"),
        }
    }
}

/// Declaration of an operator: its signature, type attribute and shape function.
#[derive(Debug, Clone)]
pub struct OpDef {
    name: &'static str,
    inputs: Vec<&'static str>,
    outputs: Vec<&'static str>,
    types: Vec<ElementType>,
    shape_fn: Option<ShapeFn>,
    doc: &'static str,
}

impl OpDef {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inputs: Vec::new(),
            outputs: Vec::new(),
            types: Vec::new(),
            shape_fn: None,
            doc: "",
        }
    }
    pub fn input(mut self, name: &'static str) -> Self {
        self.inputs.push(name);
        self
    }
    pub fn output(mut self, name: &'static str) -> Self {
        self.outputs.push(name);
        self
    }
    pub fn types(mut self, types: &[ElementType]) -> Self {
        self.types = types.to_vec();
        self
    }
    pub fn shape_fn(mut self, f: ShapeFn) -> Self {
        self.shape_fn = Some(f);
        self
    }
    pub fn doc(mut self, doc: &'static str) -> Self {
        self.doc = doc;
        self
    }
    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn inputs(&self) -> &[&'static str] {
        &self.inputs
    }
    pub fn outputs(&self) -> &[&'static str] {
        &self.outputs
    }
    pub fn allowed_types(&self) -> &[ElementType] {
        &self.types
    }
    pub fn documentation(&self) -> &'static str {
        self.doc
    }
    fn check_arity(&self, actual: usize) -> Result<(), OpError> {
        if actual != self.inputs.len() {
            return Err(OpError::Arity {
                name: self.name.to_string(),
                expected: self.inputs.len(),
                actual,
            });
        }
        Ok(())
    }
    /// Runs the shape function. Without one every output is an unknown matrix.
    pub fn infer(&self, shapes: &[Shape]) -> Result<Vec<Shape>, OpError> {
        self.check_arity(shapes.len())?;
        match self.shape_fn {
            Some(f) => Ok(f(shapes)?),
            None => Ok(vec![Shape::unknown_matrix(); self.outputs.len()]),
        }
    }
    /// Checks arity and the shared type attribute of concrete inputs.
    pub fn check_inputs(&self, inputs: &[Tensor]) -> Result<(), OpError> {
        self.check_arity(inputs.len())?;
        let mut shared: Option<ElementType> = None;
        for input in inputs {
            let ty = input.element_type();
            if !self.types.contains(&ty) {
                return Err(OpError::TypeMismatch {
                    name: self.name.to_string(),
                    ty,
                });
            }
            match shared {
                Some(lhs) if lhs != ty => {
                    return Err(OpError::MixedTypes {
                        name: self.name.to_string(),
                        lhs,
                        rhs: ty,
                    })
                }
                _ => shared = Some(ty),
            }
        }
        Ok(())
    }
}

/// Execution half of an operator. Implementations hold no per-call state.
pub trait Kernel: Send + Sync {
    fn compute(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, OpError>;
}

#[derive(Default)]
pub struct Registry {
    ops: HashMap<&'static str, OpDef>,
    kernels: HashMap<(&'static str, Device), Arc<dyn Kernel>>,
}

impl Registry {
    pub fn empty() -> Self {
        Self::default()
    }
    pub fn register_op(&mut self, def: OpDef) -> Result<(), OpError> {
        if self.ops.contains_key(def.name) {
            return Err(OpError::Exist {
                name: def.name.to_string(),
            });
        }
        debug!("registered operator {}", def.name);
        self.ops.insert(def.name, def);
        Ok(())
    }
    pub fn register_kernel(
        &mut self,
        name: &str,
        device: Device,
        kernel: Arc<dyn Kernel>,
    ) -> Result<(), OpError> {
        let def = self.op(name)?;
        let name = def.name;
        debug!("registered {device} kernel for {name}");
        self.kernels.insert((name, device), kernel);
        Ok(())
    }
    pub fn op(&self, name: &str) -> Result<&OpDef, OpError> {
        self.ops.get(name).ok_or_else(|| OpError::NotFound {
            name: name.to_string(),
        })
    }
    pub fn infer_shape(&self, name: &str, shapes: &[Shape]) -> Result<Vec<Shape>, OpError> {
        self.op(name)?.infer(shapes)
    }
    pub fn execute(
        &self,
        name: &str,
        device: Device,
        inputs: &[Tensor],
    ) -> Result<Vec<Tensor>, OpError> {
        let def = self.op(name)?;
        def.check_inputs(inputs)?;
        let kernel = self
            .kernels
            .get(&(def.name, device))
            .ok_or_else(|| OpError::NoKernel {
                name: def.name.to_string(),
                device: device.to_string(),
            })?;
        kernel.compute(inputs)
    }
}
