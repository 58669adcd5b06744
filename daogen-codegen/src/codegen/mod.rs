//! Code generation module

mod artifact;
mod code_generator;
mod context;
mod method;
mod naming;
mod orchestrator;
mod registry;
mod return_shape;

pub use artifact::*;
pub use code_generator::*;
pub use context::*;
pub use method::{build_method_generator, MethodGenerator, MethodScope, Skip};
pub use naming::*;
pub use orchestrator::*;
pub use registry::*;
pub use return_shape::*;
