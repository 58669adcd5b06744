//! Configuration for daogen-codegen

pub mod defaults;
mod settings;

pub use settings::*;
