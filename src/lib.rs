//! Synthesizes configurable fakes for interfaces and abstract classes.
//!
//! Pipeline per target: [`select`] the participating members, [`synth`]esize a
//! default literal for each, [`assemble`] the result into a
//! [`ir::SyntheticTypeSpec`]. [`codegen`] renders that spec as Kotlin.
pub mod model;
pub mod synth;
pub mod select;
pub mod ir;
pub mod assemble;
pub mod diagnostic;
pub mod pipeline;
pub mod codegen;
pub mod document;
pub mod path_de;
pub mod jq_exec;
pub mod cli;

#[cfg(test)]
mod prop_tests;

pub use pipeline::{generate, generate_all, Generated};
