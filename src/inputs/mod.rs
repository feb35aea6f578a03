//! Projection inputs and batch loading

mod data;
pub mod loader;

pub use data::ProjectionInputs;
pub use loader::{load_inputs, load_inputs_from_reader, InputSet};
