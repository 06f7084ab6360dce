//! Typed datasets and how they are produced

pub mod dataset;
pub mod generator;
pub mod kind;

pub use dataset::TypedDataset;
pub use generator::{generate_dataset, DatasetGenerator, GeneratorConfig};
pub use kind::DataKind;
