//! Conversion factors between external unit labels
//!
//! - [`ConversionRegistry`]: case-insensitive `(from, to) -> rate` table
//! - [`ConversionFactorStore`]: where the table's rows come from

pub mod registry;
pub mod store;

pub use registry::{ConversionRegistry, IDENTITY_RATE};
pub use store::{ConversionFactor, ConversionFactorStore, InMemoryFactorStore, JsonFileFactorStore};
