/// Registry type definitions.
pub mod types;

pub use types::{ComponentImport, ComponentRegistry};
