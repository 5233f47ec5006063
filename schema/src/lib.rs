// Battle Engine Schema - Shared type definitions
// This crate contains the catalog records and battle enums that are shared between
// the engine crate and its build script, enabling the use of postcard for
// compile-time encoding of the move and species tables.

pub use catalog::{normalize_name, CatalogError};
pub use move_types::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod catalog;
pub mod move_types;
pub mod pokemon_types;
pub mod species_data;
