//! Semantic model of entities and DAO interfaces
//!
//! `declaration` holds the raw, pre-resolved input as loaded from a
//! declaration file; `extractor` turns raw interfaces into the typed
//! [`DaoInterfaceDefinition`] the generator consumes.

mod declaration;
mod entity;
mod extractor;
mod interface;

pub use declaration::*;
pub use entity::*;
pub use extractor::*;
pub use interface::*;
