//! Converters between DAT dialects.
//!
//! The block-structured ClrMamePro/RomVault dialect and the Logiqx XML
//! dialect both map onto one canonical tree shape ([`tree::DatNode`]).
//! [`clrmamepro`] converts block text into the tree, [`logiqx`] reads and
//! writes the XML side, and [`populate`] turns a tree into the typed
//! catalog model.

pub mod clrmamepro;
pub mod error;
pub mod logiqx;
pub mod populate;
pub mod tree;

pub use clrmamepro::convert_block_dialect;
pub use error::DatError;
pub use logiqx::{parse_xml, write_xml};
pub use populate::{populate, PopulatedDat};
pub use tree::DatNode;
