//! Core catalog model for DAT-described ROM collections.
//!
//! A DAT file describes a set of machines (games, devices, BIOSes) and the
//! entries they own (ROMs, disks, releases, ...). This crate holds the typed
//! model shared by the converter and the bucketing engine: it carries no
//! parsing, hashing, or I/O of its own.

pub mod catalog;
pub mod entry;
pub mod machine;

pub use catalog::{
    Catalog, CatalogHeader, Counters, ForceMerging, ForceNodump, ForcePacking, OutputFormat,
};
pub use entry::{
    Archive, BiosSet, CatalogEntry, Disk, DumpStatus, DupeStatus, EntryMeta, ItemKind, Release,
    Rom, Sample,
};
pub use machine::{Machine, MachineType};
