// Lookup resolution: the per-request catalog of coded options and the
// id → label helper shared by the profile read and write paths.

pub mod catalog;

pub use catalog::{fetch_lookup_catalog, resolve_label, LookupCatalog, LookupKind};
