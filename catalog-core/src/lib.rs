#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the catalog crates.
//! [catalog_core]: https://docs.rs/catalog_core/latest/catalog_core/index.html
//! [catalog_store]: https://docs.rs/catalog_store/latest/catalog_store/index.html
//! [catalog_sqlite]: https://docs.rs/catalog_sqlite/latest/catalog_sqlite/index.html
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// Core domain models for the product catalog.
///
/// This module contains the fundamental data structures that represent the domain entities.
///
/// The models in this module are primarily data structures with minimal business logic,
/// following the principles of the hexagonal architecture to separate domain entities
/// from their persistence and processing implementations.
pub mod models;

/// Interface traits for the product catalog.
///
/// This module contains the "ports" in the hexagonal architecture pattern.
///
/// These traits define the contract between the ranking store and external adapters
/// (such as a hosted document store or a local database) without specifying implementation details.
/// This separation allows for easier testing and the ability to swap out infrastructure
/// components without affecting the ranking logic.
pub mod ports;
