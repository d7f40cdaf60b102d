//! Service layer: domain types, repositories and business rules for the six
//! services, independent of the HTTP framework.
//! - Each domain module follows the same split: `domain`, `repository`
//!   (trait plus in-memory `mock`), `repo::seaorm`, `service`.
//! - Cross-service lookups go through the traits in `peers`.

pub mod errors;
pub mod input;
pub mod admin;
pub mod peers;
pub mod users;
pub mod animals;
pub mod catalog;
pub mod cart;
pub mod forms;
pub mod orders;
pub mod bootstrap;
#[cfg(test)]
pub mod test_support;
