//! Users/auth: registration, credential check, lookups and admin deletion.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::UserService;
