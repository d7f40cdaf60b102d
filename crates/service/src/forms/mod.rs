//! Adoption forms: submitted by users, reviewed by admins.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::FormService;
