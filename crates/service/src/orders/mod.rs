//! Orders: checkout snapshots of purchased lines and cancellation.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::OrderService;
