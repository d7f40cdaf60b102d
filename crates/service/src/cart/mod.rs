//! Shopping cart: one line per (user, product), snapshots of name and price.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::CartService;
