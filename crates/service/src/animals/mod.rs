//! Animals available for adoption.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AnimalService;
