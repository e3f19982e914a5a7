// Repository ports
// Implemented by infrastructure adapters

pub mod group_repository;

pub use group_repository::GroupRepository;
