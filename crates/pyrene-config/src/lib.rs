pub mod config;
pub mod error;
pub mod manager;
pub mod repos;
pub mod repository;
pub mod store;

#[cfg(test)]
pub mod test_utils;
