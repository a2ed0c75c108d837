/// Database configuration and connection management
pub mod database;

/// Application configuration and seed data from stallbook.toml
pub mod seed;
