//! Game domain model.

pub mod aggregates;
pub mod commands;
pub mod repository;
pub mod scoring;
