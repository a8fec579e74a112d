//! Catalog domain model.

pub mod commands;
pub mod entities;
