//! Event planning core: shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that the catalog and
//! game contexts depend on. It contains no infrastructure code.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod repository;
pub mod rng;
pub mod validation;
