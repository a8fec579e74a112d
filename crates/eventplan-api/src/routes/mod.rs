//! Route modules organized by bounded context.

pub mod catalog;
pub mod games;
pub mod health;
