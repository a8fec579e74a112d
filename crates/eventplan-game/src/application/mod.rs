//! Game application services.

pub mod command_handlers;
pub mod query_handlers;

#[cfg(test)]
pub(crate) mod fixtures;
