//! Command abstractions.

use uuid::Uuid;

/// A request to change a game or the catalog.
///
/// Handlers log rejections and saves with both values so that one request
/// can be followed across the HTTP span and the repository.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted name such as `game.select_venue` or `catalog.register_brief`.
    fn command_type(&self) -> &'static str;

    /// Identifier shared by every log line of one request.
    fn correlation_id(&self) -> Uuid;
}
