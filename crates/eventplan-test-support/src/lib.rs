//! Shared test mocks and utilities for the event planning game.

mod clock;
mod repository;
mod rng;

pub use clock::{FixedClock, fixed_now};
pub use repository::{FailingRepository, RecordingRepository};
pub use rng::{MockRng, SequenceRng};
