//! Error taxonomy for the quiz core
//!
//! Asset and configuration failures are fatal at startup. Everything else here
//! is a logic invariant violation: normal game flow (wrong answers, groups
//! scrolling away, judging with nothing on screen) never produces a `GameError`.

use thiserror::Error;

use crate::assets::AssetError;

/// Errors raised by the simulation and its startup path
#[derive(Debug, Error)]
pub enum GameError {
    /// A tile group kind code outside the closed set 1..=7
    #[error("invalid tile group kind code {0}")]
    InvalidGroupKind(u8),

    /// Judgment requested while no group is awaiting an answer
    #[error("answer queue is empty")]
    EmptyQueue,

    /// The queue pointed at a slot that holds no group
    #[error("slot {0} is queued for judgment but has no occupant")]
    VacantSlot(usize),

    /// A sprite that should have been loaded at startup is not in the asset set
    #[error("missing asset: {0}")]
    MissingAsset(String),

    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Options failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
