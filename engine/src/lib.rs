//! Async zoom/warp controller for Soma.
//!
//! Wraps the pure state machine from `soma-types` in a controller that
//! publishes atomic snapshots to observers and owns the one-shot warp timer.

mod controller;

pub use controller::ZoomController;
pub use soma_types::{
    ScrollOutcome, StemIndex, StemIndexError, WarpPhase, ZoomConfig, ZoomConfigError, ZoomMachine,
    ZoomSnapshot,
};
