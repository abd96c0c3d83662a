//! Core domain types for Soma.
//!
//! Pure data types with no IO, no async, no timers. The zoom/warp state
//! machine decides *when* a warp completion should be scheduled; the async
//! layer (`soma-engine`) owns the clock that later delivers it.

mod config;
mod stem;
mod zoom;

pub use config::{ZoomConfig, ZoomConfigError};
pub use stem::{StemIndex, StemIndexError};
pub use zoom::{ScrollOutcome, WarpPhase, ZoomMachine, ZoomSnapshot};
