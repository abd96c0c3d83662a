//! The zoom/warp state machine.
//!
//! Pure transitions only. Wheel deltas accumulate into a normalized zoom
//! magnitude until the warp threshold is crossed, at which point the machine
//! latches and reports [`ScrollOutcome::WarpTriggered`] exactly once per
//! lifecycle. The caller schedules the delayed completion and feeds it back
//! through [`ZoomMachine::finish_warp`].

use crate::config::{ZoomConfig, ZoomConfigError};
use crate::stem::StemIndex;

/// Logical phase of the interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WarpPhase {
    /// Zoom is adjustable; nothing scheduled.
    #[default]
    Exploring,
    /// Threshold crossed; the one-shot warp completion is pending.
    Warping,
    /// Terminal focused state. Holds until reset.
    Reached,
}

/// What a scroll update did, from the caller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// Input arrived during or after the warp and was dropped without
    /// touching state. Residual wheel momentum must not corrupt the
    /// terminal transition.
    Swallowed,
    /// Zoom moved, or pinned at a bound, below the warp threshold.
    Adjusted,
    /// This update crossed the threshold. The caller must schedule the
    /// warp completion; the internal latch guarantees this outcome is
    /// produced at most once per lifecycle.
    WarpTriggered,
}

/// Atomic view of the observable state.
///
/// Published as one record per operation so observers never see a torn
/// intermediate, such as the warp flag without the same update's clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomSnapshot {
    /// Accumulated zoom magnitude, always in `[0, 1]`.
    pub zoom: f64,
    /// True while the timed warp transition is in flight.
    pub is_warping: bool,
    /// True once the nucleus is reached; holds until reset.
    pub has_reached_nucleus: bool,
    /// The host's chosen stem, if any.
    pub active_stem: Option<StemIndex>,
}

/// Scroll-driven zoom state with a one-shot warp latch.
#[derive(Debug, Clone)]
pub struct ZoomMachine {
    config: ZoomConfig,
    zoom: f64,
    phase: WarpPhase,
    /// One-shot guard, distinct from the public flags: set on the first
    /// threshold crossing, cleared only by [`ZoomMachine::reset`].
    warp_triggered: bool,
    active_stem: Option<StemIndex>,
}

impl Default for ZoomMachine {
    fn default() -> Self {
        Self {
            config: ZoomConfig::default(),
            zoom: 0.0,
            phase: WarpPhase::default(),
            warp_triggered: false,
            active_stem: None,
        }
    }
}

impl ZoomMachine {
    /// Create a machine in its zero configuration, rejecting an invalid
    /// config eagerly.
    pub fn new(config: ZoomConfig) -> Result<Self, ZoomConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Apply one raw wheel delta.
    ///
    /// The update and the threshold check are a single transition, so
    /// exactly one trigger point exists and cannot be missed by
    /// intervening reads.
    pub fn handle_scroll(&mut self, delta: f64) -> ScrollOutcome {
        if self.phase != WarpPhase::Exploring {
            return ScrollOutcome::Swallowed;
        }

        let step = -delta * self.config.scroll_sensitivity;
        let next = (self.zoom + step).clamp(0.0, 1.0);
        // A NaN delta would poison the clamp; drop it.
        if next.is_nan() {
            return ScrollOutcome::Adjusted;
        }
        self.zoom = next;

        if self.zoom >= self.config.warp_threshold && !self.warp_triggered {
            self.warp_triggered = true;
            self.phase = WarpPhase::Warping;
            return ScrollOutcome::WarpTriggered;
        }
        ScrollOutcome::Adjusted
    }

    /// Complete the warp cycle.
    ///
    /// No-op unless a warp is actually in flight, so a completion that
    /// lost the race with [`ZoomMachine::reset`] cannot resurrect the
    /// terminal state.
    pub fn finish_warp(&mut self) {
        if self.phase == WarpPhase::Warping {
            self.phase = WarpPhase::Reached;
        }
    }

    /// Select a stem, or clear the selection.
    ///
    /// Accepted in any phase; the selection only carries meaning for the
    /// host once the nucleus is reached.
    pub fn set_active_stem(&mut self, stem: Option<StemIndex>) {
        self.active_stem = stem;
    }

    /// Rewind to the initial configuration: zero zoom, both flags and the
    /// latch cleared, selection cleared. The caller must cancel any
    /// pending warp completion first.
    pub fn reset(&mut self) {
        self.zoom = 0.0;
        self.phase = WarpPhase::Exploring;
        self.warp_triggered = false;
        self.active_stem = None;
    }

    #[must_use]
    pub fn phase(&self) -> WarpPhase {
        self.phase
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[must_use]
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    #[must_use]
    pub fn snapshot(&self) -> ZoomSnapshot {
        ZoomSnapshot {
            zoom: self.zoom,
            is_warping: self.phase == WarpPhase::Warping,
            has_reached_nucleus: self.phase == WarpPhase::Reached,
            active_stem: self.active_stem,
        }
    }
}
