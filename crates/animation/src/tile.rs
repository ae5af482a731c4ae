//! Visual tiles - the animated stand-ins for grid tiles.

use crate::layout::PixelPos;
use crate::types::POP_PEAK_SCALE;

/// Where a tile is in its animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TilePhase {
    /// Sliding from start to target
    Moving,
    /// Arrived merge leg popping 1.0 -> 1.2 -> 1.0
    MergingPop,
    /// Freshly spawned tile popping 0 -> 1.2 -> 1.0
    SpawningPop,
    Done,
}

/// An in-flight animated tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualTile {
    pub value: u32,
    /// Fixed start position; interpolation always starts from here
    pub start: PixelPos,
    /// Fixed end position
    pub target: PixelPos,
    pub current: PixelPos,
    pub scale: f32,
    pub phase: TilePhase,
    /// Merge leg: pops and doubles after the slide
    pub merging: bool,
    /// Set once the displayed value has been doubled
    pub value_doubled: bool,
}

impl VisualTile {
    /// A tile that slides from `start` to `target`
    pub fn sliding(value: u32, start: PixelPos, target: PixelPos, merging: bool) -> Self {
        Self {
            value,
            start,
            target,
            current: start,
            scale: 1.0,
            phase: TilePhase::Moving,
            merging,
            value_doubled: false,
        }
    }

    /// A tile that pops in at `at`
    pub fn spawning(value: u32, at: PixelPos) -> Self {
        Self {
            value,
            start: at,
            target: at,
            current: at,
            scale: 0.0,
            phase: TilePhase::SpawningPop,
            merging: false,
            value_doubled: false,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.phase == TilePhase::Moving
    }

    pub fn is_merging(&self) -> bool {
        self.phase == TilePhase::MergingPop
    }

    pub fn is_spawning(&self) -> bool {
        self.phase == TilePhase::SpawningPop
    }

    pub fn is_done(&self) -> bool {
        self.phase == TilePhase::Done
    }

    /// Advance to `elapsed` seconds since the animation started.
    ///
    /// Phases are derived from the shared clock, not from per-tile accumulators.
    pub(crate) fn advance(&mut self, elapsed: f32, move_secs: f32, merge_secs: f32, spawn_secs: f32) {
        match self.phase {
            TilePhase::Moving | TilePhase::MergingPop => {
                let t = fraction(elapsed, move_secs);
                self.current = self.start.lerp(self.target, t);
                self.scale = 1.0;

                if t < 1.0 {
                    return;
                }
                if !self.merging {
                    self.phase = TilePhase::Done;
                    return;
                }

                if !self.value_doubled {
                    self.value = self.value.saturating_mul(2);
                    self.value_doubled = true;
                }
                self.phase = TilePhase::MergingPop;

                let t = fraction(elapsed - move_secs, merge_secs);
                self.scale = merge_pop_scale(t);
                if t >= 1.0 {
                    self.phase = TilePhase::Done;
                }
            }
            TilePhase::SpawningPop => {
                let t = fraction(elapsed, spawn_secs);
                self.scale = spawn_pop_scale(t);
                if t >= 1.0 {
                    self.phase = TilePhase::Done;
                }
            }
            TilePhase::Done => {}
        }
    }
}

/// `min(1, elapsed / duration)`; a non-positive duration finishes immediately
fn fraction(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}

/// 1.0 -> peak at t = 0.5 -> 1.0
pub fn merge_pop_scale(t: f32) -> f32 {
    let rise = POP_PEAK_SCALE - 1.0;
    if t < 0.5 {
        1.0 + (t / 0.5) * rise
    } else {
        POP_PEAK_SCALE - ((t - 0.5) / 0.5) * rise
    }
}

/// 0 -> peak at t = 0.5 -> 1.0
pub fn spawn_pop_scale(t: f32) -> f32 {
    if t < 0.5 {
        (t / 0.5) * POP_PEAK_SCALE
    } else {
        POP_PEAK_SCALE - ((t - 0.5) / 0.5) * (POP_PEAK_SCALE - 1.0)
    }
}
