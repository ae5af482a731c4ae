//! Animation controller - frame-driven timer over a set of visual tiles
//!
//! The controller runs one animation at a time, either a move (slides plus merge
//! pops) or a spawn (single pop-in). It is advanced once per frame with the
//! elapsed wall-clock delta and reports completion through the return value of
//! [`AnimationController::update`], exactly once per animation.

use arrayvec::ArrayVec;
use tracing::{debug, trace, warn};

use crate::layout::{AnimationTiming, GridLayout};
use crate::tile::VisualTile;
use crate::types::{SemanticEvent, CELL_COUNT};

/// Which animation finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    Move,
    Spawn,
}

/// Drives tile interpolation for move and spawn animations
#[derive(Debug, Clone)]
pub struct AnimationController {
    tiles: ArrayVec<VisualTile, CELL_COUNT>,
    /// Running animation, None while idle
    running: Option<AnimationKind>,
    elapsed: f32,
    timing: AnimationTiming,
    layout: GridLayout,
}

impl AnimationController {
    pub fn new(timing: AnimationTiming, layout: GridLayout) -> Self {
        Self {
            tiles: ArrayVec::new(),
            running: None,
            elapsed: 0.0,
            timing,
            layout,
        }
    }

    /// Change the grid geometry used by subsequent animations
    pub fn set_layout(&mut self, layout: GridLayout) {
        self.layout = layout;
    }

    /// Start sliding tiles according to `events`.
    ///
    /// Spawn events and events without a positive value are skipped. Returns
    /// whether an animation is now running; with nothing to animate the
    /// controller stays idle and no completion will be reported.
    pub fn start_move_animation(&mut self, events: &[SemanticEvent]) -> bool {
        self.tiles.clear();

        for event in events {
            let (from, merging) = match *event {
                SemanticEvent::Move { from, .. } => (from, false),
                SemanticEvent::Merge { from, .. } => (from, true),
                SemanticEvent::Spawn { .. } => continue,
            };
            if event.value() == 0 {
                continue;
            }
            if self.tiles.is_full() {
                warn!(events = events.len(), "more move events than cells; extra events dropped");
                break;
            }

            let to = event.destination();
            let start = self.layout.cell_to_pixel(from.row as usize, from.col as usize);
            let target = self.layout.cell_to_pixel(to.row as usize, to.col as usize);
            self.tiles
                .push(VisualTile::sliding(event.value(), start, target, merging));
        }

        self.elapsed = 0.0;
        self.running = if self.tiles.is_empty() {
            None
        } else {
            Some(AnimationKind::Move)
        };
        debug!(tiles = self.tiles.len(), "move animation started");
        self.running.is_some()
    }

    /// Start the pop-in of a freshly spawned tile at (row, col).
    ///
    /// A zero value leaves the controller idle and returns false.
    pub fn start_spawn_animation(&mut self, row: usize, col: usize, value: u32) -> bool {
        self.tiles.clear();
        self.elapsed = 0.0;

        if value == 0 {
            self.running = None;
            return false;
        }

        let at = self.layout.cell_to_pixel(row, col);
        self.tiles.push(VisualTile::spawning(value, at));
        self.running = Some(AnimationKind::Spawn);
        debug!(row, col, value, "spawn animation started");
        true
    }

    /// Advance the running animation by one frame.
    ///
    /// `delta_secs` is clamped to `[0, max_frame_delta_secs]` (NaN counts as 0).
    /// Returns the finished animation's kind on the frame every tile reaches
    /// `Done`; the tile list is cleared at that point and later calls return
    /// None until another animation is started.
    pub fn update(&mut self, delta_secs: f32) -> Option<AnimationKind> {
        let kind = self.running?;

        let delta = if delta_secs.is_nan() {
            0.0
        } else {
            delta_secs.clamp(0.0, self.timing.max_frame_delta_secs)
        };
        self.elapsed += delta;

        let AnimationTiming {
            move_secs,
            merge_secs,
            spawn_secs,
            ..
        } = self.timing;
        for tile in &mut self.tiles {
            tile.advance(self.elapsed, move_secs, merge_secs, spawn_secs);
        }
        trace!(elapsed = self.elapsed, ?kind, "animation advanced");

        if !self.tiles.iter().all(VisualTile::is_done) {
            return None;
        }

        self.tiles.clear();
        self.running = None;
        debug!(?kind, elapsed = self.elapsed, "animation complete");
        Some(kind)
    }

    /// Force the controller idle without reporting completion
    pub fn stop(&mut self) {
        self.tiles.clear();
        self.running = None;
        self.elapsed = 0.0;
    }

    pub fn is_animating(&self) -> bool {
        self.running.is_some()
    }

    pub fn is_spawning_animation(&self) -> bool {
        self.running == Some(AnimationKind::Spawn)
    }

    /// Tiles to draw this frame
    pub fn tiles(&self) -> &[VisualTile] {
        &self.tiles
    }

    /// Seconds since the running animation started
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl Default for AnimationController {
    fn default() -> Self {
        Self::new(AnimationTiming::default(), GridLayout::default())
    }
}
