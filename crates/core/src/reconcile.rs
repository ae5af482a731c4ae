//! Reconcile module - recover per-tile provenance from two grid snapshots
//!
//! [`Board::simulate_move`](crate::Board::simulate_move) only reports the resulting
//! grid; it forgets which tile went where. [`reconcile`] rebuilds that information
//! from the before/after pair and the move direction so the animation layer can
//! slide each tile from its source cell to its destination.
//!
//! Destinations are visited line by line in the same scan order the merge pass
//! uses, so each decision consumes before-grid tiles from the leading edge and
//! constrains the decisions that follow.

use arrayvec::ArrayVec;
use thiserror::Error;
use tracing::warn;

use crate::types::{Direction, Grid, Pos, SemanticEvent, CELL_COUNT, GRID_SIZE};

/// Events produced for one move. Every event consumes a distinct before-grid
/// tile, so a move never yields more than one event per cell.
pub type EventList = ArrayVec<SemanticEvent, CELL_COUNT>;

/// Post-condition violations reported by [`verify`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// A non-empty before-grid tile is not the source of any event.
    #[error("tile at ({}, {}) was never assigned to an event", pos.row, pos.col)]
    UnconsumedTile { pos: Pos },

    /// A before-grid tile is the source of more than one event.
    #[error("tile at ({}, {}) is the source of more than one event", pos.row, pos.col)]
    DuplicateSource { pos: Pos },

    /// An event's value does not match the before-grid tile it claims as source.
    #[error("event from ({}, {}) carries {value}, before-grid holds {actual}", pos.row, pos.col)]
    SourceMismatch { pos: Pos, value: u32, actual: u32 },

    /// An after-grid cell is not explained by one Move or one Move + Merge pair.
    #[error("destination ({}, {}) is not explained by its events: {reason}", pos.row, pos.col)]
    BadDestination { pos: Pos, reason: &'static str },
}

/// Per-cell boolean marks
#[derive(Debug, Default, Clone, Copy)]
struct Marks([[bool; GRID_SIZE]; GRID_SIZE]);

impl Marks {
    fn get(&self, pos: Pos) -> bool {
        self.0[pos.row as usize][pos.col as usize]
    }

    fn mark(&mut self, pos: Pos) {
        self.0[pos.row as usize][pos.col as usize] = true;
    }
}

/// Diff `before` into `after` as an ordered list of Move/Merge events.
///
/// `after` must be the result of one `simulate_move(direction)` applied to
/// `before`. A tile that stays in place yields a Move whose source equals its
/// destination. A merged destination yields a Move for the leading tile followed
/// by a Merge for the trailing one, both carrying the pre-merge value.
pub fn reconcile(before: &Grid, after: &Grid, direction: Direction) -> EventList {
    let mut events = EventList::new();
    let mut consumed = Marks::default();
    let mut resolved = Marks::default();

    for index in 0..GRID_SIZE {
        let line = direction.line(index);

        for (slot, &to) in line.iter().enumerate() {
            let value = after[to];
            if value == 0 {
                continue;
            }

            if before[to] == value && !consumed.get(to) {
                // Stationary tile
                consumed.mark(to);
                events.push(SemanticEvent::Move { from: to, to, value });
            } else if let Some(from) = find_origin(before, &consumed, &line[slot..], value) {
                consumed.mark(from);
                events.push(SemanticEvent::Move { from, to, value });
            } else {
                resolve_merge(before, &mut consumed, &line, to, value, &mut events);
            }

            resolved.mark(to);
        }
    }

    debug_assert!(Grid::positions().all(|pos| (after[pos] == 0) || resolved.get(pos)));
    events
}

/// First unconsumed tile at or behind the destination, if it carries `value`.
///
/// Tiles never pass through each other, so the search stops at the first
/// unconsumed tile it meets whatever its value.
fn find_origin(before: &Grid, consumed: &Marks, behind: &[Pos], value: u32) -> Option<Pos> {
    behind
        .iter()
        .copied()
        .find(|&pos| before[pos] != 0 && !consumed.get(pos))
        .filter(|&pos| before[pos] == value)
}

fn resolve_merge(
    before: &Grid,
    consumed: &mut Marks,
    line: &[Pos; GRID_SIZE],
    to: Pos,
    value: u32,
    events: &mut EventList,
) {
    let half = value / 2;

    // Line order runs from the leading edge, so the tile closest to the
    // destination comes first.
    let candidates: ArrayVec<Pos, GRID_SIZE> = line
        .iter()
        .copied()
        .filter(|&pos| !consumed.get(pos) && before[pos] == half && half != 0)
        .collect();

    let adjacent = candidates
        .windows(2)
        .find(|pair| adjacent_after_compaction(before, consumed, line, pair[0], pair[1]))
        .map(|pair| (pair[0], pair[1]));

    let (lead, trail) = match adjacent {
        Some(pair) => pair,
        None if candidates.len() >= 2 => {
            warn!(
                row = to.row,
                col = to.col,
                value,
                "no adjacent merge pair; falling back to first two candidates"
            );
            (candidates[0], candidates[1])
        }
        None => {
            warn!(
                row = to.row,
                col = to.col,
                value,
                candidates = candidates.len(),
                "destination has no provenance"
            );
            return;
        }
    };

    consumed.mark(lead);
    consumed.mark(trail);
    events.push(SemanticEvent::Move {
        from: lead,
        to,
        value: half,
    });
    events.push(SemanticEvent::Merge {
        from: trail,
        to,
        value: half,
    });
}

/// True when no unconsumed tile sits strictly between `a` and `b` on the line
fn adjacent_after_compaction(
    before: &Grid,
    consumed: &Marks,
    line: &[Pos; GRID_SIZE],
    a: Pos,
    b: Pos,
) -> bool {
    let (Some(ia), Some(ib)) = (
        line.iter().position(|&p| p == a),
        line.iter().position(|&p| p == b),
    ) else {
        return false;
    };
    let (lo, hi) = if ia < ib { (ia, ib) } else { (ib, ia) };

    line[lo + 1..hi]
        .iter()
        .all(|&pos| before[pos] == 0 || consumed.get(pos))
}

/// Check the reconciliation post-condition for a before/after pair.
///
/// Every non-empty before-grid tile must be consumed exactly once with a
/// matching value, and every non-empty after-grid cell must be the destination
/// of exactly one Move, or of one Move and one Merge whose values sum to it.
pub fn verify(before: &Grid, after: &Grid, events: &[SemanticEvent]) -> Result<(), ReconcileError> {
    let mut consumed = Marks::default();

    for event in events {
        let Some(from) = event.source() else {
            continue;
        };
        if consumed.get(from) {
            return Err(ReconcileError::DuplicateSource { pos: from });
        }
        consumed.mark(from);

        let actual = before[from];
        if actual == 0 || actual != event.value() {
            return Err(ReconcileError::SourceMismatch {
                pos: from,
                value: event.value(),
                actual,
            });
        }
    }

    if let Some(pos) = Grid::positions().find(|&pos| before[pos] != 0 && !consumed.get(pos)) {
        return Err(ReconcileError::UnconsumedTile { pos });
    }

    for pos in Grid::positions() {
        let mut moves = 0u32;
        let mut merges = 0u32;
        let mut sum = 0u32;
        for event in events.iter().filter(|e| !e.is_spawn() && e.destination() == pos) {
            if event.is_merge() {
                merges += 1;
            } else {
                moves += 1;
            }
            sum += event.value();
        }

        let value = after[pos];
        if value == 0 {
            if moves + merges > 0 {
                return Err(ReconcileError::BadDestination {
                    pos,
                    reason: "events target an empty cell",
                });
            }
            continue;
        }

        let reason = match (moves, merges) {
            (1, 0) | (1, 1) if sum == value => continue,
            (1, 0) | (1, 1) => "event values do not sum to the tile value",
            (0, 0) => "no event targets this tile",
            _ => "expected one Move or one Move + Merge pair",
        };
        return Err(ReconcileError::BadDestination { pos, reason });
    }

    Ok(())
}
