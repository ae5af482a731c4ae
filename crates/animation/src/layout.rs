//! Pixel geometry and phase durations.

use crate::types::{
    DEFAULT_CELL_PADDING, DEFAULT_CELL_SIZE, MAX_FRAME_DELTA_SECS, MERGE_DURATION_SECS,
    MOVE_DURATION_SECS, SPAWN_DURATION_SECS,
};

/// A point in renderer pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPos {
    pub x: f32,
    pub y: f32,
}

impl PixelPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation toward `to`; `t` is expected in `[0, 1]`
    pub fn lerp(self, to: PixelPos, t: f32) -> PixelPos {
        PixelPos {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }
}

/// Where the grid sits on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub cell_size: f32,
    pub padding: f32,
    pub origin_x: f32,
    pub origin_y: f32,
}

impl GridLayout {
    pub const fn new(cell_size: f32, padding: f32, origin_x: f32, origin_y: f32) -> Self {
        Self {
            cell_size,
            padding,
            origin_x,
            origin_y,
        }
    }

    /// Top-left pixel of a cell: `origin + index * (cell_size + padding)`
    pub fn cell_to_pixel(&self, row: usize, col: usize) -> PixelPos {
        let stride = self.cell_size + self.padding;
        PixelPos {
            x: self.origin_x + col as f32 * stride,
            y: self.origin_y + row as f32 * stride,
        }
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE, DEFAULT_CELL_PADDING, 0.0, 0.0)
    }
}

/// Phase durations, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTiming {
    pub move_secs: f32,
    pub merge_secs: f32,
    pub spawn_secs: f32,
    /// Frame deltas above this are clamped down to it
    pub max_frame_delta_secs: f32,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            move_secs: MOVE_DURATION_SECS,
            merge_secs: MERGE_DURATION_SECS,
            spawn_secs: SPAWN_DURATION_SECS,
            max_frame_delta_secs: MAX_FRAME_DELTA_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_pixel_default() {
        let layout = GridLayout::default();
        assert_eq!(layout.cell_to_pixel(0, 0), PixelPos::new(0.0, 0.0));
        assert_eq!(layout.cell_to_pixel(1, 3), PixelPos::new(330.0, 110.0));
    }

    #[test]
    fn test_cell_to_pixel_with_origin() {
        let layout = GridLayout::new(50.0, 5.0, 20.0, 40.0);
        assert_eq!(layout.cell_to_pixel(2, 1), PixelPos::new(75.0, 150.0));
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = PixelPos::new(0.0, 10.0);
        let b = PixelPos::new(100.0, 30.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), PixelPos::new(50.0, 20.0));
    }
}
