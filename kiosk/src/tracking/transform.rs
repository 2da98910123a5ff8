/// Source dimensions a raw coordinate is measured against: the viewport
/// for pointer input, the camera's native resolution for sensor input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSize {
    pub width: f64,
    pub height: f64,
}

impl FrameSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Normalized display offset consumed by the eye renderer, in display
/// units relative to the centered rest position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GazeOffset {
    pub x: f64,
    pub y: f64,
}

/// Horizontal travel, in display units, across the full source width.
pub const DUAL_AXIS_SCALE_X: f64 = 40.0;
pub const DUAL_AXIS_SCALE_Y: f64 = 20.0;
/// Wider sweep used by the single-axis idle screen.
pub const SINGLE_AXIS_SCALE: f64 = 70.0;

/// Maps a pointer position to an eye offset.
pub fn pointer_offset(x: f64, y: f64, viewport: FrameSize) -> GazeOffset {
    GazeOffset {
        x: (x / viewport.width - 0.5) * DUAL_AXIS_SCALE_X,
        y: (y / viewport.height - 0.5) * DUAL_AXIS_SCALE_Y,
    }
}

/// Single-axis variant for the idle eyes screen.
pub fn pointer_offset_single(x: f64, viewport_width: f64) -> f64 {
    (x / viewport_width - 0.5) * SINGLE_AXIS_SCALE
}

/// Maps a camera-frame position to an eye offset. The camera faces the
/// user, so the horizontal axis is mirrored to make the eyes follow the
/// subject instead of opposing them.
pub fn sensor_offset(x: f64, y: f64, frame: FrameSize) -> GazeOffset {
    GazeOffset {
        x: (0.5 - x / frame.width) * DUAL_AXIS_SCALE_X,
        y: (y / frame.height - 0.5) * DUAL_AXIS_SCALE_Y,
    }
}
