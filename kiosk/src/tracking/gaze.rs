use super::transform::{self, FrameSize, GazeOffset};

/// Where the eyes point right now, fed by whichever input modality is
/// active.
#[derive(Debug, Default)]
pub struct GazeTracker {
    offset: GazeOffset,
    target_visible: bool,
}

impl GazeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> GazeOffset {
        self.offset
    }

    pub fn target_visible(&self) -> bool {
        self.target_visible
    }

    pub fn update_from_pointer(&mut self, x: f64, y: f64, viewport: FrameSize) {
        self.offset = transform::pointer_offset(x, y, viewport);
        self.target_visible = true;
    }

    /// Applies a sensor reading. A lost target keeps the last offset so
    /// the eyes hold their position instead of snapping back to center.
    pub fn update_from_sensor(&mut self, coordinates: Option<(f64, f64)>, frame: FrameSize) {
        match coordinates {
            Some((x, y)) => {
                self.offset = transform::sensor_offset(x, y, frame);
                self.target_visible = true;
            }
            None => self.target_visible = false,
        }
    }

    /// Marks the target as gone without moving the eyes, used when the
    /// detector becomes unreachable or the mode session ends.
    pub fn clear_target(&mut self) {
        self.target_visible = false;
    }
}
