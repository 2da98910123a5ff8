mod gaze;
mod transform;

pub use gaze::GazeTracker;
pub use transform::{
    DUAL_AXIS_SCALE_X, DUAL_AXIS_SCALE_Y, FrameSize, GazeOffset, SINGLE_AXIS_SCALE,
    pointer_offset, pointer_offset_single, sensor_offset,
};
