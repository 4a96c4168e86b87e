/// Layout tree and frame composition for the display host.
pub mod frames;
pub mod node;

pub use frames::{FrameOptions, Notice, StationView, placeholder_frame, station_frame};
pub use node::{Canvas, Layout, Node, Root};
