//! Render queries for host renderers
//!
//! The simulation does not draw. Hosts sample the terrain silhouette, the
//! ball and the contact debug markers here and paint them on a canvas.

pub mod shapes;

pub use shapes::{MARKER_SIZE, SampleMarker, ball_center, sample_markers, terrain_outline};

/// Canvas fill styles for scene elements
pub mod colors {
    /// Sand
    pub const DUNE: &str = "#c2b280";
    /// Deep purple
    pub const BALL: &str = "#3e236e";
    /// Arc sample markers
    pub const SAMPLE: &str = "red";
    /// The deepest overlapping sample
    pub const DEEPEST: &str = "blue";
    pub const BACKGROUND: &str = "white";
}
