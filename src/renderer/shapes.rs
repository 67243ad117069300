//! Shape queries for the dune scene
//!
//! Everything here is in screen space: world x is shifted by the viewport,
//! y is used as-is (downward).

use glam::DVec2;

use super::colors;
use crate::sim::{Ball, Terrain, Viewport, arc_samples, deepest_sample, out_of_reach};

/// Side length of a sample marker square (pixels)
pub const MARKER_SIZE: f64 = 4.0;

/// Debug square drawn at one collision sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleMarker {
    /// Screen-space center
    pub center: DVec2,
    pub color: &'static str,
}

impl SampleMarker {
    /// Top-left corner, for `fill_rect`
    pub fn corner(&self) -> DVec2 {
        self.center - DVec2::splat(MARKER_SIZE / 2.0)
    }
}

/// Closed terrain silhouette: `segments + 1` surface points across the
/// visible width, then the bottom-right and bottom-left corners.
pub fn terrain_outline(
    terrain: &Terrain,
    viewport: &Viewport,
    width: f64,
    height: f64,
    segments: usize,
) -> Vec<DVec2> {
    let segments = segments.max(1);
    let step = width / segments as f64;

    let mut outline = Vec::with_capacity(segments + 3);
    for n in 0..=segments {
        let x = n as f64 * step;
        outline.push(DVec2::new(x, terrain.height_at(viewport.to_world(x))));
    }
    outline.push(DVec2::new(width, height));
    outline.push(DVec2::new(0.0, height));
    outline
}

/// Ball position on screen
pub fn ball_center(ball: &Ball, viewport: &Viewport) -> DVec2 {
    DVec2::new(viewport.to_screen(ball.pos.x), ball.pos.y)
}

/// One marker per arc sample while the ball is within reach of the ground.
///
/// The deepest overlapping sample is coloured [`colors::DEEPEST`]. Empty when
/// the cheap reject rules out contact.
pub fn sample_markers<F>(
    ball: &Ball,
    viewport: &Viewport,
    count: usize,
    height: &F,
) -> Vec<SampleMarker>
where
    F: Fn(f64) -> f64,
{
    if out_of_reach(ball, height) {
        return Vec::new();
    }

    let deepest = deepest_sample(ball, count, height).map(|s| s.point);
    arc_samples(ball, count)
        .map(|point| SampleMarker {
            center: DVec2::new(viewport.to_screen(point.x), point.y),
            color: if Some(point) == deepest {
                colors::DEEPEST
            } else {
                colors::SAMPLE
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn ball_at(x: f64, y: f64) -> Ball {
        let mut ball = Ball::from_settings(&Settings::default());
        ball.pos = DVec2::new(x, y);
        ball
    }

    #[test]
    fn test_outline_samples_scrolled_terrain() {
        let terrain = Terrain::fixture(600.0);
        let viewport = Viewport { x: 250.0 };

        let outline = terrain_outline(&terrain, &viewport, 1000.0, 800.0, 100);

        assert_eq!(outline.len(), 103);
        assert_eq!(outline[0], DVec2::new(0.0, terrain.height_at(250.0)));
        assert!((outline[100].x - 1000.0).abs() < 1e-9);
        assert_eq!(outline[101], DVec2::new(1000.0, 800.0));
        assert_eq!(outline[102], DVec2::new(0.0, 800.0));
    }

    #[test]
    fn test_outline_zero_segments_still_closes() {
        let outline = terrain_outline(&Terrain::flat(600.0), &Viewport::default(), 1000.0, 800.0, 0);
        assert_eq!(outline.len(), 4);
    }

    #[test]
    fn test_ball_center_follows_viewport() {
        let ball = Ball::from_settings(&Settings::default());
        let viewport = Viewport { x: 40.0 };
        assert_eq!(ball_center(&ball, &viewport), DVec2::new(60.0, 50.0));
    }

    #[test]
    fn test_no_markers_when_out_of_reach() {
        let terrain = Terrain::flat(600.0);
        let ball = ball_at(0.0, 100.0);
        let markers = sample_markers(&ball, &Viewport::default(), 10, &|x| terrain.height_at(x));
        assert!(markers.is_empty());
    }

    #[test]
    fn test_deepest_marker_gets_second_colour() {
        // Bottom of the ball (n = 5, straight down) sits 10 below flat ground
        let terrain = Terrain::flat(600.0);
        let ball = ball_at(100.0, 580.0);
        let viewport = Viewport { x: 100.0 };

        let markers = sample_markers(&ball, &viewport, 10, &|x| terrain.height_at(x));

        assert_eq!(markers.len(), 10);
        for (n, marker) in markers.iter().enumerate() {
            let expected = if n == 5 { colors::DEEPEST } else { colors::SAMPLE };
            assert_eq!(marker.color, expected, "marker {}", n);
        }
        let bottom = markers[5].center;
        assert!(bottom.x.abs() < 1e-9);
        assert!((bottom.y - 610.0).abs() < 1e-9);
        assert_eq!(markers[5].corner(), bottom - DVec2::splat(2.0));
    }

    #[test]
    fn test_in_reach_without_overlap_has_no_deepest() {
        let terrain = Terrain::flat(600.0);
        let ball = ball_at(0.0, 560.0);
        let markers = sample_markers(&ball, &Viewport::default(), 10, &|x| terrain.height_at(x));
        assert_eq!(markers.len(), 10);
        assert!(markers.iter().all(|m| m.color == colors::SAMPLE));
    }
}
