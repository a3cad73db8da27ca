//! Balloon grid layout
//!
//! Pure function of the viewport size. The grid is right-aligned: its
//! total width (balloons plus gaps) ends at `right_edge` of the viewport,
//! while consecutive balloons step by exactly `spacing_x` / `spacing_y`.

use glam::Vec2;

use crate::tuning::LayoutTuning;

/// Computed grid placement
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// Display size of every balloon
    pub balloon_size: Vec2,
    /// Horizontal and vertical step between neighbours
    pub spacing: Vec2,
    /// Position of the (0, 0) balloon
    pub origin: Vec2,
    /// Balloon positions in row-major order
    pub positions: Vec<Vec2>,
}

/// Lay out `rows * cols` balloons for the given viewport
pub fn grid_layout(viewport: Vec2, tuning: &LayoutTuning) -> GridLayout {
    let rows = tuning.rows;
    let cols = tuning.cols;

    let balloon_area = viewport.x * viewport.y * tuning.area_fraction;
    let width = (balloon_area * tuning.aspect_ratio).sqrt();
    let height = width / tuning.aspect_ratio;

    let spacing = Vec2::new(viewport.x * tuning.spacing_x, viewport.y * tuning.spacing_y);

    let total_width = cols as f32 * width + cols.saturating_sub(1) as f32 * spacing.x;
    let end_x = viewport.x * tuning.right_edge;
    let origin = Vec2::new(end_x - total_width, viewport.y * tuning.top_edge);

    let positions = (0..rows)
        .flat_map(|row| {
            (0..cols).map(move |col| origin + Vec2::new(col as f32 * spacing.x, row as f32 * spacing.y))
        })
        .collect();

    GridLayout {
        balloon_size: Vec2::new(width, height),
        spacing,
        origin,
        positions,
    }
}
