//! Sprite atlas layout
//!
//! Maps an animation frame index to the sub-region of a texture atlas the
//! renderer should sample.

use glam::{UVec2, Vec2, Vec4};
use serde::{Deserialize, Serialize};

/// Uniform grid of equally sized frames, laid out row-major
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SpriteSheetLayout")]
pub struct SpriteSheet {
    /// Frames per row, at least 1
    columns: u32,
    /// Number of rows, at least 1
    rows: u32,
    /// Width of one frame in pixels
    frame_width: u32,
    /// Height of one frame in pixels
    frame_height: u32,
}

/// Unvalidated layout as read from data files
#[derive(Deserialize)]
struct SpriteSheetLayout {
    columns: u32,
    rows: u32,
    frame_width: u32,
    frame_height: u32,
}

impl From<SpriteSheetLayout> for SpriteSheet {
    fn from(layout: SpriteSheetLayout) -> Self {
        Self::new(
            layout.columns,
            layout.rows,
            layout.frame_width,
            layout.frame_height,
        )
    }
}

impl SpriteSheet {
    /// Create a sheet layout. Zero columns or rows are treated as one.
    #[must_use]
    pub fn new(columns: u32, rows: u32, frame_width: u32, frame_height: u32) -> Self {
        Self {
            columns: columns.max(1),
            rows: rows.max(1),
            frame_width,
            frame_height,
        }
    }

    /// Frames per row
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Size of one frame in pixels
    #[must_use]
    pub const fn frame_size(&self) -> UVec2 {
        UVec2::new(self.frame_width, self.frame_height)
    }

    /// Number of cells in the grid
    #[must_use]
    pub const fn cell_count(&self) -> u32 {
        self.columns.saturating_mul(self.rows)
    }

    /// Size of the whole atlas in pixels
    #[must_use]
    pub const fn atlas_size(&self) -> UVec2 {
        UVec2::new(
            self.columns.saturating_mul(self.frame_width),
            self.rows.saturating_mul(self.frame_height),
        )
    }

    /// Grid cell (column, row) of a frame, wrapping past the last cell
    #[must_use]
    pub fn cell(&self, frame: u32) -> UVec2 {
        let columns = self.columns.max(1);
        let index = frame % self.cell_count().max(1);
        UVec2::new(index % columns, index / columns)
    }

    /// Top-left pixel of a frame
    #[must_use]
    pub fn pixel_origin(&self, frame: u32) -> UVec2 {
        let cell = self.cell(frame);
        UVec2::new(
            cell.x.saturating_mul(self.frame_width),
            cell.y.saturating_mul(self.frame_height),
        )
    }

    /// Normalized UV rectangle of a frame as (min_u, min_v, max_u, max_v)
    #[must_use]
    pub fn uv_rect(&self, frame: u32) -> Vec4 {
        let cell = self.cell(frame).as_vec2();
        let step = Vec2::new(
            1.0 / self.columns.max(1) as f32,
            1.0 / self.rows.max(1) as f32,
        );
        let min = cell * step;
        let max = min + step;
        Vec4::new(min.x, min.y, max.x, max.y)
    }
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self::new(1, 1, 32, 32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_regions() {
        let sheet = SpriteSheet::new(4, 2, 16, 32);
        assert_eq!(sheet.cell_count(), 8);
        assert_eq!(sheet.atlas_size(), UVec2::new(64, 64));

        assert_eq!(sheet.cell(5), UVec2::new(1, 1));
        assert_eq!(sheet.pixel_origin(5), UVec2::new(16, 32));

        let uv = sheet.uv_rect(5);
        assert!((uv - Vec4::new(0.25, 0.5, 0.5, 1.0)).abs().max_element() < 1e-6);
    }

    #[test]
    fn test_frame_index_wraps() {
        let sheet = SpriteSheet::new(3, 1, 8, 8);
        assert_eq!(sheet.cell(3), sheet.cell(0));
        assert_eq!(sheet.pixel_origin(4), UVec2::new(8, 0));
    }

    #[test]
    fn test_degenerate_grid() {
        let sheet = SpriteSheet::new(0, 0, 10, 10);
        assert_eq!(sheet.cell_count(), 1);
        assert_eq!(sheet.cell(7), UVec2::ZERO);
        assert_eq!(sheet.uv_rect(7), Vec4::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn test_loaded_layout_is_validated() {
        let sheet: SpriteSheet = serde_json::from_str(
            r#"{"columns":0,"rows":2,"frame_width":16,"frame_height":16}"#,
        )
        .unwrap();
        assert_eq!(sheet.columns(), 1);
        assert_eq!(sheet.rows(), 2);
        assert_eq!(sheet.cell(3), UVec2::new(0, 1));
        assert!(sheet.uv_rect(3).is_finite());

        let text = ron::to_string(&sheet).unwrap();
        let loaded: SpriteSheet = ron::from_str(&text).unwrap();
        assert_eq!(loaded, sheet);
    }

    #[test]
    fn test_huge_grid_saturates() {
        let sheet = SpriteSheet::new(u32::MAX, 2, u32::MAX, 8);
        assert_eq!(sheet.cell_count(), u32::MAX);
        assert_eq!(sheet.atlas_size(), UVec2::new(u32::MAX, 16));
        assert_eq!(sheet.pixel_origin(1), UVec2::new(u32::MAX, 0));
        assert_eq!(sheet.frame_size(), UVec2::new(u32::MAX, 8));
    }
}
