use crate::raster::{BitPlane, Raster};
use std::cmp::{max, min};

/// Side of a pixel cell on which a selection boundary runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Top,
    Right,
    Bottom,
}

/// One unit-length piece of the selection outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub x: u32,
    pub y: u32,
    pub side: Side,
}

/// Which pixels are selected. Same shape and bit layout as the `Raster` it belongs to,
/// and never touches that raster itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionMask {
    plane: BitPlane,
}
impl SelectionMask {
    pub fn new(width: u32, height: u32) -> Self {
        SelectionMask {
            plane: BitPlane::new(width, height),
        }
    }

    /// An empty mask shaped like `raster`.
    pub fn for_raster(raster: &Raster) -> Self {
        Self::new(raster.width(), raster.height())
    }

    pub fn width(&self) -> u32 {
        self.plane.width
    }

    pub fn height(&self) -> u32 {
        self.plane.height
    }

    pub(crate) fn plane(&self) -> &BitPlane {
        &self.plane
    }

    /// Coordinates are not checked against the mask extent; callers clamp.
    pub fn select_point(&mut self, x: u32, y: u32) {
        self.plane.set(x, y, true);
    }

    /// Coordinates are not checked against the mask extent; callers clamp.
    pub fn deselect_point(&mut self, x: u32, y: u32) {
        self.plane.set(x, y, false);
    }

    /// Flip the selection state of one pixel (additive selection).
    pub fn toggle_point(&mut self, x: u32, y: u32) {
        if self.plane.get(x, y) {
            self.deselect_point(x, y);
        } else {
            self.select_point(x, y);
        }
    }

    /// Replace the selection with the closed rectangle spanned by two corners.
    ///
    /// Corner order does not matter and equal corners select a single pixel. The part of the
    /// rectangle outside the mask is ignored. Each call starts from an empty mask.
    pub fn select_rectangle(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.deselect_all();
        if self.plane.width == 0 || self.plane.height == 0 {
            return;
        }
        let low_x = max(min(x0, x1), 0) as i64;
        let low_y = max(min(y0, y1), 0) as i64;
        let high_x = min(max(x0, x1) as i64, self.plane.width as i64 - 1);
        let high_y = min(max(y0, y1) as i64, self.plane.height as i64 - 1);
        for y in low_y..=high_y {
            for x in low_x..=high_x {
                self.plane.set(x as u32, y as u32, true);
            }
        }
    }

    pub fn deselect_all(&mut self) {
        self.plane.clear();
    }

    /// Whether a pixel is selected. Anything outside the mask reads as unselected.
    pub fn is_selected(&self, x: i32, y: i32) -> bool {
        self.plane.get_clipped(x, y)
    }

    pub fn is_empty(&self) -> bool {
        self.plane.bits.none()
    }

    pub fn count(&self) -> usize {
        self.plane.bits.iter().filter(|b| *b).count()
    }

    /// Change shape. The mask comes back empty.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.plane.resize(width, height);
    }

    /// Every boundary edge of the selection.
    ///
    /// A selected pixel contributes an edge on each side whose neighbour is unselected, so
    /// edges shared by two selected pixels are never emitted. Pixels are visited column by
    /// column; each pixel yields its edges in `Left, Top, Right, Bottom` order.
    pub fn outline(&self) -> Vec<Edge> {
        let mut edges = vec![];
        for x in 0..self.plane.width {
            for y in 0..self.plane.height {
                if !self.plane.get(x, y) {
                    continue;
                }
                let (sx, sy) = (x as i32, y as i32);
                let neighbours = [
                    (Side::Left, sx - 1, sy),
                    (Side::Top, sx, sy - 1),
                    (Side::Right, sx + 1, sy),
                    (Side::Bottom, sx, sy + 1),
                ];
                for (side, nx, ny) in neighbours {
                    if !self.is_selected(nx, ny) {
                        edges.push(Edge { x, y, side });
                    }
                }
            }
        }
        edges
    }
}
