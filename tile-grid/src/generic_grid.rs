//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Single resolution cell grids

use crate::error::{GridError, GridResult};
use crate::grid::{Extent, ExtentInt, Origin};
use crate::grid_iterator::CellIterator;

/// Rectangular grid of equally sized cells over an arbitrary extent
///
/// The signs of the resolutions select the origin corner, i.e. the corner of
/// cell `(0, 0)`:
///
/// ```text
///   resolution_x > 0, resolution_y < 0: top-left
///
///   (0,0) _ _ _ _ _ _ (i,0)
///   |_|_ _ _ _ _ _ _ _|_|
///   |                   |
///   (0,j) _ _ _ _ _ _ (i,j)
///   |_|_ _ _ _ _ _ _ _|_|
/// ```
#[derive(Clone, Debug)]
pub struct GenericGrid {
    extent: Extent,
    /// Signed cell width. Positive: columns grow to the right.
    resolution_x: f64,
    /// Signed cell height. Positive: rows grow upwards.
    resolution_y: f64,
    origin: Origin,
    /// Cell numbers of origin and end corner
    extent_address: ExtentInt,
}

impl GenericGrid {
    pub fn new(extent: Extent, resolution_x: f64, resolution_y: f64) -> GridResult<GenericGrid> {
        if !extent.is_valid() {
            return Err(GridError::InvalidExtent(extent));
        }
        if !resolution_x.is_finite() {
            return Err(GridError::InvalidResolution(resolution_x));
        }
        if !resolution_y.is_finite() {
            return Err(GridError::InvalidResolution(resolution_y));
        }
        let origin = Origin::from_signs(resolution_x, resolution_y).ok_or(
            GridError::InvalidResolution(if resolution_x == 0.0 {
                resolution_x
            } else {
                resolution_y
            }),
        )?;
        // Cell numbers and counts are u32
        if extent.width() / resolution_x.abs() >= u32::MAX as f64 {
            return Err(GridError::InvalidResolution(resolution_x));
        }
        if extent.height() / resolution_y.abs() >= u32::MAX as f64 {
            return Err(GridError::InvalidResolution(resolution_y));
        }
        let mut grid = GenericGrid {
            extent,
            resolution_x,
            resolution_y,
            origin,
            extent_address: ExtentInt {
                minx: 0,
                miny: 0,
                maxx: 0,
                maxy: 0,
            },
        };
        let (ox, oy) = grid.origin_point();
        let (ex, ey) = grid.end_point();
        let (min_col, min_row) = grid
            .cell_address(ox, oy)
            .ok_or(GridError::InvalidExtent(extent))?;
        let (max_col, max_row) = grid
            .cell_address(ex, ey)
            .ok_or(GridError::InvalidExtent(extent))?;
        grid.extent_address = ExtentInt {
            minx: min_col,
            miny: min_row,
            maxx: max_col,
            maxy: max_row,
        };
        debug!(
            "Generic grid {:?} with {} cells of {}x{} ({})",
            extent,
            grid.nb_cells(),
            resolution_x,
            resolution_y,
            origin
        );
        Ok(grid)
    }
    pub fn extent(&self) -> &Extent {
        &self.extent
    }
    pub fn resolution_x(&self) -> f64 {
        self.resolution_x
    }
    pub fn resolution_y(&self) -> f64 {
        self.resolution_y
    }
    pub fn origin(&self) -> Origin {
        self.origin
    }
    /// Corner of cell `(0, 0)`
    pub fn origin_point(&self) -> (f64, f64) {
        let e = &self.extent;
        match self.origin {
            Origin::BottomLeft => (e.minx, e.miny),
            Origin::BottomRight => (e.maxx, e.miny),
            Origin::TopLeft => (e.minx, e.maxy),
            Origin::TopRight => (e.maxx, e.maxy),
        }
    }
    /// Corner opposite to the origin
    pub fn end_point(&self) -> (f64, f64) {
        let e = &self.extent;
        match self.origin {
            Origin::BottomLeft => (e.maxx, e.maxy),
            Origin::BottomRight => (e.minx, e.maxy),
            Origin::TopLeft => (e.maxx, e.miny),
            Origin::TopRight => (e.minx, e.miny),
        }
    }
    /// Cell numbers of the whole grid
    pub fn extent_address(&self) -> &ExtentInt {
        &self.extent_address
    }
    pub fn cell_area(&self) -> f64 {
        (self.resolution_x * self.resolution_y).abs()
    }
    pub fn nb_cells_x(&self) -> u32 {
        self.extent_address.maxx + 1
    }
    pub fn nb_cells_y(&self) -> u32 {
        self.extent_address.maxy + 1
    }
    pub fn nb_cells(&self) -> u64 {
        self.nb_cells_x() as u64 * self.nb_cells_y() as u64
    }
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.extent.contains_point(x, y)
    }
    /// Extent of a cell
    pub fn cell_extent(&self, col: u32, row: u32) -> Extent {
        let (col, row) = (col as f64, row as f64);
        let (minx, maxx) = if self.origin.is_left() {
            (
                self.extent.minx + col * self.resolution_x,
                self.extent.minx + (col + 1.0) * self.resolution_x,
            )
        } else {
            (
                self.extent.maxx + (col + 1.0) * self.resolution_x,
                self.extent.maxx + col * self.resolution_x,
            )
        };
        let (miny, maxy) = if self.origin.is_top() {
            (
                self.extent.maxy + (row + 1.0) * self.resolution_y,
                self.extent.maxy + row * self.resolution_y,
            )
        } else {
            (
                self.extent.miny + row * self.resolution_y,
                self.extent.miny + (row + 1.0) * self.resolution_y,
            )
        };
        Extent {
            minx,
            miny,
            maxx,
            maxy,
        }
    }
    /// Cell `(col, row)` containing a point, `None` outside of the grid extent
    ///
    /// A point on the outer border of the extent belongs to the last cell
    /// inside the grid.
    pub fn cell_address(&self, x: f64, y: f64) -> Option<(u32, u32)> {
        if !self.contains_point(x, y) {
            return None;
        }
        let offset_x = if self.origin.is_left() {
            x - self.extent.minx
        } else {
            self.extent.maxx - x
        };
        let offset_y = if self.origin.is_top() {
            self.extent.maxy - y
        } else {
            y - self.extent.miny
        };
        let mut col = (offset_x / self.resolution_x).abs();
        let mut row = (offset_y / self.resolution_y).abs();
        if (x == self.extent.minx || x == self.extent.maxx) && col.fract() == 0.0 {
            col = (col - 1.0).max(0.0);
        }
        if (y == self.extent.miny || y == self.extent.maxy) && row.fract() == 0.0 {
            row = (row - 1.0).max(0.0);
        }
        Some((col.floor() as u32, row.floor() as u32))
    }
    /// Cell numbers covering `extent`, `None` if a corner is outside of the grid
    ///
    /// The corners may be given in any order.
    pub fn extent_address_of(&self, extent: &Extent) -> Option<ExtentInt> {
        let (col_from, row_from) = self.cell_address(extent.minx, extent.miny)?;
        let (col_to, row_to) = self.cell_address(extent.maxx, extent.maxy)?;
        Some(ExtentInt {
            minx: col_from.min(col_to),
            miny: row_from.min(row_to),
            maxx: col_from.max(col_to),
            maxy: row_from.max(row_to),
        })
    }
    /// Iterate over all cells, column by column
    pub fn iter(&self) -> CellIterator<'_> {
        CellIterator::new(self)
    }
}

impl<'a> IntoIterator for &'a GenericGrid {
    type Item = (Extent, u32, u32);
    type IntoIter = CellIterator<'a>;

    fn into_iter(self) -> CellIterator<'a> {
        self.iter()
    }
}
