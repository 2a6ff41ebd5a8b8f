//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Multi-resolution tile pyramids

use crate::error::{GridError, GridResult};
use crate::grid::{Extent, ExtentInt, Origin, Unit, PIXEL_SCREEN_WIDTH};
use crate::grid_iterator::GridIterator;
use crate::srs::{GridDefinition, GEODETIC, LV03, LV95, WEB_MERCATOR};

// Relative tolerance (in tile sizes) for matching tile borders
const EPSILON: f64 = 0.0000001;

/// Tile address `(zoom, col, row)`
pub type TileAddress = (u8, u32, u32);

/// Construction parameters of a [`TileGrid`]
#[derive(PartialEq, Clone, Debug)]
pub struct TileGridOptions {
    /// Sub-extent of the grid bounds. Defaults to the grid bounds or to the
    /// Swiss region with `use_swiss_extent`.
    pub extent: Option<Extent>,
    /// Width and height of a tile in pixels
    pub tile_size_px: u32,
    /// `Origin::TopLeft` or `Origin::BottomLeft`
    pub origin: Origin,
    /// Geodetic grid only: two 180° tiles at zoom 0 instead of one 360° tile
    pub tms_compatible: bool,
    /// Default to the Swiss region instead of the grid bounds
    pub use_swiss_extent: bool,
}

impl Default for TileGridOptions {
    fn default() -> Self {
        TileGridOptions {
            extent: None,
            tile_size_px: 256,
            origin: Origin::TopLeft,
            tms_compatible: true,
            use_swiss_extent: false,
        }
    }
}

/// Tile pyramid anchored at the bounds of a reference system
#[derive(Clone, Debug)]
pub struct TileGrid {
    definition: GridDefinition,
    /// Region of interest used for iteration and tile counts
    extent: Extent,
    origin: Origin,
    tile_size_px: u32,
    tms_compatible: bool,
    /// Units-per-pixel of each zoom level, coarsest first
    resolutions: Vec<f64>,
}

impl TileGrid {
    /// Swiss LV03 grid (EPSG:21781)
    pub fn lv03() -> TileGrid {
        TileGrid::with_defaults(&LV03)
    }
    /// Swiss LV95 grid (EPSG:2056)
    pub fn lv95() -> TileGrid {
        TileGrid::with_defaults(&LV95)
    }
    /// Global Web Mercator grid (EPSG:3857)
    pub fn web_mercator() -> TileGrid {
        TileGrid::with_defaults(&WEB_MERCATOR)
    }
    /// Global geodetic grid (EPSG:4326), TMS compatible
    pub fn geodetic() -> TileGrid {
        TileGrid::with_defaults(&GEODETIC)
    }

    pub fn new(definition: &GridDefinition, options: TileGridOptions) -> GridResult<TileGrid> {
        match options.origin {
            Origin::TopLeft | Origin::BottomLeft => {}
            origin => return Err(GridError::UnsupportedOrigin(origin)),
        }
        if options.tile_size_px == 0 {
            return Err(GridError::InvalidTileSize(options.tile_size_px));
        }
        if let Some(extent) = options.extent {
            if !extent.is_valid() {
                return Err(GridError::InvalidExtent(extent));
            }
            if !definition.bounds.contains(&extent) {
                return Err(GridError::ExtentOutOfBounds {
                    extent,
                    bounds: definition.bounds,
                });
            }
        }
        Ok(TileGrid::build(definition, options))
    }

    fn with_defaults(definition: &GridDefinition) -> TileGrid {
        TileGrid::build(definition, TileGridOptions::default())
    }

    fn build(definition: &GridDefinition, options: TileGridOptions) -> TileGrid {
        let extent = match options.extent {
            Some(extent) => extent,
            None if options.use_swiss_extent => definition.swiss_bounds,
            None => definition.bounds,
        };
        let resolutions = definition
            .resolutions
            .resolutions(options.tms_compatible, options.tile_size_px);
        debug!(
            "Tile grid {} (EPSG:{}) with extent {:?}, origin {}, {} levels",
            definition.name,
            definition.srid,
            extent,
            options.origin,
            resolutions.len()
        );
        TileGrid {
            definition: definition.clone(),
            extent,
            origin: options.origin,
            tile_size_px: options.tile_size_px,
            tms_compatible: options.tms_compatible,
            resolutions,
        }
    }

    pub fn name(&self) -> &'static str {
        self.definition.name
    }
    pub fn srid(&self) -> i32 {
        self.definition.srid
    }
    pub fn unit(&self) -> Unit {
        self.definition.unit
    }
    pub fn meters_per_unit(&self) -> f64 {
        self.definition.unit.meters_per_unit()
    }
    pub fn tile_address_template(&self) -> &'static str {
        self.definition.tile_address_template
    }
    /// Absolute bounds of the reference system
    pub fn bounds(&self) -> &Extent {
        &self.definition.bounds
    }
    pub fn extent(&self) -> &Extent {
        &self.extent
    }
    pub fn origin(&self) -> Origin {
        self.origin
    }
    pub fn tile_size_px(&self) -> u32 {
        self.tile_size_px
    }
    pub fn tms_compatible(&self) -> bool {
        self.tms_compatible
    }
    pub fn resolutions(&self) -> &[f64] {
        &self.resolutions
    }
    pub fn nlevels(&self) -> u8 {
        self.resolutions.len() as u8
    }
    pub fn maxzoom(&self) -> u8 {
        self.nlevels() - 1
    }
    /// Range over x of the grid extent
    pub fn x_span(&self) -> f64 {
        self.extent.width()
    }
    /// Range over y of the grid extent
    pub fn y_span(&self) -> f64 {
        self.extent.height()
    }

    fn check_zoom(&self, zoom: u8) -> GridResult<()> {
        if (zoom as usize) < self.resolutions.len() {
            Ok(())
        } else {
            Err(GridError::ZoomOutOfRange {
                zoom,
                maxzoom: self.maxzoom(),
            })
        }
    }
    pub(crate) fn check_zoom_range(&self, minzoom: u8, maxzoom: u8) -> GridResult<()> {
        self.check_zoom(minzoom)?;
        self.check_zoom(maxzoom)?;
        if minzoom > maxzoom {
            return Err(GridError::InvalidZoomRange { minzoom, maxzoom });
        }
        Ok(())
    }

    /// Tile width in grid units
    pub fn tile_size(&self, zoom: u8) -> GridResult<f64> {
        self.check_zoom(zoom)?;
        Ok(self.tile_size_unchecked(zoom))
    }
    fn tile_size_unchecked(&self, zoom: u8) -> f64 {
        self.tile_size_px as f64 * self.resolutions[zoom as usize]
    }

    /// Extent of a given tile
    pub fn tile_bounds(&self, zoom: u8, col: u32, row: u32) -> GridResult<Extent> {
        self.check_zoom(zoom)?;
        Ok(self.tile_bounds_unchecked(zoom, col, row))
    }
    pub(crate) fn tile_bounds_unchecked(&self, zoom: u8, col: u32, row: u32) -> Extent {
        let tile_size = self.tile_size_unchecked(zoom);
        let bounds = &self.definition.bounds;
        let (col, row) = (col as f64, row as f64);
        let minx = bounds.minx + col * tile_size;
        let maxx = bounds.minx + (col + 1.0) * tile_size;
        match self.origin {
            Origin::BottomLeft => Extent {
                minx,
                miny: bounds.miny + row * tile_size,
                maxx,
                maxy: bounds.miny + (row + 1.0) * tile_size,
            },
            _ => Extent {
                minx,
                miny: bounds.maxy - (row + 1.0) * tile_size,
                maxx,
                maxy: bounds.maxy - row * tile_size,
            },
        }
    }

    /// Address `(col, row)` of the tile containing a point
    ///
    /// A point on a border between two tiles belongs to the tile further
    /// from the origin: right of it, and below (top-left) or above
    /// (bottom-left) it. Only on the outer grid bounds does a point stay in
    /// the tile on the interior side.
    pub fn tile_address(&self, zoom: u8, x: f64, y: f64) -> GridResult<(u32, u32)> {
        self.check_zoom(zoom)?;
        let bounds = &self.definition.bounds;
        if !bounds.contains_point(x, y) {
            return Err(GridError::PointOutOfBounds { x, y });
        }
        let tile_size = self.tile_size_unchecked(zoom);
        let offset_x = (x - bounds.minx).abs();
        let offset_y = match self.origin {
            Origin::BottomLeft => (y - bounds.miny).abs(),
            _ => (bounds.maxy - y).abs(),
        };
        let mut col = offset_x / tile_size;
        let mut row = offset_y / tile_size;
        if (x == bounds.minx || x == bounds.maxx) && col.fract() == 0.0 {
            col = (col - 1.0).max(0.0);
        }
        if (y == bounds.miny || y == bounds.maxy) && row.fract() == 0.0 {
            row = (row - 1.0).max(0.0);
        }
        Ok((col.floor() as u32, row.floor() as u32))
    }

    /// Min and max tile numbers covering `extent` (grid extent if `None`)
    ///
    /// With `contained`, a border which only touches a neighbouring tile
    /// (within a relative tolerance) does not add that tile.
    pub fn extent_address(
        &self,
        zoom: u8,
        extent: Option<&Extent>,
        contained: bool,
    ) -> GridResult<ExtentInt> {
        let extent = extent.unwrap_or(&self.extent);
        // (near, far) border on the y axis, seen from the origin
        let (near_y, far_y) = match self.origin {
            Origin::BottomLeft => (extent.miny, extent.maxy),
            _ => (extent.maxy, extent.miny),
        };
        let (mut mincol, mut minrow) = self.tile_address(zoom, extent.minx, near_y)?;
        let (mut maxcol, mut maxrow) = self.tile_address(zoom, extent.maxx, far_y)?;

        if contained {
            let tolerance = EPSILON * self.tile_size_unchecked(zoom);
            // Far borders on the start of the last tile
            let last = self.tile_bounds_unchecked(zoom, maxcol, maxrow);
            if maxcol > mincol && (last.minx - extent.maxx).abs() <= tolerance {
                maxcol -= 1;
            }
            let last_near_y = match self.origin {
                Origin::BottomLeft => last.miny,
                _ => last.maxy,
            };
            if maxrow > minrow && (last_near_y - far_y).abs() <= tolerance {
                maxrow -= 1;
            }
            // Near borders a hair before the end of the first tile
            let first = self.tile_bounds_unchecked(zoom, mincol, minrow);
            if mincol < maxcol && (first.maxx - extent.minx).abs() <= tolerance {
                mincol += 1;
            }
            let first_far_y = match self.origin {
                Origin::BottomLeft => first.maxy,
                _ => first.miny,
            };
            if minrow < maxrow && (first_far_y - near_y).abs() <= tolerance {
                minrow += 1;
            }
        }
        Ok(ExtentInt {
            minx: mincol,
            miny: minrow,
            maxx: maxcol,
            maxy: maxrow,
        })
    }

    /// Iterate over all tiles of the grid extent, zoom level by zoom level
    pub fn iter_grid(&self, minzoom: u8, maxzoom: u8) -> GridResult<GridIterator<'_>> {
        self.check_zoom_range(minzoom, maxzoom)?;
        let limits = (minzoom..=maxzoom)
            .map(|zoom| self.extent_address(zoom, None, false))
            .collect::<GridResult<Vec<_>>>()?;
        Ok(GridIterator::new(self, minzoom, limits))
    }

    pub fn number_of_x_tiles_at_zoom(&self, zoom: u8) -> GridResult<u32> {
        Ok(self.extent_address(zoom, None, false)?.width())
    }
    pub fn number_of_y_tiles_at_zoom(&self, zoom: u8) -> GridResult<u32> {
        Ok(self.extent_address(zoom, None, false)?.height())
    }
    pub fn number_of_tiles_at_zoom(&self, zoom: u8) -> GridResult<u64> {
        Ok(self.extent_address(zoom, None, false)?.count())
    }
    /// Number of tiles between two zoom levels (default: all levels)
    pub fn total_number_of_tiles(
        &self,
        minzoom: Option<u8>,
        maxzoom: Option<u8>,
    ) -> GridResult<u64> {
        let minzoom = minzoom.unwrap_or(0);
        let maxzoom = maxzoom.unwrap_or_else(|| self.maxzoom());
        self.check_zoom_range(minzoom, maxzoom)?;
        (minzoom..=maxzoom).try_fold(0, |total: u64, zoom| -> GridResult<u64> {
            Ok(total + self.number_of_tiles_at_zoom(zoom)?)
        })
    }

    /// Units-per-pixel of a zoom level
    pub fn resolution(&self, zoom: u8) -> GridResult<f64> {
        self.check_zoom(zoom)?;
        Ok(self.resolutions[zoom as usize])
    }
    /// Zoom level of a resolution of the resolution table
    pub fn zoom(&self, resolution: f64) -> GridResult<u8> {
        self.resolutions
            .iter()
            .position(|res| *res == resolution)
            .map(|zoom| zoom as u8)
            .ok_or(GridError::UnknownResolution(resolution))
    }
    /// Number of resolutions greater or equal to `resolution`
    fn bisect(&self, resolution: f64) -> usize {
        let (mut lo, mut hi) = (0, self.resolutions.len());
        while lo < hi {
            let mid = (lo + hi) / 2;
            if resolution > self.resolutions[mid] {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        lo
    }
    /// Zoom level with the nearest resolution
    ///
    /// `unit` is the unit of `resolution`. On a tie the coarser level wins.
    pub fn closest_zoom(&self, resolution: f64, unit: Unit) -> u8 {
        let resolution = self.unit().convert_from(resolution, unit);
        let lo = self.bisect(resolution);
        if lo == 0 {
            return 0;
        }
        if lo == self.resolutions.len() {
            return self.maxzoom();
        }
        let finer = self.resolutions[lo];
        let coarser = self.resolutions[lo - 1];
        if (finer - resolution).abs() < (coarser - resolution).abs() {
            lo as u8
        } else {
            (lo - 1) as u8
        }
    }
    /// Coarsest zoom level with a resolution at least as detailed as `resolution`
    ///
    /// Bounded by the first and the last zoom level.
    pub fn ceiling_zoom(&self, resolution: f64, unit: Unit) -> u8 {
        let resolution = self.unit().convert_from(resolution, unit);
        if let Ok(zoom) = self.zoom(resolution) {
            return zoom;
        }
        let lo = self.bisect(resolution);
        if lo == self.resolutions.len() {
            return self.maxzoom();
        }
        lo as u8
    }
    /// Scale denominator based on standardized pixel size (https://www.ogc.org/standards/se)
    pub fn scale(&self, zoom: u8) -> GridResult<f64> {
        let resolution = self.resolution(zoom)? * self.meters_per_unit();
        Ok(resolution / PIXEL_SCREEN_WIDTH)
    }
    /// Overlap with the grid extent (borders included)
    pub fn intersects_extent(&self, extent: &Extent) -> bool {
        self.extent.intersects(extent)
    }

    /// Tiles of zoom level `zoom_parent` intersecting the interior of a tile
    pub fn parent_tiles(
        &self,
        zoom: u8,
        col: u32,
        row: u32,
        zoom_parent: u8,
    ) -> GridResult<Vec<TileAddress>> {
        self.check_zoom_range(zoom_parent, zoom)?;
        if zoom_parent == zoom {
            return Ok(vec![(zoom, col, row)]);
        }
        let tile_bounds = self.tile_bounds_unchecked(zoom, col, row);
        // Tiles of the last column and row may extend beyond the grid bounds
        let query = tile_bounds
            .intersection(&self.definition.bounds)
            .ok_or(GridError::PointOutOfBounds {
                x: tile_bounds.minx,
                y: tile_bounds.miny,
            })?;
        let limits = self.extent_address(zoom_parent, Some(&query), true)?;
        let mut parents = Vec::with_capacity(limits.count() as usize);
        for parent_col in limits.minx..=limits.maxx {
            for parent_row in limits.miny..=limits.maxy {
                parents.push((zoom_parent, parent_col, parent_row));
            }
        }
        Ok(parents)
    }

    /// Tile address formatted with the grid template
    pub fn format_tile_address(&self, zoom: u8, col: u32, row: u32) -> String {
        self.tile_address_template()
            .replace("{zoom}", &zoom.to_string())
            .replace("{tileCol}", &col.to_string())
            .replace("{tileRow}", &row.to_string())
    }
}
