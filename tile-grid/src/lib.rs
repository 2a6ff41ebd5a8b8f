//! A library for map tile grid calculations
//!
//! ## Predefined grids
//!
//! ```rust
//! use tile_grid::{Extent, TileGrid};
//!
//! let grid = TileGrid::lv03();
//! assert_eq!(
//!     grid.tile_bounds(17, 5, 5).unwrap(),
//!     Extent {
//!         minx: 548000.0,
//!         miny: 196400.0,
//!         maxx: 573600.0,
//!         maxy: 222000.0,
//!     }
//! );
//! assert_eq!(grid.tile_address(17, 548000.0, 222000.0).unwrap(), (5, 5));
//! // LV03 addresses are formatted row first
//! assert_eq!(grid.format_tile_address(17, 5, 6), "17/6/5");
//! ```
//!
//! ## Grid iterators
//!
//! ```rust
//! use tile_grid::TileGrid;
//!
//! let grid = TileGrid::web_mercator();
//! for (bounds, z, x, y) in grid.iter_grid(0, 2).unwrap() {
//!     println!("Tile {}/{}/{}: {:?}", z, x, y, bounds);
//! }
//! assert_eq!(grid.total_number_of_tiles(Some(0), Some(2)).unwrap(), 21);
//! ```
//!
//! ## Grid options
//!
//! ```rust
//! use tile_grid::{Origin, TileGrid, TileGridOptions, GEODETIC};
//!
//! let grid = TileGrid::new(
//!     &GEODETIC,
//!     TileGridOptions {
//!         origin: Origin::BottomLeft,
//!         tms_compatible: false,
//!         ..Default::default()
//!     },
//! )
//! .unwrap();
//! assert_eq!(grid.number_of_tiles_at_zoom(0).unwrap(), 1);
//! assert_eq!(grid.number_of_tiles_at_zoom(2).unwrap(), 8);
//! ```
//!
//! ## Generic grids
//!
//! ```rust
//! use tile_grid::{Extent, GenericGrid, Origin};
//!
//! // Negative y resolution: rows grow downwards from the top-left corner
//! let grid = GenericGrid::new(Extent::new(0.0, 0.0, 100.0, 100.0), 5.0, -5.0).unwrap();
//! assert_eq!(grid.origin(), Origin::TopLeft);
//! assert_eq!(grid.nb_cells(), 400);
//! assert_eq!(grid.cell_address(7.5, 95.0), Some((1, 1)));
//! assert_eq!(grid.cell_address(200.0, 200.0), None);
//! ```

#[macro_use]
extern crate log;

mod error;
mod generic_grid;
mod grid;
mod grid_iterator;
mod srs;
mod tile_grid;

#[cfg(test)]
mod grid_test;

pub use error::{GridError, GridResult};
pub use generic_grid::GenericGrid;
pub use grid::{Extent, ExtentInt, Origin, Unit, METERS_PER_DEGREE, PIXEL_SCREEN_WIDTH};
pub use grid_iterator::{CellIterator, GridIterator};
pub use srs::{
    geodetic_resolutions, GridDefinition, ResolutionSource, GEODETIC, LV03, LV95, WEB_MERCATOR,
};
pub use tile_grid::{TileAddress, TileGrid, TileGridOptions};
