//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Grid iterators

use crate::generic_grid::GenericGrid;
use crate::grid::{Extent, ExtentInt};
use crate::tile_grid::TileGrid;

/// Level-by-level tile iterator, row by row within a level
pub struct GridIterator<'a> {
    grid: &'a TileGrid,
    z: u8,
    x: u32,
    y: u32,
    minz: u8,
    /// Tile limits of each level from `minz`
    limits: Vec<ExtentInt>,
    finished: bool,
}

impl<'a> GridIterator<'a> {
    pub(crate) fn new(grid: &'a TileGrid, minz: u8, limits: Vec<ExtentInt>) -> GridIterator<'a> {
        match limits.first() {
            Some(limit) => GridIterator {
                grid,
                z: minz,
                x: limit.minx,
                y: limit.miny,
                minz,
                limits,
                finished: false,
            },
            None => GridIterator {
                grid,
                z: minz,
                x: 0,
                y: 0,
                minz,
                limits,
                finished: true,
            },
        }
    }
    fn limit(&self, z: u8) -> &ExtentInt {
        &self.limits[(z - self.minz) as usize]
    }
    fn maxz(&self) -> u8 {
        self.minz + (self.limits.len() - 1) as u8
    }
}

impl<'a> Iterator for GridIterator<'a> {
    /// Current tile `(bounds, zoom, col, row)`
    type Item = (Extent, u8, u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let current = (
            self.grid.tile_bounds_unchecked(self.z, self.x, self.y),
            self.z,
            self.x,
            self.y,
        );
        let limit = *self.limit(self.z);
        if self.x < limit.maxx {
            self.x += 1;
        } else if self.y < limit.maxy {
            self.y += 1;
            self.x = limit.minx;
        } else if self.z < self.maxz() {
            self.z += 1;
            let limit = *self.limit(self.z);
            self.x = limit.minx;
            self.y = limit.miny;
        } else {
            self.finished = true;
        }
        Some(current)
    }
}

/// Cell iterator, column by column
pub struct CellIterator<'a> {
    grid: &'a GenericGrid,
    col: u32,
    row: u32,
    finished: bool,
}

impl<'a> CellIterator<'a> {
    pub(crate) fn new(grid: &'a GenericGrid) -> CellIterator<'a> {
        CellIterator {
            grid,
            col: 0,
            row: 0,
            finished: false,
        }
    }
}

impl<'a> Iterator for CellIterator<'a> {
    /// Current cell `(extent, col, row)`
    type Item = (Extent, u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let current = (
            self.grid.cell_extent(self.col, self.row),
            self.col,
            self.row,
        );
        let last = self.grid.extent_address();
        if self.row < last.maxy {
            self.row += 1;
        } else if self.col < last.maxx {
            self.col += 1;
            self.row = 0;
        } else {
            self.finished = true;
        }
        Some(current)
    }
}

#[test]
fn test_mercator_iter() {
    let grid = TileGrid::web_mercator();
    let cells = grid
        .iter_grid(0, 2)
        .unwrap()
        .map(|(_, z, x, y)| (z, x, y))
        .collect::<Vec<_>>();
    assert_eq!(cells.len(), 1 + 4 + 16);
    assert_eq!(
        cells[..9].to_vec(),
        vec![
            (0, 0, 0),
            (1, 0, 0),
            (1, 1, 0),
            (1, 0, 1),
            (1, 1, 1),
            (2, 0, 0),
            (2, 1, 0),
            (2, 2, 0),
            (2, 3, 0),
        ]
    );
    assert_eq!(cells.last(), Some(&(2, 3, 3)));

    let cells = grid.iter_grid(1, 2).unwrap().collect::<Vec<_>>();
    assert_eq!(cells.len(), 20);
    assert_eq!(cells[0].1, 1);
    assert_eq!(cells[4].1, 2);

    let cells = grid.iter_grid(0, 0).unwrap().collect::<Vec<_>>();
    assert_eq!(cells, vec![(grid.tile_bounds(0, 0, 0).unwrap(), 0, 0, 0)]);
}

#[test]
fn test_restartable() {
    let grid = TileGrid::lv03();
    let first = grid.iter_grid(13, 14).unwrap().collect::<Vec<_>>();
    let second = grid.iter_grid(13, 14).unwrap().collect::<Vec<_>>();
    assert_eq!(first.len(), 12);
    assert_eq!(first, second);
}

#[test]
fn test_bad_params() {
    use crate::error::GridError;
    let grid = TileGrid::web_mercator();

    // minz > maxz
    assert_eq!(
        grid.iter_grid(3, 2).err(),
        Some(GridError::InvalidZoomRange {
            minzoom: 3,
            maxzoom: 2
        })
    );
    // maxz > grid maxzoom
    assert_eq!(
        grid.iter_grid(13, 33).err(),
        Some(GridError::ZoomOutOfRange {
            zoom: 33,
            maxzoom: 23
        })
    );
}

#[test]
fn test_cell_iter() {
    let grid = GenericGrid::new(Extent::new(0.0, 0.0, 10.0, 6.0), 5.0, -3.0).unwrap();
    let cells = grid.iter().map(|(_, c, r)| (c, r)).collect::<Vec<_>>();
    assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    let extents = (&grid).into_iter().map(|(e, _, _)| e).collect::<Vec<_>>();
    assert_eq!(extents[1], Extent::new(0.0, 0.0, 5.0, 3.0));
}
