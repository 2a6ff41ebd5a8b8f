//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::error::GridError;
use crate::grid::{Extent, ExtentInt, Origin, Unit};
use crate::srs::{GridDefinition, GEODETIC, LV03, LV95, WEB_MERCATOR};
use crate::tile_grid::{TileGrid, TileGridOptions};
use approx::assert_relative_eq;

fn geodetic(origin: Origin, tms_compatible: bool) -> TileGrid {
    TileGrid::new(
        &GEODETIC,
        TileGridOptions {
            origin,
            tms_compatible,
            ..Default::default()
        },
    )
    .unwrap()
}

#[test]
fn test_grid_from_srid() {
    for srid in &[21781, 2056, 3857, 4326] {
        let def = GridDefinition::from_srid(*srid).unwrap();
        let grid = TileGrid::new(def, TileGridOptions::default()).unwrap();
        assert_eq!(grid.srid(), *srid);
    }
    assert_eq!(
        GridDefinition::from_srid(7008).err(),
        Some(GridError::UnknownSrid(7008))
    );
}

#[test]
fn test_wrong_extent() {
    let outside = Extent::new(10.0, 10.0, 20.0, 20.0);
    assert_eq!(
        TileGrid::new(
            &LV03,
            TileGridOptions {
                extent: Some(outside),
                ..Default::default()
            }
        )
        .err(),
        Some(GridError::ExtentOutOfBounds {
            extent: outside,
            bounds: LV03.bounds
        })
    );

    let inverted = Extent::new(430000.0, 40000.0, 420000.0, 340000.0);
    assert_eq!(
        TileGrid::new(
            &LV03,
            TileGridOptions {
                extent: Some(inverted),
                ..Default::default()
            }
        )
        .err(),
        Some(GridError::InvalidExtent(inverted))
    );

    let too_large = Extent::new(-30e6, -30e6, 0.0, 0.0);
    assert!(TileGrid::new(
        &WEB_MERCATOR,
        TileGridOptions {
            extent: Some(too_large),
            ..Default::default()
        }
    )
    .is_err());
    assert!(TileGrid::new(
        &GEODETIC,
        TileGridOptions {
            extent: Some(Extent::new(20.0, 50.0, 5.0, 15.0)),
            ..Default::default()
        }
    )
    .is_err());
}

#[test]
fn test_wrong_origin() {
    for origin in &[Origin::TopRight, Origin::BottomRight] {
        assert_eq!(
            TileGrid::new(
                &GEODETIC,
                TileGridOptions {
                    origin: *origin,
                    ..Default::default()
                }
            )
            .err(),
            Some(GridError::UnsupportedOrigin(*origin))
        );
    }
    assert!(TileGrid::new(
        &LV95,
        TileGridOptions {
            tile_size_px: 0,
            ..Default::default()
        }
    )
    .is_err());
}

#[test]
fn test_tile_size() {
    let grid = TileGrid::lv03();
    assert_eq!(grid.tile_size(20), Ok(2560.0));
    assert_eq!(grid.tile_address_template(), "{zoom}/{tileRow}/{tileCol}");
    assert_eq!(
        grid.tile_size(40),
        Err(GridError::ZoomOutOfRange {
            zoom: 40,
            maxzoom: 28
        })
    );
    assert_eq!(grid.nlevels(), 29);
    assert_eq!(grid.unit(), Unit::Meters);
}

#[test]
fn test_tile_bounds_and_address() {
    let grid = TileGrid::lv03();
    let tb = grid.tile_bounds(17, 5, 5).unwrap();
    assert_eq!(
        tb,
        Extent {
            minx: 548000.0,
            miny: 196400.0,
            maxx: 573600.0,
            maxy: 222000.0,
        }
    );
    assert!(grid.tile_bounds(77, 5, 5).is_err());

    assert_eq!(grid.tile_address(0, LV03.bounds.minx, LV03.bounds.maxy), Ok((0, 0)));
    assert_eq!(grid.tile_address(17, tb.minx, tb.maxy), Ok((5, 5)));
    let (x, y) = tb.center();
    assert_eq!(grid.tile_address(17, x, y), Ok((5, 5)));

    assert_eq!(
        grid.tile_address(17, 10.0, 10.0),
        Err(GridError::PointOutOfBounds { x: 10.0, y: 10.0 })
    );
}

#[test]
fn test_edge_points() {
    let grid = TileGrid::lv03();
    // Shared border of tiles (4, 5) and (5, 5): right/lower tile
    assert_eq!(grid.tile_address(17, 548000.0, 200000.0), Ok((5, 5)));
    // Outer grid bounds stay in the last tile
    assert_eq!(grid.tile_address(20, 900000.0, 30000.0), Ok((187, 124)));
    assert_eq!(grid.tile_address(0, 900000.0, 30000.0), Ok((0, 0)));

    let grid = geodetic(Origin::BottomLeft, true);
    assert_eq!(grid.tile_address(0, 180.0, 90.0), Ok((1, 0)));
    assert_eq!(grid.tile_address(0, 0.0, 0.0), Ok((1, 0)));
    assert_eq!(grid.tile_address(1, -180.0, -90.0), Ok((0, 0)));
}

#[test]
fn test_address_roundtrip() {
    let grids = vec![
        TileGrid::lv03(),
        TileGrid::lv95(),
        TileGrid::web_mercator(),
        geodetic(Origin::TopLeft, true),
        geodetic(Origin::BottomLeft, false),
    ];
    for grid in &grids {
        for zoom in &[0, 3, 9, 15, 20] {
            let limits = grid.extent_address(*zoom, None, false).unwrap();
            for (col, row) in &[
                (limits.minx, limits.miny),
                (limits.maxx / 2, limits.maxy / 2),
                (limits.maxx, limits.maxy),
            ] {
                let (x, y) = grid.tile_bounds(*zoom, *col, *row).unwrap().center();
                if grid.bounds().contains_point(x, y) {
                    assert_eq!(grid.tile_address(*zoom, x, y), Ok((*col, *row)));
                }
            }
        }
    }
}

#[test]
fn test_iter_grid() {
    let grid = TileGrid::lv03();
    let tiles = grid.iter_grid(0, 0).unwrap().collect::<Vec<_>>();
    assert_eq!(tiles.len(), 1);
    assert_eq!(tiles[0], (grid.tile_bounds(0, 0, 0).unwrap(), 0, 0, 0));

    let tiles = grid.iter_grid(13, 14).unwrap().collect::<Vec<_>>();
    assert_eq!(tiles.len(), 12);
    assert_eq!(tiles[0].1, 13);
    assert_eq!(tiles[6].1, 14);
    let (bounds, z, col, row) = tiles[2];
    assert_eq!(bounds, grid.tile_bounds(z, col, row).unwrap());

    assert!(grid.iter_grid(13, 33).is_err());
    assert!(grid.iter_grid(13, 11).is_err());
}

#[test]
fn test_scale() {
    for grid in &[TileGrid::lv03(), TileGrid::lv95()] {
        let s14 = grid.scale(14).unwrap();
        let s28 = grid.scale(28).unwrap();
        assert!(s14 > s28);
        assert_eq!(s14.round(), 2321429.0);
        assert_eq!(s28.round(), 357.0);
        assert!(grid.resolution(14).unwrap() > grid.resolution(28).unwrap());
    }
    assert!(TileGrid::lv03().scale(29).is_err());

    let grid = TileGrid::geodetic();
    assert_relative_eq!(grid.scale(0).unwrap(), 279541132.0143589, max_relative = 1e-12);
    assert_eq!(grid.meters_per_unit(), crate::grid::METERS_PER_DEGREE);
}

#[test]
fn test_iter_grid_with_extent() {
    let offset = 20000.0;
    let default = TileGrid::lv03();
    let extent = Extent::new(
        LV03.bounds.minx + offset,
        LV03.bounds.miny + offset,
        LV03.bounds.maxx - offset,
        LV03.bounds.maxy - offset,
    );
    let grid = TileGrid::new(
        &LV03,
        TileGridOptions {
            extent: Some(extent),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(default.x_span() > grid.x_span());
    assert!(default.y_span() > grid.y_span());

    let tiles_default = default.iter_grid(20, 21).unwrap().count();
    let tiles = grid.iter_grid(20, 21).unwrap().collect::<Vec<_>>();
    assert!(tiles_default > tiles.len());
    assert_eq!(tiles[0].1, 20);
    assert_eq!(tiles[tiles.len() - 1].1, 21);

    let nb = grid.number_of_tiles_at_zoom(20).unwrap() + grid.number_of_tiles_at_zoom(21).unwrap();
    assert_eq!(tiles.len() as u64, nb);
    assert_eq!(grid.total_number_of_tiles(Some(20), Some(21)), Ok(nb));
    assert_eq!(grid.number_of_x_tiles_at_zoom(20), Ok(173));
    assert_eq!(grid.number_of_y_tiles_at_zoom(20), Ok(111));
}

#[test]
fn test_number_of_tiles_swiss() {
    for grid in &[TileGrid::lv03(), TileGrid::lv95()] {
        for (zoom, expected) in &[(20, 23500), (22, 375000)] {
            let limits = grid.extent_address(*zoom, None, false).unwrap();
            let nb = grid.number_of_tiles_at_zoom(*zoom).unwrap();
            let nbx = grid.number_of_x_tiles_at_zoom(*zoom).unwrap();
            let nby = grid.number_of_y_tiles_at_zoom(*zoom).unwrap();
            assert!(limits.maxx > limits.maxy);
            assert_eq!(grid.iter_grid(*zoom, *zoom).unwrap().count() as u64, nb);
            assert_eq!(nb, *expected);
            assert_eq!(nb, nbx as u64 * nby as u64);
            assert!(nbx > nby);
        }
    }
    assert_eq!(
        TileGrid::lv03().extent_address(20, None, false),
        Ok(ExtentInt {
            minx: 0,
            miny: 0,
            maxx: 187,
            maxy: 124
        })
    );
}

#[test]
fn test_number_of_tiles_mercator() {
    let grid = TileGrid::web_mercator();
    assert_eq!(grid.number_of_tiles_at_zoom(0), Ok(1));
    assert_eq!(grid.number_of_x_tiles_at_zoom(1), Ok(2));
    assert_eq!(grid.number_of_y_tiles_at_zoom(1), Ok(2));
    let limits = grid.extent_address(2, None, false).unwrap();
    assert!(limits.maxx > limits.minx);
    assert!(limits.maxy > limits.miny);
    assert_eq!(grid.number_of_tiles_at_zoom(2), Ok(16));
    assert_eq!(grid.iter_grid(2, 2).unwrap().count(), 16);
}

#[test]
fn test_number_of_tiles_geodetic() {
    let grid = geodetic(Origin::BottomLeft, false);
    assert_eq!(grid.number_of_tiles_at_zoom(0), Ok(1));
    assert_eq!(grid.number_of_tiles_at_zoom(2), Ok(8));
    assert_eq!(grid.iter_grid(2, 2).unwrap().count(), 8);

    let grid = geodetic(Origin::BottomLeft, true);
    assert_eq!(grid.number_of_tiles_at_zoom(0), Ok(2));

    let grid = geodetic(Origin::TopLeft, true);
    assert_eq!(grid.number_of_tiles_at_zoom(0), Ok(2));
    assert_eq!(grid.number_of_x_tiles_at_zoom(1), Ok(4));
    assert_eq!(grid.number_of_y_tiles_at_zoom(1), Ok(2));
    assert_eq!(grid.nlevels(), 25);
}

#[test]
fn test_swiss_extent() {
    let options = TileGridOptions {
        use_swiss_extent: true,
        ..Default::default()
    };
    let grid = TileGrid::new(&WEB_MERCATOR, options.clone()).unwrap();
    assert_eq!(grid.extent(), &WEB_MERCATOR.swiss_bounds);
    assert_eq!(grid.number_of_tiles_at_zoom(0), Ok(1));
    assert_eq!(grid.number_of_tiles_at_zoom(8), Ok(24));
    assert_eq!(
        grid.extent_address(8, None, false),
        Ok(ExtentInt {
            minx: 131,
            miny: 88,
            maxx: 136,
            maxy: 91
        })
    );

    let grid = TileGrid::new(&GEODETIC, options).unwrap();
    assert_eq!(grid.number_of_tiles_at_zoom(0), Ok(1));
    assert_eq!(grid.number_of_tiles_at_zoom(8), Ok(50));

    // Explicit extent wins
    let grid = TileGrid::new(
        &GEODETIC,
        TileGridOptions {
            extent: Some(Extent::new(0.0, 0.0, 10.0, 10.0)),
            use_swiss_extent: true,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(grid.extent(), &Extent::new(0.0, 0.0, 10.0, 10.0));
}

#[test]
fn test_intersects_extent() {
    let grid = TileGrid::new(
        &WEB_MERCATOR,
        TileGridOptions {
            use_swiss_extent: true,
            ..Default::default()
        },
    )
    .unwrap();
    // Zurich
    assert!(grid.intersects_extent(&Extent::new(940000.0, 5990000.0, 960000.0, 6010000.0)));
    // Paris
    assert!(!grid.intersects_extent(&Extent::new(250000.0, 6240000.0, 270000.0, 6260000.0)));
    // Touching border
    let bounds = WEB_MERCATOR.swiss_bounds;
    assert!(grid.intersects_extent(&Extent::new(
        bounds.maxx,
        bounds.maxy,
        bounds.maxx + 1.0,
        bounds.maxy + 1.0
    )));
}

#[test]
fn test_mercator_bounds_and_address() {
    let grid = TileGrid::web_mercator();
    let (z, x, y) = (8, 135, 91);
    let tb = grid.tile_bounds(z, x, y).unwrap();
    assert_relative_eq!(tb.minx, 1095801.2374962866);
    assert_relative_eq!(tb.miny, 5635549.221409475);
    assert_relative_eq!(tb.maxx, 1252344.271424327);
    assert_relative_eq!(tb.maxy, 5792092.255337516);

    let (cx, cy) = tb.center();
    assert_eq!(grid.tile_address(z, cx, cy), Ok((x, y)));
}

#[test]
fn test_geodetic_bounds_and_address() {
    let grid = geodetic(Origin::TopLeft, true);
    let (z, x, y) = (8, 268, 60);
    let tb = grid.tile_bounds(z, x, y).unwrap();
    assert_relative_eq!(tb.minx, 8.4375);
    assert_relative_eq!(tb.miny, 47.109375);
    assert_relative_eq!(tb.maxx, 9.140625);
    assert_relative_eq!(tb.maxy, 47.8125);
    let (cx, cy) = tb.center();
    assert_eq!(grid.tile_address(z, cx, cy), Ok((x, y)));

    let grid = geodetic(Origin::BottomLeft, true);
    let (z, x, y) = (8, 266, 193);
    let tb = grid.tile_bounds(z, x, y).unwrap();
    assert_relative_eq!(tb.minx, 7.03125);
    assert_relative_eq!(tb.miny, 45.703125);
    assert_relative_eq!(tb.maxx, 7.734375);
    assert_relative_eq!(tb.maxy, 46.40625);
    let (cx, cy) = tb.center();
    assert_eq!(grid.tile_address(z, cx, cy), Ok((x, y)));
}

#[test]
fn test_resolution_and_zoom() {
    let grid = TileGrid::lv03();
    assert_eq!(grid.resolution(14), Ok(650.0));
    assert_eq!(grid.resolution(28), Ok(0.1));
    assert_eq!(grid.zoom(650.0), Ok(14));
    assert_eq!(grid.zoom(0.1), Ok(28));
    assert_eq!(grid.zoom(600.0), Err(GridError::UnknownResolution(600.0)));
    for zoom in 0..grid.nlevels() {
        let res = grid.resolution(zoom).unwrap();
        assert_eq!(grid.zoom(res), Ok(zoom));
        assert_eq!(grid.closest_zoom(res, Unit::Meters), zoom);
        assert_eq!(grid.ceiling_zoom(res, Unit::Meters), zoom);
    }

    let grid = TileGrid::web_mercator();
    for zoom in 0..grid.nlevels() {
        let res = grid.resolution(zoom).unwrap();
        assert_eq!(grid.closest_zoom(res, Unit::Meters), zoom);
        assert_eq!(grid.ceiling_zoom(res, Unit::Meters), zoom);
        if zoom > 0 {
            assert!(grid.resolution(zoom - 1).unwrap() > res);
            assert!(grid.scale(zoom - 1).unwrap() > grid.scale(zoom).unwrap());
        }
    }
}

#[test]
fn test_closest_zoom() {
    let grid = TileGrid::lv03();
    assert_eq!(grid.closest_zoom(600.0, Unit::Meters), 14);
    assert_eq!(grid.closest_zoom(700.0, Unit::Meters), 13);
    assert_eq!(grid.closest_zoom(2.2, Unit::Meters), 23);
    // Tie: coarser level
    assert_eq!(grid.closest_zoom(2.25, Unit::Meters), 22);
    // Beyond the table
    assert_eq!(grid.closest_zoom(5000.0, Unit::Meters), 0);
    assert_eq!(grid.closest_zoom(0.01, Unit::Meters), 28);
    // 2.5m expressed in degrees
    let degrees = 2.5 / crate::grid::METERS_PER_DEGREE;
    assert_eq!(grid.closest_zoom(degrees, Unit::Degrees), 22);

    let grid = TileGrid::geodetic();
    let zoom8 = grid.resolution(8).unwrap();
    assert_eq!(grid.closest_zoom(zoom8 * 1.1, Unit::Degrees), 8);
    assert_eq!(
        grid.closest_zoom(zoom8 * crate::grid::METERS_PER_DEGREE, Unit::Meters),
        8
    );
}

#[test]
fn test_ceiling_zoom() {
    let grid = TileGrid::lv03();
    assert_eq!(grid.ceiling_zoom(600.0, Unit::Meters), 15);
    assert_eq!(grid.ceiling_zoom(700.0, Unit::Meters), 14);
    assert_eq!(grid.ceiling_zoom(2.2, Unit::Meters), 23);
    assert_eq!(grid.ceiling_zoom(2.25, Unit::Meters), 23);
    assert_eq!(grid.ceiling_zoom(5000.0, Unit::Meters), 0);
    assert_eq!(grid.ceiling_zoom(0.01, Unit::Meters), 28);
    for res in &[3333.0, 1234.5, 77.7, 3.0, 0.3] {
        let zoom = grid.ceiling_zoom(*res, Unit::Meters);
        assert!(grid.resolution(zoom).unwrap() <= *res);
        assert!(grid.resolution(zoom - 1).unwrap() > *res);
    }
}

#[test]
fn test_parent_tiles() {
    let grid = TileGrid::lv03();
    assert_eq!(grid.parent_tiles(17, 5, 5, 17), Ok(vec![(17, 5, 5)]));
    assert_eq!(grid.parent_tiles(18, 5, 5, 17), Ok(vec![(17, 2, 2)]));
    // 500m to 650m: the child overlaps two parents
    assert_eq!(
        grid.parent_tiles(15, 1, 0, 14),
        Ok(vec![(14, 0, 0), (14, 1, 0)])
    );
    assert_eq!(grid.parent_tiles(28, 100, 100, 20), Ok(vec![(20, 1, 1)]));
    // Last column and row extend beyond the grid bounds
    assert_eq!(grid.parent_tiles(17, 18, 12, 16), Ok(vec![(16, 7, 4)]));
    assert_eq!(
        grid.parent_tiles(17, 5, 5, 18),
        Err(GridError::InvalidZoomRange {
            minzoom: 18,
            maxzoom: 17
        })
    );

    let grid = TileGrid::web_mercator();
    assert_eq!(grid.parent_tiles(9, 270, 182, 8), Ok(vec![(8, 135, 91)]));
    assert_eq!(grid.parent_tiles(10, 541, 365, 8), Ok(vec![(8, 135, 91)]));
    assert_eq!(grid.parent_tiles(1, 1, 1, 0), Ok(vec![(0, 0, 0)]));

    let grid = geodetic(Origin::BottomLeft, true);
    assert_eq!(grid.parent_tiles(1, 3, 1, 0), Ok(vec![(0, 1, 0)]));
}

#[test]
fn test_mercator_quadtree_parents() {
    let grid = TileGrid::web_mercator();
    assert_eq!(grid.parent_tiles(7, 18, 18, 6), Ok(vec![(6, 9, 9)]));
    assert_eq!(grid.parent_tiles(7, 0, 18, 6), Ok(vec![(6, 0, 9)]));

    for origin in &[Origin::TopLeft, Origin::BottomLeft] {
        let grid = TileGrid::new(
            &WEB_MERCATOR,
            TileGridOptions {
                origin: *origin,
                ..Default::default()
            },
        )
        .unwrap();
        for zoom in 1..grid.nlevels() {
            let n = 1u32 << zoom;
            let mut samples = vec![0, 1 % n, n / 3, n / 2 - 1, n / 2, n - 1];
            samples.sort();
            samples.dedup();
            for col in &samples {
                for row in &samples {
                    for levels in 1..=3u8 {
                        if levels > zoom {
                            continue;
                        }
                        assert_eq!(
                            grid.parent_tiles(zoom, *col, *row, zoom - levels),
                            Ok(vec![(zoom - levels, *col >> levels, *row >> levels)]),
                            "{} {}/{}/{}",
                            origin,
                            zoom,
                            col,
                            row
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_contained_extent_address_near_border() {
    let grid = TileGrid::web_mercator();
    // Child tile at zoom 7 whose near borders lie on the parent borders at zoom 6
    let child = grid.tile_bounds(7, 18, 18).unwrap();
    assert_eq!(
        grid.extent_address(6, Some(&child), true),
        Ok(ExtentInt {
            minx: 9,
            miny: 9,
            maxx: 9,
            maxy: 9
        })
    );
    // Shifted by a whole parent tile the extent covers two columns
    let parent_size = grid.tile_size(6).unwrap();
    let wide = Extent::new(child.minx - parent_size, child.miny, child.maxx, child.maxy);
    assert_eq!(
        grid.extent_address(6, Some(&wide), true),
        Ok(ExtentInt {
            minx: 8,
            miny: 9,
            maxx: 9,
            maxy: 9
        })
    );
}

#[test]
fn test_contained_extent_address() {
    let grid = TileGrid::lv03();
    // Exactly tile (5, 5) at zoom 17
    let tb = grid.tile_bounds(17, 5, 5).unwrap();
    assert_eq!(
        grid.extent_address(17, Some(&tb), false),
        Ok(ExtentInt {
            minx: 5,
            miny: 5,
            maxx: 6,
            maxy: 6
        })
    );
    assert_eq!(
        grid.extent_address(17, Some(&tb), true),
        Ok(ExtentInt {
            minx: 5,
            miny: 5,
            maxx: 5,
            maxy: 5
        })
    );

    let grid = geodetic(Origin::BottomLeft, true);
    let tb = grid.tile_bounds(3, 4, 2).unwrap();
    assert_eq!(
        grid.extent_address(3, Some(&tb), true),
        Ok(ExtentInt {
            minx: 4,
            miny: 2,
            maxx: 4,
            maxy: 2
        })
    );
}

#[test]
fn test_format_tile_address() {
    let grid = TileGrid::lv95();
    assert_eq!(grid.format_tile_address(20, 12, 34), "20/12/34");
    assert_eq!(TileGrid::web_mercator().format_tile_address(8, 135, 91), "8/135/91");
    assert_eq!(TileGrid::geodetic().format_tile_address(8, 268, 60), "8/268/60");
    // LV03: row before column
    let grid = TileGrid::lv03();
    assert_eq!(grid.tile_address_template(), "{zoom}/{tileRow}/{tileCol}");
    assert_eq!(grid.format_tile_address(20, 12, 34), "20/34/12");
    let (col, row) = grid.tile_address(17, 560000.0, 190000.0).unwrap();
    assert_eq!((col, row), (5, 6));
    assert_eq!(grid.format_tile_address(17, col, row), "17/6/5");
}
