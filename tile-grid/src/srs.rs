//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Predefined tile pyramids

use crate::error::{GridError, GridResult};
use crate::grid::{Extent, Unit};

/// Resolutions of the Swiss federal geoportal pyramid (zoom 0 to 28)
const SWISS_RESOLUTIONS: [f64; 29] = [
    4000.0, 3750.0, 3500.0, 3250.0, 3000.0, 2750.0, 2500.0, 2250.0, 2000.0, 1750.0, 1500.0, 1250.0,
    1000.0, 750.0, 650.0, 500.0, 250.0, 100.0, 50.0, 20.0, 10.0, 5.0, 2.5, 2.0, 1.5, 1.0, 0.5, 0.25,
    0.1,
];

/// Google compatible Web Mercator resolutions (zoom 0 to 23)
const MERCATOR_RESOLUTIONS: [f64; 24] = [
    156543.03392804097,
    78271.51696402048,
    39135.75848201024,
    19567.87924100512,
    9783.93962050256,
    4891.96981025128,
    2445.98490512564,
    1222.99245256282,
    611.49622628141,
    305.748113140705,
    152.8740565703525,
    76.43702828517625,
    38.21851414258813,
    19.109257071294063,
    9.554628535647032,
    4.777314267823516,
    2.388657133911758,
    1.194328566955879,
    0.5971642834779395,
    0.29858214173896974,
    0.14929107086948487,
    0.07464553543474244,
    0.03732276771737122,
    0.01866138385868561,
];

/// Number of generated geodetic zoom levels
const GEODETIC_LEVELS: u8 = 25;

/// Where the resolution of each zoom level comes from
#[derive(PartialEq, Clone, Debug)]
pub enum ResolutionSource {
    /// Fixed table, coarsest first
    Table(&'static [f64]),
    /// Halved per zoom level, starting with one (360°) or two (180°) tiles at zoom 0
    Geodetic { levels: u8 },
}

impl ResolutionSource {
    /// Resolution ladder for the given tile size
    pub fn resolutions(&self, tms_compatible: bool, tile_size_px: u32) -> Vec<f64> {
        match self {
            ResolutionSource::Table(table) => table.to_vec(),
            ResolutionSource::Geodetic { levels } => {
                geodetic_resolutions(tms_compatible, tile_size_px, *levels)
            }
        }
    }
}

/// Geodetic resolutions in degrees per pixel
///
/// `tms_compatible` starts with two tiles of 180° at zoom 0 (TMS/Cesium),
/// otherwise with a single 360° tile (OpenLayers).
pub fn geodetic_resolutions(tms_compatible: bool, tile_size_px: u32, levels: u8) -> Vec<f64> {
    let res_fact = if tms_compatible {
        180.0 / tile_size_px as f64
    } else {
        360.0 / tile_size_px as f64
    };
    (0..levels)
        .map(|z| res_fact / (z as f64).exp2())
        .collect()
}

/// Reference system of a tile pyramid
#[derive(PartialEq, Clone, Debug)]
pub struct GridDefinition {
    pub name: &'static str,
    /// Spatial reference system (EPSG code)
    pub srid: i32,
    /// Absolute bounds. Tiles are anchored at these bounds, never at a sub-extent.
    pub bounds: Extent,
    /// Region covering Switzerland in grid units
    pub swiss_bounds: Extent,
    pub unit: Unit,
    /// Placeholders: `{zoom}`, `{tileCol}`, `{tileRow}`
    pub tile_address_template: &'static str,
    pub resolutions: ResolutionSource,
}

/// Swiss LV03 (EPSG:21781)
pub const LV03: GridDefinition = GridDefinition {
    name: "lv03",
    srid: 21781,
    bounds: Extent {
        minx: 420000.0,
        miny: 30000.0,
        maxx: 900000.0,
        maxy: 350000.0,
    },
    swiss_bounds: Extent {
        minx: 420000.0,
        miny: 30000.0,
        maxx: 900000.0,
        maxy: 350000.0,
    },
    unit: Unit::Meters,
    tile_address_template: "{zoom}/{tileRow}/{tileCol}",
    resolutions: ResolutionSource::Table(&SWISS_RESOLUTIONS),
};

/// Swiss LV95 (EPSG:2056)
pub const LV95: GridDefinition = GridDefinition {
    name: "lv95",
    srid: 2056,
    bounds: Extent {
        minx: 2420000.0,
        miny: 1030000.0,
        maxx: 2900000.0,
        maxy: 1350000.0,
    },
    swiss_bounds: Extent {
        minx: 2420000.0,
        miny: 1030000.0,
        maxx: 2900000.0,
        maxy: 1350000.0,
    },
    unit: Unit::Meters,
    tile_address_template: "{zoom}/{tileCol}/{tileRow}",
    resolutions: ResolutionSource::Table(&SWISS_RESOLUTIONS),
};

/// Web Mercator (EPSG:3857)
pub const WEB_MERCATOR: GridDefinition = GridDefinition {
    name: "web_mercator",
    srid: 3857,
    bounds: Extent {
        minx: -20037508.342789244,
        miny: -20037508.342789244,
        maxx: 20037508.342789244,
        maxy: 20037508.342789244,
    },
    // Swiss geodetic bounds projected to Web Mercator
    swiss_bounds: Extent {
        minx: 572209.1219941981,
        miny: 5684426.277224202,
        maxx: 1277677.247944153,
        maxy: 6145313.082599458,
    },
    unit: Unit::Meters,
    tile_address_template: "{zoom}/{tileCol}/{tileRow}",
    resolutions: ResolutionSource::Table(&MERCATOR_RESOLUTIONS),
};

/// WGS84 geodetic (EPSG:4326)
pub const GEODETIC: GridDefinition = GridDefinition {
    name: "wgs84",
    srid: 4326,
    bounds: Extent {
        minx: -180.0,
        miny: -90.0,
        maxx: 180.0,
        maxy: 90.0,
    },
    swiss_bounds: Extent {
        minx: 5.140242,
        miny: 45.398181,
        maxx: 11.47757,
        maxy: 48.230651,
    },
    unit: Unit::Degrees,
    tile_address_template: "{zoom}/{tileCol}/{tileRow}",
    resolutions: ResolutionSource::Geodetic {
        levels: GEODETIC_LEVELS,
    },
};

impl GridDefinition {
    /// Lookup by EPSG code
    pub fn from_srid(srid: i32) -> GridResult<&'static GridDefinition> {
        match srid {
            21781 => Ok(&LV03),
            2056 => Ok(&LV95),
            3857 => Ok(&WEB_MERCATOR),
            4326 => Ok(&GEODETIC),
            _ => Err(GridError::UnknownSrid(srid)),
        }
    }
    /// Lookup by grid name
    pub fn from_name(name: &str) -> GridResult<&'static GridDefinition> {
        match name {
            "lv03" => Ok(&LV03),
            "lv95" => Ok(&LV95),
            "web_mercator" => Ok(&WEB_MERCATOR),
            "wgs84" | "geodetic" => Ok(&GEODETIC),
            _ => Err(GridError::UnknownGrid(name.to_string())),
        }
    }
    /// Only the geodetic pyramid depends on the TMS switch
    pub fn is_geodetic(&self) -> bool {
        matches!(self.resolutions, ResolutionSource::Geodetic { .. })
    }
}

#[test]
fn test_lookup() {
    assert_eq!(GridDefinition::from_srid(21781).unwrap().name, "lv03");
    assert_eq!(GridDefinition::from_srid(2056).unwrap().name, "lv95");
    assert_eq!(GridDefinition::from_srid(3857).unwrap().name, "web_mercator");
    assert_eq!(GridDefinition::from_srid(4326).unwrap().name, "wgs84");
    assert_eq!(
        GridDefinition::from_srid(7008),
        Err(GridError::UnknownSrid(7008))
    );
    assert_eq!(GridDefinition::from_name("geodetic").unwrap().srid, 4326);
    assert!(GridDefinition::from_name("lv04").is_err());
}

#[test]
fn test_geodetic_resolutions() {
    let tms = geodetic_resolutions(true, 256, GEODETIC_LEVELS);
    assert_eq!(tms.len(), 25);
    assert_eq!(tms[0], 0.703125);
    assert_eq!(tms[1], 0.3515625);
    let ol = geodetic_resolutions(false, 256, GEODETIC_LEVELS);
    assert_eq!(ol[0], 1.40625);
    assert_eq!(ol[1], tms[0]);
    assert!(ol.windows(2).all(|w| w[0] > w[1]));
}

#[test]
fn test_tables_descending() {
    for def in &[LV03, LV95, WEB_MERCATOR, GEODETIC] {
        let res = def.resolutions.resolutions(true, 256);
        assert!(res.windows(2).all(|w| w[0] > w[1]), "{}", def.name);
        assert!(def.bounds.contains(&def.swiss_bounds), "{}", def.name);
    }
    assert_eq!(LV03.resolutions.resolutions(true, 256).len(), 29);
    assert_eq!(WEB_MERCATOR.resolutions.resolutions(true, 256).len(), 24);
}
