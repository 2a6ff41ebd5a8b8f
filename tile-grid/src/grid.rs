//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Grid value types

use crate::error::GridError;
use std::f64::consts;
use std::fmt;
use std::str::FromStr;

/// Meters covered by one degree on the WGS84 equator
pub const METERS_PER_DEGREE: f64 = 6378137.0 * 2.0 * consts::PI / 360.0;

/// Standardized rendering pixel size according to OGC Symbology Encoding standard
pub const PIXEL_SCREEN_WIDTH: f64 = 0.00028;

/// Geographic extent
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Extent {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl Extent {
    pub fn new(minx: f64, miny: f64, maxx: f64, maxy: f64) -> Extent {
        Extent {
            minx,
            miny,
            maxx,
            maxy,
        }
    }
    /// min < max on both axes
    pub fn is_valid(&self) -> bool {
        self.minx < self.maxx && self.miny < self.maxy
    }
    pub fn width(&self) -> f64 {
        (self.maxx - self.minx).abs()
    }
    pub fn height(&self) -> f64 {
        (self.maxy - self.miny).abs()
    }
    pub fn center(&self) -> (f64, f64) {
        (
            self.minx + (self.maxx - self.minx) / 2.0,
            self.miny + (self.maxy - self.miny) / 2.0,
        )
    }
    /// Point inside or on the border
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.minx && x <= self.maxx && y >= self.miny && y <= self.maxy
    }
    /// `other` lies completely inside (borders included)
    pub fn contains(&self, other: &Extent) -> bool {
        other.minx >= self.minx
            && other.miny >= self.miny
            && other.maxx <= self.maxx
            && other.maxy <= self.maxy
    }
    /// Rectangle overlap, touching borders included
    pub fn intersects(&self, other: &Extent) -> bool {
        self.minx <= other.maxx
            && self.maxx >= other.minx
            && self.miny <= other.maxy
            && self.maxy >= other.miny
    }
    /// Overlapping part of two extents
    pub fn intersection(&self, other: &Extent) -> Option<Extent> {
        if !self.intersects(other) {
            return None;
        }
        Some(Extent {
            minx: self.minx.max(other.minx),
            miny: self.miny.max(other.miny),
            maxx: self.maxx.min(other.maxx),
            maxy: self.maxy.min(other.maxy),
        })
    }
}

impl From<[f64; 4]> for Extent {
    fn from(bbox: [f64; 4]) -> Extent {
        Extent::new(bbox[0], bbox[1], bbox[2], bbox[3])
    }
}

/// Min and max grid cell numbers (inclusive)
///
/// `minx`/`maxx` are column numbers, `miny`/`maxy` row numbers.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct ExtentInt {
    pub minx: u32,
    pub miny: u32,
    pub maxx: u32,
    pub maxy: u32,
}

impl ExtentInt {
    /// Number of columns
    pub fn width(&self) -> u32 {
        self.maxx - self.minx + 1
    }
    /// Number of rows
    pub fn height(&self) -> u32 {
        self.maxy - self.miny + 1
    }
    /// Number of cells
    pub fn count(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }
}

/// Grid origin
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Origin {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Origin {
    /// Origin corner encoded by the signs of the cell resolutions
    ///
    /// Positive x grows to the right (left origin), positive y grows
    /// upwards (bottom origin). Returns `None` for a zero resolution.
    pub fn from_signs(resolution_x: f64, resolution_y: f64) -> Option<Origin> {
        let left = if resolution_x > 0.0 {
            true
        } else if resolution_x < 0.0 {
            false
        } else {
            return None;
        };
        let bottom = if resolution_y > 0.0 {
            true
        } else if resolution_y < 0.0 {
            false
        } else {
            return None;
        };
        Some(match (left, bottom) {
            (true, true) => Origin::BottomLeft,
            (true, false) => Origin::TopLeft,
            (false, true) => Origin::BottomRight,
            (false, false) => Origin::TopRight,
        })
    }
    pub fn is_left(&self) -> bool {
        matches!(self, Origin::TopLeft | Origin::BottomLeft)
    }
    pub fn is_top(&self) -> bool {
        matches!(self, Origin::TopLeft | Origin::TopRight)
    }
    pub fn as_str(&self) -> &'static str {
        match *self {
            Origin::TopLeft => "top-left",
            Origin::TopRight => "top-right",
            Origin::BottomLeft => "bottom-left",
            Origin::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Origin {
    type Err = GridError;

    fn from_str(val: &str) -> Result<Origin, GridError> {
        match val {
            "top-left" | "TopLeft" => Ok(Origin::TopLeft),
            "top-right" | "TopRight" => Ok(Origin::TopRight),
            "bottom-left" | "BottomLeft" => Ok(Origin::BottomLeft),
            "bottom-right" | "BottomRight" => Ok(Origin::BottomRight),
            _ => Err(GridError::UnknownOrigin(val.to_string())),
        }
    }
}

/// Grid units
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Unit {
    Meters,
    Degrees,
}

impl Unit {
    pub fn meters_per_unit(&self) -> f64 {
        match self {
            Unit::Meters => 1.0,
            Unit::Degrees => METERS_PER_DEGREE,
        }
    }
    /// Convert a resolution given in `from` units into `self` units
    pub fn convert_from(&self, value: f64, from: Unit) -> f64 {
        match (from, *self) {
            (Unit::Meters, Unit::Degrees) => value / METERS_PER_DEGREE,
            (Unit::Degrees, Unit::Meters) => value * METERS_PER_DEGREE,
            _ => value,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Meters => f.write_str("meters"),
            Unit::Degrees => f.write_str("degrees"),
        }
    }
}

impl FromStr for Unit {
    type Err = GridError;

    fn from_str(val: &str) -> Result<Unit, GridError> {
        match &val.to_lowercase() as &str {
            "m" | "meters" => Ok(Unit::Meters),
            "dd" | "degrees" => Ok(Unit::Degrees),
            _ => Err(GridError::UnknownUnit(val.to_string())),
        }
    }
}
