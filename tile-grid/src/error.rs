//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Grid errors

use crate::grid::{Extent, Origin};

/// Input validation failures of grid construction and grid queries
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("Invalid extent {0:?}: min must be lower than max on both axes")]
    InvalidExtent(Extent),

    #[error("Extent {extent:?} is outside of the grid bounds {bounds:?}")]
    ExtentOutOfBounds { extent: Extent, bounds: Extent },

    #[error("Origin '{0}' is not supported by this grid")]
    UnsupportedOrigin(Origin),

    #[error("Unexpected origin value '{0}'")]
    UnknownOrigin(String),

    #[error("Unexpected unit value '{0}'")]
    UnknownUnit(String),

    #[error("Invalid resolution {0}")]
    InvalidResolution(f64),

    #[error("Invalid tile size {0}")]
    InvalidTileSize(u32),

    #[error("Zoom level {zoom} out of range (max zoom {maxzoom})")]
    ZoomOutOfRange { zoom: u8, maxzoom: u8 },

    #[error("Point ({x}, {y}) is outside of the grid bounds")]
    PointOutOfBounds { x: f64, y: f64 },

    #[error("Invalid zoom range {minzoom}..{maxzoom}")]
    InvalidZoomRange { minzoom: u8, maxzoom: u8 },

    #[error("Resolution {0} is not part of the grid resolutions")]
    UnknownResolution(f64),

    #[error("Unsupported spatial reference system EPSG:{0}")]
    UnknownSrid(i32),

    #[error("Unknown grid '{0}'")]
    UnknownGrid(String),
}

pub type GridResult<T> = Result<T, GridError>;
