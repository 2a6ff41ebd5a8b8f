//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::{ConfigError, GenericGridCfg, GridCfg};
use crate::core::Config;
use tile_grid::{Extent, GenericGrid, GridDefinition, Origin, TileGrid, TileGridOptions, Unit};

#[derive(Deserialize, Clone, Debug)]
pub struct ExtentCfg {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl From<&ExtentCfg> for Extent {
    fn from(cfg: &ExtentCfg) -> Extent {
        Extent {
            minx: cfg.minx,
            miny: cfg.miny,
            maxx: cfg.maxx,
            maxy: cfg.maxy,
        }
    }
}

impl<'a> Config<'a, GridCfg> for TileGrid {
    fn from_config(grid_cfg: &GridCfg) -> Result<Self, ConfigError> {
        let definition = if let Some(ref gridname) = grid_cfg.predefined {
            GridDefinition::from_name(gridname)?
        } else if let Some(srid) = grid_cfg.srid {
            GridDefinition::from_srid(srid)?
        } else {
            return Err(ConfigError::Invalid(
                "either `predefined` or `srid` is required".to_string(),
            ));
        };
        let mut options = TileGridOptions {
            extent: grid_cfg.extent.as_ref().map(Extent::from),
            tile_size_px: grid_cfg.tile_size,
            use_swiss_extent: grid_cfg.use_swiss_extent,
            ..Default::default()
        };
        if let Some(ref origin) = grid_cfg.origin {
            options.origin = origin.parse::<Origin>()?;
        }
        if let Some(tms_compatible) = grid_cfg.tms_compatible {
            if !definition.is_geodetic() {
                warn!(
                    "Grid {}: tms_compatible only applies to geodetic grids - ignored",
                    definition.name
                );
            }
            options.tms_compatible = tms_compatible;
        }
        let grid = TileGrid::new(definition, options)?;
        info!(
            "Using grid {} (EPSG:{}) with {} zoom levels",
            grid.name(),
            grid.srid(),
            grid.nlevels()
        );
        Ok(grid)
    }
    fn gen_config() -> String {
        let toml = r#"
[grid]
# Predefined grids: lv03, lv95, web_mercator, wgs84
predefined = "web_mercator"
#tile_size = 256
#origin = "top-left"
#use_swiss_extent = false
"#;
        toml.to_string()
    }
    fn gen_runtime_config(&self) -> String {
        let extent = self.extent();
        let mut config = format!(
            r#"
[grid]
predefined = "{}"
tile_size = {}
origin = "{}"
extent = {{ minx = {:?}, miny = {:?}, maxx = {:?}, maxy = {:?} }}
"#,
            self.name(),
            self.tile_size_px(),
            self.origin(),
            extent.minx,
            extent.miny,
            extent.maxx,
            extent.maxy
        );
        if self.unit() == Unit::Degrees {
            config.push_str(&format!("tms_compatible = {}\n", self.tms_compatible()));
        }
        config
    }
}

impl<'a> Config<'a, GenericGridCfg> for GenericGrid {
    fn from_config(grid_cfg: &GenericGridCfg) -> Result<Self, ConfigError> {
        let grid = GenericGrid::new(
            Extent::from(&grid_cfg.extent),
            grid_cfg.resolution_x,
            grid_cfg.resolution_y,
        )?;
        info!(
            "Using generic grid with {} x {} cells ({})",
            grid.nb_cells_x(),
            grid.nb_cells_y(),
            grid.origin()
        );
        Ok(grid)
    }
    fn gen_config() -> String {
        let toml = r#"
[generic_grid]
extent = { minx = 2420000.0, miny = 1030000.0, maxx = 2900000.0, maxy = 1350000.0 }
# Negative resolution_y: rows numbered from the top
resolution_x = 1000.0
resolution_y = -1000.0
"#;
        toml.to_string()
    }
}
