//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::gridcfg::ExtentCfg;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use tera::{Context, Tera};
use tile_grid::GridError;
use toml::Value;

/// Configuration failures
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Could not find config file!")]
    FileNotFound,

    #[error("Error while reading config: [{0}]")]
    Read(#[from] std::io::Error),

    #[error("Replace old environment variable syntax ${{VARNAME}} with `{{{{env.VARNAME}}}}`")]
    LegacyEnvSyntax,

    #[error("Template error: {0}")]
    Template(String),

    #[error("{path} - {message}")]
    Parse { path: String, message: String },

    #[error("Invalid grid configuration: {0}")]
    Grid(#[from] GridError),

    #[error("Invalid grid definition: {0}")]
    Invalid(String),
}

pub trait Config<'a, C: Deserialize<'a>>
where
    Self: std::marker::Sized,
{
    /// Read configuration
    fn from_config(config: &C) -> Result<Self, ConfigError>;
    /// Generate configuration template
    fn gen_config() -> String;
    /// Generate configuration template with runtime information
    fn gen_runtime_config(&self) -> String {
        Self::gen_config()
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationCfg {
    pub grid: Option<GridCfg>,
    pub generic_grid: Option<GenericGridCfg>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GridCfg {
    /// Predefined grid name: lv03, lv95, web_mercator or wgs84
    pub predefined: Option<String>,
    /// Spatial reference system (EPSG code), if no predefined name is given
    pub srid: Option<i32>,
    /// Sub-extent of the grid bounds, in grid units
    pub extent: Option<ExtentCfg>,
    /// Width and height of a tile in pixels
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,
    /// top-left or bottom-left
    pub origin: Option<String>,
    /// Geodetic grid: two tiles at zoom level 0
    pub tms_compatible: Option<bool>,
    /// Limit global grids to the Swiss region
    #[serde(default)]
    pub use_swiss_extent: bool,
}

pub fn default_tile_size() -> u32 {
    256
}

#[derive(Deserialize, Clone, Debug)]
pub struct GenericGridCfg {
    pub extent: ExtentCfg,
    /// Cell width. Negative values number columns from the right.
    pub resolution_x: f64,
    /// Cell height. Negative values number rows from the top.
    pub resolution_y: f64,
}

pub const DEFAULT_CONFIG: &str = r#"
[grid]
predefined = "web_mercator"
"#;

/// Load and parse the config file into an config struct.
pub fn read_config<'a, T: Deserialize<'a>>(path: &str) -> Result<T, ConfigError> {
    let mut file = File::open(path).map_err(|_| ConfigError::FileNotFound)?;
    let mut config_toml = String::new();
    file.read_to_string(&mut config_toml)?;

    parse_config(config_toml, path)
}

/// Parse the configuration into an config struct.
///
/// `{{env.VARNAME}}` placeholders are filled from the process environment.
pub fn parse_config<'a, T: Deserialize<'a>>(
    config_toml: String,
    path: &str,
) -> Result<T, ConfigError> {
    // Check for old ${var} expressions
    let re = Regex::new(r"\$\{([[:alnum:]_]+)\}").map_err(|e| ConfigError::Template(e.to_string()))?;
    if re.is_match(&config_toml) {
        return Err(ConfigError::LegacyEnvSyntax);
    }

    // Parse template
    let mut tera = Tera::default();
    tera.add_raw_template(path, &config_toml)
        .map_err(|e| ConfigError::Template(e.to_string()))?;
    let mut context = Context::new();
    let env: HashMap<String, String> = env::vars().collect();
    context.insert("env", &env);
    let toml = tera.render(path, &context).map_err(|e| {
        ConfigError::Template(
            e.source()
                .map(|source| source.to_string())
                .unwrap_or_else(|| e.to_string()),
        )
    })?;

    toml.parse::<Value>()
        .and_then(|cfg| cfg.try_into::<T>())
        .map_err(|err| ConfigError::Parse {
            path: path.to_string(),
            message: err.to_string(),
        })
}
