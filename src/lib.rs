// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! geoprism
//!
//! Reads Netgen `algebraic3d` scene descriptions made of plane-bounded
//! solids and turns every solid into an explicit prism, so that distance and
//! intersection checks can run on vertex data.

pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod scene;
pub mod utils;

pub use config::{Config, DegeneratePolicy};
pub use error::{GeometryError, ParseError, ReconstructError, SolidError, SolidKind};
pub use geometry::{Plane, RegularPolygon, RegularPrism};
pub use io::{import_geo_file, parse_geo, GeoDocument, RawSolid};
pub use scene::{Scene, SolidPrism};

use anyhow::{Context, Result};
use std::path::Path;

/// Main entry point for reconstructing a `.geo` source held in memory
pub fn reconstruct(source: &str, config: &Config) -> Result<Scene> {
    let document = io::GeoParser::new(config.unterminated_solid).parse_str(source)?;
    Ok(Scene::build(&document, config)?)
}

/// Reconstruct a `.geo` file
pub fn reconstruct_file(path: impl AsRef<Path>, config: &Config) -> Result<Scene> {
    let path = path.as_ref();
    let document = import_geo_file(path, config.unterminated_solid)?;
    Scene::build(&document, config)
        .with_context(|| format!("Failed to reconstruct solids of {}", path.display()))
}
