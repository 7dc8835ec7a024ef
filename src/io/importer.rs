// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! `.geo` file importer

use super::{GeoDocument, GeoParser, UnterminatedSolidPolicy};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Import a `.geo` file, reading it line by line
pub fn import_geo_file(
    path: impl AsRef<Path>,
    unterminated: UnterminatedSolidPolicy,
) -> Result<GeoDocument> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open GEO file: {}", path.display()))?;

    GeoParser::new(unterminated)
        .parse_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse GEO file: {}", path.display()))
}
