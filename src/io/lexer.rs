// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Line classification for Netgen `.geo` output
//!
//! The GeoWriter output is not parsed with a grammar: every record sits on
//! its own line and is recognized by a literal prefix or suffix. This pass
//! maps a line to a [`LineKind`] so the parser only deals with structure.

const HEADER: &str = "algebraic3d";
const CELL: &str = "solid cell";
const FILLER: &str = "solid polygonalCylinder";
const SHELL: &str = "solid pc";
const PLANE_PREFIXES: [&str; 3] = [" plane", " and plane", "and plane"];
const PLANE_KEYWORD: &str = "plane";
const CLOSE_SUFFIX: &str = "and cell;";

/// Record kind of one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Header,
    /// Cell definition; `payload` is the text after `=`
    Cell { payload: &'a str },
    /// Solid-open line; `closes_solid` is set when the same line ends the solid
    OpenFiller { name: &'a str, closes_solid: bool },
    OpenShell { name: &'a str, closes_solid: bool },
    /// Plane clause; `payload` is the text after the `plane` keyword.
    /// The last clause of a solid also carries the close marker.
    Plane { payload: &'a str, closes_solid: bool },
    /// Close marker on a line without a plane clause
    Close,
    Other,
}

/// Identifier following `solid`, up to whitespace or `=`
fn solid_name(line: &str) -> &str {
    line["solid".len()..]
        .trim_start()
        .split(|c: char| c.is_whitespace() || c == '=')
        .next()
        .unwrap_or_default()
}

pub fn classify(line: &str) -> LineKind<'_> {
    let closes_solid = line.trim_end().ends_with(CLOSE_SUFFIX);

    if line.starts_with(HEADER) {
        LineKind::Header
    } else if line.starts_with(CELL) {
        let payload = line.split_once('=').map_or("", |(_, rest)| rest);
        LineKind::Cell { payload }
    } else if line.starts_with(FILLER) {
        LineKind::OpenFiller {
            name: solid_name(line),
            closes_solid,
        }
    } else if line.starts_with(SHELL) {
        LineKind::OpenShell {
            name: solid_name(line),
            closes_solid,
        }
    } else if PLANE_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) {
        let payload = line
            .split_once(PLANE_KEYWORD)
            .map_or("", |(_, rest)| rest);
        LineKind::Plane {
            payload,
            closes_solid,
        }
    } else if closes_solid {
        LineKind::Close
    } else {
        LineKind::Other
    }
}
