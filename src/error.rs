// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for parsing and reconstruction

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Which collection a solid belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SolidKind {
    Filler,
    Shell,
}

impl fmt::Display for SolidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filler => write!(f, "filler"),
            Self::Shell => write!(f, "shell"),
        }
    }
}

/// Prism facet a vertex belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Top,
    Bottom,
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => write!(f, "top"),
            Self::Bottom => write!(f, "bottom"),
        }
    }
}

/// Errors raised while reading a `.geo` document.
///
/// Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: malformed cell definition ({reason}): {content}")]
    Cell {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("line {line}: malformed plane clause ({reason}): {content}")]
    PlaneClause {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("line {line}: plane clause outside of any solid: {content}")]
    PlaneOutsideSolid { line: usize, content: String },

    #[error("line {line}: {kind} solid opened while the solid from line {open_line} is still open")]
    NestedSolid {
        line: usize,
        kind: SolidKind,
        open_line: usize,
    },

    #[error("{kind} solid opened on line {line} is never closed")]
    UnterminatedSolid { kind: SolidKind, line: usize },

    #[error("failed to read input")]
    Io(#[from] std::io::Error),
}

/// Errors from the geometric primitives.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeometryError {
    #[error("planes do not meet at a single point (system determinant is zero)")]
    DegenerateSystem,

    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("prism facets differ in vertex count: top has {top}, bottom has {bottom}")]
    FacetMismatch { top: usize, bottom: usize },

    #[error("prism vertices do not span a convex volume")]
    DegenerateHull,

    #[error("distance query is not supported for this shape pair")]
    UnsupportedQuery,
}

/// Errors from turning one plane list into a prism.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReconstructError {
    #[error("need a top, a bottom and at least three side planes, got {planes} planes")]
    TooFewPlanes { planes: usize },

    #[error("side {side}: planes {planes:?} do not meet at a single point on the {facet} facet")]
    Degenerate {
        side: usize,
        facet: Facet,
        /// Indices into the solid's plane list (top = 0, bottom = 1)
        planes: [usize; 3],
    },

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// A reconstruction failure tagged with the solid it came from
#[derive(Debug, Clone, Error)]
#[error("{kind} solid #{index} `{name}` (line {line}): {source}")]
pub struct SolidError {
    pub kind: SolidKind,
    pub index: usize,
    pub name: String,
    pub line: usize,
    #[source]
    pub source: ReconstructError,
}

/// Reported as `{ kind, index, name, line, message }`
impl Serialize for SolidError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SolidError", 5)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("index", &self.index)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("line", &self.line)?;
        state.serialize_field("message", &self.source.to_string())?;
        state.end()
    }
}
