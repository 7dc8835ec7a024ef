// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Netgen `.geo` document parser
//!
//! Recovers the cell and the per-solid plane lists from the line-oriented
//! output of the CppPolygons GeoWriter:
//!
//! ```text
//! algebraic3d
//! solid cell = orthobrick (0, 0, 0; 10, 10, 10);
//! solid polygonalCylinder0 =
//!  plane (5, 5, 6; 0, 0, 1)
//!  and plane (5, 5, 4; 0, 0, -1)
//!  and plane (..; ..)
//!  and plane (..; ..) and cell;
//! solid pc0 =
//!  ...
//! ```

use super::lexer::{classify, LineKind};
use super::payload::parse_triple_pair;
use crate::error::{ParseError, SolidKind};
use crate::geometry::{BoundingBox, Plane};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use tracing::{debug, warn};

/// Bounding cell of the scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cell {
    pub bounds: BoundingBox,
}

impl Cell {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self {
            bounds: BoundingBox::new(min, max),
        }
    }

    pub fn xlen(&self) -> f64 {
        self.bounds.max.x - self.bounds.min.x
    }

    pub fn ylen(&self) -> f64 {
        self.bounds.max.y - self.bounds.min.y
    }

    pub fn zlen(&self) -> f64 {
        self.bounds.max.z - self.bounds.min.z
    }

    /// `(xlen, ylen, zlen)`
    pub fn extents(&self) -> Vector3<f64> {
        self.bounds.size()
    }
}

/// Plane list of one solid in file order: top, bottom, then the sides
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawSolid {
    pub kind: SolidKind,
    /// Position within its collection (fillers or shells)
    pub index: usize,
    pub name: String,
    /// Line of the `solid ...` statement
    pub line: usize,
    pub planes: Vec<Plane>,
}

/// Parsed document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeoDocument {
    pub cell: Option<Cell>,
    pub fillers: Vec<RawSolid>,
    pub shells: Vec<RawSolid>,
}

impl GeoDocument {
    pub fn solids(&self) -> impl Iterator<Item = &RawSolid> + '_ {
        self.fillers.iter().chain(&self.shells)
    }
}

/// What to do with a solid that is still open at end of input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnterminatedSolidPolicy {
    #[default]
    Reject,
    Drop,
}

#[derive(Debug)]
struct PendingSolid {
    name: String,
    line: usize,
    planes: Vec<Plane>,
}

impl PendingSolid {
    fn new(name: &str, line: usize) -> Self {
        Self {
            name: name.to_string(),
            line,
            planes: Vec::new(),
        }
    }
}

/// Solid currently being read
#[derive(Debug, Default)]
enum OpenSolid {
    #[default]
    None,
    Filler(PendingSolid),
    Shell(PendingSolid),
}

impl OpenSolid {
    fn pending(&self) -> Option<(SolidKind, &PendingSolid)> {
        match self {
            Self::None => None,
            Self::Filler(p) => Some((SolidKind::Filler, p)),
            Self::Shell(p) => Some((SolidKind::Shell, p)),
        }
    }
}

/// Streaming parser over the lines of one document
#[derive(Debug, Default)]
pub struct GeoParser {
    unterminated: UnterminatedSolidPolicy,
    document: GeoDocument,
    open: OpenSolid,
}

impl GeoParser {
    pub fn new(unterminated: UnterminatedSolidPolicy) -> Self {
        Self {
            unterminated,
            ..Self::default()
        }
    }

    /// Parse a whole document held in memory
    pub fn parse_str(self, source: &str) -> Result<GeoDocument, ParseError> {
        self.parse_reader(source.as_bytes())
    }

    /// Parse a document line by line from `reader`
    pub fn parse_reader<R: BufRead>(mut self, reader: R) -> Result<GeoDocument, ParseError> {
        for (i, line) in reader.lines().enumerate() {
            self.feed(i + 1, &line?)?;
        }
        self.finish()
    }

    /// Process one line; `number` is 1-based
    pub fn feed(&mut self, number: usize, line: &str) -> Result<(), ParseError> {
        match classify(line) {
            LineKind::Header | LineKind::Other => {}
            LineKind::Cell { payload } => {
                let (min, max) = parse_triple_pair(payload).map_err(|reason| ParseError::Cell {
                    line: number,
                    content: line.to_string(),
                    reason,
                })?;
                let cell = Cell::new(Point3::from(min), Point3::from(max));
                debug!(line = number, extents = ?cell.extents(), "cell");
                self.document.cell = Some(cell);
            }
            LineKind::OpenFiller { name, closes_solid } => {
                let solid = OpenSolid::Filler(PendingSolid::new(name, number));
                self.open_solid(number, solid)?;
                if closes_solid {
                    self.close_solid();
                }
            }
            LineKind::OpenShell { name, closes_solid } => {
                let solid = OpenSolid::Shell(PendingSolid::new(name, number));
                self.open_solid(number, solid)?;
                if closes_solid {
                    self.close_solid();
                }
            }
            LineKind::Plane {
                payload,
                closes_solid,
            } => {
                let plane = plane_from_clause(payload).map_err(|reason| ParseError::PlaneClause {
                    line: number,
                    content: line.to_string(),
                    reason,
                })?;
                match &mut self.open {
                    OpenSolid::Filler(pending) | OpenSolid::Shell(pending) => {
                        pending.planes.push(plane);
                    }
                    OpenSolid::None => {
                        return Err(ParseError::PlaneOutsideSolid {
                            line: number,
                            content: line.to_string(),
                        });
                    }
                }
                if closes_solid {
                    self.close_solid();
                }
            }
            LineKind::Close => self.close_solid(),
        }
        Ok(())
    }

    /// End of input; applies the unterminated-solid policy
    pub fn finish(self) -> Result<GeoDocument, ParseError> {
        if let Some((kind, pending)) = self.open.pending() {
            match self.unterminated {
                UnterminatedSolidPolicy::Reject => {
                    return Err(ParseError::UnterminatedSolid {
                        kind,
                        line: pending.line,
                    });
                }
                UnterminatedSolidPolicy::Drop => {
                    warn!(
                        %kind,
                        name = %pending.name,
                        line = pending.line,
                        planes = pending.planes.len(),
                        "dropping solid left open at end of input"
                    );
                }
            }
        }

        debug!(
            fillers = self.document.fillers.len(),
            shells = self.document.shells.len(),
            "document parsed"
        );
        Ok(self.document)
    }

    fn open_solid(&mut self, number: usize, solid: OpenSolid) -> Result<(), ParseError> {
        if let Some((_, pending)) = self.open.pending() {
            let kind = match &solid {
                OpenSolid::Shell(_) => SolidKind::Shell,
                _ => SolidKind::Filler,
            };
            return Err(ParseError::NestedSolid {
                line: number,
                kind,
                open_line: pending.line,
            });
        }
        self.open = solid;
        Ok(())
    }

    /// Commit the open solid; a close marker with nothing open is ignored
    fn close_solid(&mut self) {
        let (kind, pending, target) = match std::mem::take(&mut self.open) {
            OpenSolid::None => return,
            OpenSolid::Filler(p) => (SolidKind::Filler, p, &mut self.document.fillers),
            OpenSolid::Shell(p) => (SolidKind::Shell, p, &mut self.document.shells),
        };

        debug!(
            %kind,
            name = %pending.name,
            line = pending.line,
            planes = pending.planes.len(),
            "solid closed"
        );
        let index = target.len();
        target.push(RawSolid {
            kind,
            index,
            name: pending.name,
            line: pending.line,
            planes: pending.planes,
        });
    }
}

/// Build a plane from a `(px, py, pz; nx, ny, nz)` clause payload
pub fn plane_from_clause(payload: &str) -> Result<Plane, String> {
    let (point, normal) = parse_triple_pair(payload)?;
    Ok(Plane::from_point_normal(
        Point3::from(point),
        Vector3::from(normal),
    ))
}

/// Parse a document with the default policy
pub fn parse_geo(source: &str) -> Result<GeoDocument, ParseError> {
    GeoParser::default().parse_str(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SOLIDS: &str = "algebraic3d
solid cell = orthobrick (0, 0, 0; 10, 10, 10);
solid polygonalCylinder0 =
 plane (5, 5, 6; 0, 0, 1)
 and plane (5, 5, 4; 0, 0, -1)
 and plane (5, 4, 5; 0, -1, 0)
 and plane (6, 5, 5; 1, 0, 0)
 and plane (5, 6, 5; 0, 1, 0)
 and plane (4, 5, 5; -1, 0, 0) and cell;
solid pc0 =
 plane (5, 5, 7; 0, 0, 1)
 and plane (5, 5, 3; 0, 0, -1)
 and plane (5, 3, 5; 0, -1, 0)
 and plane (7, 5, 5; 1, 0, 0)
 and plane (5, 7, 5; 0, 1, 0)
 and plane (3, 5, 5; -1, 0, 0) and cell;
tlo polygonalCylinder0;
";

    #[test]
    fn test_cell_extents() {
        let doc = parse_geo("algebraic3d\nsolid cell = orthobrick (0,0,0; 2,3,5);\n").unwrap();
        let cell = doc.cell.unwrap();
        assert_eq!((cell.xlen(), cell.ylen(), cell.zlen()), (2.0, 3.0, 5.0));

        let doc = parse_geo("solid cell = orthobrick (-1, 1, 2; 1, 4, 3);").unwrap();
        assert_eq!(doc.cell.unwrap().extents(), Vector3::new(2.0, 3.0, 1.0));
    }

    #[test]
    fn test_classifies_filler_and_shell() {
        let doc = parse_geo(TWO_SOLIDS).unwrap();
        assert_eq!(doc.fillers.len(), 1);
        assert_eq!(doc.shells.len(), 1);

        let filler = &doc.fillers[0];
        assert_eq!(filler.kind, SolidKind::Filler);
        assert_eq!(filler.name, "polygonalCylinder0");
        assert_eq!(filler.line, 3);
        assert_eq!(filler.planes.len(), 6);
        assert_eq!(filler.planes[0].point, Point3::new(5.0, 5.0, 6.0));
        assert_eq!(filler.planes[5].normal, Vector3::new(-1.0, 0.0, 0.0));

        let shell = &doc.shells[0];
        assert_eq!(shell.kind, SolidKind::Shell);
        assert_eq!(shell.name, "pc0");
        assert_eq!(shell.planes.len(), 6);
        assert_eq!(shell.planes[2].point, Point3::new(5.0, 3.0, 5.0));
        assert_eq!(doc.solids().count(), 2);
    }

    #[test]
    fn test_crlf_line_endings() {
        let doc = parse_geo(&TWO_SOLIDS.replace('\n', "\r\n")).unwrap();
        assert_eq!(doc.fillers[0].planes.len(), 6);
        assert_eq!(doc.shells[0].planes.len(), 6);
    }

    #[test]
    fn test_indices_follow_file_order() {
        let source = "solid pc0 =\n plane (0, 0, 1; 0, 0, 1) and cell;\n\
                      solid pc1 =\n plane (0, 0, 2; 0, 0, 1) and cell;\n";
        let doc = parse_geo(source).unwrap();
        assert_eq!(doc.shells.len(), 2);
        assert_eq!(doc.shells[1].index, 1);
        assert_eq!(doc.shells[1].name, "pc1");
        assert_eq!(doc.shells[1].planes[0].d, -2.0);
    }

    #[test]
    fn test_bare_close_line() {
        let source = "solid polygonalCylinder7 =\n plane (0, 0, 1; 0, 0, 1)\n and cell;\n";
        let doc = parse_geo(source).unwrap();
        assert_eq!(doc.fillers.len(), 1);
        assert_eq!(doc.fillers[0].planes.len(), 1);
    }

    #[test]
    fn test_plane_outside_solid() {
        let err = parse_geo("algebraic3d\n plane (0, 0, 1; 0, 0, 1)\n").unwrap_err();
        assert!(matches!(err, ParseError::PlaneOutsideSolid { line: 2, .. }));
    }

    #[test]
    fn test_bad_cell_arity() {
        let err = parse_geo("solid cell = orthobrick (0, 0; 1, 1, 1);").unwrap_err();
        match err {
            ParseError::Cell { line, reason, .. } => {
                assert_eq!(line, 1);
                assert!(reason.contains("expected 3"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_bad_plane_numbers() {
        let source = "solid pc0 =\n plane (0, 0, one; 0, 0, 1)\n";
        let err = parse_geo(source).unwrap_err();
        match err {
            ParseError::PlaneClause { line, content, .. } => {
                assert_eq!(line, 2);
                assert_eq!(content, " plane (0, 0, one; 0, 0, 1)");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_run_together_numbers_are_rejected() {
        for clause in [" plane (0, 1-1; 0, 0, 1)", " plane (0, 1.5.5; 0, 0, 1)"] {
            let source = format!("solid pc0 =\n{} and cell;\n", clause);
            let err = parse_geo(&source).unwrap_err();
            assert!(
                matches!(err, ParseError::PlaneClause { line: 2, .. }),
                "{:?} gave {}",
                clause,
                err
            );
        }
    }

    #[test]
    fn test_solid_closed_on_its_open_line() {
        let source = "solid pc0 = and cell;\n\
                      solid pc1 =\n plane (0,0,1; 0,0,1) and cell;\n";
        let doc = parse_geo(source).unwrap();
        assert_eq!(doc.shells.len(), 2);
        assert_eq!(doc.shells[0].name, "pc0");
        assert!(doc.shells[0].planes.is_empty());
        assert_eq!(doc.shells[1].index, 1);
        assert_eq!(doc.shells[1].planes.len(), 1);
    }

    #[test]
    fn test_nested_solid() {
        let source = "solid polygonalCylinder0 =\n plane (0, 0, 1; 0, 0, 1)\nsolid pc0 =\n";
        let err = parse_geo(source).unwrap_err();
        assert!(matches!(
            err,
            ParseError::NestedSolid {
                line: 3,
                kind: SolidKind::Shell,
                open_line: 1
            }
        ));
    }

    #[test]
    fn test_unterminated_solid_policies() {
        let source = "solid pc0 =\n plane (0, 0, 1; 0, 0, 1) and cell;\n\
                      solid pc1 =\n plane (0, 0, 1; 0, 0, 1)\n";

        let err = GeoParser::new(UnterminatedSolidPolicy::Reject)
            .parse_str(source)
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnterminatedSolid {
                kind: SolidKind::Shell,
                line: 3
            }
        ));

        let doc = GeoParser::new(UnterminatedSolidPolicy::Drop)
            .parse_str(source)
            .unwrap();
        assert_eq!(doc.shells.len(), 1);
        assert_eq!(doc.shells[0].name, "pc0");
    }

    #[test]
    fn test_missing_cell_is_allowed() {
        let doc = parse_geo("algebraic3d\n").unwrap();
        assert!(doc.cell.is_none());
        assert!(doc.fillers.is_empty());
        assert!(doc.shells.is_empty());
    }
}
