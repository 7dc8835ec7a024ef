// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Prism reconstruction from bounding planes
//!
//! A solid arrives as `[top, bottom, side_0, .., side_{k-1}]`. Vertex `i` of
//! each facet is where side `i`, side `i - 1` (wrapping around) and the
//! facet's plane meet. Each of those points is the solution of a 3x3 linear
//! system, solved here with Cramer's rule.

use super::{Plane, RegularPolygon, RegularPrism};
use crate::error::{Facet, GeometryError, ReconstructError};
use nalgebra::{Matrix3, Point3};
use tracing::{instrument, trace};

/// Index of the top plane in a solid's plane list
pub const TOP: usize = 0;
/// Index of the bottom plane in a solid's plane list
pub const BOTTOM: usize = 1;
/// Index of the first side plane in a solid's plane list
pub const FIRST_SIDE: usize = 2;

/// Smallest number of side planes that still encloses a polygon
pub const MIN_SIDES: usize = 3;

/// Intersection point of three planes.
///
/// Rows of the system are the planes' `(a, b, c)` coefficients, the
/// right-hand side is `-d`. A system determinant of exactly zero is the only
/// degeneracy test; no tolerance is applied.
pub fn intersect(p1: &Plane, p2: &Plane, p3: &Plane) -> Result<Point3<f64>, GeometryError> {
    #[rustfmt::skip]
    let system = Matrix3::new(
        p1.a, p1.b, p1.c,
        p2.a, p2.b, p2.c,
        p3.a, p3.b, p3.c,
    );
    let det = system.determinant();
    if det == 0.0 {
        return Err(GeometryError::DegenerateSystem);
    }

    let rhs = nalgebra::Vector3::new(-p1.d, -p2.d, -p3.d);
    let mut coords = [0.0; 3];
    for (axis, coord) in coords.iter_mut().enumerate() {
        let mut replaced = system;
        replaced.set_column(axis, &rhs);
        *coord = replaced.determinant() / det;
    }

    Ok(Point3::new(coords[0], coords[1], coords[2]))
}

/// Build the prism bounded by `planes`.
///
/// Fails without a partial result if any side pair does not meet the top or
/// bottom plane at a single point.
#[instrument(level = "debug", skip(planes), fields(plane_count = planes.len()))]
pub fn reconstruct_prism(planes: &[Plane]) -> Result<RegularPrism, ReconstructError> {
    if planes.len() < FIRST_SIDE + MIN_SIDES {
        return Err(ReconstructError::TooFewPlanes {
            planes: planes.len(),
        });
    }

    let top = &planes[TOP];
    let bottom = &planes[BOTTOM];
    let sides = &planes[FIRST_SIDE..];
    let k = sides.len();

    let mut top_vertices = Vec::with_capacity(k);
    let mut bottom_vertices = Vec::with_capacity(k);

    for i in 0..k {
        let prev = (i + k - 1) % k;
        let side_one = &sides[i];
        let side_two = &sides[prev];

        let degenerate = |facet: Facet, facet_index: usize| ReconstructError::Degenerate {
            side: i,
            facet,
            planes: [FIRST_SIDE + i, FIRST_SIDE + prev, facet_index],
        };

        let pt_top = intersect(side_one, side_two, top).map_err(|_| degenerate(Facet::Top, TOP))?;
        let pt_bottom =
            intersect(side_one, side_two, bottom).map_err(|_| degenerate(Facet::Bottom, BOTTOM))?;

        trace!(side = i, ?pt_top, ?pt_bottom, "vertex pair");
        top_vertices.push(pt_top);
        bottom_vertices.push(pt_bottom);
    }

    let top_facet = RegularPolygon::new(top_vertices)?;
    let bottom_facet = RegularPolygon::new(bottom_vertices)?;
    Ok(RegularPrism::new(top_facet, bottom_facet)?)
}
