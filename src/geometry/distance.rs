// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Minimum distance between prisms using parry3d

use super::RegularPrism;
use crate::error::GeometryError;
use parry3d::math::{Isometry, Point};
use parry3d::query;
use parry3d::shape::ConvexPolyhedron;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, instrument};

/// Convert a prism to a parry3d convex polyhedron
pub fn to_convex_polyhedron(prism: &RegularPrism) -> Result<ConvexPolyhedron, GeometryError> {
    let points: Vec<Point<f32>> = prism
        .vertices()
        .map(|p| Point::new(p.x as f32, p.y as f32, p.z as f32))
        .collect();

    ConvexPolyhedron::from_convex_hull(&points).ok_or(GeometryError::DegenerateHull)
}

fn hull_distance(a: &ConvexPolyhedron, b: &ConvexPolyhedron) -> Result<f64, GeometryError> {
    let identity = Isometry::identity();
    query::distance(&identity, a, &identity, b)
        .map(f64::from)
        .map_err(|_| GeometryError::UnsupportedQuery)
}

/// Minimum distance between two prisms; zero when they touch or overlap
pub fn prism_distance(a: &RegularPrism, b: &RegularPrism) -> Result<f64, GeometryError> {
    hull_distance(&to_convex_polyhedron(a)?, &to_convex_polyhedron(b)?)
}

/// Distance between two prisms, by position in the checked list
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrismPair {
    pub first: usize,
    pub second: usize,
    pub distance: f64,
}

/// Outcome of a pairwise intersection check
#[derive(Debug, Clone, Serialize)]
pub struct IntersectionReport {
    pub epsilon: f64,
    pub pair_count: usize,
    /// Closest pair, `None` when fewer than two prisms were checked
    pub closest: Option<PrismPair>,
    /// Pairs closer than or at `epsilon`
    pub intersecting: Vec<PrismPair>,
}

impl IntersectionReport {
    pub fn min_distance(&self) -> Option<f64> {
        self.closest.map(|pair| pair.distance)
    }

    pub fn has_intersection(&self) -> bool {
        !self.intersecting.is_empty()
    }
}

/// Check every unordered pair of `prisms` and report those whose minimum
/// distance does not exceed `epsilon`.
#[instrument(skip(prisms), fields(count = prisms.len()))]
pub fn check_intersections(
    prisms: &[&RegularPrism],
    epsilon: f64,
) -> Result<IntersectionReport, GeometryError> {
    let hulls = prisms
        .par_iter()
        .map(|prism| to_convex_polyhedron(prism))
        .collect::<Result<Vec<_>, _>>()?;

    let pairs: Vec<(usize, usize)> = (0..hulls.len())
        .flat_map(|i| (i + 1..hulls.len()).map(move |j| (i, j)))
        .collect();

    let distances = pairs
        .par_iter()
        .map(|&(first, second)| {
            hull_distance(&hulls[first], &hulls[second]).map(|distance| PrismPair {
                first,
                second,
                distance,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let closest = distances
        .iter()
        .copied()
        .min_by(|a, b| a.distance.total_cmp(&b.distance));
    let intersecting: Vec<PrismPair> = distances
        .into_iter()
        .filter(|pair| pair.distance <= epsilon)
        .collect();

    debug!(
        pairs = pairs.len(),
        intersecting = intersecting.len(),
        min_distance = ?closest.map(|pair| pair.distance),
        "intersection check complete"
    );

    Ok(IntersectionReport {
        epsilon,
        pair_count: pairs.len(),
        closest,
        intersecting,
    })
}
