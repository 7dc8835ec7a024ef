// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Prism analytics and statistics

use super::{BoundingBox, RegularPrism};
use serde::Serialize;

/// Measured properties of one reconstructed prism
#[derive(Debug, Clone, Serialize)]
pub struct PrismStats {
    /// Number of lateral faces (vertices per facet)
    pub sides: usize,
    /// Area of the top facet
    pub top_area: f64,
    /// Area of the bottom facet
    pub bottom_area: f64,
    /// Perpendicular distance between the facets
    pub height: f64,
    pub volume: f64,
    /// Midpoint of the two facet centroids [x, y, z]
    pub centroid: [f64; 3],
    /// Bounding box [min_x, min_y, min_z, max_x, max_y, max_z]
    pub bbox: [f64; 6],
    /// Both facets regular within the analysis tolerance?
    pub is_regular: bool,
}

/// Analyze a prism; `tolerance` is used for the regularity test only
pub fn analyze(prism: &RegularPrism, tolerance: f64) -> PrismStats {
    let centroid = nalgebra::center(&prism.top().centroid(), &prism.bottom().centroid());
    let bbox = prism.bounding_box();

    PrismStats {
        sides: prism.side_count(),
        top_area: prism.top().area(),
        bottom_area: prism.bottom().area(),
        height: prism.height(),
        volume: prism.volume(),
        centroid: [centroid.x, centroid.y, centroid.z],
        bbox: [bbox.min.x, bbox.min.y, bbox.min.z, bbox.max.x, bbox.max.y, bbox.max.z],
        is_regular: prism.top().is_regular(tolerance) && prism.bottom().is_regular(tolerance),
    }
}

/// Aggregate over a set of prisms
#[derive(Debug, Clone, Serialize)]
pub struct CollectionStats {
    pub count: usize,
    pub total_volume: f64,
    pub min_sides: Option<usize>,
    pub max_sides: Option<usize>,
    /// Prisms whose bounding box leaves the cell
    pub outside_cell: Vec<usize>,
}

pub fn summarize<'a>(
    prisms: impl IntoIterator<Item = &'a RegularPrism>,
    cell: Option<&BoundingBox>,
    tolerance: f64,
) -> CollectionStats {
    let mut stats = CollectionStats {
        count: 0,
        total_volume: 0.0,
        min_sides: None,
        max_sides: None,
        outside_cell: Vec::new(),
    };

    for (i, prism) in prisms.into_iter().enumerate() {
        let sides = prism.side_count();
        stats.count += 1;
        stats.total_volume += prism.volume();
        stats.min_sides = Some(stats.min_sides.map_or(sides, |m| m.min(sides)));
        stats.max_sides = Some(stats.max_sides.map_or(sides, |m| m.max(sides)));

        if let Some(cell) = cell {
            if !cell.contains(&prism.bounding_box(), tolerance) {
                stats.outside_cell.push(i);
            }
        }
    }

    stats
}
