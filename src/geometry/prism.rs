// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Prism assembled from two facets

use super::{BoundingBox, RegularPolygon};
use crate::error::GeometryError;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Prism bounded by a top and a bottom facet.
///
/// Vertex `i` of the top facet and vertex `i` of the bottom facet lie on the
/// same lateral edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularPrism {
    top: RegularPolygon,
    bottom: RegularPolygon,
}

impl RegularPrism {
    pub fn new(top: RegularPolygon, bottom: RegularPolygon) -> Result<Self, GeometryError> {
        if top.vertex_count() != bottom.vertex_count() {
            return Err(GeometryError::FacetMismatch {
                top: top.vertex_count(),
                bottom: bottom.vertex_count(),
            });
        }
        Ok(Self { top, bottom })
    }

    pub fn top(&self) -> &RegularPolygon {
        &self.top
    }

    pub fn bottom(&self) -> &RegularPolygon {
        &self.bottom
    }

    /// Number of lateral faces
    pub fn side_count(&self) -> usize {
        self.top.vertex_count()
    }

    /// Top vertices followed by bottom vertices
    pub fn vertices(&self) -> impl Iterator<Item = &Point3<f64>> + '_ {
        self.top.vertices().iter().chain(self.bottom.vertices())
    }

    /// Distance between the facet centroids
    pub fn axis_length(&self) -> f64 {
        (self.top.centroid() - self.bottom.centroid()).norm()
    }

    /// Perpendicular distance between the facets, measured along the
    /// bottom facet's normal
    pub fn height(&self) -> f64 {
        (self.top.centroid() - self.bottom.centroid())
            .dot(&self.bottom.normal())
            .abs()
    }

    pub fn volume(&self) -> f64 {
        self.bottom.area() * self.height()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.vertices())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_at(z: f64) -> RegularPolygon {
        RegularPolygon::new(vec![
            Point3::new(0.0, 0.0, z),
            Point3::new(1.0, 0.0, z),
            Point3::new(1.0, 1.0, z),
            Point3::new(0.0, 1.0, z),
        ])
        .unwrap()
    }

    #[test]
    fn test_unit_cube() {
        let prism = RegularPrism::new(square_at(1.0), square_at(0.0)).unwrap();
        assert_eq!(prism.side_count(), 4);
        assert_eq!(prism.vertices().count(), 8);
        assert_relative_eq!(prism.height(), 1.0);
        assert_relative_eq!(prism.volume(), 1.0);

        let bbox = prism.bounding_box();
        assert_eq!(bbox.min, Point3::origin());
        assert_eq!(bbox.max, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_oblique_prism_height() {
        let shifted = RegularPolygon::new(
            square_at(2.0)
                .vertices()
                .iter()
                .map(|p| Point3::new(p.x + 1.0, p.y, p.z))
                .collect(),
        )
        .unwrap();
        let prism = RegularPrism::new(shifted, square_at(0.0)).unwrap();

        assert_relative_eq!(prism.height(), 2.0);
        assert_relative_eq!(prism.axis_length(), 5.0_f64.sqrt());
        assert_relative_eq!(prism.volume(), 2.0);
    }

    #[test]
    fn test_facet_mismatch() {
        let triangle = RegularPolygon::new(vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ])
        .unwrap();
        let result = RegularPrism::new(triangle, square_at(0.0));
        assert_eq!(
            result,
            Err(GeometryError::FacetMismatch { top: 3, bottom: 4 })
        );
    }
}
