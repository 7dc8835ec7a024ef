// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Planar polygon facets

use crate::error::GeometryError;
use crate::utils::math::approx_eq;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Closed polygon given by its ordered vertices.
///
/// The last vertex connects back to the first. Vertices are expected to be
/// coplanar; nothing here enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularPolygon {
    vertices: Vec<Point3<f64>>,
}

impl RegularPolygon {
    pub fn new(vertices: Vec<Point3<f64>>) -> Result<Self, GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Arithmetic mean of the vertices
    pub fn centroid(&self) -> Point3<f64> {
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.coords);
        Point3::from(sum / self.vertices.len() as f64)
    }

    /// Newell vector: normal direction scaled by twice the enclosed area
    fn newell(&self) -> Vector3<f64> {
        self.edges()
            .fold(Vector3::zeros(), |acc, (p, q)| acc + p.coords.cross(&q.coords))
    }

    /// Unit normal following the vertex winding (right-hand rule).
    ///
    /// Zero vector for a polygon with no enclosed area.
    pub fn normal(&self) -> Vector3<f64> {
        self.newell().try_normalize(0.0).unwrap_or_else(Vector3::zeros)
    }

    pub fn area(&self) -> f64 {
        self.newell().norm() / 2.0
    }

    /// Edges as `(start, end)` pairs, closing edge last
    pub fn edges(&self) -> impl Iterator<Item = (&Point3<f64>, &Point3<f64>)> + '_ {
        self.vertices
            .iter()
            .zip(self.vertices.iter().cycle().skip(1))
    }

    pub fn edge_lengths(&self) -> Vec<f64> {
        self.edges().map(|(p, q)| (q - p).norm()).collect()
    }

    pub fn perimeter(&self) -> f64 {
        self.edge_lengths().iter().sum()
    }

    /// Check that all edges and all circumradii agree within `tolerance`
    pub fn is_regular(&self, tolerance: f64) -> bool {
        let lengths = self.edge_lengths();
        let first = lengths[0];
        if !lengths.iter().all(|&l| approx_eq(l, first, tolerance)) {
            return false;
        }

        let center = self.centroid();
        let radius = (self.vertices[0] - center).norm();
        self.vertices
            .iter()
            .all(|v| approx_eq((v - center).norm(), radius, tolerance))
    }
}
