// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Plane in coefficient form

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Plane `a*x + b*y + c*z + d = 0` together with the point and outward
/// normal it was built from.
///
/// The normal is stored as given. Reconstruction works on the raw
/// coefficients, so scaling it only scales the equation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub point: Point3<f64>,
    pub normal: Vector3<f64>,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Plane {
    pub fn from_point_normal(point: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            point,
            normal,
            a: normal.x,
            b: normal.y,
            c: normal.z,
            d: -normal.dot(&point.coords),
        }
    }

    /// Coefficients `(a, b, c)`
    pub fn coefficients(&self) -> Vector3<f64> {
        Vector3::new(self.a, self.b, self.c)
    }

    /// Signed value of the plane equation at `point`; zero on the plane,
    /// positive on the side the normal points to.
    pub fn evaluate(&self, point: &Point3<f64>) -> f64 {
        self.a * point.x + self.b * point.y + self.c * point.z + self.d
    }
}
