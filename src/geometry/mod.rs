// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - planes, facets, prisms and their analysis

mod bbox;
mod plane;
mod polygon;
mod prism;

pub mod analytics;
pub mod distance;
pub mod reconstruct;

pub use analytics::{analyze, PrismStats};
pub use bbox::BoundingBox;
pub use distance::{check_intersections, prism_distance, IntersectionReport, PrismPair};
pub use plane::Plane;
pub use polygon::RegularPolygon;
pub use prism::RegularPrism;
pub use reconstruct::{intersect, reconstruct_prism};
