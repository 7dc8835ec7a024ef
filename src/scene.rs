// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene: reconstructed prisms of one document

use crate::config::{Config, DegeneratePolicy};
use crate::error::{GeometryError, SolidError, SolidKind};
use crate::geometry::analytics::{self, CollectionStats};
use crate::geometry::{
    check_intersections, reconstruct_prism, IntersectionReport, PrismPair, RegularPrism,
};
use crate::io::{Cell, GeoDocument, RawSolid};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, instrument, warn};

/// A reconstructed prism and the solid it came from
#[derive(Debug, Clone, Serialize)]
pub struct SolidPrism {
    pub kind: SolidKind,
    /// Position of the source solid within its collection
    pub index: usize,
    pub name: String,
    pub prism: RegularPrism,
}

/// Reconstruct one raw solid, tagging failures with its identity
pub fn reconstruct_solid(solid: &RawSolid) -> Result<SolidPrism, SolidError> {
    reconstruct_prism(&solid.planes)
        .map(|prism| SolidPrism {
            kind: solid.kind,
            index: solid.index,
            name: solid.name.clone(),
            prism,
        })
        .map_err(|source| SolidError {
            kind: solid.kind,
            index: solid.index,
            name: solid.name.clone(),
            line: solid.line,
            source,
        })
}

/// Reconstruct every solid; results keep the input order
pub fn reconstruct_solids(
    solids: &[RawSolid],
    parallel: bool,
) -> Vec<Result<SolidPrism, SolidError>> {
    if parallel {
        solids.par_iter().map(reconstruct_solid).collect()
    } else {
        solids.iter().map(reconstruct_solid).collect()
    }
}

/// Reconstructed scene
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    pub cell: Option<Cell>,
    pub fillers: Vec<SolidPrism>,
    pub shells: Vec<SolidPrism>,
    /// Solids skipped under [`DegeneratePolicy::Skip`]
    pub failures: Vec<SolidError>,
}

/// Intersection checks over both collections
#[derive(Debug, Clone, Serialize)]
pub struct SceneReport {
    pub shells: IntersectionReport,
    pub fillers: IntersectionReport,
}

/// Counts and aggregates of a scene
#[derive(Debug, Clone, Serialize)]
pub struct SceneSummary {
    pub fillers: CollectionStats,
    pub shells: CollectionStats,
    pub failures: usize,
}

impl Scene {
    /// Reconstruct all solids of `document` under `config`
    #[instrument(
        skip_all,
        fields(fillers = document.fillers.len(), shells = document.shells.len())
    )]
    pub fn build(document: &GeoDocument, config: &Config) -> Result<Self, SolidError> {
        let mut failures = Vec::new();
        let fillers = Self::collect(
            reconstruct_solids(&document.fillers, config.parallel),
            config.on_degenerate,
            &mut failures,
        )?;
        let shells = Self::collect(
            reconstruct_solids(&document.shells, config.parallel),
            config.on_degenerate,
            &mut failures,
        )?;

        info!(
            fillers = fillers.len(),
            shells = shells.len(),
            skipped = failures.len(),
            "scene reconstructed"
        );

        Ok(Self {
            cell: document.cell,
            fillers,
            shells,
            failures,
        })
    }

    fn collect(
        results: Vec<Result<SolidPrism, SolidError>>,
        policy: DegeneratePolicy,
        failures: &mut Vec<SolidError>,
    ) -> Result<Vec<SolidPrism>, SolidError> {
        let mut prisms = Vec::with_capacity(results.len());
        for result in results {
            match (result, policy) {
                (Ok(prism), _) => prisms.push(prism),
                (Err(err), DegeneratePolicy::FailFast) => return Err(err),
                (Err(err), DegeneratePolicy::Skip) => {
                    warn!(error = %err, "skipping solid");
                    failures.push(err);
                }
            }
        }
        Ok(prisms)
    }

    /// Pairwise distance check among shells; pair indices refer to solid
    /// indices, not positions in [`Scene::shells`]
    pub fn check_shell_intersections(
        &self,
        epsilon: f64,
    ) -> Result<IntersectionReport, GeometryError> {
        Self::check(&self.shells, epsilon)
    }

    /// Pairwise distance check among fillers
    pub fn check_filler_intersections(
        &self,
        epsilon: f64,
    ) -> Result<IntersectionReport, GeometryError> {
        Self::check(&self.fillers, epsilon)
    }

    pub fn check_intersections(&self, epsilon: f64) -> Result<SceneReport, GeometryError> {
        Ok(SceneReport {
            shells: self.check_shell_intersections(epsilon)?,
            fillers: self.check_filler_intersections(epsilon)?,
        })
    }

    fn check(solids: &[SolidPrism], epsilon: f64) -> Result<IntersectionReport, GeometryError> {
        let prisms: Vec<&RegularPrism> = solids.iter().map(|s| &s.prism).collect();
        let mut report = check_intersections(&prisms, epsilon)?;

        let remap = |pair: PrismPair| PrismPair {
            first: solids[pair.first].index,
            second: solids[pair.second].index,
            distance: pair.distance,
        };
        report.closest = report.closest.map(remap);
        report.intersecting = report.intersecting.into_iter().map(remap).collect();
        Ok(report)
    }

    pub fn summary(&self, tolerance: f64) -> SceneSummary {
        let cell = self.cell.as_ref().map(|c| &c.bounds);
        SceneSummary {
            fillers: analytics::summarize(self.fillers.iter().map(|s| &s.prism), cell, tolerance),
            shells: analytics::summarize(self.shells.iter().map(|s| &s.prism), cell, tolerance),
            failures: self.failures.len(),
        }
    }
}
