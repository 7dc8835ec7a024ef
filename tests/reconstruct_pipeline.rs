// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! End-to-end parsing and reconstruction tests

use anyhow::Result;
use approx::assert_relative_eq;
use geoprism::geometry::reconstruct::FIRST_SIDE;
use geoprism::io::{GeoParser, UnterminatedSolidPolicy};
use geoprism::{
    import_geo_file, parse_geo, reconstruct, reconstruct_file, Config, DegeneratePolicy,
    ReconstructError, SolidKind,
};
use nalgebra::Point3;
use std::io::Write;
use tempfile::NamedTempFile;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/two_hexagons.geo");

const UNIT_CUBE: &str = "algebraic3d
solid cell = orthobrick (0,0,0; 1,1,1);
solid polygonalCylinder0 =
 plane (0,0,1; 0,0,1)
 and plane (0,0,0; 0,0,-1)
 and plane (0,0,0; 0,-1,0)
 and plane (1,0,0; 1,0,0)
 and plane (0,1,0; 0,1,0)
 and plane (0,0,0; -1,0,0) and cell;
";

#[test]
fn test_unit_cube_end_to_end() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(UNIT_CUBE.as_bytes())?;

    let scene = reconstruct_file(file.path(), &Config::default())?;

    let cell = scene.cell.expect("cell parsed");
    assert_eq!((cell.xlen(), cell.ylen(), cell.zlen()), (1.0, 1.0, 1.0));
    assert_eq!(scene.fillers.len(), 1);
    assert!(scene.shells.is_empty());

    let prism = &scene.fillers[0].prism;
    let corners = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
    assert_eq!(prism.top().vertex_count(), 4);
    assert_eq!(prism.bottom().vertex_count(), 4);
    for (i, &(x, y)) in corners.iter().enumerate() {
        assert_relative_eq!(prism.top().vertices()[i], Point3::new(x, y, 1.0), epsilon = 1e-12);
        assert_relative_eq!(prism.bottom().vertices()[i], Point3::new(x, y, 0.0), epsilon = 1e-12);
    }
    assert_relative_eq!(prism.volume(), 1.0, epsilon = 1e-12);

    Ok(())
}

#[test]
fn test_fixture_classification_and_order() -> Result<()> {
    let doc = import_geo_file(FIXTURE, UnterminatedSolidPolicy::Reject)?;

    assert_eq!(doc.cell.map(|c| c.extents().x), Some(10.0));
    let filler_names: Vec<&str> = doc.fillers.iter().map(|s| s.name.as_str()).collect();
    let shell_names: Vec<&str> = doc.shells.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(filler_names, ["polygonalCylinder0", "polygonalCylinder1"]);
    assert_eq!(shell_names, ["pc0", "pc1"]);

    for solid in doc.solids() {
        assert_eq!(solid.planes.len(), 8, "{}", solid.name);
    }
    assert_eq!(doc.shells[1].kind, SolidKind::Shell);
    assert_eq!(doc.shells[1].planes[0].point, Point3::new(7.0, 7.0, 6.5));

    Ok(())
}

#[test]
fn test_hexagonal_vertices_lie_on_side_planes() -> Result<()> {
    let doc = import_geo_file(FIXTURE, UnterminatedSolidPolicy::Reject)?;
    let scene = geoprism::Scene::build(&doc, &Config::default())?;

    for (solid, built) in doc.fillers.iter().zip(&scene.fillers) {
        let prism = &built.prism;
        let sides = &solid.planes[FIRST_SIDE..];
        let k = sides.len();
        assert_eq!(prism.side_count(), k);

        for i in 0..k {
            let prev = (i + k - 1) % k;
            for (facet_vertex, facet_plane) in [
                (prism.top().vertices()[i], &solid.planes[0]),
                (prism.bottom().vertices()[i], &solid.planes[1]),
            ] {
                assert!(sides[i].evaluate(&facet_vertex).abs() < 1e-9);
                assert!(sides[prev].evaluate(&facet_vertex).abs() < 1e-9);
                assert!(facet_plane.evaluate(&facet_vertex).abs() < 1e-9);
            }
        }
        assert!(prism.top().is_regular(1e-9));
        assert_relative_eq!(prism.height(), 2.0, epsilon = 1e-12);
    }

    // first vertex sits between the +30 and -30 degree sides
    let first = scene.fillers[0].prism.top().vertices()[0];
    assert_relative_eq!(first, Point3::new(3.0 + 2.0 / 3f64.sqrt(), 3.0, 6.0), epsilon = 1e-9);

    Ok(())
}

#[test]
fn test_degenerate_solid_is_reported_not_nan() {
    let source = "solid pc0 =
 plane (0, 0, 1; 0, 0, 1)
 and plane (0, 0, 0; 0, 0, -1)
 and plane (0, 0, 0; 0, -1, 0)
 and plane (0, -2, 0; 0, -1, 0)
 and plane (0, 1, 0; 0, 1, 0)
 and plane (0, 0, 0; -1, 0, 0) and cell;
";
    let err = reconstruct(source, &Config::default()).unwrap_err();
    let solid_err = err
        .downcast_ref::<geoprism::SolidError>()
        .expect("solid error");
    assert_eq!(solid_err.name, "pc0");
    assert_eq!(
        solid_err.source,
        ReconstructError::Degenerate {
            side: 1,
            facet: geoprism::error::Facet::Top,
            planes: [3, 2, 0],
        }
    );

    let skipped = reconstruct(
        source,
        &Config {
            on_degenerate: DegeneratePolicy::Skip,
            ..Config::default()
        },
    )
    .unwrap();
    assert!(skipped.shells.is_empty());
    assert_eq!(skipped.failures.len(), 1);
}

#[test]
fn test_dangling_solid_policy() {
    let source = format!("{}solid pc9 =\n plane (0, 0, 1; 0, 0, 1)\n", UNIT_CUBE);

    assert!(parse_geo(&source).is_err());

    let doc = GeoParser::new(UnterminatedSolidPolicy::Drop)
        .parse_str(&source)
        .unwrap();
    assert_eq!(doc.fillers.len(), 1);
    assert!(doc.shells.is_empty());
}

#[test]
fn test_scene_serializes_to_json() -> Result<()> {
    let scene = reconstruct(UNIT_CUBE, &Config::default())?;
    let json = serde_json::to_value(&scene)?;

    assert_eq!(json["fillers"][0]["kind"], "filler");
    assert_eq!(json["fillers"][0]["name"], "polygonalCylinder0");
    assert!(json["fillers"][0]["prism"]["top"]["vertices"].is_array());
    Ok(())
}
