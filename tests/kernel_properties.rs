#![allow(clippy::unwrap_used)]

use std::f64::consts::TAU;

use meshkern::math::Point2;
use meshkern::operations::grid::{ExtractIndices, FillMask};
use meshkern::operations::projection::{geocentric_radius, LambertEqualArea};
use meshkern::operations::stencil::{BuildNeighborClouds, CloudOverflow, CLOUD_PADDING};
use meshkern::operations::weights::{AreaWeights, AreaWeightsFromAreas};
use meshkern::TriMesh;
use proptest::prelude::*;
use spade::{DelaunayTriangulation, Point2 as SpadePoint2, Triangulation as _};

/// Triangulates scattered points the way an upstream mesher would.
fn delaunay(points: &[(f64, f64)]) -> TriMesh {
    let mut dt = DelaunayTriangulation::<SpadePoint2<f64>>::new();
    for &(x, y) in points {
        dt.insert(SpadePoint2::new(x, y)).unwrap();
    }

    let vertices = dt
        .vertices()
        .map(|v| Point2::new(v.position().x, v.position().y))
        .collect();
    #[allow(clippy::cast_possible_truncation)]
    let triangles = dt
        .inner_faces()
        .map(|face| face.vertices().map(|v| v.fix().index() as u32))
        .collect();
    TriMesh::new(vertices, triangles).unwrap()
}

fn scattered_points() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), 3..40)
}

fn wrapped_difference(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(TAU);
    d.min(TAU - d)
}

#[test]
fn single_triangle_example() {
    let mesh = TriMesh::from_xy(&[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0], vec![[0, 1, 2]]).unwrap();
    assert!((mesh.triangle_areas()[0] - 0.5).abs() < 1e-15);

    let out = AreaWeights::new(&mesh).execute().unwrap();
    assert_eq!(out.weight, vec![1, 1, 1]);
    for a in out.area {
        assert!((a - 1.0 / 6.0).abs() < 1e-15);
    }
}

#[test]
fn wgs84_radius_example() {
    let r1 = 6_378_137.0;
    let r2 = 6_356_752.0;
    let equator = geocentric_radius(0.0, r1, r2).unwrap();
    let pole = geocentric_radius(std::f64::consts::FRAC_PI_2, r1, r2).unwrap();
    assert!((equator - r1).abs() <= r1 * 1e-15);
    assert!((pole - r2).abs() <= r2 * 1e-15);
}

proptest! {
    #[test]
    fn areas_partition_triangle_area(points in scattered_points()) {
        let mesh = delaunay(&points);
        let out = AreaWeights::new(&mesh).execute().unwrap();
        let expected: f64 = mesh.triangle_areas().iter().sum();
        prop_assert!((out.total_area() - expected).abs() <= 1e-9 * expected.max(1.0));
        prop_assert!(out.area.iter().all(|&a| a >= 0.0));
    }

    #[test]
    fn weights_count_incident_triangles(points in scattered_points()) {
        let mesh = delaunay(&points);
        let out = AreaWeights::new(&mesh).execute().unwrap();
        for (v, &w) in out.weight.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let incident = mesh
                .triangles()
                .iter()
                .filter(|tri| tri.contains(&(v as u32)))
                .count();
            prop_assert_eq!(w as usize, incident);
        }
    }

    #[test]
    fn cached_areas_reproduce_geometric_weights(points in scattered_points()) {
        let mesh = delaunay(&points);
        let geometric = AreaWeights::new(&mesh).execute().unwrap();
        let areas = mesh.triangle_areas();
        let cached = AreaWeightsFromAreas::new(mesh.topology(), &areas).execute().unwrap();
        prop_assert_eq!(&geometric.weight, &cached.weight);
        for (a, b) in geometric.area.iter().zip(&cached.area) {
            prop_assert!((a - b).abs() <= 1e-12 * a.abs().max(1.0));
        }
    }

    #[test]
    fn clouds_contain_one_hop_without_duplicates(points in scattered_points()) {
        let mesh = delaunay(&points);
        let topology = mesh.topology();
        let n = topology.vertex_count();
        // A cloud never exceeds n - 1 entries.
        let clouds = BuildNeighborClouds::new(topology, n.max(1)).execute().unwrap();
        for v in 0..n {
            #[allow(clippy::cast_possible_truncation)]
            let vertex = v as u32;
            let row = clouds.row(v);
            prop_assert!(row.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(!row.contains(&vertex));
            for u in topology.vertex_neighbours(vertex).unwrap() {
                prop_assert!(row.binary_search(&u).is_ok());
            }
            prop_assert!(clouds.padded_row(v)[row.len()..].iter().all(|&p| p == CLOUD_PADDING));
        }
    }

    #[test]
    fn truncated_clouds_keep_one_hop(points in scattered_points(), nnz in 3usize..5) {
        let mesh = delaunay(&points);
        let topology = mesh.topology();
        let built = BuildNeighborClouds::with_stencil_width(topology, nnz)
            .with_overflow(CloudOverflow::Truncate)
            .execute();
        if let Ok(clouds) = built {
            for v in 0..topology.vertex_count() {
                #[allow(clippy::cast_possible_truncation)]
                let neighbours = topology.vertex_neighbours(v as u32).unwrap();
                let row = clouds.row(v);
                prop_assert!(row.len() <= nnz * nnz);
                prop_assert!(neighbours.iter().all(|u| row.binary_search(u).is_ok()));
            }
        }
    }

    #[test]
    fn hull_boundary_is_a_closed_cycle(points in scattered_points()) {
        let mesh = delaunay(&points);
        prop_assume!(!mesh.topology().is_empty());
        let topology = mesh.topology();
        let neighbours = topology.triangle_neighbours();

        let open_edges = neighbours.iter().flatten().filter(|n| n.is_none()).count();
        prop_assert_eq!(open_edges, topology.boundary_vertices().len());
        for (t, across) in neighbours.iter().enumerate() {
            for &s in across.iter().flatten() {
                prop_assert!(neighbours[s].contains(&Some(t)));
            }
        }
    }

    #[test]
    fn lambert_inverse_recovers_points(
        lon0 in -3.0f64..3.0,
        lat0 in -1.5f64..1.5,
        dlon in -3.0f64..3.0,
        lat in -1.5f64..1.5,
    ) {
        let cos_c = lat0.sin() * lat.sin() + lat0.cos() * lat.cos() * dlon.cos();
        prop_assume!(cos_c > -0.9);

        let proj = LambertEqualArea::new(lon0, lat0);
        let (xs, ys) = proj.forward(&[lon0 + dlon], &[lat]).unwrap();
        let (lons, lats) = proj.inverse(&xs, &ys).unwrap();
        prop_assert!((lats[0] - lat).abs() < 1e-8);
        prop_assert!(wrapped_difference(lons[0], lon0 + dlon) < 1e-7);
    }

    #[test]
    fn radius_endpoints(r1 in 1.0f64..1e7, r2 in 1.0f64..1e7) {
        let equator = geocentric_radius(0.0, r1, r2).unwrap();
        let pole = geocentric_radius(std::f64::consts::FRAC_PI_2, r1, r2).unwrap();
        prop_assert!((equator - r1).abs() <= r1 * 1e-12);
        prop_assert!((pole - r2).abs() <= r2 * 1e-12);
    }

    #[test]
    fn mask_round_trip(
        (rows, cols, indices) in (1usize..20, 1usize..20).prop_flat_map(|(rows, cols)| {
            #[allow(clippy::cast_possible_truncation)]
            let all: Vec<u32> = (0..(rows * cols) as u32).collect();
            (
                Just(rows),
                Just(cols),
                prop::sample::subsequence(all, rows).prop_shuffle(),
            )
        })
    ) {
        let mask = FillMask::new(&indices, rows, cols).execute().unwrap();
        let mut expected = indices.clone();
        expected.sort_unstable();
        prop_assert_eq!(ExtractIndices::new(&mask).execute(), expected);
    }
}
