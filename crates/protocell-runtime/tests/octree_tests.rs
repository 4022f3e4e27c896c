//! Octree queries cross-checked against a brute-force scan.

use protocell_core::prelude::*;
use protocell_runtime::octree::Octree;

fn brute_force(points: &[(CellId, Vec3)], center: Vec3, radius: f64, exclude: Option<CellId>) -> Vec<CellId> {
    let mut hits: Vec<CellId> = points
        .iter()
        .filter(|(id, p)| Some(*id) != exclude && p.distance_squared(&center) <= radius * radius)
        .map(|(id, _)| *id)
        .collect();
    hits.sort();
    hits
}

fn random_points(rng: &mut SeededEntropy, n: usize, spread: f64) -> Vec<(CellId, Vec3)> {
    (0..n)
        .map(|i| {
            let p = Vec3::new(rng.centered(spread), rng.centered(spread), rng.centered(spread));
            (CellId(i as u64), p)
        })
        .collect()
}

#[test]
fn queries_match_brute_force_across_densities() {
    let mut rng = SeededEntropy::new(77);
    let bounds = Bounds::centered(200.0, 200.0, 200.0);

    for &(n, spread, capacity, depth) in &[
        (10, 400.0, 8, 6),
        (200, 400.0, 4, 6),
        (500, 40.0, 8, 3),
        (300, 600.0, 2, 8),
        (1000, 400.0, 16, 1),
    ] {
        let points = random_points(&mut rng, n, spread);
        let mut tree = Octree::new(bounds, capacity, depth);
        tree.rebuild(points.iter().copied());
        assert_eq!(tree.len(), n);

        for q in 0..40 {
            let (center, exclude) = if q % 2 == 0 {
                let (id, p) = points[rng.below(points.len())];
                (p, Some(id))
            } else {
                (Vec3::new(rng.centered(spread), rng.centered(spread), rng.centered(spread)), None)
            };
            let radius = rng.range(0.0, spread * 0.5);

            let mut found = tree.query(center, radius, exclude);
            found.sort();
            assert_eq!(
                found,
                brute_force(&points, center, radius, exclude),
                "n={n} capacity={capacity} depth={depth} radius={radius}"
            );
        }
    }
}

#[test]
fn clustered_points_are_all_found() {
    let mut tree = Octree::new(Bounds::centered(100.0, 100.0, 100.0), 4, 3);
    let points: Vec<(CellId, Vec3)> = (0..64)
        .map(|i| (CellId(i), Vec3::new(5.0 + (i % 4) as f64 * 1e-6, 5.0, 5.0)))
        .collect();
    tree.rebuild(points.iter().copied());

    assert_eq!(tree.query(Vec3::new(5.0, 5.0, 5.0), 0.01, Some(CellId(0))).len(), 63);
    assert!(tree.depth() <= 3);
}
