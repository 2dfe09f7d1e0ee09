#![allow(dead_code)]

use k3tree::{distance_squared, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// `count` points uniformly distributed in a cube of side `extent`, numbered from 0.
pub fn uniform_points(rng: &mut StdRng, count: usize, extent: f64) -> Vec<Point> {
    (0..count)
        .map(|i| {
            Point::new(
                i as u64,
                rng.gen_range(0.0..extent),
                rng.gen_range(0.0..extent),
                rng.gen_range(0.0..extent),
            )
        })
        .collect()
}

/// Points clustered in a few tight blobs, with coordinates snapped to a coarse grid so that
/// many of them share values on some axis.
pub fn clustered_points(rng: &mut StdRng, count: usize) -> Vec<Point> {
    let centres: Vec<[f64; 3]> = (0..4)
        .map(|_| [rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0)])
        .collect();
    (0..count)
        .map(|i| {
            let c = centres[rng.gen_range(0..centres.len())];
            let snap = |v: f64| (v * 4.0).round() / 4.0;
            Point::new(
                i as u64,
                snap(c[0] + rng.gen_range(-2.0..2.0)),
                snap(c[1] + rng.gen_range(-2.0..2.0)),
                snap(c[2] + rng.gen_range(-2.0..2.0)),
            )
        })
        .collect()
}

pub fn random_query(rng: &mut StdRng, extent: f64) -> [f64; 3] {
    [
        rng.gen_range(-0.1 * extent..1.1 * extent),
        rng.gen_range(-0.1 * extent..1.1 * extent),
        rng.gen_range(-0.1 * extent..1.1 * extent),
    ]
}

pub fn brute_nearest_distance(points: &[Point], query: &[f64; 3]) -> f64 {
    points
        .iter()
        .map(|p| distance_squared(&p.coords, query))
        .fold(f64::INFINITY, f64::min)
}

pub fn brute_in_radius(points: &[Point], query: &[f64; 3], radius_squared: f64) -> Vec<u64> {
    let mut ids: Vec<u64> = points
        .iter()
        .filter(|p| distance_squared(&p.coords, query) < radius_squared)
        .map(|p| p.id)
        .collect();
    ids.sort_unstable();
    ids
}

/// All orderings of `items`.
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head.clone());
            out.push(tail);
        }
    }
    out
}
