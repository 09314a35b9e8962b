//! Seeded Lloyd's k-means over profile vectors.
//!
//! Determinism is the whole point here: the RNG is constructed from an
//! explicit seed, never ambient randomness, so a fit over the same points
//! with the same parameters is bit-for-bit reproducible.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Tuning knobs for a k-means fit. Identical params + identical points +
/// identical k reproduce identical labels and WSS.
#[derive(Debug, Clone, Copy)]
pub struct KmeansParams {
    /// Seed for centroid initialization.
    pub seed: u64,
    /// Independent restarts; the lowest-WSS fit wins.
    pub n_restarts: u32,
    /// Iteration bound per restart.
    pub max_iter: u32,
}

impl Default for KmeansParams {
    fn default() -> Self {
        KmeansParams {
            seed: 42,
            n_restarts: 25,
            max_iter: 100,
        }
    }
}

/// A converged fit: per-point cluster indices (0-based), the centroids, and
/// the total within-cluster sum of squares.
#[derive(Debug, Clone)]
pub struct KmeansFit {
    pub labels: Vec<usize>,
    pub centroids: Vec<Vec<f64>>,
    pub wss: f64,
}

/// Runs Lloyd's algorithm with k-means++ initialization and restarts,
/// keeping the lowest-WSS fit.
///
/// Callers must ensure `points` is non-empty, all points share one
/// dimension, and `1 <= k <= points.len()`; the selector and assigner
/// validate this before calling in.
pub fn fit(points: &[Vec<f64>], k: usize, params: &KmeansParams) -> KmeansFit {
    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);

    let mut best = lloyd_once(points, k, params.max_iter, &mut rng);
    for _ in 1..params.n_restarts.max(1) {
        let trial = lloyd_once(points, k, params.max_iter, &mut rng);
        if trial.wss < best.wss {
            best = trial;
        }
    }
    best
}

/// One restart: initialize, then alternate assignment and update steps
/// until labels stop changing or the iteration bound is hit.
fn lloyd_once(points: &[Vec<f64>], k: usize, max_iter: u32, rng: &mut ChaCha8Rng) -> KmeansFit {
    let dim = points[0].len();
    let mut centroids = init_plus_plus(points, k, rng);
    let mut labels = vec![0usize; points.len()];
    let mut dists = vec![0.0f64; points.len()];

    for _ in 0..max_iter.max(1) {
        // Assignment step.
        let mut changed = false;
        for (i, point) in points.iter().enumerate() {
            let (nearest, dist) = nearest_centroid(point, &centroids);
            dists[i] = dist;
            if labels[i] != nearest {
                labels[i] = nearest;
                changed = true;
            }
        }

        // Update step.
        let mut sums = vec![vec![0.0f64; dim]; k];
        let mut counts = vec![0usize; k];
        for (point, &label) in points.iter().zip(&labels) {
            counts[label] += 1;
            for (s, v) in sums[label].iter_mut().zip(point) {
                *s += v;
            }
        }

        for c in 0..k {
            if counts[c] == 0 {
                // Re-seed an emptied cluster from the point currently
                // farthest from its own centroid; the next assignment pass
                // pulls it in.
                let far = farthest_point(&dists);
                centroids[c] = points[far].clone();
                changed = true;
            } else {
                for (value, sum) in centroids[c].iter_mut().zip(&sums[c]) {
                    *value = sum / counts[c] as f64;
                }
            }
        }

        if !changed {
            break;
        }
    }

    let wss = points
        .iter()
        .zip(&labels)
        .map(|(point, &label)| dist_sq(point, &centroids[label]))
        .sum();

    KmeansFit {
        labels,
        centroids,
        wss,
    }
}

/// k-means++ seeding: first centroid uniform, subsequent centroids sampled
/// with probability proportional to squared distance from the nearest
/// already-chosen centroid.
fn init_plus_plus(points: &[Vec<f64>], k: usize, rng: &mut ChaCha8Rng) -> Vec<Vec<f64>> {
    let n = points.len();
    let mut chosen = vec![false; n];
    let mut centroids = Vec::with_capacity(k);

    let first = rng.gen_range(0..n);
    chosen[first] = true;
    centroids.push(points[first].clone());

    while centroids.len() < k {
        let weights: Vec<f64> = points
            .iter()
            .map(|p| nearest_centroid(p, &centroids).1)
            .collect();
        let total: f64 = weights.iter().sum();

        let idx = if total > 0.0 {
            let mut target = rng.gen_range(0.0..total);
            let mut picked = n - 1;
            for (i, w) in weights.iter().enumerate() {
                if target < *w {
                    picked = i;
                    break;
                }
                target -= w;
            }
            picked
        } else {
            // Every remaining point coincides with a centroid (duplicate
            // profiles); take the first one not yet used.
            chosen.iter().position(|&c| !c).unwrap_or(0)
        };

        chosen[idx] = true;
        centroids.push(points[idx].clone());
    }

    centroids
}

fn nearest_centroid(point: &[f64], centroids: &[Vec<f64>]) -> (usize, f64) {
    let mut nearest = 0;
    let mut best = f64::INFINITY;
    for (c, centroid) in centroids.iter().enumerate() {
        let d = dist_sq(point, centroid);
        if d < best {
            best = d;
            nearest = c;
        }
    }
    (nearest, best)
}

fn farthest_point(dists: &[f64]) -> usize {
    let mut far = 0;
    let mut best = -1.0f64;
    for (i, &d) in dists.iter().enumerate() {
        if d > best {
            best = d;
            far = i;
        }
    }
    far
}

fn dist_sq(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_blobs() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 0.0],
            vec![0.1, 0.2],
            vec![0.2, 0.1],
            vec![5.0, 5.0],
            vec![5.1, 4.9],
            vec![4.9, 5.1],
            vec![10.0, 0.0],
            vec![10.1, 0.1],
            vec![9.9, -0.1],
        ]
    }

    #[test]
    fn test_k1_wss_is_total_sum_of_squared_deviations() {
        let points = vec![vec![0.0], vec![2.0], vec![4.0]];
        let fit = fit(&points, 1, &KmeansParams::default());

        // Centroid is the global mean (2.0); deviations 2, 0, 2.
        assert_eq!(fit.centroids.len(), 1);
        assert!((fit.centroids[0][0] - 2.0).abs() < 1e-12);
        assert!((fit.wss - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_well_separated_blobs_recovered_at_k3() {
        let points = three_blobs();
        let result = fit(&points, 3, &KmeansParams::default());

        assert_eq!(result.labels[0], result.labels[1]);
        assert_eq!(result.labels[0], result.labels[2]);
        assert_eq!(result.labels[3], result.labels[4]);
        assert_eq!(result.labels[3], result.labels[5]);
        assert_eq!(result.labels[6], result.labels[7]);
        assert_eq!(result.labels[6], result.labels[8]);
        assert_ne!(result.labels[0], result.labels[3]);
        assert_ne!(result.labels[0], result.labels[6]);
        assert_ne!(result.labels[3], result.labels[6]);
    }

    #[test]
    fn test_same_seed_reproduces_fit() {
        let points = three_blobs();
        let params = KmeansParams::default();

        let a = fit(&points, 3, &params);
        let b = fit(&points, 3, &params);

        assert_eq!(a.labels, b.labels);
        assert_eq!(a.wss, b.wss);
    }

    #[test]
    fn test_k_equals_n_drives_wss_to_zero() {
        let points = three_blobs();
        let result = fit(&points, points.len(), &KmeansParams::default());

        assert!(result.wss < 1e-9);
    }

    #[test]
    fn test_duplicate_points_do_not_break_init() {
        // Two distinct values, four points, k = 4: init weight pool runs dry.
        let points = vec![vec![1.0], vec![1.0], vec![7.0], vec![7.0]];
        let result = fit(&points, 4, &KmeansParams::default());

        assert!(result.wss < 1e-9);
    }
}
