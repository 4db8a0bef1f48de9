//! DBSCAN: Density-Based Spatial Clustering of Applications with Noise.
//!
//! # The Algorithm (Ester et al., 1996)
//!
//! DBSCAN groups points by neighborhood density. It discovers clusters of
//! arbitrary shape, does not need the number of clusters up front, and labels
//! isolated points as noise. For incident maps this means dense hot spots
//! come out as clusters while scattered one-off reports stay in the base layer.
//!
//! ## Core Concepts
//!
//! - **Epsilon (ε)**: Neighborhood radius, in degrees.
//! - **MinPts**: Minimum neighborhood size for a point to be "core". The point
//!   itself counts, so `min_pts = 1` makes every point core.
//! - **Core point**: Has at least MinPts points within ε (itself included).
//! - **Border point**: Within ε of a core point but not core itself.
//! - **Noise point**: Neither core nor border.
//!
//! ## Algorithm Steps
//!
//! 1. For each unclassified point P, in input order:
//!    - Find the points within ε.
//!    - If there are fewer than MinPts, mark P as noise (may change later).
//!    - Else P is core: start a new cluster and expand it.
//!
//! 2. Expansion is breadth-first over an explicit frontier:
//!    - Every unclaimed neighbor of a core point joins the cluster. Provisional
//!      noise is promoted to a border point here.
//!    - Newly reached points are queued; when one of them turns out to be core,
//!      its neighbors are claimed in turn.
//!
//! The first cluster to reach a point claims it. A claimed point is never
//! handed to a second cluster and never reported as noise.
//!
//! ## Complexity
//!
//! - **Time**: O(n²) distance comparisons, no spatial index.
//! - **Space**: O(n) for labels and the frontier.
//!
//! ## References
//!
//! Ester et al. (1996). "A Density-Based Algorithm for Discovering Clusters
//! in Large Spatial Databases with Noise." KDD-96.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::result::ClusterResult;
use super::traits::Clustering;
use super::util;
use crate::error::{Error, Result};
use crate::point::{self, Point};

/// How identical coordinates in the input are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Every input entry is clustered on its own. Repeated incidents at one
    /// address each count toward density and each appear in the output.
    #[default]
    Preserve,
    /// Every entry counts toward density, but each distinct coordinate is
    /// listed only once in the clusters and noise of a [`ClusterResult`].
    /// Per-point labels still cover every input index.
    Collapse,
}

/// DBSCAN clustering algorithm over geographic points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dbscan {
    /// Epsilon: neighborhood radius in degrees.
    epsilon: f64,
    /// Minimum neighborhood size (point included) for a core point.
    min_pts: usize,
    /// Duplicate coordinate handling.
    duplicates: DuplicatePolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    /// Not visited yet.
    Unclassified,
    /// Visited, not core, not yet reached by any cluster.
    Noise,
    Cluster(usize),
}

impl Dbscan {
    /// Create a new DBSCAN clusterer.
    ///
    /// # Arguments
    ///
    /// * `epsilon` - Neighborhood radius, in the same units as the points.
    /// * `min_pts` - Minimum neighborhood size (the point itself included).
    ///
    /// Parameters are checked when clustering, not here.
    pub fn new(epsilon: f64, min_pts: usize) -> Self {
        Self {
            epsilon,
            min_pts,
            duplicates: DuplicatePolicy::Preserve,
        }
    }

    /// Set epsilon (neighborhood radius).
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set minimum points for core classification.
    pub fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = min_pts;
        self
    }

    /// Set how duplicate coordinates are handled.
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Neighborhood radius.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Core point threshold.
    pub fn min_pts(&self) -> usize {
        self.min_pts
    }

    /// Duplicate coordinate handling.
    pub fn duplicates(&self) -> DuplicatePolicy {
        self.duplicates
    }

    /// Check the configuration.
    pub fn validate(&self) -> Result<()> {
        let epsilon_ok = self.epsilon.is_finite() && self.epsilon > 0.0;
        if !epsilon_ok {
            return Err(Error::invalid("epsilon", "must be positive and finite"));
        }

        if self.min_pts == 0 {
            return Err(Error::invalid("min_pts", "must be at least 1"));
        }

        Ok(())
    }

    /// Find all points within epsilon of `points[point_idx]`, itself included.
    fn region_query(&self, points: &[Point], point_idx: usize) -> Vec<usize> {
        let point = &points[point_idx];
        let eps_sq = self.epsilon * self.epsilon;
        points
            .iter()
            .enumerate()
            .filter(|(_, other)| point.squared_distance(other) <= eps_sq)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Claim every neighbor not yet in a cluster. Unvisited ones are queued.
    fn claim(
        neighbors: &[usize],
        cluster_id: usize,
        labels: &mut [Label],
        frontier: &mut VecDeque<usize>,
    ) {
        for &idx in neighbors {
            match labels[idx] {
                Label::Unclassified => {
                    labels[idx] = Label::Cluster(cluster_id);
                    frontier.push_back(idx);
                }
                // Visited already and known not to be core: border point.
                Label::Noise => labels[idx] = Label::Cluster(cluster_id),
                Label::Cluster(_) => {}
            }
        }
    }

    /// Grow a cluster from a core point whose neighborhood is `neighbors`.
    fn expand_cluster(
        &self,
        points: &[Point],
        neighbors: &[usize],
        cluster_id: usize,
        labels: &mut [Label],
        frontier: &mut VecDeque<usize>,
    ) {
        Self::claim(neighbors, cluster_id, labels, frontier);

        while let Some(idx) = frontier.pop_front() {
            let next = self.region_query(points, idx);
            if next.len() >= self.min_pts {
                Self::claim(&next, cluster_id, labels, frontier);
            }
        }
    }

    /// Label already validated points.
    fn assign(&self, points: &[Point]) -> Vec<Option<usize>> {
        let n = points.len();
        let mut labels = vec![Label::Unclassified; n];
        let mut frontier = VecDeque::new();
        let mut cluster_id = 0;

        for point_idx in 0..n {
            // A point stays unclassified until it is visited, either here or
            // by being queued in some cluster's frontier.
            if labels[point_idx] != Label::Unclassified {
                continue;
            }

            let neighbors = self.region_query(points, point_idx);
            if neighbors.len() < self.min_pts {
                labels[point_idx] = Label::Noise;
                continue;
            }

            labels[point_idx] = Label::Cluster(cluster_id);
            self.expand_cluster(points, &neighbors, cluster_id, &mut labels, &mut frontier);
            log::trace!("dbscan: cluster {} seeded at index {}", cluster_id, point_idx);
            cluster_id += 1;
        }

        let labels: Vec<Option<usize>> = labels
            .into_iter()
            .map(|l| match l {
                Label::Cluster(c) => Some(c),
                Label::Noise | Label::Unclassified => None,
            })
            .collect();

        log::debug!(
            "dbscan: {} points, eps {}, min_pts {} -> {} clusters, {} noise",
            n,
            self.epsilon,
            self.min_pts,
            cluster_id,
            labels.iter().filter(|l| l.is_none()).count()
        );

        labels
    }
}

impl Default for Dbscan {
    /// Radius of 0.01 degrees (roughly a kilometre) and three points per core.
    fn default() -> Self {
        Self::new(0.01, 3)
    }
}

impl Clustering for Dbscan {
    fn fit_predict_with_noise(&self, points: &[Point]) -> Result<Vec<Option<usize>>> {
        self.validate()?;
        point::validate_points(points)?;

        // Identical coordinates share a neighborhood, so they always end up
        // with the same label under either policy.
        Ok(self.assign(points))
    }

    fn cluster(&self, points: &[Point]) -> Result<ClusterResult> {
        let labels = self.fit_predict_with_noise(points)?;

        match self.duplicates {
            DuplicatePolicy::Preserve => Ok(ClusterResult::from_labels(points, &labels)),
            DuplicatePolicy::Collapse => {
                let (unique, representative) = util::collapse_duplicates(points);
                let mut unique_labels = vec![None; unique.len()];
                for (label, &r) in labels.iter().zip(&representative) {
                    unique_labels[r] = *label;
                }
                Ok(ClusterResult::from_labels(&unique, &unique_labels))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().copied().map(Point::from).collect()
    }

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_dbscan_two_clusters() {
        log_init_test();
        let data = pts(&[
            // Cluster 1: around (0, 0)
            (0.0, 0.0),
            (0.1, 0.0),
            (0.0, 0.1),
            (0.1, 0.1),
            (0.05, 0.05),
            // Cluster 2: around (5, 5)
            (5.0, 5.0),
            (5.1, 5.0),
            (5.0, 5.1),
            (5.1, 5.1),
            (5.05, 5.05),
        ]);

        let labels = Dbscan::new(0.3, 3).fit_predict(&data).unwrap();
        assert_eq!(labels.len(), 10);

        let cluster1 = labels[0];
        for label in &labels[1..5] {
            assert_eq!(*label, cluster1);
        }
        let cluster2 = labels[5];
        for label in &labels[6..10] {
            assert_eq!(*label, cluster2);
        }
        assert_ne!(cluster1, cluster2);
        assert_eq!((cluster1, cluster2), (0, 1));
    }

    #[test]
    fn test_dbscan_with_noise() {
        let data = pts(&[
            (0.0, 0.0),
            (0.1, 0.0),
            (0.0, 0.1),
            (0.1, 0.1),
            // Outlier
            (100.0, 100.0),
            (5.0, 5.0),
            (5.1, 5.0),
            (5.0, 5.1),
            (5.1, 5.1),
        ]);

        let dbscan = Dbscan::new(0.3, 3);
        let labels = dbscan.fit_predict_with_noise(&data).unwrap();
        assert_eq!(labels.len(), 9);
        assert!(labels[4].is_none());
        for (i, label) in labels.iter().enumerate() {
            if i != 4 {
                assert!(label.is_some());
            }
        }

        let hard = dbscan.fit_predict(&data).unwrap();
        assert!(Dbscan::is_noise(hard[4]));
        assert!(!Dbscan::is_noise(hard[0]));

        let result = dbscan.cluster(&data).unwrap();
        assert_eq!(result.n_clusters(), 2);
        assert_eq!(result.noise, vec![Point::new(100.0, 100.0)]);
    }

    #[test]
    fn test_dbscan_all_noise() {
        let data = pts(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (10.0, 10.0)]);
        let labels = Dbscan::new(0.5, 3).fit_predict_with_noise(&data).unwrap();
        for label in labels {
            assert!(label.is_none());
        }
    }

    #[test]
    fn test_dbscan_chain() {
        // Each link is within epsilon, the ends are far apart.
        let data: Vec<Point> = (0..10).map(|i| Point::new(f64::from(i) * 0.3, 0.0)).collect();
        let labels = Dbscan::new(0.5, 2).fit_predict(&data).unwrap();
        let cluster = labels[0];
        for label in labels {
            assert_eq!(label, cluster);
        }
    }

    #[test]
    fn test_dbscan_empty() {
        let result = Dbscan::default().cluster(&[]).unwrap();
        assert!(result.clusters.is_empty());
        assert!(result.noise.is_empty());
        assert!(Dbscan::default().fit_predict(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_dbscan_invalid_params() {
        let data = pts(&[(0.0, 0.0)]);

        for eps in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = Dbscan::new(eps, 3).cluster(&data).unwrap_err();
            assert!(matches!(err, Error::InvalidParameter { name: "epsilon", .. }));
        }

        let err = Dbscan::new(0.5, 0).cluster(&data).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "min_pts", .. }));

        // Checked even when there is nothing to cluster.
        assert!(Dbscan::new(0.0, 3).cluster(&[]).is_err());
    }

    #[test]
    fn test_dbscan_non_finite_points() {
        let data = pts(&[(0.0, 0.0), (f64::NAN, 1.0)]);
        let err = Dbscan::default().fit_predict_with_noise(&data).unwrap_err();
        assert_eq!(err, Error::invalid("points", "coordinates must be finite"));
    }

    #[test]
    fn test_single_point_min_pts_one() {
        let result = Dbscan::new(1.0, 1).cluster(&pts(&[(0.0, 0.0)])).unwrap();
        assert_eq!(result.clusters, vec![vec![Point::new(0.0, 0.0)]]);
        assert!(result.noise.is_empty());
    }

    #[test]
    fn test_single_point_min_pts_two() {
        let result = Dbscan::new(1.0, 2).cluster(&pts(&[(0.0, 0.0)])).unwrap();
        assert!(result.clusters.is_empty());
        assert_eq!(result.noise, vec![Point::new(0.0, 0.0)]);
    }

    #[test]
    fn test_close_triple_is_one_cluster() {
        let data = pts(&[(0.0, 0.0), (0.0, 0.001), (0.0, 0.002)]);
        let result = Dbscan::new(0.01, 2).cluster(&data).unwrap();
        assert_eq!(result.clusters, vec![data.clone()]);
        assert!(result.noise.is_empty());
    }

    #[test]
    fn test_far_pair_is_noise() {
        let data = pts(&[(0.0, 0.0), (10.0, 10.0)]);
        let result = Dbscan::new(0.01, 2).cluster(&data).unwrap();
        assert!(result.clusters.is_empty());
        assert_eq!(result.noise, data);
    }

    #[test]
    fn test_point_reached_through_core_joins_cluster() {
        let data = pts(&[(0.0, 0.0), (0.0, 0.005), (0.0, 0.011)]);
        let result = Dbscan::new(0.01, 2).cluster(&data).unwrap();
        assert_eq!(result.n_clusters(), 1);
        assert_eq!(result.clusters[0], data);
        assert!(result.noise.is_empty());
    }

    #[test]
    fn test_border_point_seen_as_noise_first_is_promoted() {
        // Index 0 is visited first and is not core (only (0, 0.8) is in range).
        // The dense group reaches it later through (0, 0.8).
        let data = pts(&[
            (0.0, 0.0),
            (0.0, 0.8),
            (0.0, 1.2),
            (0.0, 1.3),
            (0.0, 1.4),
        ]);
        let dbscan = Dbscan::new(0.9, 3);
        let labels = dbscan.fit_predict_with_noise(&data).unwrap();
        assert_eq!(labels, vec![Some(0); 5]);

        let result = dbscan.cluster(&data).unwrap();
        assert!(result.noise.is_empty());
        assert_eq!(result.n_points(), 5);
    }

    #[test]
    fn test_border_point_claimed_once() {
        // (0, 1) is a border point within reach of both dense groups; the
        // first group in input order gets it.
        let data = pts(&[
            (0.0, 0.0),
            (0.0, -0.1),
            (0.0, -0.2),
            (0.0, 1.0),
            (0.0, 2.0),
            (0.0, 2.1),
            (0.0, 2.2),
        ]);
        let dbscan = Dbscan::new(1.0, 4);
        let labels = dbscan.fit_predict_with_noise(&data).unwrap();
        assert_eq!(labels[..4], [Some(0); 4]);
        assert_eq!(labels[4..], [Some(1), Some(1), Some(1)]);

        let result = dbscan.cluster(&data).unwrap();
        assert_eq!(result.n_clusters(), 2);
        assert_eq!(result.n_points(), data.len());
        assert!(!result.clusters[1].contains(&Point::new(0.0, 1.0)));
    }

    #[test]
    fn test_duplicates_preserved_count_toward_density() {
        let data = pts(&[(1.0, 1.0), (1.0, 1.0), (1.0, 1.0), (5.0, 5.0)]);

        let result = Dbscan::new(0.01, 3).cluster(&data).unwrap();
        assert_eq!(result.clusters, vec![vec![Point::new(1.0, 1.0); 3]]);
        assert_eq!(result.noise, vec![Point::new(5.0, 5.0)]);
    }

    #[test]
    fn test_duplicates_collapsed() {
        let data = pts(&[(1.0, 1.0), (1.0, 1.0), (1.0, 1.0), (5.0, 5.0)]);
        let dbscan = Dbscan::new(0.01, 3).with_duplicates(DuplicatePolicy::Collapse);

        // Three reports at one address are dense enough; the address is
        // listed once.
        let result = dbscan.cluster(&data).unwrap();
        assert_eq!(result.clusters, vec![vec![Point::new(1.0, 1.0)]]);
        assert_eq!(result.noise, vec![Point::new(5.0, 5.0)]);

        // Labels still cover every input entry.
        let labels = dbscan.fit_predict_with_noise(&data).unwrap();
        assert_eq!(labels, vec![Some(0), Some(0), Some(0), None]);
    }

    #[test]
    fn test_collapse_only_changes_listing() {
        let data = pts(&[
            (0.0, 0.0),
            (2.0, 2.0),
            (0.0, 0.0),
            (0.0, 0.005),
            (2.0, 2.0),
            (7.0, 7.0),
        ]);
        let preserve = Dbscan::new(0.01, 3);
        let collapse = preserve.with_duplicates(DuplicatePolicy::Collapse);

        assert_eq!(
            preserve.fit_predict_with_noise(&data).unwrap(),
            collapse.fit_predict_with_noise(&data).unwrap()
        );

        let result = collapse.cluster(&data).unwrap();
        assert_eq!(
            result.clusters,
            vec![vec![Point::new(0.0, 0.0), Point::new(0.0, 0.005)]]
        );
        assert_eq!(result.noise, vec![Point::new(2.0, 2.0), Point::new(7.0, 7.0)]);
    }

    #[test]
    fn test_deterministic() {
        let data: Vec<Point> = (0..50)
            .map(|i| {
                let t = f64::from(i);
                Point::new((t * 0.37).sin(), (t * 0.91).cos())
            })
            .collect();
        let dbscan = Dbscan::new(0.2, 3);
        assert_eq!(dbscan.cluster(&data).unwrap(), dbscan.cluster(&data).unwrap());
    }

    #[test]
    fn test_concurrent_runs_are_independent() {
        let a: Vec<Point> = (0..20).map(|i| Point::new(f64::from(i) * 0.001, 0.0)).collect();
        let b: Vec<Point> = (0..20).map(|i| Point::new(f64::from(i), 0.0)).collect();
        let dbscan = Dbscan::new(0.01, 2);

        let (ra, rb) = std::thread::scope(|s| {
            let ha = s.spawn(|| dbscan.cluster(&a));
            let hb = s.spawn(|| dbscan.cluster(&b));
            (ha.join().unwrap().unwrap(), hb.join().unwrap().unwrap())
        });

        assert_eq!(ra.n_clusters(), 1);
        assert!(ra.noise.is_empty());
        assert_eq!(rb.n_clusters(), 0);
        assert_eq!(rb.noise.len(), 20);
    }

    #[test]
    fn test_config_from_json() {
        let dbscan: Dbscan =
            serde_json::from_str(r#"{"epsilon":0.02,"duplicates":"collapse"}"#).unwrap();
        assert_eq!(dbscan.epsilon(), 0.02);
        assert_eq!(dbscan.min_pts(), 3);
        assert_eq!(dbscan.duplicates(), DuplicatePolicy::Collapse);
    }
}
