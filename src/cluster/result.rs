use serde::{Deserialize, Serialize};

use super::util;
use crate::point::Point;

/// Output of a clustering run: disjoint clusters plus the noise remainder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterResult {
    /// Clusters in discovery order. Members keep their input order.
    pub clusters: Vec<Vec<Point>>,
    /// Points not density-reachable from any core point, in input order.
    pub noise: Vec<Point>,
}

impl ClusterResult {
    /// Group `points` by their label. `labels[i]` is the cluster of `points[i]`.
    ///
    /// `None` means noise. Ids with no members are skipped, so every cluster in
    /// the result is non-empty.
    pub(crate) fn from_labels(points: &[Point], labels: &[Option<usize>]) -> Self {
        debug_assert_eq!(points.len(), labels.len());

        let mut clusters = vec![Vec::new(); util::count_clusters(labels)];
        let mut noise = Vec::new();
        for (&p, label) in points.iter().zip(labels) {
            match label {
                Some(c) => clusters[*c].push(p),
                None => noise.push(p),
            }
        }

        clusters.retain(|c| !c.is_empty());

        Self { clusters, noise }
    }

    /// Number of clusters found.
    pub fn n_clusters(&self) -> usize {
        self.clusters.len()
    }

    /// Total number of points across clusters and noise.
    pub fn n_points(&self) -> usize {
        self.clusters.iter().map(Vec::len).sum::<usize>() + self.noise.len()
    }

    /// True when there are neither clusters nor noise.
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty() && self.noise.is_empty()
    }
}
