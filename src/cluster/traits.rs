use super::result::ClusterResult;
use crate::error::Result;
use crate::point::Point;

/// Label used by [`Clustering::fit_predict`] for noise points.
pub const NOISE: usize = usize::MAX;

/// Common interface for hard clustering of geographic points.
pub trait Clustering {
    /// Return one label per input point, `None` for noise.
    ///
    /// Cluster ids are dense, starting at 0, and numbered in the order the
    /// clusters were discovered.
    fn fit_predict_with_noise(&self, points: &[Point]) -> Result<Vec<Option<usize>>>;

    /// Partition the input into clusters and a noise remainder.
    fn cluster(&self, points: &[Point]) -> Result<ClusterResult>;

    /// Like [`Clustering::fit_predict_with_noise`], with noise encoded as [`NOISE`].
    fn fit_predict(&self, points: &[Point]) -> Result<Vec<usize>> {
        Ok(self
            .fit_predict_with_noise(points)?
            .into_iter()
            .map(|l| l.unwrap_or(NOISE))
            .collect())
    }

    /// Check if a label represents noise.
    fn is_noise(label: usize) -> bool
    where
        Self: Sized,
    {
        label == NOISE
    }
}
