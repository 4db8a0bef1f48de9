//! Density clustering of geographic points.
//!
//! ## Why density clustering
//!
//! Incident maps are lumpy: most reports are scattered, a few blocks see many.
//! Partitioning methods like k-means would force every stray report into some
//! group and need the number of hot spots in advance. DBSCAN instead grows
//! clusters only where points are packed closely enough, and leaves the rest as
//! noise. That is exactly the split a heatmap needs: hot layers for the
//! clusters, a faint base layer for everything.
//!
//! ## Duplicates
//!
//! Points are compared by value. Every record counts toward density; whether a
//! repeated coordinate is listed once or once per record in the result is a
//! [`DuplicatePolicy`] choice on the clusterer. By default each record is listed.
//!
//! ## Usage
//!
//! ```rust
//! use hotspot::cluster::{Clustering, Dbscan};
//! use hotspot::Point;
//!
//! let points = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(0.0, 0.001),
//!     Point::new(0.0, 0.002),
//!     Point::new(10.0, 10.0),
//! ];
//!
//! let result = Dbscan::new(0.01, 2).cluster(&points).unwrap();
//! assert_eq!(result.clusters.len(), 1);
//! assert_eq!(result.clusters[0].len(), 3);
//! assert_eq!(result.noise, vec![Point::new(10.0, 10.0)]);
//!
//! // Per-point labels, noise as `None`.
//! let labels = Dbscan::new(0.01, 2).fit_predict_with_noise(&points).unwrap();
//! assert_eq!(labels, vec![Some(0), Some(0), Some(0), None]);
//! ```

mod dbscan;
mod result;
mod traits;
mod util;

pub use dbscan::{Dbscan, DuplicatePolicy};
pub use result::ClusterResult;
pub use traits::{Clustering, NOISE};
