//! Hot spot detection for incident maps.
//!
//! `hotspot` clusters geographic incident points with DBSCAN and turns the
//! result into heat layers: a base layer over every point and a hotter layer
//! per dense cluster.
//!
//! The public API is organised as:
//! - [`cluster`]: the DBSCAN clusterer and its [`ClusterResult`]
//! - [`heatmap`]: layer descriptions for a heat map widget
//! - [`incident`]: incident records and their coordinates
//!
//! ```rust
//! use hotspot::{HeatmapBuilder, Incident, Point};
//!
//! let incidents = vec![
//!     Incident::new("1", Point::new(39.2900, -76.6100)),
//!     Incident::new("2", Point::new(39.2905, -76.6102)),
//!     Incident::new("3", Point::new(39.2910, -76.6098)),
//!     Incident::new("4", Point::new(39.3500, -76.5000)),
//! ];
//!
//! let layers = HeatmapBuilder::default()
//!     .build(&hotspot::incident::positions(&incidents))
//!     .unwrap();
//! assert_eq!(layers.len(), 2); // base + one hot spot
//! ```

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod heatmap;
pub mod incident;
pub mod point;

pub use cluster::{ClusterResult, Clustering, Dbscan, DuplicatePolicy, NOISE};
pub use error::{Error, Result};
pub use heatmap::{HeatLayer, HeatPoint, HeatStyle, HeatmapBuilder, LayerKind};
pub use incident::Incident;
pub use point::Point;
