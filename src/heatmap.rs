//! Heat layer descriptions for a map widget.
//!
//! The viewer draws one faint base layer over every point and one hotter layer
//! per DBSCAN cluster on top of it, so dense regions stand out. This module
//! produces those layers as plain serializable values; drawing them is the
//! widget's job.

use serde::{Deserialize, Serialize};

use crate::cluster::{Clustering, Dbscan};
use crate::error::{Error, Result};
use crate::point::Point;

/// A weighted point in a heat layer.
///
/// Serializes as `[lat, lng, intensity]`, the triple heat widgets read the
/// weight from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct HeatPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Weight in `[0, 1]`.
    pub intensity: f64,
}

impl HeatPoint {
    fn new(p: Point, intensity: f64) -> Self {
        Self {
            lat: p.lat,
            lng: p.lng,
            intensity,
        }
    }
}

impl From<[f64; 3]> for HeatPoint {
    fn from([lat, lng, intensity]: [f64; 3]) -> Self {
        Self {
            lat,
            lng,
            intensity,
        }
    }
}

impl From<HeatPoint> for [f64; 3] {
    fn from(p: HeatPoint) -> Self {
        [p.lat, p.lng, p.intensity]
    }
}

/// Rendering options for a heat layer, in the widget's units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatStyle {
    /// Radius of each point, in pixels.
    pub radius: u32,
    /// Blur amount, in pixels.
    pub blur: u32,
    /// Zoom level at which points reach full intensity.
    pub max_zoom: u8,
    /// Color stops as `(position, css color)`. Empty means the widget default.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gradient: Vec<(f64, String)>,
}

impl HeatStyle {
    /// Style of the layer covering all points.
    pub fn base() -> Self {
        Self {
            radius: 25,
            blur: 15,
            max_zoom: 17,
            gradient: Vec::new(),
        }
    }

    /// Style of the per-cluster layers.
    pub fn cluster() -> Self {
        Self {
            radius: 30,
            blur: 20,
            max_zoom: 17,
            gradient: vec![
                (0.4, "blue".to_string()),
                (0.6, "lime".to_string()),
                (0.8, "red".to_string()),
            ],
        }
    }
}

/// What a layer covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "cluster")]
pub enum LayerKind {
    /// Every input point.
    Base,
    /// Members of one cluster, by cluster id.
    Cluster(usize),
}

/// One heat layer ready to hand to the widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatLayer {
    /// Base layer or the id of the cluster it draws.
    #[serde(flatten)]
    pub kind: LayerKind,
    /// Weighted points, in input order.
    pub points: Vec<HeatPoint>,
    /// Rendering options for the whole layer.
    pub style: HeatStyle,
}

/// Builds the base layer plus one layer per cluster.
#[derive(Debug, Clone)]
pub struct HeatmapBuilder {
    dbscan: Dbscan,
    base_style: HeatStyle,
    cluster_style: HeatStyle,
    base_intensity: f64,
    cluster_intensity: f64,
}

impl HeatmapBuilder {
    /// Create a builder around `dbscan` with the default styles and
    /// intensities (0.5 for the base layer, 1.0 for cluster layers).
    pub fn new(dbscan: Dbscan) -> Self {
        Self {
            dbscan,
            base_style: HeatStyle::base(),
            cluster_style: HeatStyle::cluster(),
            base_intensity: 0.5,
            cluster_intensity: 1.0,
        }
    }

    /// Set the style of the layer covering every point.
    pub fn with_base_style(mut self, style: HeatStyle) -> Self {
        self.base_style = style;
        self
    }

    /// Set the style shared by the per-cluster layers.
    pub fn with_cluster_style(mut self, style: HeatStyle) -> Self {
        self.cluster_style = style;
        self
    }

    /// Set the weight of base-layer points and of cluster-layer points.
    pub fn with_intensities(mut self, base: f64, cluster: f64) -> Self {
        self.base_intensity = base;
        self.cluster_intensity = cluster;
        self
    }

    /// The clusterer used to find hot spots.
    pub fn dbscan(&self) -> &Dbscan {
        &self.dbscan
    }

    /// Cluster `points` and lay them out as heat layers.
    ///
    /// The base layer always comes first, followed by cluster layers in
    /// cluster id order.
    pub fn build(&self, points: &[Point]) -> Result<Vec<HeatLayer>> {
        check_intensity("base_intensity", self.base_intensity)?;
        check_intensity("cluster_intensity", self.cluster_intensity)?;

        let result = self.dbscan.cluster(points)?;

        let mut layers = Vec::with_capacity(result.n_clusters() + 1);
        layers.push(HeatLayer {
            kind: LayerKind::Base,
            points: points
                .iter()
                .map(|&p| HeatPoint::new(p, self.base_intensity))
                .collect(),
            style: self.base_style.clone(),
        });

        for (id, members) in result.clusters.iter().enumerate() {
            layers.push(HeatLayer {
                kind: LayerKind::Cluster(id),
                points: members
                    .iter()
                    .map(|&p| HeatPoint::new(p, self.cluster_intensity))
                    .collect(),
                style: self.cluster_style.clone(),
            });
        }

        log::debug!(
            "heatmap: {} base points, {} cluster layers, {} noise",
            points.len(),
            result.n_clusters(),
            result.noise.len()
        );

        Ok(layers)
    }
}

impl Default for HeatmapBuilder {
    fn default() -> Self {
        Self::new(Dbscan::default())
    }
}

fn check_intensity(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::invalid(name, "must be within [0, 1]"))
    }
}
