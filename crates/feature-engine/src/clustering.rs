//! Density-based clustering (DBSCAN) of phase–intensity samples

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// DBSCAN parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterParams {
    /// Neighbourhood radius in (degree, dB) units
    pub eps: f64,
    /// Neighbourhood size (self included) that makes a point a core point
    pub min_samples: usize,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            eps: 5.0,
            min_samples: 10,
        }
    }
}

/// Cluster membership summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    /// Number of clusters, noise excluded
    pub cluster_count: usize,
    /// Share of points belonging to any cluster
    pub in_cluster_fraction: f64,
}

impl ClusterSummary {
    pub fn from_labels(labels: &[Option<usize>]) -> Self {
        if labels.is_empty() {
            return Self::default();
        }
        let cluster_count = labels.iter().flatten().max().map_or(0, |&id| id + 1);
        let clustered = labels.iter().filter(|l| l.is_some()).count();
        Self {
            cluster_count,
            in_cluster_fraction: clustered as f64 / labels.len() as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Unvisited,
    Noise,
    Cluster(usize),
}

/// Uniform grid with eps-sized cells for radius queries
struct GridIndex<'a> {
    points: &'a [(f64, f64)],
    eps: f64,
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl<'a> GridIndex<'a> {
    fn new(points: &'a [(f64, f64)], eps: f64) -> Self {
        let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        for (i, &p) in points.iter().enumerate() {
            cells.entry(Self::cell_of(p, eps)).or_default().push(i);
        }
        Self { points, eps, cells }
    }

    fn cell_of((x, y): (f64, f64), eps: f64) -> (i64, i64) {
        ((x / eps).floor() as i64, (y / eps).floor() as i64)
    }

    /// Indices within distance ≤ eps of point `i`, including `i`
    fn neighbours(&self, i: usize) -> Vec<usize> {
        let (px, py) = self.points[i];
        let (cx, cy) = Self::cell_of((px, py), self.eps);
        let eps_sq = self.eps * self.eps;

        let mut found = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(members) = self.cells.get(&(cx + dx, cy + dy)) {
                    for &j in members {
                        let (qx, qy) = self.points[j];
                        let d_sq = (px - qx) * (px - qx) + (py - qy) * (py - qy);
                        if d_sq <= eps_sq {
                            found.push(j);
                        }
                    }
                }
            }
        }
        found
    }
}

/// Label every point with its cluster id, or `None` for noise
pub fn dbscan(points: &[(f64, f64)], params: &ClusterParams) -> Vec<Option<usize>> {
    if points.is_empty() || !(params.eps > 0.0) || !params.eps.is_finite() {
        return vec![None; points.len()];
    }

    let index = GridIndex::new(points, params.eps);
    let mut labels = vec![Label::Unvisited; points.len()];
    let mut next_cluster = 0;

    for i in 0..points.len() {
        if labels[i] != Label::Unvisited {
            continue;
        }

        let seeds = index.neighbours(i);
        if seeds.len() < params.min_samples {
            labels[i] = Label::Noise;
            continue;
        }

        let cluster = next_cluster;
        next_cluster += 1;
        labels[i] = Label::Cluster(cluster);

        // Points claimed by the cluster whose own neighbourhood is still unchecked
        let mut pending = Vec::new();
        claim(&seeds, cluster, &mut labels, &mut pending);

        while let Some(j) = pending.pop() {
            let reach = index.neighbours(j);
            if reach.len() >= params.min_samples {
                claim(&reach, cluster, &mut labels, &mut pending);
            }
        }
    }

    labels
        .into_iter()
        .map(|label| match label {
            Label::Cluster(id) => Some(id),
            _ => None,
        })
        .collect()
}

fn claim(candidates: &[usize], cluster: usize, labels: &mut [Label], pending: &mut Vec<usize>) {
    for &k in candidates {
        match labels[k] {
            Label::Unvisited => {
                labels[k] = Label::Cluster(cluster);
                pending.push(k);
            }
            // border point: joins the cluster but does not expand it
            Label::Noise => labels[k] = Label::Cluster(cluster),
            Label::Cluster(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(cx: f64, cy: f64, n: usize) -> Vec<(f64, f64)> {
        (0..n)
            .map(|i| (cx + (i % 4) as f64 * 0.5, cy + (i / 4) as f64 * 0.5))
            .collect()
    }

    #[test]
    fn test_two_separated_blobs() {
        let mut points = blob(45.0, 20.0, 16);
        points.extend(blob(225.0, 40.0, 16));

        let labels = dbscan(&points, &ClusterParams::default());
        let summary = ClusterSummary::from_labels(&labels);
        assert_eq!(summary.cluster_count, 2);
        assert_eq!(summary.in_cluster_fraction, 1.0);
        assert_ne!(labels[0], labels[20]);
    }

    #[test]
    fn test_sparse_points_are_noise() {
        let points: Vec<(f64, f64)> = (0..30).map(|i| (i as f64 * 12.0, 10.0)).collect();
        let labels = dbscan(&points, &ClusterParams::default());
        assert!(labels.iter().all(|l| l.is_none()));
        assert_eq!(ClusterSummary::from_labels(&labels), ClusterSummary::default());
    }

    #[test]
    fn test_border_point_joins_cluster() {
        let mut points = blob(100.0, 30.0, 12);
        // within eps of the blob edge but with a sparse neighbourhood of its own
        points.push((106.0, 30.0));
        // far outlier
        points.push((300.0, 5.0));

        let labels = dbscan(&points, &ClusterParams::default());
        assert_eq!(labels[12], labels[0]);
        assert_eq!(labels[13], None);

        let summary = ClusterSummary::from_labels(&labels);
        assert_eq!(summary.cluster_count, 1);
        assert!((summary.in_cluster_fraction - 13.0 / 14.0).abs() < 1e-12);
    }

    #[test]
    fn test_minimum_sample_count_includes_self() {
        let points = vec![(10.0, 10.0); 10];
        let labels = dbscan(&points, &ClusterParams::default());
        assert!(labels.iter().all(|&l| l == Some(0)));

        let points = vec![(10.0, 10.0); 9];
        let labels = dbscan(&points, &ClusterParams::default());
        assert!(labels.iter().all(|l| l.is_none()));
    }

    #[test]
    fn test_invalid_radius_labels_noise() {
        let points = vec![(1.0, 1.0); 20];
        let params = ClusterParams { eps: 0.0, min_samples: 10 };
        assert!(dbscan(&points, &params).iter().all(|l| l.is_none()));
    }
}
