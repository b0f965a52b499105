//! Road network with all-pairs shortest paths.
//!
//! # Algorithm
//!
//! Floyd-Warshall over the undirected road graph, keeping a next-hop table so
//! that the stops between any two cities can be replayed.
//!
//! # Complexity
//!
//! O(n³) construction, O(1) distance queries, O(path length) path queries.

use super::{DistanceMatrix, Topology};

/// A set of cities joined by undirected roads.
///
/// Cities are numbered `0..num_cities`. Unreachable pairs have infinite
/// distance and an empty path.
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::{RoadNetwork, Topology};
///
/// // 0 -- 1 -- 2, plus a long direct road 0 -- 2
/// let net = RoadNetwork::from_roads(3, &[(0, 1, 2.0), (1, 2, 3.0), (0, 2, 10.0)]).unwrap();
/// assert_eq!(net.distance(0, 2), 5.0);
/// assert_eq!(net.path(0, 2), vec![1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    distances: DistanceMatrix,
    next_hop: Vec<Option<usize>>,
    size: usize,
}

impl RoadNetwork {
    /// Builds the network from `(a, b, length)` roads.
    ///
    /// Returns `None` if a road references an unknown city or has a negative
    /// or non-finite length. Parallel roads keep the shortest one.
    pub fn from_roads(num_cities: usize, roads: &[(usize, usize, f64)]) -> Option<Self> {
        let n = num_cities;
        let mut distances = DistanceMatrix::new(n);
        let mut next_hop = vec![None; n * n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    distances.set(i, j, f64::INFINITY);
                } else {
                    next_hop[i * n + j] = Some(j);
                }
            }
        }

        for &(a, b, len) in roads {
            if a >= n || b >= n || !len.is_finite() || len < 0.0 {
                return None;
            }
            if a == b {
                continue;
            }
            if len < distances.get(a, b) {
                distances.set(a, b, len);
                distances.set(b, a, len);
                next_hop[a * n + b] = Some(b);
                next_hop[b * n + a] = Some(a);
            }
        }

        for k in 0..n {
            for i in 0..n {
                let dik = distances.get(i, k);
                if dik.is_infinite() {
                    continue;
                }
                for j in 0..n {
                    let through = dik + distances.get(k, j);
                    if through < distances.get(i, j) {
                        distances.set(i, j, through);
                        next_hop[i * n + j] = next_hop[i * n + k];
                    }
                }
            }
        }

        Some(Self {
            distances,
            next_hop,
            size: n,
        })
    }

    /// Number of cities.
    pub fn num_cities(&self) -> usize {
        self.size
    }

    /// Returns `true` if every city can reach every other city.
    pub fn is_connected(&self) -> bool {
        self.next_hop.iter().all(Option::is_some)
    }
}

impl Topology for RoadNetwork {
    fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    fn path(&self, from: usize, to: usize) -> Vec<usize> {
        let mut path = Vec::new();
        if from == to {
            return path;
        }
        let mut current = from;
        while current != to {
            match self.next_hop[current * self.size + to] {
                Some(hop) => {
                    path.push(hop);
                    current = hop;
                }
                None => return Vec::new(),
            }
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 0 - 1 - 2 - 3 in a line, unit roads, plus isolated city 4.
    fn line() -> RoadNetwork {
        RoadNetwork::from_roads(5, &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0)]).expect("valid")
    }

    #[test]
    fn test_line_distances() {
        let net = line();
        assert_eq!(net.distance(0, 3), 3.0);
        assert_eq!(net.distance(3, 0), 3.0);
        assert_eq!(net.distance(2, 2), 0.0);
    }

    #[test]
    fn test_line_path() {
        let net = line();
        assert_eq!(net.path(0, 3), vec![1, 2, 3]);
        assert_eq!(net.path(3, 1), vec![2, 1]);
        assert!(net.path(1, 1).is_empty());
    }

    #[test]
    fn test_unreachable() {
        let net = line();
        assert!(net.distance(0, 4).is_infinite());
        assert!(net.path(0, 4).is_empty());
        assert!(!net.is_connected());
    }

    #[test]
    fn test_shortcut_preferred() {
        let net = RoadNetwork::from_roads(3, &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 1.5)])
            .expect("valid");
        assert_eq!(net.distance(0, 2), 1.5);
        assert_eq!(net.path(0, 2), vec![2]);
        assert!(net.is_connected());
    }

    #[test]
    fn test_invalid_roads() {
        assert!(RoadNetwork::from_roads(2, &[(0, 2, 1.0)]).is_none());
        assert!(RoadNetwork::from_roads(2, &[(0, 1, -1.0)]).is_none());
        assert!(RoadNetwork::from_roads(2, &[(0, 1, f64::NAN)]).is_none());
    }
}
