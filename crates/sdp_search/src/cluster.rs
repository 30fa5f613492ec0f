//! Connected components over the match graph.

use std::collections::{BTreeSet, HashSet, VecDeque};

use fxhash::{FxHashMap, FxHashSet};

use crate::error::SearchError;
use crate::search::{MatchSet, find_matches};

/// A maximal set of fingerprints mutually reachable through match edges.
pub type Cluster = BTreeSet<u64>;

/// Find matches and group them into connected components.
///
/// Isolated fingerprints (those with no match) are not emitted; callers
/// that want singleton clusters must add them separately.
pub fn find_clusters(
    hashes: &HashSet<u64>,
    blocks: usize,
    distance: usize,
) -> Result<Vec<Cluster>, SearchError> {
    let matches = find_matches(hashes, blocks, distance)?;
    Ok(cluster_matches(&matches))
}

/// Group an existing match set into connected components.
///
/// Components are discovered by breadth-first traversal, starting vertices
/// taken in ascending fingerprint order so the emission order is
/// deterministic whatever order the matches arrived in.
pub fn cluster_matches(matches: &MatchSet) -> Vec<Cluster> {
    let mut adjacency: FxHashMap<u64, Vec<u64>> = FxHashMap::default();
    for m in matches {
        adjacency.entry(m.a).or_default().push(m.b);
        adjacency.entry(m.b).or_default().push(m.a);
    }

    let mut vertices: Vec<u64> = adjacency.keys().copied().collect();
    vertices.sort_unstable();

    let mut visited = FxHashSet::default();
    let mut clusters = Vec::new();
    for &vertex in &vertices {
        if visited.contains(&vertex) {
            continue;
        }
        visited.insert(vertex);

        let mut cluster = Cluster::new();
        let mut frontier = VecDeque::from([vertex]);
        while let Some(current) = frontier.pop_front() {
            cluster.insert(current);
            if let Some(neighbors) = adjacency.get(&current) {
                for &neighbor in neighbors {
                    if visited.insert(neighbor) {
                        frontier.push_back(neighbor);
                    }
                }
            }
        }
        clusters.push(cluster);
    }
    clusters
}
