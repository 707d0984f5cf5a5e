use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Shortest-path length between a start node and a goal node.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairEdge {
    pub from: usize,
    pub to: usize,
    pub length: usize,
}

/// Breadth-first search from `source` that reports the edge-count distance
/// to each node of `targets`, in the order the targets are reached.
///
/// The search ends as soon as every target has been dequeued. Targets that
/// cannot be reached are left out of the result.
pub fn distances(graph: &Graph, source: usize, targets: &[usize]) -> Vec<PairEdge> {
    let targets: HashSet<usize> = targets.iter().copied().collect();
    let mut found = Vec::with_capacity(targets.len());
    if targets.is_empty() {
        return found;
    }

    let unreached = graph.num_nodes() + 1;
    let mut distance = vec![unreached; graph.num_nodes()];
    let mut queue = VecDeque::from([source]);
    distance[source] = 0;

    while let Some(node) = queue.pop_front() {
        if targets.contains(&node) {
            found.push(PairEdge {
                from: source,
                to: node,
                length: distance[node],
            });
            if found.len() == targets.len() {
                break;
            }
        }
        for &next in graph.neighbors(node) {
            if distance[next] != unreached {
                continue;
            }
            distance[next] = distance[node] + 1;
            queue.push_back(next);
        }
    }
    found
}

/// Distances from every start to every goal of a team, sorted ascending by
/// length.
pub fn assignment_edges(graph: &Graph, starts: &[usize], goals: &[usize]) -> Vec<PairEdge> {
    let mut edges: Vec<PairEdge> = starts
        .iter()
        .flat_map(|&start| distances(graph, start, goals))
        .collect();
    edges.sort_by_key(|edge| edge.length);
    edges
}
