//! Per-team bottleneck lower bound.
//!
//! A team of `k` agents must send each start to a distinct goal. Whatever
//! the plan, some agent travels at least as far as the longest edge of the
//! best bottleneck assignment, so that length bounds the makespan from below.
//! Feasibility of an assignment restricted to a set of start/goal pairs is a
//! bipartite perfect-matching question, answered with max flow on
//!
//! ```text
//! source(2k) -> start i (i) -> goal j (k + j) -> sink(2k + 1)
//! ```
//!
//! with unit capacities everywhere.

use crate::{
    distance::{assignment_edges, PairEdge},
    error::GeneratorError,
    graph::Graph,
    instance::Team,
    max_flow::FlowNetwork,
    Result,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// How the smallest feasible bottleneck length is located.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdSearch {
    /// Remove pairs longest first until no perfect assignment remains.
    Descending,
    /// Binary search over the distinct pair lengths.
    #[default]
    Bisection,
}

impl std::str::FromStr for ThresholdSearch {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "descending" => Ok(Self::Descending),
            "bisection" => Ok(Self::Bisection),
            _ => Err(GeneratorError::Config(format!(
                "Unknown threshold search '{}', expected 'descending' or 'bisection'",
                s
            ))),
        }
    }
}

struct AssignmentNetwork {
    network: FlowNetwork,
    source: usize,
    sink: usize,
}

impl AssignmentNetwork {
    /// Unit-capacity network holding the start/goal pairs accepted by
    /// `keep_pair`.
    fn new(k: usize, keep_pair: impl Fn(usize, usize) -> bool) -> Result<Self> {
        let source = 2 * k;
        let sink = 2 * k + 1;
        let mut network = FlowNetwork::new(2 * k + 2);
        for i in 0..k {
            network.add_edge(source, i, 1)?;
            network.add_edge(k + i, sink, 1)?;
            for j in 0..k {
                if keep_pair(i, j) {
                    network.add_edge(i, k + j, 1)?;
                }
            }
        }
        Ok(Self {
            network,
            source,
            sink,
        })
    }

    fn max_flow(&mut self) -> Result<u64> {
        self.network.max_flow(self.source, self.sink)
    }
}

/// Maps the node ids of an edge to its (start index, goal index) pair.
fn pair_index(team: &Team, edge: &PairEdge) -> Result<(usize, usize)> {
    let from = team
        .starts
        .iter()
        .position(|&n| n == edge.from)
        .ok_or_else(|| {
            GeneratorError::InvalidInstance(format!("Node {} is not a team start", edge.from))
        })?;
    let to = team
        .goals
        .iter()
        .position(|&n| n == edge.to)
        .ok_or_else(|| {
            GeneratorError::InvalidInstance(format!("Node {} is not a team goal", edge.to))
        })?;
    Ok((from, to))
}

/// Smallest length `L` such that a perfect start/goal assignment exists
/// using only pairs of length at most `L`.
///
/// Pairs whose goal is unreachable from the start have no length; they stay
/// in the network and are never excluded.
pub fn compute_team_bound(graph: &Graph, team: &Team, search: ThresholdSearch) -> Result<usize> {
    let k = team.starts.len();
    if team.goals.len() != k {
        return Err(GeneratorError::Config(format!(
            "Team has {} starts but {} goals",
            k,
            team.goals.len()
        )));
    }
    if k == 0 {
        return Ok(0);
    }

    let edges = assignment_edges(graph, &team.starts, &team.goals);
    let bound = match search {
        ThresholdSearch::Descending => descending_bound(team, &edges)?,
        ThresholdSearch::Bisection => bisection_bound(team, &edges)?,
    };
    debug!(agents = k, pairs = edges.len(), bound, "team bound");
    Ok(bound)
}

/// Instance bound: the largest team bound.
pub fn compute_instance_bound(
    graph: &Graph,
    teams: &[Team],
    search: ThresholdSearch,
) -> Result<usize> {
    teams.iter().try_fold(0, |bound: usize, team| -> Result<usize> {
        Ok(bound.max(compute_team_bound(graph, team, search)?))
    })
}

fn descending_bound(team: &Team, edges: &[PairEdge]) -> Result<usize> {
    let k = team.starts.len() as u64;
    let mut assignment = AssignmentNetwork::new(team.starts.len(), |_, _| true)?;
    let mut flow = assignment.max_flow()?;
    let mut bound = 0;
    for edge in edges.iter().rev() {
        if flow != k {
            break;
        }
        let (i, j) = pair_index(team, edge)?;
        assignment.network.remove_edge(i, team.starts.len() + j)?;
        bound = edge.length;
        flow = assignment.max_flow()?;
    }
    Ok(bound)
}

fn bisection_bound(team: &Team, edges: &[PairEdge]) -> Result<usize> {
    let k = team.starts.len();
    let mut lengths: Vec<usize> = edges.iter().map(|e| e.length).collect();
    lengths.dedup();
    if lengths.is_empty() {
        return Ok(0);
    }

    let indexed = edges
        .iter()
        .map(|edge| Ok((pair_index(team, edge)?, edge.length)))
        .collect::<Result<Vec<((usize, usize), usize)>>>()?;
    let listed: HashSet<(usize, usize)> = indexed.iter().map(|&(pair, _)| pair).collect();

    let admits_assignment = |threshold: usize| -> Result<bool> {
        let within: HashSet<(usize, usize)> = indexed
            .iter()
            .filter(|&&(_, length)| length <= threshold)
            .map(|&(pair, _)| pair)
            .collect();
        let mut assignment = AssignmentNetwork::new(k, |i, j| {
            within.contains(&(i, j)) || !listed.contains(&(i, j))
        })?;
        Ok(assignment.max_flow()? == k as u64)
    };

    // the largest length keeps every pair, which always admits an assignment
    let (mut lo, mut hi) = (0, lengths.len() - 1);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if admits_assignment(lengths[mid])? {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    Ok(lengths[lo])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_index_maps_nodes_to_positions() {
        let team = Team {
            starts: vec![7, 3],
            goals: vec![5, 9],
        };
        let edge = PairEdge {
            from: 3,
            to: 9,
            length: 4,
        };
        assert_eq!(pair_index(&team, &edge).unwrap(), (1, 1));
    }

    #[test]
    fn test_pair_index_rejects_foreign_node() {
        let team = Team {
            starts: vec![7, 3],
            goals: vec![5, 9],
        };
        let edge = PairEdge {
            from: 3,
            to: 4,
            length: 1,
        };
        assert!(matches!(
            pair_index(&team, &edge),
            Err(GeneratorError::InvalidInstance(_))
        ));
    }

    #[test]
    fn test_parse_threshold_search() {
        assert_eq!(
            "descending".parse::<ThresholdSearch>().unwrap(),
            ThresholdSearch::Descending
        );
        assert_eq!(
            "bisection".parse::<ThresholdSearch>().unwrap(),
            ThresholdSearch::Bisection
        );
        assert!("binary".parse::<ThresholdSearch>().is_err());
    }
}
