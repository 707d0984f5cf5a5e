use crate::{error::GeneratorError, Result};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy)]
struct FlowEdge {
    to: usize,
    capacity: i64,
    flow: i64,
    // arena index of the paired edge
    rev: usize,
}

/// Residual network solved with Dinic's algorithm.
///
/// Edges are stored in an arena and referenced by index from per-vertex
/// adjacency lists, so removing an edge only detaches indices and every
/// remaining forward/reverse pairing stays valid.
#[derive(Debug, Clone)]
pub struct FlowNetwork {
    edges: Vec<FlowEdge>,
    adj: Vec<Vec<usize>>,
    level: Vec<i64>,
    next_edge: Vec<usize>,
}

impl FlowNetwork {
    pub fn new(num_vertices: usize) -> Self {
        Self {
            edges: Vec::new(),
            adj: vec![Vec::new(); num_vertices],
            level: vec![-1; num_vertices],
            next_edge: vec![0; num_vertices],
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.adj.len()
    }

    /// Number of edges still attached, reverse edges included.
    pub fn num_edges(&self) -> usize {
        self.adj.iter().map(Vec::len).sum()
    }

    /// Adds `u -> v` with `capacity` and its zero-capacity reverse `v -> u`.
    pub fn add_edge(&mut self, u: usize, v: usize, capacity: u32) -> Result<()> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        let forward = self.edges.len();
        let backward = forward + 1;
        self.edges.push(FlowEdge {
            to: v,
            capacity: capacity as i64,
            flow: 0,
            rev: backward,
        });
        self.edges.push(FlowEdge {
            to: u,
            capacity: 0,
            flow: 0,
            rev: forward,
        });
        self.adj[u].push(forward);
        self.adj[v].push(backward);
        Ok(())
    }

    /// Detaches every `u -> v` entry of `u` and every `v -> u` entry of `v`.
    /// Parallel edges between the two vertices are all removed.
    pub fn remove_edge(&mut self, u: usize, v: usize) -> Result<()> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        let edges = &self.edges;
        self.adj[u].retain(|&id| edges[id].to != v);
        self.adj[v].retain(|&id| edges[id].to != u);
        Ok(())
    }

    /// Total capacity of the edges leaving `vertex`.
    pub fn out_capacity(&self, vertex: usize) -> u64 {
        self.adj[vertex]
            .iter()
            .map(|&id| self.edges[id].capacity as u64)
            .sum()
    }

    /// Computes the maximum flow from `source` to `sink`.
    ///
    /// Flow counters are reset to zero before returning, so the network can
    /// be edited and solved again.
    pub fn max_flow(&mut self, source: usize, sink: usize) -> Result<u64> {
        self.check_vertex(source)?;
        self.check_vertex(sink)?;
        if source == sink {
            return Err(GeneratorError::SourceIsSink(source));
        }

        let mut total = 0;
        while self.build_levels(source, sink) {
            self.next_edge.fill(0);
            loop {
                let pushed = self.send_flow(source, i64::MAX, sink);
                if pushed == 0 {
                    break;
                }
                total += pushed as u64;
            }
        }

        for edge in self.edges.iter_mut() {
            edge.flow = 0;
        }
        Ok(total)
    }

    /// Assigns BFS levels over edges with residual capacity. Returns whether
    /// `sink` was reached.
    fn build_levels(&mut self, source: usize, sink: usize) -> bool {
        self.level.fill(-1);
        self.level[source] = 0;
        let mut queue = VecDeque::from([source]);
        while let Some(u) = queue.pop_front() {
            for &id in &self.adj[u] {
                let edge = self.edges[id];
                if self.level[edge.to] < 0 && edge.flow < edge.capacity {
                    self.level[edge.to] = self.level[u] + 1;
                    queue.push_back(edge.to);
                }
            }
        }
        self.level[sink] >= 0
    }

    /// Pushes at most `limit` units along one level-increasing path from `u`
    /// to `sink`, resuming each vertex's scan where the previous call left it.
    fn send_flow(&mut self, u: usize, limit: i64, sink: usize) -> i64 {
        if u == sink {
            return limit;
        }
        while self.next_edge[u] < self.adj[u].len() {
            let id = self.adj[u][self.next_edge[u]];
            let edge = self.edges[id];
            if self.level[edge.to] == self.level[u] + 1 && edge.flow < edge.capacity {
                let pushed = self.send_flow(edge.to, limit.min(edge.capacity - edge.flow), sink);
                if pushed > 0 {
                    self.edges[id].flow += pushed;
                    self.edges[edge.rev].flow -= pushed;
                    return pushed;
                }
            }
            self.next_edge[u] += 1;
        }
        0
    }

    fn check_vertex(&self, vertex: usize) -> Result<()> {
        if vertex >= self.num_vertices() {
            return Err(GeneratorError::VertexOutOfRange {
                vertex,
                num_vertices: self.num_vertices(),
            });
        }
        Ok(())
    }
}
