use crate::{error::GeneratorError, graph::Graph, Result};
use rand::Rng;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// Places connected groups of free nodes on a graph by rejection sampling.
pub struct GroupSampler<'g> {
    graph: &'g Graph,
    component_of: Vec<usize>,
    component_sizes: Vec<usize>,
    max_retries: Option<u64>,
}

impl<'g> GroupSampler<'g> {
    /// `max_retries` bounds the number of seed draws per group; `None` keeps
    /// drawing until a group is found.
    pub fn new(graph: &'g Graph, max_retries: Option<u64>) -> Self {
        let (component_of, component_sizes) = graph.connected_components();
        Self {
            graph,
            component_of,
            component_sizes,
            max_retries,
        }
    }

    pub fn graph(&self) -> &Graph {
        self.graph
    }

    pub fn largest_component(&self) -> usize {
        self.component_sizes.iter().copied().max().unwrap_or(0)
    }

    /// Breadth-first expansion from `seed` over nodes not in `used`.
    ///
    /// Nodes join the group in dequeue order and the search stops once
    /// `size` nodes are collected, so the result is connected and may be
    /// shorter than `size` when the free region around `seed` is too small.
    pub fn find_group(&self, seed: usize, size: usize, used: &HashSet<usize>) -> Vec<usize> {
        let mut group = Vec::with_capacity(size);
        let mut seen = HashSet::from([seed]);
        let mut queue = VecDeque::from([seed]);

        while let Some(node) = queue.pop_front() {
            group.push(node);
            if group.len() == size {
                break;
            }
            for &next in self.graph.neighbors(node) {
                if used.contains(&next) || seen.contains(&next) {
                    continue;
                }
                seen.insert(next);
                queue.push_back(next);
            }
        }
        group
    }

    /// Draws random seeds until one grows into a connected group of exactly
    /// `size` nodes, none of which are in `used`.
    pub fn sample<R: Rng>(
        &self,
        rng: &mut R,
        size: usize,
        used: &HashSet<usize>,
    ) -> Result<Vec<usize>> {
        if size == 0 {
            return Ok(Vec::new());
        }
        let num_nodes = self.graph.num_nodes();
        if self.largest_component() < size {
            return Err(GeneratorError::InsufficientConnectivity {
                group_size: size,
                attempts: 0,
            });
        }

        let mut attempts: u64 = 0;
        loop {
            if self.max_retries.is_some_and(|max| attempts >= max) {
                return Err(GeneratorError::InsufficientConnectivity {
                    group_size: size,
                    attempts,
                });
            }
            attempts += 1;

            let seed = rng.gen_range(0..num_nodes);
            if used.contains(&seed) {
                continue;
            }
            // a seed whose whole component is too small can never succeed
            if self.component_sizes[self.component_of[seed]] < size {
                continue;
            }

            let group = self.find_group(seed, size, used);
            if group.len() == size {
                debug!(seed, size, attempts, "placed group");
                return Ok(group);
            }
        }
    }
}
