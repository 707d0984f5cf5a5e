use std::collections::VecDeque;

/// Undirected graph over traversable grid cells.
///
/// Neighbor lists keep insertion order, which is also the order written to
/// instance files. Duplicate entries are allowed and harmless.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Graph {
    neighbors: Vec<Vec<usize>>,
}

impl Graph {
    pub fn new(num_nodes: usize) -> Self {
        Self {
            neighbors: vec![Vec::new(); num_nodes],
        }
    }

    /// Inserts `u -> v` followed by `v -> u`.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        self.neighbors[u].push(v);
        self.neighbors[v].push(u);
    }

    pub fn num_nodes(&self) -> usize {
        self.neighbors.len()
    }

    pub fn num_edges(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.neighbors[node]
    }

    pub fn adjacency(&self) -> &[Vec<usize>] {
        &self.neighbors
    }

    /// Labels every node with the id of its connected component and returns
    /// the labels together with the size of each component.
    pub fn connected_components(&self) -> (Vec<usize>, Vec<usize>) {
        let mut labels = vec![usize::MAX; self.num_nodes()];
        let mut sizes = Vec::new();
        let mut queue = VecDeque::new();
        for root in 0..self.num_nodes() {
            if labels[root] != usize::MAX {
                continue;
            }
            let component = sizes.len();
            let mut size = 0;
            labels[root] = component;
            queue.push_back(root);
            while let Some(node) = queue.pop_front() {
                size += 1;
                for &next in &self.neighbors[node] {
                    if labels[next] == usize::MAX {
                        labels[next] = component;
                        queue.push_back(next);
                    }
                }
            }
            sizes.push(size);
        }
        (labels, sizes)
    }
}
