use crate::{error::GeneratorError, graph::Graph, Result};
use std::{fs, path::Path};

/// Grid map in the movingai layout:
///
/// ```text
/// type octile
/// height 2
/// width 3
/// map
/// ..@
/// ...
/// ```
///
/// `.` cells are traversable, every other character is an obstacle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    pub name: String,
    pub height: usize,
    pub width: usize,
    pub cells: Vec<bool>,
}

impl GridMap {
    pub fn load(maps_dir: &Path, name: &str) -> Result<Self> {
        let path = maps_dir.join(name);
        let text = fs::read_to_string(&path).map_err(|e| {
            GeneratorError::Map(format!("Can not open {}: {}", path.display(), e))
        })?;
        Self::parse(name, &text)
    }

    pub fn parse(name: &str, text: &str) -> Result<Self> {
        // first line is the map type, which carries no information we use
        let body = match text.split_once('\n') {
            Some((_, rest)) => rest,
            None => "",
        };
        let mut tokens = body.split_whitespace();
        let height = parse_dimension(&mut tokens, "height")?;
        let width = parse_dimension(&mut tokens, "width")?;
        if tokens.next().is_none() {
            return Err(GeneratorError::Map("Missing map marker line".to_string()));
        }

        let num_cells = height.checked_mul(width).ok_or_else(|| {
            GeneratorError::Map(format!("Map size {}x{} is too large", height, width))
        })?;
        let cells: Vec<bool> = tokens
            .flat_map(str::chars)
            .take(num_cells)
            .map(|c| c == '.')
            .collect();
        if cells.len() != num_cells {
            return Err(GeneratorError::Map(format!(
                "Expected {} cells ({}x{}), found {}",
                num_cells,
                height,
                width,
                cells.len()
            )));
        }

        Ok(Self {
            name: name.to_string(),
            height,
            width,
            cells,
        })
    }

    pub fn is_traversable(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.width + col]
    }

    /// Row-major node id of every cell, `None` for obstacles.
    pub fn node_ids(&self) -> Vec<Option<usize>> {
        let mut next_id = 0;
        self.cells
            .iter()
            .map(|&open| {
                open.then(|| {
                    next_id += 1;
                    next_id - 1
                })
            })
            .collect()
    }

    /// Connects each open cell to the open cell directly below it, then to
    /// the one directly left of it. Diagonal moves are not allowed.
    pub fn to_graph(&self) -> Graph {
        let ids = self.node_ids();
        let num_nodes = ids.iter().flatten().count();
        let mut graph = Graph::new(num_nodes);
        for row in 0..self.height {
            for col in 0..self.width {
                let Some(node) = ids[row * self.width + col] else {
                    continue;
                };
                if row + 1 < self.height {
                    if let Some(below) = ids[(row + 1) * self.width + col] {
                        graph.add_edge(node, below);
                    }
                }
                if col > 0 {
                    if let Some(left) = ids[row * self.width + col - 1] {
                        graph.add_edge(node, left);
                    }
                }
            }
        }
        graph
    }
}

fn parse_dimension<'a>(tokens: &mut impl Iterator<Item = &'a str>, name: &str) -> Result<usize> {
    let _keyword = tokens
        .next()
        .ok_or_else(|| GeneratorError::Map(format!("Missing {} line", name)))?;
    let value = tokens
        .next()
        .ok_or_else(|| GeneratorError::Map(format!("Missing {} value", name)))?;
    value
        .parse::<usize>()
        .map_err(|_| GeneratorError::Map(format!("Invalid {}: {}", name, value)))
}
