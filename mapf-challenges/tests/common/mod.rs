use mapf_challenges::{Graph, GridMap};

/// Builds the graph of a grid map given as rows of cell characters.
#[allow(dead_code)]
pub fn grid(rows: &[&str]) -> Graph {
    let text = format!(
        "type octile\nheight {}\nwidth {}\nmap\n{}\n",
        rows.len(),
        rows[0].len(),
        rows.join("\n")
    );
    GridMap::parse("test.map", &text).unwrap().to_graph()
}

#[allow(dead_code)]
pub fn open_grid(height: usize, width: usize) -> Graph {
    let row = ".".repeat(width);
    let rows: Vec<&str> = (0..height).map(|_| row.as_str()).collect();
    grid(&rows)
}
