//! Picat fact file consumed by the assignment-based solver.
//!
//! ```text
//! ins(Graph, As, Groups, LB) =>
//!     LB = 2,
//!     Graph = [
//!     $neibs(1,[1,2]),
//!     $neibs(2,[2,1])
//!     ],
//!     As = [(1,[2])],
//!     Groups = [[1]].
//! ```
//!
//! Node and agent ids are 1-based in the file.

use crate::{graph::Graph, instance::Instance};

fn join_ids<'a>(ids: impl IntoIterator<Item = &'a usize>) -> String {
    ids.into_iter()
        .map(|id| (id + 1).to_string())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn render_instance(graph: &Graph, instance: &Instance) -> String {
    let mut out = String::new();
    out.push_str("ins(Graph, As, Groups, LB) =>\n");
    out.push_str(&format!("    LB = {},\n", instance.lower_bound));

    out.push_str("    Graph = [\n");
    let nodes: Vec<String> = (0..graph.num_nodes())
        .map(|node| {
            let mut ids = vec![node];
            ids.extend_from_slice(graph.neighbors(node));
            format!("    $neibs({},[{}])", node + 1, join_ids(&ids))
        })
        .collect();
    out.push_str(&nodes.join(",\n"));
    out.push_str("\n    ],\n");

    let agents: Vec<String> = instance
        .teams
        .iter()
        .flat_map(|team| {
            let goals = join_ids(&team.goals);
            team.starts
                .iter()
                .map(move |start| format!("({},[{}])", start + 1, goals))
        })
        .collect();
    out.push_str(&format!("    As = [{}],\n", agents.join(",")));

    let mut next_agent = 1;
    let groups: Vec<String> = instance
        .teams
        .iter()
        .map(|team| {
            let members: Vec<String> = (next_agent..next_agent + team.starts.len())
                .map(|agent| agent.to_string())
                .collect();
            next_agent += team.starts.len();
            format!("[{}]", members.join(","))
        })
        .collect();
    out.push_str(&format!("    Groups = [{}].\n", groups.join(",")));
    out
}
