use crate::{
    error::GeneratorError,
    graph::Graph,
    lower_bound::{compute_instance_bound, ThresholdSearch},
    sampler::GroupSampler,
    settings::GeneratorSettings,
    Result,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Start and goal positions of one team. Agent `i` starts at `starts[i]` and
/// may finish on any node of `goals`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub starts: Vec<usize>,
    pub goals: Vec<usize>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub index: usize,
    pub lower_bound: usize,
    pub teams: Vec<Team>,
}

impl Instance {
    pub fn num_agents(&self) -> usize {
        self.teams.iter().map(|team| team.starts.len()).sum()
    }

    /// Checks that every group has the team's size, that no node is used
    /// twice within the starts or within the goals, and that each group is
    /// connected on its own.
    pub fn verify(&self, graph: &Graph) -> Result<()> {
        let mut used_starts = HashSet::new();
        let mut used_goals = HashSet::new();
        for (t, team) in self.teams.iter().enumerate() {
            if team.starts.len() != team.goals.len() {
                return Err(GeneratorError::InvalidInstance(format!(
                    "Team {} has {} starts but {} goals",
                    t,
                    team.starts.len(),
                    team.goals.len()
                )));
            }
            for (role, group, used) in [
                ("start", &team.starts, &mut used_starts),
                ("goal", &team.goals, &mut used_goals),
            ] {
                for &node in group {
                    if node >= graph.num_nodes() {
                        return Err(GeneratorError::InvalidInstance(format!(
                            "Team {} {} node {} is not in the graph",
                            t, role, node
                        )));
                    }
                    if !used.insert(node) {
                        return Err(GeneratorError::InvalidInstance(format!(
                            "Team {} {} node {} is already occupied",
                            t, role, node
                        )));
                    }
                }
                if !is_connected(graph, group) {
                    return Err(GeneratorError::InvalidInstance(format!(
                        "Team {} {} group is not connected",
                        t, role
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Whether `group` induces a connected subgraph.
pub fn is_connected(graph: &Graph, group: &[usize]) -> bool {
    let Some(&first) = group.first() else {
        return true;
    };
    let members: HashSet<usize> = group.iter().copied().collect();
    let mut reached = HashSet::from([first]);
    let mut stack = vec![first];
    while let Some(node) = stack.pop() {
        for &next in graph.neighbors(node) {
            if members.contains(&next) && reached.insert(next) {
                stack.push(next);
            }
        }
    }
    reached.len() == members.len()
}

/// Places teams on a graph and computes the instance lower bound.
pub struct InstanceGenerator<'g> {
    sampler: GroupSampler<'g>,
    num_teams: usize,
    agents_per_team: usize,
    search: ThresholdSearch,
}

impl<'g> InstanceGenerator<'g> {
    pub fn new(graph: &'g Graph, settings: &GeneratorSettings) -> Self {
        Self {
            sampler: GroupSampler::new(graph, settings.max_retries),
            num_teams: settings.teams,
            agents_per_team: settings.agents_per_team,
            search: settings.search,
        }
    }

    pub fn graph(&self) -> &Graph {
        self.sampler.graph()
    }

    /// Samples each team's starts then its goals, team by team, from `rng`.
    /// Starts and goals are drawn against separate occupancy sets.
    pub fn generate_instance<R: Rng>(&self, index: usize, rng: &mut R) -> Result<Instance> {
        let mut used_starts = HashSet::new();
        let mut used_goals = HashSet::new();
        let mut teams = Vec::with_capacity(self.num_teams);
        for _ in 0..self.num_teams {
            let starts = self.sampler.sample(rng, self.agents_per_team, &used_starts)?;
            used_starts.extend(starts.iter().copied());
            let goals = self.sampler.sample(rng, self.agents_per_team, &used_goals)?;
            used_goals.extend(goals.iter().copied());
            teams.push(Team { starts, goals });
        }

        let lower_bound = compute_instance_bound(self.graph(), &teams, self.search)?;
        Ok(Instance {
            index,
            lower_bound,
            teams,
        })
    }
}
