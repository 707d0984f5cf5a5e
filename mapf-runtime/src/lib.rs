use anyhow::{anyhow, Context, Result};
use clap::{arg, ArgAction, ArgMatches, Command};
use mapf_challenges::{
    picat, GeneratorSettings, Graph, GridMap, Instance, InstanceGenerator, OutputFormat, Team,
    ThresholdSearch,
};
use mapf_utils::{jsonify_pretty, load_json_arg};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub fn cli() -> Command {
    Command::new("mapf-runtime")
        .about("Generates team MAPF instances together with a makespan lower bound")
        .arg(
            arg!(--settings [SETTINGS] "Settings json string or path to json file")
                .value_parser(clap::value_parser!(String)),
        )
        .arg(
            arg!(-m --map [MAP] "Map file name inside the maps directory")
                .value_parser(clap::value_parser!(String))
                .required_unless_present("settings"),
        )
        .arg(
            arg!(-t --teams [TEAMS] "Number of teams")
                .value_parser(clap::value_parser!(usize))
                .required_unless_present("settings"),
        )
        .arg(
            arg!(-a --agents [AGENTS] "Agents per team")
                .value_parser(clap::value_parser!(usize))
                .required_unless_present("settings"),
        )
        .arg(
            arg!(-x --instances [INSTANCES] "Number of instances to generate")
                .value_parser(clap::value_parser!(usize))
                .required_unless_present("settings"),
        )
        .arg(
            arg!(-s --seed [SEED] "Random seed")
                .value_parser(clap::value_parser!(u64))
                .required_unless_present("settings"),
        )
        .arg(
            arg!(--"maps-dir" [MAPS_DIR] "Directory holding map files (default: maps)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(--"output-dir" [OUTPUT_DIR] "Directory instance files are written to (default: instances)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(--search [SEARCH] "Bottleneck search: 'bisection' or 'descending'")
                .value_parser(clap::value_parser!(String)),
        )
        .arg(
            arg!(--format [FORMAT] "Output format: 'picat' or 'json'")
                .value_parser(clap::value_parser!(String)),
        )
        .arg(
            arg!(--"max-retries" [MAX_RETRIES] "Seed draws allowed per group before giving up")
                .value_parser(clap::value_parser!(u64))
                .conflicts_with("unbounded-retries"),
        )
        .arg(
            arg!(--"unbounded-retries" "Keep drawing seeds until a group is placed")
                .action(ArgAction::SetTrue),
        )
}

/// Builds settings from `--settings` when given, then applies any explicit
/// flags on top.
pub fn settings_from_matches(matches: &ArgMatches) -> Result<GeneratorSettings> {
    let mut settings = match matches.get_one::<String>("settings") {
        Some(arg) => load_json_arg::<GeneratorSettings>(arg)?,
        None => GeneratorSettings::new(
            matches
                .get_one::<String>("map")
                .ok_or_else(|| anyhow!("Missing map"))?,
            *matches
                .get_one::<usize>("teams")
                .ok_or_else(|| anyhow!("Missing number of teams"))?,
            *matches
                .get_one::<usize>("agents")
                .ok_or_else(|| anyhow!("Missing agents per team"))?,
            *matches
                .get_one::<usize>("instances")
                .ok_or_else(|| anyhow!("Missing number of instances"))?,
            *matches
                .get_one::<u64>("seed")
                .ok_or_else(|| anyhow!("Missing seed"))?,
        ),
    };

    if let Some(map) = matches.get_one::<String>("map") {
        settings.map = map.clone();
    }
    if let Some(&teams) = matches.get_one::<usize>("teams") {
        settings.teams = teams;
    }
    if let Some(&agents) = matches.get_one::<usize>("agents") {
        settings.agents_per_team = agents;
    }
    if let Some(&instances) = matches.get_one::<usize>("instances") {
        settings.instances = instances;
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        settings.seed = seed;
    }
    if let Some(dir) = matches.get_one::<PathBuf>("maps-dir") {
        settings.maps_dir = dir.clone();
    }
    if let Some(dir) = matches.get_one::<PathBuf>("output-dir") {
        settings.output_dir = dir.clone();
    }
    if let Some(search) = matches.get_one::<String>("search") {
        settings.search = search.parse::<ThresholdSearch>()?;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        settings.format = format.parse::<OutputFormat>()?;
    }
    if let Some(&max_retries) = matches.get_one::<u64>("max-retries") {
        settings.max_retries = Some(max_retries);
    }
    if matches.get_flag("unbounded-retries") {
        settings.max_retries = None;
    }

    settings.validate()?;
    Ok(settings)
}

/// JSON instance file: the instance together with the neighbor list of
/// every node, ids 0-based.
#[derive(Serialize, Debug)]
struct JsonInstance<'a> {
    graph: &'a [Vec<usize>],
    index: usize,
    lower_bound: usize,
    teams: &'a [Team],
}

pub fn render_instance(format: OutputFormat, graph: &Graph, instance: &Instance) -> String {
    match format {
        OutputFormat::Picat => picat::render_instance(graph, instance),
        OutputFormat::Json => jsonify_pretty(&JsonInstance {
            graph: graph.adjacency(),
            index: instance.index,
            lower_bound: instance.lower_bound,
            teams: &instance.teams,
        }),
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub map: String,
    pub num_nodes: usize,
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub lower_bounds: Vec<usize>,
}

/// Loads the map, then generates and writes `settings.instances` instances
/// from a single random stream seeded with `settings.seed`.
///
/// A map or placement failure aborts the batch. An instance whose file
/// cannot be written is reported and skipped.
pub fn generate_batch(settings: &GeneratorSettings) -> Result<BatchSummary> {
    settings.validate()?;
    let map = GridMap::load(&settings.maps_dir, &settings.map)?;
    let graph = map.to_graph();
    info!(
        map = %settings.map,
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        "map parsed"
    );

    if let Err(e) = fs::create_dir_all(&settings.output_dir) {
        warn!(
            dir = %settings.output_dir.display(),
            "Can not create output directory: {}",
            e
        );
    }

    let generator = InstanceGenerator::new(&graph, settings);
    let mut rng = StdRng::seed_from_u64(settings.seed);
    let mut summary = BatchSummary {
        map: settings.map.clone(),
        num_nodes: graph.num_nodes(),
        ..Default::default()
    };

    for index in 0..settings.instances {
        let instance = generator
            .generate_instance(index, &mut rng)
            .with_context(|| format!("Failed to generate instance {}", index))?;
        instance.verify(&graph)?;
        summary.lower_bounds.push(instance.lower_bound);

        let path = settings.instance_path(index);
        let contents = render_instance(settings.format, &graph, &instance);
        match fs::write(&path, contents) {
            Ok(()) => {
                info!(
                    path = %path.display(),
                    agents = instance.num_agents(),
                    lb = instance.lower_bound,
                    "instance printed"
                );
                summary.written.push(path);
            }
            Err(e) => {
                warn!(path = %path.display(), "Can not open output file: {}", e);
                summary.skipped.push(path);
            }
        }
    }
    Ok(summary)
}
