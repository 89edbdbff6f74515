use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use pathstep::config::Config;
use pathstep::graph::{Graph, GraphDocument};
use pathstep::services::algorithm::{engine_for, render_steps, run_to_completion, StepHistory};
use pathstep::utils::logging;
use pathstep::{Algorithm, Edge, EnginePhase, NodeId, PathError, StepEngine};

#[derive(Parser)]
#[clap(version, author = "pathstep contributors")]
enum Cli {
    /// Step a shortest-path algorithm through a graph file
    Run {
        /// Graph file (JSON, or TOML when the extension is .toml)
        #[clap(short, long)]
        graph: PathBuf,
        /// Source node id
        #[clap(short, long)]
        source: NodeId,
        /// Overrides run.algorithm from the config
        #[clap(short, long, value_enum)]
        algorithm: Option<Algorithm>,
        #[clap(short, long)]
        config: Option<PathBuf>,
        /// Print the whole step history as JSON instead of tables
        #[clap(long)]
        json: bool,
    },
    /// Run both algorithms and check that their final distances agree
    Compare {
        #[clap(short, long)]
        graph: PathBuf,
        #[clap(short, long)]
        source: NodeId,
        #[clap(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct RunReport<'a> {
    algorithm: Algorithm,
    source: NodeId,
    phase: EnginePhase,
    history: &'a StepHistory,
    tree: Option<Vec<Edge>>,
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn load_graph(path: &Path, algorithm: Algorithm) -> Result<Graph> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read graph file {}", path.display()))?;
    let document: GraphDocument = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&content)?,
        _ => serde_json::from_str(&content)?,
    };
    Graph::try_from_document(document, algorithm)
        .with_context(|| format!("invalid graph file {}", path.display()))
}

fn describe_edge(graph: &Graph, edge: &Edge) -> String {
    let label = |id: NodeId| {
        graph
            .label_of(id)
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string())
    };
    format!(
        "edge {}: {} -- {} ({})",
        edge.id,
        label(edge.from),
        label(edge.to),
        edge.weight
    )
}

fn run(
    graph_path: &Path,
    source: NodeId,
    algorithm: Option<Algorithm>,
    config: &Config,
    json: bool,
) -> Result<()> {
    let algorithm = algorithm.unwrap_or(config.run.algorithm);
    let graph = load_graph(graph_path, algorithm)?;

    let mut engine = engine_for(algorithm);
    engine.initialize(graph.nodes(), graph.edges(), source)?;

    let delay = Duration::from_millis(config.run.step_delay_ms);
    let mut calls = 0;
    while !engine.is_complete() {
        if calls >= config.run.max_steps {
            bail!(PathError::StepLimitExceeded(config.run.max_steps));
        }
        let before = engine.history().len();
        engine.step()?;
        calls += 1;

        if json || engine.history().len() == before {
            continue;
        }
        if let Some(snapshot) = engine.history_mut().reveal_next() {
            println!("{}", render_steps([snapshot], graph.nodes()));
        }
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    let tree = engine.shortest_path_tree().ok();
    if json {
        let report = RunReport {
            algorithm,
            source,
            phase: engine.phase(),
            history: engine.history(),
            tree,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}: {} after {} steps", algorithm, engine.phase(), engine.history().len());
    match tree {
        Some(edges) => {
            println!("shortest-path tree:");
            for edge in &edges {
                println!("  {}", describe_edge(&graph, edge));
            }
        }
        None => println!("no shortest-path tree: a negative cycle is reachable from the source"),
    }
    Ok(())
}

fn compare(graph_path: &Path, source: NodeId, config: &Config) -> Result<()> {
    let graph = load_graph(graph_path, Algorithm::BellmanFord)?;

    let mut dijkstra = engine_for(Algorithm::Dijkstra);
    dijkstra.initialize(graph.nodes(), graph.edges(), source)?;
    run_to_completion(dijkstra.as_mut(), config.run.max_steps)?;

    let mut bellman_ford = engine_for(Algorithm::BellmanFord);
    bellman_ford.initialize(graph.nodes(), graph.edges(), source)?;
    run_to_completion(bellman_ford.as_mut(), config.run.max_steps)?;

    if dijkstra.distances() == bellman_ford.distances() {
        println!(
            "distances agree ({} / {} steps)",
            dijkstra.history().len(),
            bellman_ford.history().len()
        );
        return Ok(());
    }

    for node in graph.nodes() {
        let left = dijkstra.distances().map(|d| d.get(node.id));
        let right = bellman_ford.distances().map(|d| d.get(node.id));
        if left != right {
            println!("{}: dijkstra {:?}, bellman-ford {:?}", node.label, left, right);
        }
    }
    bail!("final distance tables differ")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let result = match cli {
        Cli::Run {
            graph,
            source,
            algorithm,
            config,
            json,
        } => {
            let config = load_config(config.as_deref())?;
            logging::init(&config)?;
            run(&graph, source, algorithm, &config, json)
        }
        Cli::Compare {
            graph,
            source,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            logging::init(&config)?;
            compare(&graph, source, &config)
        }
    };

    logging::shutdown();
    result
}
