//! Headless front end: inspect `.gph` files and run the algorithm demos
//! without a canvas attached.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use graphtool_algo::{bfs, depth_limited_dfs, dfs, eulerian_circuits, AlgorithmTrace, TraceStep};
use graphtool_core::Graph;
use graphtool_io::{read_graph, write_graph};
use graphtool_views::{AdjacencyMatrixView, GraphPropertiesView, GraphView};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Graph file inspector and algorithm runner", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print graph properties and the adjacency matrix
    Show { file: PathBuf },
    /// Breadth-first layering from a source node
    Bfs { file: PathBuf, source: String },
    /// Depth-first exploration from a source node
    Dfs { file: PathBuf, source: String },
    /// Enumerate Eulerian circuits
    Euler { file: PathBuf },
    /// Nodes reachable within a bounded number of edges
    Reach {
        file: PathBuf,
        source: String,
        #[arg(long, default_value_t = 1)]
        depth: usize,
    },
    /// Create a fresh graph file
    New {
        file: PathBuf,
        #[arg(long)]
        directed: bool,
        #[arg(long)]
        weighted: bool,
        #[arg(long, default_value_t = 0)]
        nodes: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    match args.command {
        Command::Show { file } => {
            let graph = load(&file)?;
            show(&graph);
        }
        Command::Bfs { file, source } => {
            let graph = load(&file)?;
            let trace = bfs(&graph, &source)
                .with_context(|| format!("BFS from {source:?} failed"))?;
            print_trace(&trace);
        }
        Command::Dfs { file, source } => {
            let graph = load(&file)?;
            let trace = dfs(&graph, &source)
                .with_context(|| format!("DFS from {source:?} failed"))?;
            print_trace(&trace);
        }
        Command::Euler { file } => {
            let graph = load(&file)?;
            let trace = eulerian_circuits(&graph).context("no Eulerian circuit")?;
            print_trace(&trace);
        }
        Command::Reach {
            file,
            source,
            depth,
        } => {
            let graph = load(&file)?;
            let names = depth_limited_dfs(&graph, &source, depth)
                .with_context(|| format!("reachability from {source:?} failed"))?;
            println!("{}", names.join(" "));
        }
        Command::New {
            file,
            directed,
            weighted,
            nodes,
        } => {
            let graph = Graph::with_nodes(nodes, directed, weighted);
            write_graph(&file, &graph)
                .with_context(|| format!("cannot write {:?}", file))?;
            println!(
                "wrote {:?}: {} nodes, directed={directed}, weighted={weighted}",
                file, nodes
            );
        }
    }
    Ok(())
}

fn load(file: &PathBuf) -> Result<Graph> {
    read_graph(file).with_context(|| format!("cannot read {:?}", file))
}

fn show(graph: &Graph) {
    let mut props = GraphPropertiesView::new();
    props.refresh(graph);
    println!(
        "directed={} weighted={} nodes={} edges={}",
        props.directed, props.weighted, props.node_count, props.edge_count
    );
    for (name, degree) in &props.degrees {
        println!("  {name}: degree {degree}");
    }

    let mut matrix = AdjacencyMatrixView::new();
    matrix.refresh(graph);
    print!("    ");
    for header in &matrix.headers {
        print!("{header:>4}");
    }
    println!();
    for (row, header) in matrix.headers.iter().enumerate() {
        print!("{header:>4}");
        for col in 0..matrix.headers.len() {
            print!("{:>4}", matrix.cell(row, col).unwrap_or(0));
        }
        println!();
    }
}

fn print_trace(trace: &AlgorithmTrace) {
    for step in trace.steps() {
        match step {
            TraceStep::NodeVisited(name) => println!("visit {name}"),
            TraceStep::EdgeTraversed(u, v) => println!("edge  {u} -> {v}"),
            TraceStep::NodeGroup(names) => println!("nodes {}", names.join(" ")),
            TraceStep::EdgeGroup(pairs) => {
                let text: Vec<String> =
                    pairs.iter().map(|(u, v)| format!("{u}->{v}")).collect();
                println!("edges {}", text.join(" "));
            }
        }
    }
}
