//! RiskGraph CLI: runs the risk engine over JSON fact snapshots

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use riskgraph::model::severity_label;
use riskgraph::{predict_links, FactRepository, JsonRepository, RiskConfig, RiskEngine, RiskReport};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "riskgraph-cli", version, about = "Equipment-risk analytics CLI")]
struct Cli {
    /// YAML engine config
    #[arg(long, global = true, env = "RISKGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(clap::Args)]
struct Inputs {
    /// JSON array of facts
    #[arg(long)]
    facts: PathBuf,

    /// JSON array of thresholds
    #[arg(long)]
    thresholds: PathBuf,

    /// JSON array of equipment registry records
    #[arg(long)]
    equipment: Option<PathBuf>,
}

impl Inputs {
    fn repository(&self) -> JsonRepository {
        let repo = JsonRepository::new(&self.facts, &self.thresholds);
        match &self.equipment {
            Some(path) => repo.with_equipment(path),
            None => repo,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build the risk report for a fact snapshot
    Analyze {
        #[command(flatten)]
        inputs: Inputs,
    },
    /// Predict missing links for one node
    Links {
        #[command(flatten)]
        inputs: Inputs,

        /// Node id to score candidates for
        #[arg(long)]
        node: String,

        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Print the effective config as YAML
    Config,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => {
            RiskConfig::from_yaml_file(path).with_context(|| format!("loading config {}", path.display()))?
        }
        None => RiskConfig::default(),
    };

    match &cli.command {
        Commands::Analyze { inputs } => {
            let engine = RiskEngine::new(config)?;
            let report = engine.run(&inputs.repository())?;
            print_report(&report, &cli.format)
        }
        Commands::Links { inputs, node, limit } => {
            let engine = RiskEngine::new(config)?;
            let repo = inputs.repository();
            let (_, graph) = engine.build_graph(repo.load_facts()?, &repo.load_thresholds()?, &repo.load_equipment()?)?;
            let links = predict_links(&graph, node, *limit)?;

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&links)?),
                OutputFormat::Csv => {
                    println!("node_id,entity_type,score");
                    for l in &links {
                        println!("{},{},{:.4}", csv_field(&l.node_id), csv_field(&l.entity_type), l.score);
                    }
                }
                OutputFormat::Table => {
                    let mut table = new_table(&["Node", "Type", "Score"]);
                    for l in &links {
                        table.add_row(vec![l.node_id.clone(), l.entity_type.clone(), format!("{:.3}", l.score)]);
                    }
                    println!("{}", table);
                    println!("{} candidate(s)", links.len());
                }
            }
            Ok(())
        }
        Commands::Config => {
            print!("{}", config.to_yaml_string()?);
            Ok(())
        }
    }
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header.to_vec());
    table
}

fn print_report(report: &RiskReport, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Csv => {
            println!("node_id,entity_type,severity,degree,betweenness,closeness,pagerank");
            for n in &report.top_risk_nodes {
                println!(
                    "{},{},{},{:.4},{:.4},{:.4},{:.4}",
                    csv_field(&n.node_id),
                    csv_field(&n.entity_type),
                    severity_label(n.severity),
                    n.degree,
                    n.betweenness,
                    n.closeness,
                    n.pagerank
                );
            }
        }
        OutputFormat::Table => {
            if report.is_empty() {
                println!("(no results)");
                return Ok(());
            }

            let mut nodes = new_table(&["Node", "Type", "Severity", "Degree", "Betweenness", "Closeness", "PageRank"]);
            for n in &report.top_risk_nodes {
                nodes.add_row(vec![
                    n.node_id.clone(),
                    n.entity_type.clone(),
                    severity_label(n.severity).to_string(),
                    format!("{:.3}", n.degree),
                    format!("{:.3}", n.betweenness),
                    format!("{:.3}", n.closeness),
                    format!("{:.3}", n.pagerank),
                ]);
            }
            println!("Top risk nodes");
            println!("{}", nodes);

            let mut pairs = new_table(&["Node A", "Node B", "Similarity"]);
            for p in &report.top_similar_pairs {
                pairs.add_row(vec![p.node_a.clone(), p.node_b.clone(), format!("{:.3}", p.similarity)]);
            }
            println!("\nMost similar pairs");
            println!("{}", pairs);

            let mut groups = new_table(&["Location", "Subject", "Predicate", "Object", "Severity", "Value"]);
            for (location, facts) in &report.location_risk_groups {
                for f in facts {
                    groups.add_row(vec![
                        location.clone(),
                        f.subject_id.clone(),
                        f.predicate.clone(),
                        f.object_id.clone(),
                        f.severity.to_string(),
                        f.value.map(|v| v.to_string()).unwrap_or_default(),
                    ]);
                }
            }
            println!("\nElevated facts by location");
            println!("{}", groups);

            let summary = report.summary();
            println!(
                "{} node(s), {} pair(s), {} location(s)",
                summary.risk_nodes, summary.similar_pairs, summary.locations
            );
        }
    }

    Ok(())
}

fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
