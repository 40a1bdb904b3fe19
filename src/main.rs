use anyhow::Context;
use clap::Parser;
use relgraph::{Attributed, GraphConfig, GraphKind, GraphStore, NodeId};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "relgraph", version, about = "Attributed graph traversal demo")]
struct Cli {
    /// YAML graph configuration
    #[arg(long, env = "RELGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Build directed graphs regardless of the configured kind
    #[arg(long)]
    directed: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => GraphConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GraphConfig::default(),
    };
    if cli.directed {
        config.kind = GraphKind::Directed;
    }

    println!("Relgraph v{}", relgraph::version());
    println!("==========================================");
    println!("Graph kind: {}", config.kind);
    println!();

    demo_triangle(&config)?;
    demo_chain(&config)?;
    demo_self_loop(&config)?;
    demo_cascade(&config)?;

    Ok(())
}

fn print_traversal(store: &GraphStore, start: &NodeId) -> anyhow::Result<()> {
    let traversal = store.traverse(start)?;
    let has_cycles = traversal.has_cycles();
    let order: Vec<String> = traversal
        .map(|node| match node.get_attribute("name") {
            Some(name) => format!("{} ({})", node.id(), name),
            None => node.id().to_string(),
        })
        .collect();

    println!("  traverse({}) = [{}]", start, order.join(", "));
    println!("  cycles: {}", has_cycles);
    Ok(())
}

fn demo_triangle(config: &GraphConfig) -> anyhow::Result<()> {
    println!("=== Triangle ===");
    let mut store = GraphStore::with_config(config.clone());

    let a = store.create_node(None)?;
    let b = store.create_node(None)?;
    let c = store.create_node(None)?;
    store.set_node_attribute(&a, "name", "Alice")?;
    store.set_node_attribute(&b, "name", "Bob")?;
    store.set_node_attribute(&c, "name", "Charlie")?;

    store.connect(&a, &b)?;
    store.connect(&b, &c)?;
    let closing = store.connect(&c, &a)?;
    store.set_relation_attribute(&closing, "closes_cycle", true)?;

    print_traversal(&store, &a)?;
    println!();
    Ok(())
}

fn demo_chain(config: &GraphConfig) -> anyhow::Result<()> {
    println!("=== Chain ===");
    let mut store = GraphStore::with_config(config.clone());

    let ids = (0..4)
        .map(|_| store.create_node(None))
        .collect::<Result<Vec<_>, _>>()?;
    for pair in ids.windows(2) {
        store.connect(&pair[0], &pair[1])?;
    }

    print_traversal(&store, &ids[0])?;
    print_traversal(&store, &ids[3])?;
    println!();
    Ok(())
}

fn demo_self_loop(config: &GraphConfig) -> anyhow::Result<()> {
    println!("=== Self-loop ===");
    let mut store = GraphStore::with_config(config.clone());

    let a = store.create_node(None)?;
    store.connect(&a, &a)?;

    print_traversal(&store, &a)?;
    println!();
    Ok(())
}

fn demo_cascade(config: &GraphConfig) -> anyhow::Result<()> {
    println!("=== Cascading removal ===");
    let mut store = GraphStore::with_config(config.clone());

    let a = store.create_node(None)?;
    let b = store.create_node(None)?;
    let r = store.connect(&a, &b)?;
    println!("  before: {:?}", store.statistics());

    store.remove_node(&b)?;
    println!("  after removing {}: {:?}", b, store.statistics());
    println!("  {} still registered: {}", r, store.has_relation(&r));
    Ok(())
}
