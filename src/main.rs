use anyhow::Result;
use clap::Parser;

use social_graph_analyzer::cluster::metrics;
use social_graph_analyzer::graph::algorithms;
use social_graph_analyzer::recommend::{self, ContentInteractions};
use social_graph_analyzer::{data, degree_centrality, storage, viz, Config, Louvain, NodeId};

#[derive(Parser, Debug)]
#[clap(
    name = "social-graph-analyzer",
    about = "Community detection, influence ranking and recommendations for social graphs"
)]
struct Cli {
    /// Path to input edge list (one `node node` pair per line)
    #[clap(long)]
    input: String,

    /// JSON file mapping user ids to the content they interacted with
    #[clap(long)]
    interactions: Option<String>,

    /// User to generate recommendations for
    #[clap(long)]
    user: Option<NodeId>,

    /// Output directory for results
    #[clap(long, default_value = "community_results")]
    output_dir: String,

    /// Maximum local-moving passes during community detection
    #[clap(long, default_value = "300")]
    max_passes: usize,

    /// Number of recommendations per category
    #[clap(long, default_value = "5")]
    top_k: usize,

    /// Number of influential nodes to report
    #[clap(long, default_value = "10")]
    influential: usize,

    /// Skip visualization export
    #[clap(long)]
    skip_viz: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let config = Config::new(args.max_passes, args.top_k, args.influential, args.threads);

    let num_threads = config.worker_threads();
    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    log::info!("Starting social graph analysis");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    std::fs::create_dir_all(&args.output_dir)?;

    // 1. Load data
    let graph = data::load_edge_list(&args.input)?;
    log::info!(
        "Number of nodes: {}, number of edges: {} ({} bytes)",
        graph.node_count(),
        graph.edge_count(),
        graph.memory_usage()
    );

    let interactions = match &args.interactions {
        Some(path) => data::load_interactions(path)?,
        None => ContentInteractions::new(),
    };

    // 2. Detect communities
    let detection = Louvain::from_config(&config).detect(&graph)?;
    let communities =
        metrics::summarize_communities(&graph, &detection.partition, config.top_k);

    // 3. Rank influential nodes
    let centrality = degree_centrality(&graph);
    let influential = algorithms::top_nodes_by_degree(&graph, config.influential_count);
    log::info!(
        "Top {} influential nodes by centrality: {:?}",
        config.influential_count,
        centrality.top(config.influential_count)
    );

    // 4. Save results
    storage::save_results(
        &graph,
        &detection,
        &communities,
        &centrality,
        &influential,
        &args.output_dir,
    )?;

    // 5. Export visualization data if requested
    if !args.skip_viz {
        viz::generate_visualizations(
            &graph,
            &detection.partition,
            &communities,
            &centrality,
            &influential,
            &args.output_dir,
        )?;
    }

    // 6. Per-user recommendations
    if let Some(user) = args.user {
        let recommendations = recommend::recommend_for_user(
            user,
            &graph,
            &detection.partition,
            &centrality,
            &interactions,
            config.top_k,
        )?;

        log::info!("Recommended content for user {}: {:?}", user, recommendations.content);
        log::info!("Recommended friends for user {}: {:?}", user, recommendations.friends);
        log::info!(
            "Predicted future friends for user {}: {:?}",
            user,
            recommendations.predicted_links
        );

        storage::save_recommendations(&recommendations, &args.output_dir)?;
    }

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}
