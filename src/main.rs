use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use incident_analyzer::{AnalyzerConfig, IncidentAnalyzer, PatternRecognizer};
use recommendation_engine::Recommender;
use std::path::PathBuf;
use tracing::info;
use vialert_core::{BroadcastOutcome, EngineError, ErrorExt, ErrorReporter};

/// Vialert - traffic incident analysis and venue recommendations
#[derive(Parser, Debug)]
#[command(name = "vialert", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a post table and write the enriched incident table.
    Analyze(AnalyzeArgs),

    /// Alert one user about hazards on their routes and suggest a venue.
    Recommend(RecommendArgs),

    /// Rank venues for one user by interest similarity.
    Rank(RankArgs),

    /// Pick one incident and alert every user whose routes it touches.
    Broadcast(BroadcastArgs),
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Post table to analyze.
    #[arg(long, default_value = "data/instagram_posts.csv")]
    posts: PathBuf,

    /// Enriched incident table to write.
    #[arg(long, default_value = "data/accidents.csv")]
    out: PathBuf,

    /// Also write the aggregate report as JSON.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Analyzer configuration overrides (JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Augment extraction with the pattern entity recognizer.
    #[arg(long)]
    ner: bool,
}

/// Registry and incident tables shared by the matching commands.
#[derive(Args, Debug)]
struct TableArgs {
    /// User registry table.
    #[arg(long, default_value = "data/users.csv")]
    users: PathBuf,

    /// Point-of-interest registry table.
    #[arg(long, default_value = "data/points_of_interest.csv")]
    pois: PathBuf,

    /// Enriched incident table produced by `analyze`.
    #[arg(long, default_value = "data/accidents.csv")]
    incidents: PathBuf,
}

#[derive(Args, Debug)]
struct RecommendArgs {
    /// User to recommend for.
    #[arg(long)]
    user: String,

    #[command(flatten)]
    tables: TableArgs,

    /// Fixed seed for reproducible venue picks.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct RankArgs {
    /// User to rank venues for.
    #[arg(long)]
    user: String,

    #[command(flatten)]
    tables: TableArgs,
}

#[derive(Args, Debug)]
struct BroadcastArgs {
    #[command(flatten)]
    tables: TableArgs,

    /// Fixed seed for reproducible incident and venue picks.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze(args) => run_analyze(args),
        Commands::Recommend(args) => run_recommend(args),
        Commands::Rank(args) => run_rank(args),
        Commands::Broadcast(args) => run_broadcast(args),
    }
}

fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => AnalyzerConfig::from_file(path)?,
        None => AnalyzerConfig::new()?,
    };
    let analyzer = if args.ner {
        IncidentAnalyzer::with_recognizer(config, Box::new(PatternRecognizer::new()?))
    } else {
        IncidentAnalyzer::new(config)
    };

    let posts = table_store::load_posts(&args.posts)?;
    info!("Analyzing {} posts", posts.len());
    let output = analyzer.analyze_batch(&posts);
    table_store::save_enriched(&args.out, &output.records)?;

    if let Some(report_path) = &args.report {
        let json = serde_json::to_string_pretty(&output.report)?;
        std::fs::write(report_path, json)
            .with_context(|| format!("writing report to {}", report_path.display()))?;
        info!("Report written to {}", report_path.display());
    }

    println!("{}", output.report.render());
    Ok(())
}

fn run_recommend(args: RecommendArgs) -> Result<()> {
    let recommender = load_recommender(&args.tables)?;
    let mut rng = seeded_rng(args.seed);

    match recommender.recommend_for_user(&args.user, &mut rng) {
        Ok(recommendation) => {
            println!("Recomendación para usuario: {}", recommendation.user.user_id);
            println!("{}", recommendation.message);
            Ok(())
        }
        Err(err) => report_friendly(err.into()),
    }
}

fn run_rank(args: RankArgs) -> Result<()> {
    let recommender = load_recommender(&args.tables)?;

    match recommender.rank_by_interests(&args.user) {
        Ok(ranked) => {
            println!("Lugares sugeridos para {}:", args.user);
            for (position, entry) in ranked.iter().enumerate() {
                println!(
                    "{}. **{}** ({}) — afinidad {:.3}",
                    position + 1,
                    entry.poi.name,
                    entry.poi.poi_type,
                    entry.similarity
                );
                println!(
                    "   Zona: {} | Horario: {} | Oferta: {}",
                    entry.poi.zone, entry.poi.schedule, entry.poi.current_offer
                );
            }
            Ok(())
        }
        Err(err) => report_friendly(err.into()),
    }
}

fn run_broadcast(args: BroadcastArgs) -> Result<()> {
    let recommender = load_recommender(&args.tables)?;
    let mut rng = seeded_rng(args.seed);

    match recommender.broadcast_from_incident(&mut rng) {
        Ok(BroadcastOutcome::Notified {
            incident,
            recommendations,
        }) => {
            println!(
                "🚨 Incidente seleccionado: {} en {}",
                incident.incident_type.label(),
                incident.extracted_locations
            );
            println!("👥 Usuarios afectados: {}", recommendations.len());
            for recommendation in &recommendations {
                println!(
                    "\n🔔 {} ({})",
                    recommendation.user.name, recommendation.user.user_id
                );
                println!("{}", recommendation.message);
            }
            Ok(())
        }
        Ok(BroadcastOutcome::NoAffectedUsers { incident }) => {
            println!(
                "🚨 Incidente seleccionado: {} en {}",
                incident.incident_type.label(),
                incident.extracted_locations
            );
            println!("❌ No se encontraron usuarios afectados por este accidente.");
            Ok(())
        }
        Err(err) => report_friendly(err.into()),
    }
}

fn load_recommender(tables: &TableArgs) -> Result<Recommender> {
    let users = table_store::load_users(&tables.users)?;
    let pois = table_store::load_pois(&tables.pois)?;
    let incidents = table_store::load_enriched(&tables.incidents)?;
    Ok(Recommender::new(users, pois, incidents))
}

fn seeded_rng(seed: Option<u64>) -> fastrand::Rng {
    match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    }
}

/// Matching failures are results, not crashes: log them and print the
/// Spanish message a user would see.
fn report_friendly(error: EngineError) -> Result<()> {
    ErrorReporter::new().report_warning(&error);
    println!("{}", error.user_friendly_message());
    Ok(())
}
