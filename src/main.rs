//! Mediarec - Offline Recommendation Evaluation
//!
//! Loads every user's ratings from the media database, ranks predictions for
//! each user with a ground-truth set, and prints the averaged error.

use clap::Parser;
use mediarec_core::{
    error::Result,
    evaluate_with,
    evaluation::{AboveAverage, GroundTruthSource, JsonFile, LabelledTable},
    load_user_ratings, CoOccurrence, Collaborative, EvalConfig, EvaluationReport, GroundTruthKind,
    Ranker, SqliteStore, Strategy, TopRated,
};
use std::path::PathBuf;
use tracing::{debug, warn, Level};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(name = "mediarec-eval")]
#[command(about = "Evaluate media recommendations against per-user ground truth", long_about = None)]
#[command(version)]
struct Cli {
    /// Database path (overrides the configuration file)
    #[arg(long, env = "MEDIAREC_DATABASE_PATH")]
    db_path: Option<PathBuf>,

    /// Configuration file (defaults to ./mediarec.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ground-truth source
    #[arg(long, value_enum)]
    ground_truth: Option<GroundTruthKind>,

    /// Table read by the `table` ground truth
    #[arg(long)]
    ground_truth_table: Option<String>,

    /// File read by the `json` ground truth
    #[arg(long)]
    ground_truth_file: Option<PathBuf>,

    /// Ranking strategy
    #[arg(short, long, value_enum)]
    strategy: Option<Strategy>,

    /// Neighbours consulted by the collaborative strategy
    #[arg(long)]
    neighbours: Option<usize>,

    /// Print the predictions of the first N evaluated users to stderr
    #[arg(long, value_name = "N")]
    show_top: Option<usize>,

    /// Set log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration
    fn apply(&self, config: &mut EvalConfig) {
        if let Some(path) = &self.db_path {
            config.database_path = path.clone();
        }
        if let Some(kind) = self.ground_truth {
            config.ground_truth = kind;
        }
        if let Some(table) = &self.ground_truth_table {
            config.ground_truth_table = table.clone();
        }
        if let Some(file) = &self.ground_truth_file {
            config.ground_truth_file = Some(file.clone());
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(neighbours) = self.neighbours {
            config.neighbours = neighbours;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::new(format!(
        "mediarec_core={level},mediarec_eval={level}",
        level = level.as_str().to_lowercase()
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // stdout carries only the result line
        .init();

    debug!("mediarec v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = EvalConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    let store = SqliteStore::new(&config.database_path);
    let ratings = load_user_ratings(&store, &config.sources)?;

    let source: Box<dyn GroundTruthSource + '_> = match config.ground_truth {
        GroundTruthKind::AboveAverage => Box::new(AboveAverage::new(
            &store,
            &ratings,
            config.categories(),
        )),
        GroundTruthKind::Table => Box::new(LabelledTable::new(
            &store,
            config.ground_truth_table.clone(),
        )),
        GroundTruthKind::Json => {
            // validate() guarantees the file is set
            let path = config.ground_truth_file.clone().unwrap_or_default();
            Box::new(JsonFile::new(path))
        }
    };
    debug!("Loading ground truth from {} source", source.name());
    let truth = source.load()?;

    let ranker: Box<dyn Ranker> = match config.strategy {
        Strategy::TopRated => Box::new(TopRated),
        Strategy::Collaborative => {
            if config.ground_truth == GroundTruthKind::AboveAverage {
                warn!(
                    "Collaborative ranking only predicts unrated items; \
                     above-average ground truth contains rated items only"
                );
            }
            Box::new(Collaborative::new(config.neighbours))
        }
        Strategy::CoOccurrence => {
            if config.ground_truth == GroundTruthKind::AboveAverage {
                warn!(
                    "Co-occurrence ranking skips rated items; \
                     above-average ground truth contains rated items only"
                );
            }
            Box::new(CoOccurrence)
        }
    };

    let report = evaluate_with(ranker.as_ref(), &ratings, &truth);
    println!("Average Recommendation Error: {:.2}", report.average_error);

    if let Some(n) = cli.show_top {
        print_predictions(&store, &report, n)?;
    }

    Ok(())
}

/// Print predicted items, with titles where the media row exists
fn print_predictions(store: &SqliteStore, report: &EvaluationReport, n: usize) -> Result<()> {
    for user in report.per_user.iter().take(n) {
        eprintln!("User {} (error {:.2}):", user.user_id, user.error);
        for item in &user.predicted {
            match store.fetch_media_title(item)? {
                Some(title) => eprintln!("   • {} - {}", item, title),
                None => eprintln!("   • {}", item),
            }
        }
    }
    Ok(())
}
