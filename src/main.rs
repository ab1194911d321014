use clap::{Parser, Subcommand};
use career_engine::{
    config::Settings,
    models::{tier_label, CareerSnapshot},
    progression::{CareerReport, CertificationEngine},
    service::CareerService,
    store::{parse_save_id, SaveStore, SqliteSaveStore},
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "career-engine")]
#[clap(about = "Certification and award progress for career save games", long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the career report for a stored save slot
    Report {
        /// User ID
        #[clap(short, long)]
        user: String,

        /// Save slot
        #[clap(short, long, default_value = "1")]
        slot: i64,

        /// Print JSON instead of text
        #[clap(long)]
        json: bool,
    },

    /// Print the career report for a game state file
    ReportFile {
        /// Path to a serialized game state
        path: PathBuf,

        /// Print JSON instead of text
        #[clap(long)]
        json: bool,
    },

    /// Store a game state file in a save slot
    Import {
        /// User ID
        #[clap(short, long)]
        user: String,

        /// Save slot
        #[clap(short, long, default_value = "1")]
        slot: i64,

        /// Path to a serialized game state
        path: PathBuf,
    },

    /// List a user's saves
    List {
        /// User ID
        #[clap(short, long)]
        user: String,
    },

    /// Delete a save by id
    Delete {
        /// Save id
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::new().unwrap_or_else(|e| {
        eprintln!("Using default settings: {}", e);
        Settings::default()
    });

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.app.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    if let Err(e) = settings.validate() {
        error!("Invalid settings: {}", e);
        return Err(anyhow::anyhow!(e));
    }

    let engine = CertificationEngine::new(settings.threshold_table()?);

    match cli.command {
        Commands::ReportFile { path, json } => {
            let state = std::fs::read_to_string(&path)?;
            let snapshot = CareerSnapshot::from_json(&state)?;
            let report = CareerReport::from_snapshot(&engine, &snapshot);
            print_report(&report, json)?;
        }

        Commands::Report { user, slot, json } => {
            let store = SqliteSaveStore::connect(&settings.database).await?;
            let service = CareerService::new(Arc::new(store), engine);
            let report = service.report(&user, slot).await?;
            print_report(&report, json)?;
        }

        Commands::Import { user, slot, path } => {
            let state = std::fs::read_to_string(&path)?;
            let snapshot = CareerSnapshot::from_json(&state)?;

            let store = SqliteSaveStore::connect(&settings.database).await?;
            let service = CareerService::new(Arc::new(store), engine);
            let saved = service.save_snapshot(&user, slot, &snapshot).await?;
            println!("Saved {} to slot {} (id {})", path.display(), saved.save_slot, saved.id);
        }

        Commands::List { user } => {
            let store = SqliteSaveStore::connect(&settings.database).await?;
            let saves = store.list_by_user(&user).await?;

            if saves.is_empty() {
                println!("No saves for {}", user);
            }
            for save in saves {
                println!(
                    "#{:<5} slot {:<3} {} {}",
                    save.id,
                    save.save_slot,
                    save.last_saved.format("%Y-%m-%d %H:%M:%S"),
                    if save.is_active { "active" } else { "inactive" }
                );
            }
        }

        Commands::Delete { id } => {
            let id = parse_save_id(&id)?;
            let store = SqliteSaveStore::connect(&settings.database).await?;

            if store.delete(id).await? {
                info!("Deleted save {}", id);
                println!("Deleted save {}", id);
            } else {
                println!("No save with id {}", id);
            }
        }
    }

    Ok(())
}

fn print_report(report: &CareerReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("Week {}", report.week);
    println!("Highest certification: {}", tier_label(report.highest_tier));
    println!();

    println!("Releases");
    for release in &report.releases {
        let current = release
            .current
            .map(|t| t.display_name())
            .unwrap_or("Uncertified");
        println!(
            "  {:<30} {:>12} streams  {:<12} {:>5.1}% to {}",
            release.title, release.streams, current, release.percent, release.next
        );
    }
    println!();

    println!(
        "Awards ({} wins / {} nominations)",
        report.total_wins(),
        report.total_nominations()
    );
    for (body, years) in report.awards.iter() {
        let tally = report.tally.get(body).copied().unwrap_or_default();
        println!("  {} ({} / {})", body, tally.wins, tally.nominations);
        for (year, awards) in years {
            for award in awards {
                let outcome = if award.is_winner { "won" } else { "nominated" };
                println!("    {} {:<40} {}", year, award.category, outcome);
            }
        }
    }

    Ok(())
}
