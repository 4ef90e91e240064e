use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tidyfs::{
    config::Config,
    models::ActivityLog,
    ocr::{TesseractRecognizer, TextRecognizer},
    organizer::{AutoAccept, DialoguerPrompt, PreviewTree, Prompt},
    Error, Workspace,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tidyfs")]
#[command(
    about = "Tidy a folder: sort files by type, flatten subfolders, group text files by content"
)]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Settings file. Falls back to $TIDYFS_CONFIG, config/settings.toml,
    /// then ~/.config/tidyfs/settings.toml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Move every file into a category folder based on its extension
    #[command(name = "organize")]
    Organize {
        /// Directory to organize
        #[arg(value_name = "DIR")]
        dir: PathBuf,
        /// Dry run (preview only, don't move files)
        #[arg(long)]
        dry_run: bool,
        /// Print the plan as JSON instead of executing it
        #[arg(long)]
        json: bool,
    },
    /// Copy every file found in subfolders into one flat folder
    #[command(name = "unpack")]
    Unpack {
        /// Directory to unpack
        #[arg(value_name = "DIR")]
        dir: PathBuf,
        /// Dry run (preview only, don't copy files)
        #[arg(long)]
        dry_run: bool,
        /// Print the plan as JSON instead of executing it
        #[arg(long)]
        json: bool,
    },
    /// Group .txt files by content with k-means and move each group into Cluster_<n>
    #[command(name = "cluster")]
    Cluster {
        /// Directory holding the text files
        #[arg(value_name = "DIR")]
        dir: PathBuf,
        /// Number of clusters (overrides config)
        #[arg(short, long)]
        k: Option<usize>,
        /// Dry run (preview only, don't move files)
        #[arg(long)]
        dry_run: bool,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
        /// Print the assignments and plan as JSON instead of executing them
        #[arg(long)]
        json: bool,
    },
    /// Predict a category for each .txt file and move it into that folder
    #[command(name = "predict")]
    Predict {
        /// Directory holding the text files
        #[arg(value_name = "DIR")]
        dir: PathBuf,
        /// Dry run (preview only, don't move files)
        #[arg(long)]
        dry_run: bool,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
        /// Print the assignments and plan as JSON instead of executing them
        #[arg(long)]
        json: bool,
    },
    /// Extract text from an image with OCR
    #[command(name = "ocr")]
    Ocr {
        /// Image to read (jpg, jpeg, png, bmp, tiff)
        #[arg(value_name = "IMAGE")]
        image: PathBuf,
        /// Tesseract language (overrides config)
        #[arg(long)]
        lang: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config, cli.verbose);

    if let Err(e) = run(cli.command, config).await {
        tracing::error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}

fn init_logging(config: &Config, verbose: u8) {
    let level = match verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tidyfs={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Commands, mut config: Config) -> Result<()> {
    let dry_run_default = config.organizer.dry_run_default;
    let skip_confirmation = config.organizer.skip_confirmation;

    match command {
        Commands::Organize { dir, dry_run, json } => {
            let workspace = open_workspace(&dir, config)?;
            println!("Organizing directory: {}", workspace.root().display());

            let plan = workspace.plan_organize().context("Failed to plan organization")?;
            if json {
                println!("{}", plan.to_json()?);
                return Ok(());
            }
            if plan.is_empty() {
                println!("No files found to organize.");
                return Ok(());
            }

            let dry_run = dry_run || dry_run_default;
            if dry_run {
                println!("\n{}", plan.render(workspace.root()));
            }
            let log = workspace
                .execute(&plan, dry_run)
                .await
                .context("Error during file organization")?;
            report(&log);
            finish(dry_run, "Files organized successfully by type!");
        }
        Commands::Unpack { dir, dry_run, json } => {
            let workspace = open_workspace(&dir, config)?;
            let staging = workspace.config().organizer.unpack_folder.clone();
            println!("Unpacking subfolders of: {}", workspace.root().display());

            let plan = workspace.plan_unpack().context("Failed to plan unpacking")?;
            if json {
                println!("{}", plan.to_json()?);
                return Ok(());
            }
            if plan.operations.is_empty() {
                println!("✓ Nothing to copy, {} is up to date.", staging);
                return Ok(());
            }

            let dry_run = dry_run || dry_run_default;
            if dry_run {
                println!("\n{}", plan.render(workspace.root()));
            }
            let log = workspace
                .execute(&plan, dry_run)
                .await
                .context("Error during unpacking subfolders")?;
            report(&log);
            finish(dry_run, &format!("Files copied to {} folder successfully!", staging));
        }
        Commands::Cluster {
            dir,
            k,
            dry_run,
            yes,
            json,
        } => {
            if let Some(k) = k {
                config.cluster.clusters = k;
                config.validate()?;
            }
            let workspace = open_workspace(&dir, config)?;
            println!(
                "🔍 Clustering text files into {} groups...",
                workspace.config().cluster.clusters
            );

            let assignments = workspace
                .cluster_assignments()
                .context("Error during file clustering preview")?;
            if assignments.is_empty() {
                println!("No text files found to cluster.");
                return Ok(());
            }

            let plan = workspace.plan_assignments(&assignments);
            if json {
                println!("{}", serde_json::to_string_pretty(&assignments)?);
                println!("{}", plan.to_json()?);
                return Ok(());
            }

            confirm_and_execute(
                &workspace,
                "Preview Clustering",
                &plan,
                yes || skip_confirmation,
                dry_run || dry_run_default,
                "Files clustered successfully!",
            )
            .await
            .context("Error during file clustering execution")?;
        }
        Commands::Predict {
            dir,
            dry_run,
            yes,
            json,
        } => {
            let workspace = open_workspace(&dir, config)?;
            let prediction = workspace
                .predict_assignments()
                .context("Error during category prediction preview")?;

            match prediction.accuracy {
                Some(accuracy) => println!(
                    "📊 Category prediction model accuracy: {:.2}%",
                    accuracy * 100.0
                ),
                None => println!("📊 No held-out examples, accuracy not measured"),
            }

            if prediction.assignments.is_empty() {
                println!("No text files found to categorize.");
                return Ok(());
            }

            let plan = workspace.plan_assignments(&prediction.assignments);
            if json {
                println!("{}", serde_json::to_string_pretty(&prediction.assignments)?);
                println!("{}", plan.to_json()?);
                return Ok(());
            }

            confirm_and_execute(
                &workspace,
                "Preview Predictions",
                &plan,
                yes || skip_confirmation,
                dry_run || dry_run_default,
                "Categories predicted and files organized!",
            )
            .await
            .context("Error during category prediction execution")?;
        }
        Commands::Ocr { image, lang } => {
            if let Some(lang) = lang {
                config.ocr.language = lang;
            }
            let recognizer = TesseractRecognizer::from_config(&config.ocr);
            let text = recognizer
                .recognize_text(&image)
                .await
                .with_context(|| format!("Error during OCR of {}", image.display()))?;

            println!("Extracted Text from Image:");
            println!("{}", text);
        }
    }

    Ok(())
}

fn open_workspace(dir: &Path, config: Config) -> Result<Workspace> {
    Ok(Workspace::open(dir, config)
        .with_context(|| format!("Please select a folder! ({} is not a directory)", dir.display()))?
        .with_progress(true))
}

async fn confirm_and_execute(
    workspace: &Workspace,
    title: &str,
    plan: &PreviewTree,
    yes: bool,
    dry_run: bool,
    success: &str,
) -> Result<()> {
    let prompt: &dyn Prompt = if yes || dry_run { &AutoAccept } else { &DialoguerPrompt };
    if yes || dry_run {
        println!("\n{}", plan.render(workspace.root()));
    }

    let outcome = workspace.execute_with_preview(title, plan, prompt, dry_run).await?;
    match outcome.into_result() {
        Ok(log) => {
            report(&log);
            finish(dry_run, success);
        }
        Err(Error::Cancelled) => println!("Declined. No files were moved."),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn report(log: &ActivityLog) {
    for line in log.lines() {
        println!("  {}", line);
    }
}

fn finish(dry_run: bool, success: &str) {
    if dry_run {
        println!("\nDry run completed. No files were changed.");
    } else {
        println!("\n✓ {}", success);
    }
}
