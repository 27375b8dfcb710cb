use clap::{Parser, Subcommand};
use image_analyzer::analyzer::{HttpAnalyzer, ImageAnalyzer};
use image_analyzer::config::Config;
use image_analyzer::describe::describe_file;
use image_analyzer::tui::{self, TuiOptions};
use image_analyzer::utils::{init_logger, LogTarget};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "image-analyzer", version, about = "Preview an image and get a description from an analysis service")]
struct Cli {
    /// Analysis endpoint (overrides ANALYZER_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Multipart field carrying the image (overrides ANALYZER_FIELD)
    #[arg(long, global = true)]
    field: Option<String>,

    /// Directory the file picker starts in
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Image to select on startup
    #[arg(long)]
    image: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze one image and print the result
    Describe {
        /// Image file to send
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = Config::from_env()?.with_overrides(cli.endpoint.as_deref(), cli.field.as_deref())?;

    let target = match cli.command {
        Some(Command::Describe { .. }) => LogTarget::Stderr,
        None => LogTarget::File,
    };
    let _log_guard = init_logger(&config.logging, target)?;
    info!(endpoint = %config.analyzer.endpoint, field = %config.analyzer.field, "Configuration loaded");

    let analyzer = HttpAnalyzer::new(&config.analyzer);

    match cli.command {
        Some(Command::Describe { path }) => {
            let output = describe_file(&path, &analyzer).await?;
            println!("{}", output.text);
            Ok(if output.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        None => {
            let analyzer: Arc<dyn ImageAnalyzer> = Arc::new(analyzer);
            let options = TuiOptions {
                start_dir: cli.dir,
                initial_image: cli.image,
            };
            tui::run(options, analyzer).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
