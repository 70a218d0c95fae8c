use clap::{Parser, Subcommand};
use simplifier_core::{
    config, parse_sections, render_text, Category, CoreConfig, MockSimplifier, ReportFile,
    SimplifierSession,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "simplifier")]
#[command(about = "Medical report simplifier CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a simplified report file into sections and print them
    Parse {
        /// Path to the simplified report text
        path: PathBuf,
    },
    /// Simplify pasted text or an uploaded report file
    Simplify {
        /// Report text
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,
        /// Report file (.pdf, .png, .jpg, .jpeg)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Simulated processing delay in milliseconds (defaults to SIMPLIFIER_DELAY_MS)
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Print the category a section title falls into
    Classify {
        /// Section title
        title: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("simplifier_core=warn".parse()?)
                .add_directive("simplifier=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Parse { path }) => {
            let text = std::fs::read_to_string(&path)?;
            let sections = parse_sections(&text);
            tracing::debug!(path = %path.display(), sections = sections.len(), "parsed report");
            if sections.is_empty() {
                println!("No sections found.");
            } else {
                print!("{}", render_text(&sections));
            }
        }
        Some(Commands::Simplify {
            text,
            file,
            delay_ms,
        }) => {
            let cfg = CoreConfig::new(
                match delay_ms {
                    Some(ms) => Duration::from_millis(ms),
                    None => config::simulated_delay_from_env_value(
                        std::env::var("SIMPLIFIER_DELAY_MS").ok(),
                    )?,
                },
                config::max_upload_bytes_from_env_value(
                    std::env::var("SIMPLIFIER_MAX_UPLOAD_BYTES").ok(),
                )?,
                config::resolve_canned_output(
                    std::env::var("SIMPLIFIER_CANNED_OUTPUT").ok().map(PathBuf::from),
                )?,
            )?;

            let mut session = SimplifierSession::new();
            if let Some(path) = file {
                let report_file = ReportFile::from_path(&path)?;
                report_file.warn_if_oversized(cfg.max_upload_bytes());
                tracing::info!(
                    filename = report_file.name(),
                    size_bytes = report_file.size_bytes(),
                    "selected report file"
                );
                session.select_file(report_file);
            } else if let Some(text) = text {
                session.set_report_text(text);
            }

            if let Err(e) = session.submit(&MockSimplifier::from_config(&cfg)).await {
                anyhow::bail!(e.user_message());
            }
            if let Some(message) = session.error() {
                anyhow::bail!(message.to_owned());
            }
            if let Some(report) = session.output() {
                tracing::info!(report_id = %report.id, "rendering simplified report");
            }
            print!("{}", render_text(&session.sections()));
        }
        Some(Commands::Classify { title }) => {
            let category = Category::from_title(&title);
            let style = category.style();
            println!("{} (icon: {}, gradient: {})", category, style.icon, style.gradient);
        }
        None => {
            println!("Use 'simplifier --help' for commands");
        }
    }

    Ok(())
}
