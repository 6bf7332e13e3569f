//! Folio CLI - Command-line interface for bilingual report generation

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a markdown report to a bilingual PDF
    Render {
        /// Input markdown file
        input: PathBuf,

        /// Output PDF path
        #[arg(short, long)]
        output: PathBuf,

        /// JSON configuration file; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Font file with CJK coverage
        #[arg(long)]
        font: Option<PathBuf>,

        /// Report title
        #[arg(long)]
        title: Option<String>,

        /// Date shown on the cover and in headers
        #[arg(long)]
        date: Option<String>,

        /// Layout variant (basic, extended)
        #[arg(long)]
        variant: Option<String>,

        /// JSON lexicon file of [source, target] pairs
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Logo drawn in page headers
        #[arg(long)]
        header_logo: Option<PathBuf>,

        /// Logo drawn on the cover
        #[arg(long)]
        cover_logo: Option<PathBuf>,
    },

    /// Print the assembled document structure without rendering
    Outline {
        /// Input markdown file
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Layout variant (basic, extended)
        #[arg(long)]
        variant: Option<String>,

        /// JSON lexicon file of [source, target] pairs
        #[arg(long)]
        lexicon: Option<PathBuf>,
    },

    /// Check fonts, input and logo files before rendering
    Check {
        /// Input markdown file
        #[arg(long)]
        input: Option<PathBuf>,

        /// Font file to check first
        #[arg(long)]
        font: Option<PathBuf>,

        /// Header logo file
        #[arg(long)]
        header_logo: Option<PathBuf>,

        /// Cover logo file
        #[arg(long)]
        cover_logo: Option<PathBuf>,

        /// Output directory to create
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "folio_cli=debug,folio_core=debug"
    } else {
        "folio_cli=info,folio_core=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Render {
            input,
            output,
            config,
            font,
            title,
            date,
            variant,
            lexicon,
            header_logo,
            cover_logo,
        } => commands::render(commands::RenderArgs {
            input,
            output,
            config,
            font,
            title,
            date,
            variant,
            lexicon,
            header_logo,
            cover_logo,
        }),

        Commands::Outline {
            input,
            json,
            variant,
            lexicon,
        } => commands::outline(&input, json, variant.as_deref(), lexicon),

        Commands::Check {
            input,
            font,
            header_logo,
            cover_logo,
            output_dir,
        } => commands::check(commands::CheckArgs {
            input,
            font,
            header_logo,
            cover_logo,
            output_dir,
        }),
    }
}
