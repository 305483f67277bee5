//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "chatmbti")]
#[command(about = "Chat-log MBTI analysis, score alignment and a scored self-test")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract the per-speaker transcript of a chat export
    Parse {
        /// Exported chat log (UTF-8 text)
        file: PathBuf,
        /// Print the transcript as JSON
        #[arg(long)]
        json: bool,
    },
    /// Infer MBTI types for the speakers of a chat export
    Analyze {
        /// Exported chat log (UTF-8 text)
        file: PathBuf,
        /// Speaker to analyze (repeatable, default: everyone retained)
        #[arg(short, long = "speaker")]
        speakers: Vec<String>,
        /// Print records and chart data as JSON
        #[arg(long)]
        json: bool,
    },
    /// Align four 0-100 scores with an MBTI code
    Align {
        /// Four-letter code, e.g. INTJ
        mbti: String,
        /// Energy, Information, Decisions and Lifestyle scores
        #[arg(allow_negative_numbers = true)]
        scores: Vec<f64>,
    },
    /// Take the self-test, or score a saved answer file
    Quiz {
        /// TOML file with `[[answers]]` entries (`id`, `answer`)
        #[arg(short, long)]
        answers: Option<PathBuf>,
    },
    /// Plan a meet-up: place keyword and meeting point for "A and B"
    Places {
        /// One location, or several joined by " and "
        location: String,
        /// Place category such as cafe, restaurant, bar or park
        #[arg(short = 't', long = "type")]
        place_type: Option<String>,
        /// MBTI code used to flavour the cafe keyword
        #[arg(short, long)]
        mbti: Option<String>,
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Start the HTTP API server
    Serve {
        /// Host to bind to (default: from config)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (default: from config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Enable CORS even if the config disables it
        #[arg(long)]
        cors: bool,
    },
    /// Show current configuration
    Config,
}
