use chatmbti::cli::*;
use chatmbti::config::AppConfig;
use chatmbti::Result;
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    if cli.verbose {
        chatmbti::logging::init_logging_with_level("debug")?;
    } else {
        chatmbti::logging::init_logging_with_config(Some(&config))?;
    }
    info!("Configuration loaded successfully");

    // Execute the requested command
    match cli.command {
        Commands::Parse { file, json } => handle_parse(&config, &file, json)?,
        Commands::Analyze {
            file,
            speakers,
            json,
        } => handle_analyze(&config, &file, &speakers, json).await?,
        Commands::Align { mbti, scores } => handle_align(&mbti, &scores)?,
        Commands::Quiz { answers } => handle_quiz(&config, answers.as_deref())?,
        Commands::Places {
            location,
            place_type,
            mbti,
            json,
        } => handle_places(&location, place_type.as_deref(), mbti.as_deref(), json)?,
        Commands::Serve { host, port, cors } => handle_serve(&config, host, port, cors).await?,
        Commands::Config => handle_config(&config)?,
    }

    Ok(())
}
