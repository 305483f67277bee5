use chatmbti::cli::mask_key;
use chatmbti::personality::QuizBattery;
use chatmbti::AppConfig;
use chatmbti::Result;

fn main() -> Result<()> {
    println!("🔍 Checking configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("✅ Configuration loaded successfully!");
            println!("📋 Configuration details:");
            println!("  LLM endpoint: {}", config.llm_endpoint());
            println!("  LLM key: {}", mask_key(config.llm_key()));
            println!("  LLM model: {}", config.llm_model());
            println!("  LLM timeout: {}s", config.llm.timeout_secs);
            println!(
                "  Max chars per speaker: {}",
                config.analysis.max_chars_per_speaker
            );
            println!("  Min messages per speaker: {}", config.filters.min_messages);
            println!("  Quiz scale bound: {}", config.scale_bound());
            println!(
                "  Server: {}:{} (CORS {})",
                config.server.host, config.server.port, config.server.cors
            );

            let battery = QuizBattery::load(&config.quiz)?;
            println!(
                "  Quiz battery: {} ({} questions)",
                battery.version(),
                battery.len()
            );
            let overflowing = battery.dimensions_exceeding(config.scale_bound());
            if !overflowing.is_empty() {
                println!(
                    "  ⚠️  Battery totals exceed the scale bound on {:?}",
                    overflowing
                );
            }

            println!("\n🎉 Configuration check completed successfully!");
        }
        Err(e) => {
            println!("❌ Configuration error: {}", e);
            println!("\n💡 To fix this:");
            println!("  1. Copy config.example.toml to config.toml");
            println!("  2. Edit config.toml with your LLM endpoint and model");
            println!("  3. Run this check again");
            return Err(e);
        }
    }

    Ok(())
}
