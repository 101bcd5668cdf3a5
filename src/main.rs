use draft_scout::command;
use draft_scout::config::Config;
use draft_scout::types::RecommendationSource;
use draft_scout::AppContext;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let Some(link) = std::env::args().nth(1) else {
        eprintln!("Usage: draft-scout <op.gg multi link>");
        return ExitCode::FAILURE;
    };

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let ctx = match AppContext::new(config).await {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Startup failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    match command::analyze_multi_link(&ctx, &link).await {
        Ok(report) => {
            for field in &report.fields {
                println!("{}: {}", field.name, field.value);
            }
            let tag = match report.source {
                RecommendationSource::Ai => "AI",
                RecommendationSource::Fallback => "fallback",
            };
            println!("\nRecommended bans ({tag}):\n{}", report.recommendation);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}
