use clap::Parser;
use shared::error::ApiResponse;
use stitch_desk::app::run;
use stitch_desk::cli::Cli;
use stitch_desk::{Config, init_logger_with_file, render_text};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env, then process variables)
    dotenv::dotenv().ok();

    // 2. Arguments override environment
    let cli = Cli::parse();
    let config = cli.apply(Config::from_env());

    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );
    tracing::debug!(order_number = %cli.order_number, "stitch-desk starting");

    // 3. Load and derive
    match run(&cli, &config).await {
        Ok(output) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&ApiResponse::success(&output))?);
            } else {
                print!("{}", render_text(&output.detail));
                if output.backfilled > 0 {
                    println!("\nLinked {} receipt(s) to order {}", output.backfilled, cli.order_number);
                }
            }
            Ok(())
        }
        Err(err) => {
            tracing::error!(code = %err.code, "{}", err);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&ApiResponse::<()>::error(&err))?);
                std::process::exit(1);
            }
            Err(err.into())
        }
    }
}
