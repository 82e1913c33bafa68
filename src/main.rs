use clap::Parser;
use cli::Cli;
use env_logger::Env;
use log::{error, info};
use std::error::Error;
use std::process::ExitCode;
use windrose::{ensure_font, PlotOutput, WindRose, WindRoseError};

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    match run(args).await {
        Ok(outputs) => {
            for output in outputs {
                println!("{}", output.path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                error!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Result<Vec<PlotOutput>, WindRoseError> {
    ensure_font(args.font.as_deref())?;

    let query = args.query(chrono::Local::now().date_naive())?;
    let settings = args.plot_settings();
    let options = args.run_options()?;
    if let Some(window) = &options.window {
        info!("Restricting samples to {}", window);
    }

    WindRose::with_base_url(&args.base_url)
        .run(&query, &settings, &options)
        .await
}
