use std::error::Error;
use std::path::PathBuf;

use attendance_calculator::api::start_api;
use attendance_calculator::config::AppConfig;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "attendance_calculator",
    version,
    about = "Web calculator for how many classes to attend or skip to hit a target attendance"
)]
struct Cli {
    /// TOML config file
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Address to bind (default 127.0.0.1)
    #[arg(long)]
    host: Option<String>,
    /// Port to listen on (default 8080)
    #[arg(long, short)]
    port: Option<u16>,
    /// Number of worker threads
    #[arg(long)]
    workers: Option<usize>,
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?.with_overrides(cli.host, cli.port, cli.workers);
    config.validate()?;

    log::info!(
        "Starting College Attendance Calculator on http://{}",
        config.bind_address()
    );
    log::info!(
        "Form defaults: {} attended / {} conducted, target {:.2}%",
        config.form.attended,
        config.form.total,
        config.form.target
    );

    start_api(config).await?;

    Ok(())
}
