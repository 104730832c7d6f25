use anyhow::Result;
use clap::Parser;
use tracing::info;
use tunerec::{init_tracing, Config};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Override the configured user id to recommend for
    #[arg(short, long)]
    user: Option<usize>,

    /// Override the configured number of recommendations
    #[arg(short = 'n', long)]
    count: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    std::env::set_var("RUST_LOG", &args.log_level);
    init_tracing();

    let mut config = if std::path::Path::new(&args.config).exists() {
        Config::from_file(&args.config)?
    } else {
        info!("Config file not found, using default configuration");
        Config::default()
    };

    if let Some(user) = args.user {
        config.recommend.user_id = user;
    }
    if let Some(count) = args.count {
        config.recommend.count = count;
    }

    info!(
        "recommending top {} artists for user {}",
        config.recommend.count, config.recommend.user_id
    );

    let recommendations = tunerec::run(&config)?;

    for recommendation in &recommendations {
        println!("{}: {}", recommendation.name, recommendation.score);
    }

    Ok(())
}
