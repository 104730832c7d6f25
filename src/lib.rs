pub mod algorithms;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::RecError;
pub use models::*;

use algorithms::AlternatingLeastSquares;
use anyhow::Result;
use services::Recommender;
use tracing::info;

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Run the full batch pipeline: load the interaction matrix and the artist
/// directory, fit an ALS model, and return the top recommendations for the
/// configured user.
pub fn run(config: &Config) -> Result<Vec<Recommendation>> {
    let interactions = data::load_interactions(&config.data.user_artists_file)?;

    let mut directory = data::ArtistDirectory::new();
    directory.load(&config.data.artists_file)?;

    let model = AlternatingLeastSquares::new(
        config.model.factors,
        config.model.iterations,
        config.model.regularization,
        config.model.alpha,
    );

    let mut recommender = Recommender::new(directory, model);
    recommender.fit(&interactions)?;

    let (names, scores) =
        recommender.recommend(config.recommend.user_id, &interactions, config.recommend.count)?;

    info!(
        "generated {} recommendations for user {}",
        names.len(),
        config.recommend.user_id
    );

    Ok(names
        .into_iter()
        .zip(scores)
        .map(|(name, score)| Recommendation::new(name, score))
        .collect())
}
