use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub model: ModelConfig,
    pub recommend: RecommendConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub user_artists_file: String,
    pub artists_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub factors: usize,
    pub iterations: usize,
    pub regularization: f32,
    pub alpha: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendConfig {
    pub user_id: usize,
    pub count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig {
                user_artists_file: "data/user_artists.dat".to_string(),
                artists_file: "data/artists.dat".to_string(),
            },
            model: ModelConfig {
                factors: 50,
                iterations: 10,
                regularization: 0.01,
                alpha: 40.0,
            },
            recommend: RecommendConfig {
                user_id: 3,
                count: 10,
            },
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("TUNEREC"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
