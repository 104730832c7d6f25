use serde::{Deserialize, Serialize};

/// A single (user, artist, weight) row from the interactions file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub user_id: usize,
    pub artist_id: usize,
    pub weight: f32,
}

/// A single (id, name) row from the artists file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: usize,
    pub name: String,
}

/// One ranked recommendation as returned by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub score: f32,
}

impl Interaction {
    pub fn new(user_id: usize, artist_id: usize, weight: f32) -> Self {
        Self {
            user_id,
            artist_id,
            weight,
        }
    }
}

impl Recommendation {
    pub fn new(name: String, score: f32) -> Self {
        Self { name, score }
    }
}
