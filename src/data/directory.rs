use crate::error::RecError;
use crate::models::Artist;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Id-to-name lookup table for artists, built from the artists file.
///
/// `load` builds the replacement table completely before swapping it in, so
/// a failed reload never leaves the directory half-populated.
#[derive(Debug, Default)]
pub struct ArtistDirectory {
    artists: Option<HashMap<usize, String>>,
}

impl ArtistDirectory {
    pub fn new() -> Self {
        Self { artists: None }
    }

    /// Load a tab-separated artists file with `id` and `name` columns.
    /// Extra columns (url, picture, ...) are ignored.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open artists file {}", path.display()))?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_reader(file);

        let headers = reader.headers()?;
        let id_idx = headers
            .iter()
            .position(|h| h == "id")
            .ok_or(RecError::MissingColumn("id"))?;
        let name_idx = headers
            .iter()
            .position(|h| h == "name")
            .ok_or(RecError::MissingColumn("name"))?;

        let mut artists = HashMap::new();
        for (i, result) in reader.records().enumerate() {
            let record = result?;
            let artist = Artist {
                id: record.get(id_idx).unwrap().parse().map_err(
                    |e: std::num::ParseIntError| RecError::MalformedRecord {
                        record: i + 1,
                        column: "id",
                        message: e.to_string(),
                    },
                )?,
                name: record.get(name_idx).unwrap().to_string(),
            };
            artists.insert(artist.id, artist.name);
        }

        info!("loaded {} artists from {}", artists.len(), path.display());
        self.artists = Some(artists);
        Ok(())
    }

    /// Return the artist name for `id`.
    ///
    /// Fails if `load` has never succeeded, or if the id is absent. An
    /// absent id means the interaction matrix and the directory disagree
    /// about the id space, which callers must surface rather than skip.
    pub fn name_of(&self, id: usize) -> Result<&str> {
        let artists = self.artists.as_ref().ok_or(RecError::DirectoryNotLoaded)?;
        artists
            .get(&id)
            .map(String::as_str)
            .ok_or_else(|| RecError::UnknownArtist(id).into())
    }

    pub fn len(&self) -> usize {
        self.artists.as_ref().map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
