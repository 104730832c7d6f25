use crate::error::RecError;
use crate::models::Interaction;
use anyhow::{Context, Result};
use sprs::{CsMat, TriMat};
use std::fs::File;
use std::path::Path;
use tracing::info;

pub mod directory;

pub use directory::ArtistDirectory;

/// Load a tab-separated user-artist interactions file into a CSR matrix.
///
/// The file must carry a header row with `userID`, `artistID` and `weight`
/// columns; extra columns are ignored. Ids are used directly as matrix
/// coordinates, so the result has shape
/// `(max userID + 1, max artistID + 1)`. Duplicate (user, artist) pairs are
/// summed during the triplet-to-CSR conversion.
pub fn load_interactions<P: AsRef<Path>>(path: P) -> Result<CsMat<f32>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("failed to open interactions file {}", path.display()))?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_reader(file);

    let headers = reader.headers()?;
    let user_idx = column_index(headers, "userID")?;
    let artist_idx = column_index(headers, "artistID")?;
    let weight_idx = column_index(headers, "weight")?;

    let mut interactions = Vec::new();
    let mut max_user = 0usize;
    let mut max_artist = 0usize;

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let interaction = Interaction::new(
            parse_field(&record, user_idx, i, "userID")?,
            parse_field(&record, artist_idx, i, "artistID")?,
            parse_field(&record, weight_idx, i, "weight")?,
        );
        max_user = max_user.max(interaction.user_id);
        max_artist = max_artist.max(interaction.artist_id);
        interactions.push(interaction);
    }

    if interactions.is_empty() {
        return Ok(TriMat::new((0, 0)).to_csr());
    }

    let mut coo = TriMat::new((max_user + 1, max_artist + 1));
    for interaction in &interactions {
        coo.add_triplet(interaction.user_id, interaction.artist_id, interaction.weight);
    }

    let matrix = coo.to_csr();
    info!(
        "loaded {} interactions into a {}x{} matrix from {}",
        interactions.len(),
        matrix.rows(),
        matrix.cols(),
        path.display()
    );

    Ok(matrix)
}

fn column_index(headers: &csv::StringRecord, name: &'static str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| RecError::MissingColumn(name).into())
}

fn parse_field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    index: usize,
    record_number: usize,
    column: &'static str,
) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    // safe to unwrap the field lookup: csv rejects records whose field count
    // differs from the header
    record
        .get(index)
        .unwrap()
        .parse::<T>()
        .map_err(|e| {
            RecError::MalformedRecord {
                record: record_number + 1,
                column,
                message: e.to_string(),
            }
            .into()
        })
}
