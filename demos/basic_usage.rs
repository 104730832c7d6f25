use sprs::TriMat;
use tunerec::algorithms::AlternatingLeastSquares;
use tunerec::data::ArtistDirectory;
use tunerec::services::Recommender;
use tunerec::init_tracing;
use std::io::Write;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // A tiny in-memory listening history: 3 users, 5 artists.
    let mut coo = TriMat::new((3, 5));
    coo.add_triplet(0, 0, 12.0);
    coo.add_triplet(0, 1, 5.0);
    coo.add_triplet(1, 1, 3.0);
    coo.add_triplet(1, 2, 9.0);
    coo.add_triplet(2, 3, 7.0);
    coo.add_triplet(2, 4, 2.0);
    let interactions = coo.to_csr();

    // The directory loads from a tab-separated file, so write one out.
    let mut artists_file = tempfile::NamedTempFile::new()?;
    writeln!(artists_file, "id\tname")?;
    for (id, name) in [
        (0, "Portishead"),
        (1, "Massive Attack"),
        (2, "Burial"),
        (3, "Boards of Canada"),
        (4, "Aphex Twin"),
    ] {
        writeln!(artists_file, "{}\t{}", id, name)?;
    }

    let mut directory = ArtistDirectory::new();
    directory.load(artists_file.path())?;

    let model = AlternatingLeastSquares::new(8, 10, 0.01, 40.0);
    let mut recommender = Recommender::new(directory, model);
    recommender.fit(&interactions)?;

    let (names, scores) = recommender.recommend(0, &interactions, 3)?;
    for (name, score) in names.iter().zip(&scores) {
        println!("{}: {}", name, score);
    }

    Ok(())
}
