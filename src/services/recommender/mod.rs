use crate::algorithms::FactorizationModel;
use crate::data::ArtistDirectory;
use crate::error::RecError;
use anyhow::Result;
use sprs::CsMat;
use tracing::info;

/// Lifecycle of the injected model. `recommend` refuses to run until a
/// `fit` call has succeeded, instead of letting the failure surface from
/// inside the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModelState {
    Untrained,
    Trained,
}

/// Composes the artist directory and a factorization model: trains the
/// model on the interaction matrix and translates its (artist id, score)
/// output into (name, score) pairs.
pub struct Recommender<M: FactorizationModel> {
    directory: ArtistDirectory,
    model: M,
    state: ModelState,
}

impl<M: FactorizationModel> Recommender<M> {
    pub fn new(directory: ArtistDirectory, model: M) -> Self {
        Self {
            directory,
            model,
            state: ModelState::Untrained,
        }
    }

    /// Train the injected model on the user-artist matrix. Calling `fit`
    /// again retrains from scratch.
    pub fn fit(&mut self, interactions: &CsMat<f32>) -> Result<()> {
        self.model.fit(interactions)?;
        self.state = ModelState::Trained;
        info!("model fitted on {}x{} matrix", interactions.rows(), interactions.cols());
        Ok(())
    }

    /// Top `count` recommendations for `user_id` as two parallel sequences
    /// of equal length: names and scores, highest score first.
    ///
    /// Any artist id the model returns that has no directory entry is an
    /// error; the matrix and the directory disagreeing about the id space
    /// is data inconsistency, not something to paper over. Duplicate ids
    /// from the model are passed through untouched.
    pub fn recommend(
        &self,
        user_id: usize,
        interactions: &CsMat<f32>,
        count: usize,
    ) -> Result<(Vec<String>, Vec<f32>)> {
        if count == 0 {
            return Err(RecError::InvalidCount.into());
        }
        if self.state != ModelState::Trained {
            return Err(RecError::ModelNotFitted.into());
        }

        let (artist_ids, scores) = self.model.recommend(user_id, interactions, count)?;

        let names = artist_ids
            .iter()
            .map(|&id| self.directory.name_of(id).map(str::to_owned))
            .collect::<Result<Vec<_>>>()?;

        Ok((names, scores))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprs::TriMat;
    use std::cell::Cell;
    use std::io::Write;
    use std::rc::Rc;

    /// Canned model that records the arguments it was handed.
    struct StubModel {
        ids: Vec<usize>,
        scores: Vec<f32>,
        last_user: Rc<Cell<Option<usize>>>,
    }

    impl FactorizationModel for StubModel {
        fn fit(&mut self, _interactions: &CsMat<f32>) -> Result<()> {
            Ok(())
        }

        fn recommend(
            &self,
            user_id: usize,
            _interactions: &CsMat<f32>,
            count: usize,
        ) -> Result<(Vec<usize>, Vec<f32>)> {
            self.last_user.set(Some(user_id));
            let n = count.min(self.ids.len());
            Ok((self.ids[..n].to_vec(), self.scores[..n].to_vec()))
        }
    }

    fn directory_of(rows: &[(usize, &str)]) -> ArtistDirectory {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id\tname").unwrap();
        for (id, name) in rows {
            writeln!(file, "{}\t{}", id, name).unwrap();
        }
        let mut directory = ArtistDirectory::new();
        directory.load(file.path()).unwrap();
        directory
    }

    fn empty_matrix() -> CsMat<f32> {
        TriMat::new((4, 4)).to_csr()
    }

    fn stub(ids: Vec<usize>, scores: Vec<f32>) -> (StubModel, Rc<Cell<Option<usize>>>) {
        let last_user = Rc::new(Cell::new(None));
        let model = StubModel {
            ids,
            scores,
            last_user: last_user.clone(),
        };
        (model, last_user)
    }

    #[test]
    fn test_recommend_before_fit_fails() {
        let (model, _) = stub(vec![1], vec![0.9]);
        let recommender = Recommender::new(directory_of(&[(1, "A")]), model);

        let err = recommender.recommend(0, &empty_matrix(), 5).unwrap_err();
        match err.downcast_ref::<RecError>() {
            Some(RecError::ModelNotFitted) => {}
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_zero_count_fails() {
        let (model, _) = stub(vec![1], vec![0.9]);
        let mut recommender = Recommender::new(directory_of(&[(1, "A")]), model);
        recommender.fit(&empty_matrix()).unwrap();

        let err = recommender.recommend(0, &empty_matrix(), 0).unwrap_err();
        match err.downcast_ref::<RecError>() {
            Some(RecError::InvalidCount) => {}
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_names_and_scores_stay_parallel() {
        let (model, _) = stub(vec![2, 1, 3], vec![0.9, 0.5, 0.1]);
        let directory = directory_of(&[(1, "A"), (2, "B"), (3, "C")]);
        let mut recommender = Recommender::new(directory, model);
        recommender.fit(&empty_matrix()).unwrap();

        let (names, scores) = recommender.recommend(0, &empty_matrix(), 3).unwrap();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert_eq!(scores, vec![0.9, 0.5, 0.1]);
    }

    #[test]
    fn test_model_receives_user_id_not_count() {
        let (model, last_user) = stub(vec![1], vec![0.9]);
        let mut recommender = Recommender::new(directory_of(&[(1, "A")]), model);
        recommender.fit(&empty_matrix()).unwrap();

        recommender.recommend(2, &empty_matrix(), 3).unwrap();
        assert_eq!(last_user.get(), Some(2));
    }

    #[test]
    fn test_duplicate_ids_pass_through() {
        let (model, _) = stub(vec![1, 1], vec![0.9, 0.9]);
        let mut recommender = Recommender::new(directory_of(&[(1, "A")]), model);
        recommender.fit(&empty_matrix()).unwrap();

        let (names, scores) = recommender.recommend(0, &empty_matrix(), 2).unwrap();
        assert_eq!(names, vec!["A", "A"]);
        assert_eq!(scores.len(), 2);
    }

    #[test]
    fn test_unknown_artist_id_surfaces() {
        let (model, _) = stub(vec![1, 42], vec![0.9, 0.5]);
        let mut recommender = Recommender::new(directory_of(&[(1, "A")]), model);
        recommender.fit(&empty_matrix()).unwrap();

        let err = recommender.recommend(0, &empty_matrix(), 2).unwrap_err();
        match err.downcast_ref::<RecError>() {
            Some(RecError::UnknownArtist(42)) => {}
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_count_caps_results() {
        let (model, _) = stub(vec![1, 2, 3], vec![0.9, 0.5, 0.1]);
        let directory = directory_of(&[(1, "A"), (2, "B"), (3, "C")]);
        let mut recommender = Recommender::new(directory, model);
        recommender.fit(&empty_matrix()).unwrap();

        let (names, scores) = recommender.recommend(0, &empty_matrix(), 2).unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(scores.len(), 2);
    }
}
