use anyhow::Result;
use sprs::CsMat;

pub mod als;
pub mod initializer;

pub use als::AlternatingLeastSquares;

/// A latent-factor model the recommendation facade can be built over.
///
/// `fit` must complete successfully before `recommend` is called. The
/// interaction matrix passed to `recommend` is the same user-by-artist
/// matrix the model was fitted on; implementations use the caller's row of
/// it to mask artists the user already knows.
pub trait FactorizationModel {
    fn fit(&mut self, interactions: &CsMat<f32>) -> Result<()>;

    /// Return up to `count` (artist id, score) pairs for `user_id`, highest
    /// score first.
    fn recommend(
        &self,
        user_id: usize,
        interactions: &CsMat<f32>,
        count: usize,
    ) -> Result<(Vec<usize>, Vec<f32>)>;
}
