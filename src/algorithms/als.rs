use super::{initializer, FactorizationModel};
use crate::error::RecError;
use crate::utils::top_k_indices;
use anyhow::{anyhow, ensure, Result};
use nalgebra::{Cholesky, DMatrix, DVector};
use sprs::CsMat;
use tracing::{debug, info};

/// Implicit-feedback alternating least squares (Hu, Koren, Volinsky).
///
/// Interaction weights are treated as confidence levels `c = 1 + alpha * w`
/// over a binary preference signal. Each sweep solves the per-user and
/// per-item regularized normal equations in closed form with a Cholesky
/// factorization.
#[derive(Debug, Clone)]
pub struct AlternatingLeastSquares {
    factors: usize,
    iterations: usize,
    regularization: f32,
    alpha: f32,
    user_factors: Option<DMatrix<f32>>,
    item_factors: Option<DMatrix<f32>>,
}

impl AlternatingLeastSquares {
    pub fn new(factors: usize, iterations: usize, regularization: f32, alpha: f32) -> Self {
        Self {
            factors,
            iterations,
            regularization,
            alpha,
            user_factors: None,
            item_factors: None,
        }
    }

    /// Solve `(F^T C F + reg I) x = F^T C p` for one row of the interaction
    /// matrix, given the Gram matrix `F^T F` of the fixed side.
    fn solve_row(
        &self,
        fixed: &DMatrix<f32>,
        gram: &DMatrix<f32>,
        observed: Option<sprs::CsVecView<f32>>,
    ) -> Result<DVector<f32>> {
        let mut a = gram.clone();
        for k in 0..self.factors {
            a[(k, k)] += self.regularization;
        }
        let mut b = DVector::zeros(self.factors);

        if let Some(observed) = observed {
            for (i, &weight) in observed.iter() {
                let confidence = 1.0 + self.alpha * weight;
                let fi = fixed.row(i);
                a += fi.transpose() * fi * (confidence - 1.0);
                b += fi.transpose() * confidence;
            }
        }

        let cholesky = Cholesky::new(a)
            .ok_or_else(|| anyhow!("ALS normal equations are not positive definite"))?;
        Ok(cholesky.solve(&b))
    }
}

impl FactorizationModel for AlternatingLeastSquares {
    fn fit(&mut self, interactions: &CsMat<f32>) -> Result<()> {
        ensure!(
            interactions.is_csr(),
            "interaction matrix must be in CSR form"
        );

        let (num_users, num_items) = interactions.shape();
        info!(
            "fitting ALS: {} users, {} items, {} factors, {} iterations",
            num_users, num_items, self.factors, self.iterations
        );

        let mut user_factors = initializer::factor_matrix(num_users, self.factors);
        let mut item_factors = initializer::factor_matrix(num_items, self.factors);
        let by_item = interactions.to_csc();

        for iteration in 0..self.iterations {
            let item_gram = item_factors.transpose() * &item_factors;
            for user in 0..num_users {
                let solution =
                    self.solve_row(&item_factors, &item_gram, interactions.outer_view(user))?;
                user_factors.row_mut(user).copy_from(&solution.transpose());
            }

            let user_gram = user_factors.transpose() * &user_factors;
            for item in 0..num_items {
                let solution =
                    self.solve_row(&user_factors, &user_gram, by_item.outer_view(item))?;
                item_factors.row_mut(item).copy_from(&solution.transpose());
            }

            debug!("ALS iteration {}/{} complete", iteration + 1, self.iterations);
        }

        self.user_factors = Some(user_factors);
        self.item_factors = Some(item_factors);
        Ok(())
    }

    fn recommend(
        &self,
        user_id: usize,
        interactions: &CsMat<f32>,
        count: usize,
    ) -> Result<(Vec<usize>, Vec<f32>)> {
        let user_factors = self.user_factors.as_ref().ok_or(RecError::ModelNotFitted)?;
        let item_factors = self.item_factors.as_ref().ok_or(RecError::ModelNotFitted)?;

        if user_id >= user_factors.nrows() {
            return Err(RecError::UserOutOfRange {
                user_id,
                num_users: user_factors.nrows(),
            }
            .into());
        }
        ensure!(
            interactions.rows() == user_factors.nrows(),
            "interaction matrix has {} rows but the model was fitted on {} users",
            interactions.rows(),
            user_factors.nrows()
        );

        let user_vector = user_factors.row(user_id).transpose();
        let mut scores: Vec<f32> = (item_factors * &user_vector).iter().copied().collect();

        // Mask artists this user has already listened to. The row must be
        // the requester's own, hence indexing by user_id.
        if let Some(listened) = interactions.outer_view(user_id) {
            for (item, _) in listened.iter() {
                scores[item] = f32::NEG_INFINITY;
            }
        }

        let mut ids = Vec::new();
        let mut top_scores = Vec::new();
        for index in top_k_indices(&scores, count) {
            if scores[index] == f32::NEG_INFINITY {
                break;
            }
            ids.push(index);
            top_scores.push(scores[index]);
        }

        Ok((ids, top_scores))
    }
}
