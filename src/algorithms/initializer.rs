use nalgebra::DMatrix;
use rand::Rng;

pub fn xavier_uniform(size: usize) -> Vec<f32> {
    let limit = (6.0 / size as f32).sqrt();
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen_range(-limit..limit)).collect()
}

/// Build a `rows x factors` matrix of Xavier-uniform noise for warm-starting
/// the alternating least-squares sweeps.
pub fn factor_matrix(rows: usize, factors: usize) -> DMatrix<f32> {
    let limit = (6.0 / factors as f32).sqrt();
    let mut rng = rand::thread_rng();
    DMatrix::from_fn(rows, factors, |_, _| rng.gen_range(-limit..limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xavier_uniform_bounds() {
        let weights = xavier_uniform(100);
        assert_eq!(weights.len(), 100);

        let limit = (6.0 / 100.0_f32).sqrt();
        for &weight in &weights {
            assert!(weight >= -limit && weight <= limit);
        }
    }

    #[test]
    fn test_factor_matrix_shape() {
        let factors = factor_matrix(7, 4);
        assert_eq!(factors.nrows(), 7);
        assert_eq!(factors.ncols(), 4);
    }
}
