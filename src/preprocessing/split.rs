//! Случайное разбиение на обучающую и тестовую выборки

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{DataError, Result};

/// Индексы обучающей и тестовой выборок
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

pub struct Splitter {
    rng: StdRng,
}

impl Splitter {
    /// Без seed используется энтропия ОС
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// floor(test_proportion * n) индексов без повторов уходят в тест, остальные - в обучение
    pub fn split(&mut self, n: usize, test_proportion: f64) -> Result<Split> {
        if !(0.0..=1.0).contains(&test_proportion) {
            return Err(DataError::InvalidConfig(format!(
                "test proportion must be within [0, 1], got {}",
                test_proportion
            )));
        }

        let n_test = (test_proportion * n as f64).floor() as usize;
        let test = draw(&mut self.rng, n, n_test);

        let mut is_test = vec![false; n];
        for &i in &test {
            is_test[i] = true;
        }
        let train = (0..n).filter(|i| !is_test[*i]).collect::<Vec<_>>();

        tracing::info!("Split {} rows: {} train, {} test", n, train.len(), test.len());
        Ok(Split { train, test })
    }
}

fn draw<R: Rng>(rng: &mut R, n: usize, amount: usize) -> Vec<usize> {
    rand::seq::index::sample(rng, n, amount.min(n)).into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_split_sizes_and_coverage() {
        let split = Splitter::new(Some(42)).split(100, 0.2).unwrap();

        assert_eq!(split.test.len(), 20);
        assert_eq!(split.train.len(), 80);

        let test: HashSet<_> = split.test.iter().copied().collect();
        let train: HashSet<_> = split.train.iter().copied().collect();
        assert_eq!(test.len(), 20);
        assert!(test.is_disjoint(&train));

        let all: HashSet<_> = test.union(&train).copied().collect();
        assert_eq!(all, (0..100).collect::<HashSet<_>>());
    }

    #[test]
    fn test_floor_of_proportion() {
        let split = Splitter::new(Some(1)).split(10, 0.25).unwrap();
        assert_eq!(split.test.len(), 2);
        assert_eq!(split.train.len(), 8);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = Splitter::new(Some(7)).split(50, 0.3).unwrap();
        let b = Splitter::new(Some(7)).split(50, 0.3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_edge_proportions() {
        let mut splitter = Splitter::new(None);
        let none = splitter.split(5, 0.0).unwrap();
        assert!(none.test.is_empty());
        assert_eq!(none.train, vec![0, 1, 2, 3, 4]);

        let all = splitter.split(5, 1.0).unwrap();
        assert_eq!(all.test.len(), 5);
        assert!(all.train.is_empty());

        assert_eq!(splitter.split(0, 0.5).unwrap().test.len(), 0);
    }

    #[test]
    fn test_invalid_proportion() {
        let mut splitter = Splitter::new(Some(0));
        assert!(splitter.split(10, 1.5).is_err());
        assert!(splitter.split(10, -0.1).is_err());
        assert!(splitter.split(10, f64::NAN).is_err());
    }
}
