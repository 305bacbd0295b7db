//! Отбор записей по подстрокам химической формулы

use crate::error::{DataError, Result};

/// Формула подходит, если содержит каждую из подстрок фильтра (без учета регистра)
#[derive(Debug, Clone, Default)]
pub struct FormulaFilter {
    tokens: Vec<String>,
}

impl FormulaFilter {
    pub fn new(filter: Option<&str>) -> Self {
        let tokens = filter
            .map(|f| f.split_whitespace().map(str::to_lowercase).collect())
            .unwrap_or_default();
        Self { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn matches(&self, formula: &str) -> bool {
        if self.tokens.is_empty() {
            return true;
        }
        let formula = formula.to_lowercase();
        self.tokens.iter().all(|t| formula.contains(t.as_str()))
    }

    /// Индексы подходящих формул в исходном порядке
    pub fn select<S: AsRef<str>>(&self, formulas: &[S]) -> Vec<usize> {
        formulas
            .iter()
            .enumerate()
            .filter(|(_, f)| self.matches(f.as_ref()))
            .map(|(i, _)| i)
            .collect()
    }
}

pub fn matches(formula: &str, filter: Option<&str>) -> bool {
    FormulaFilter::new(filter).matches(formula)
}

/// Проверяет, что два набора совпадают по формулам построчно, и возвращает
/// общие индексы, прошедшие фильтр.
pub fn joint_indices<L: AsRef<str>, R: AsRef<str>>(
    left: &[L],
    right: &[R],
    filter: Option<&str>,
) -> Result<Vec<usize>> {
    if left.len() != right.len() {
        return Err(DataError::JoinLength {
            left: left.len(),
            right: right.len(),
        });
    }

    for (index, (l, r)) in left.iter().zip(right).enumerate() {
        let (l, r): (&str, &str) = (l.as_ref(), r.as_ref());
        if l != r {
            return Err(DataError::JoinMismatch {
                index,
                left: l.to_string(),
                right: r.to_string(),
            });
        }
    }

    let indices = FormulaFilter::new(filter).select(left);
    tracing::info!(
        "Filter {:?} kept {} of {} records",
        filter.unwrap_or_default(),
        indices.len(),
        left.len()
    );

    if indices.is_empty() {
        return Err(DataError::EmptyFilterResult {
            filter: filter.unwrap_or_default().to_string(),
        });
    }

    Ok(indices)
}
