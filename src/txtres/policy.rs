//! Translation selection policy.

use std::str::FromStr;

use super::error::TxtResError;

/// Chooses which candidate translation columns become a row's encoded value.
///
/// Parsed from a `+`-separated selector such as `"1"` or `"1+2"`: resolution
/// starts from the row's original text, then overrides it with each named
/// `translationN` column in order when that candidate is non-empty. Later
/// non-empty candidates win; empty candidates are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPolicy {
    columns: Vec<usize>,
}

impl SelectionPolicy {
    /// Resolve the output text for a row. `candidates[0]` is the
    /// `translation1` column.
    pub fn choose<'a>(&self, original: &'a str, candidates: &'a [String]) -> &'a str {
        let mut chosen = original;
        for &column in &self.columns {
            if let Some(candidate) = candidates.get(column - 1) {
                if !candidate.is_empty() {
                    chosen = candidate;
                }
            }
        }
        chosen
    }

    /// The 1-based candidate column indices, in application order.
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }
}

impl FromStr for SelectionPolicy {
    type Err = TxtResError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let columns = s
            .split('+')
            .map(|part| match part.trim().parse::<usize>() {
                Ok(n) if n > 0 => Ok(n),
                _ => Err(TxtResError::InvalidPolicy(s.to_string())),
            })
            .collect::<Result<Vec<usize>, _>>()?;
        Ok(SelectionPolicy { columns })
    }
}

impl Default for SelectionPolicy {
    /// The `"1"` policy: original text unless `translation1` is non-empty.
    fn default() -> Self {
        SelectionPolicy { columns: vec![1] }
    }
}
