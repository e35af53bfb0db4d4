//! core/weights.rs
//! Base weight assignments, stored index-aligned to the argument order.

use std::collections::HashMap;

use crate::core::framework::ArgumentSet;
use crate::error::{Error, Result};

/// A total weight assignment over an argument set.
///
/// Values sit in a `Vec<f64>` aligned to the set's order, so totality over
/// the set is guaranteed by construction and score/weight lookups are plain
/// indexing. Weights must be finite and non-negative.
#[derive(Clone, Debug, PartialEq)]
pub struct Weights {
    values: Vec<f64>,
}

impl Weights {
    /// Build from a label-keyed map. Every argument of `set` must be
    /// covered; entries for labels outside the set are ignored.
    pub fn from_map(set: &ArgumentSet, map: &HashMap<String, f64>) -> Result<Self> {
        let mut values = Vec::with_capacity(set.len());
        for label in set.labels() {
            let &value = map
                .get(label)
                .ok_or_else(|| Error::MissingWeight(label.clone()))?;
            check_weight(label, value)?;
            values.push(value);
        }
        Ok(Self { values })
    }

    /// Build directly from an index-aligned vector (one value per argument).
    pub fn from_vec(set: &ArgumentSet, values: Vec<f64>) -> Result<Self> {
        if values.len() != set.len() {
            return Err(Error::InvalidParams(format!(
                "weight vector has {} entries for {} arguments",
                values.len(),
                set.len()
            )));
        }
        for (i, &value) in values.iter().enumerate() {
            check_weight(set.label(i), value)?;
        }
        Ok(Self { values })
    }

    /// Same weight `c` for every argument.
    pub fn uniform(set: &ArgumentSet, c: f64) -> Result<Self> {
        Self::from_vec(set, vec![c; set.len()])
    }

    pub fn get(&self, idx: usize) -> f64 {
        self.values[idx]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.values.clone()
    }
}

fn check_weight(label: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidWeight {
            argument: label.to_string(),
            value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> ArgumentSet {
        ArgumentSet::new(["A", "B"]).unwrap()
    }

    #[test]
    fn from_map_follows_set_order() {
        let map = HashMap::from([("B".to_string(), 0.25), ("A".to_string(), 1.0)]);
        let w = Weights::from_map(&set(), &map).unwrap();
        assert_eq!(w.as_slice(), [1.0, 0.25]);
    }

    #[test]
    fn missing_entry_is_an_error() {
        let map = HashMap::from([("A".to_string(), 1.0)]);
        let err = Weights::from_map(&set(), &map).unwrap_err();
        assert!(matches!(err, Error::MissingWeight(l) if l == "B"));
    }

    #[test]
    fn extra_entries_are_ignored() {
        let map = HashMap::from([
            ("A".to_string(), 0.5),
            ("B".to_string(), 0.5),
            ("Z".to_string(), 9.0),
        ]);
        let w = Weights::from_map(&set(), &map).unwrap();
        assert_eq!(w.as_slice(), [0.5, 0.5]);
    }

    #[test]
    fn negative_and_non_finite_weights_are_rejected() {
        assert!(Weights::from_vec(&set(), vec![0.5, -0.1]).is_err());
        assert!(Weights::from_vec(&set(), vec![f64::NAN, 0.1]).is_err());
        assert!(Weights::from_vec(&set(), vec![f64::INFINITY, 0.1]).is_err());
        assert!(Weights::from_vec(&set(), vec![0.0, 0.0]).is_ok());
    }
}
