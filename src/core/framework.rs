//! core/framework.rs
//! Argument sets, attack relations, and the per-target attacker index.
//!
//! The `ArgumentSet` is the single authority on argument order: matrix
//! columns, weight vectors, and score vectors all follow it. The
//! `AttackerIndex` is built once per (arguments, attacks) pair and shared
//! read-only across a whole sampling run.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Ordered set of unique argument labels.
#[derive(Clone, Debug)]
pub struct ArgumentSet {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl ArgumentSet {
    /// Build from labels in the given order. Duplicates are rejected.
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if index.insert(label.clone(), i).is_some() {
                return Err(Error::DuplicateArgument(label.clone()));
            }
        }
        Ok(Self { labels, index })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, idx: usize) -> &str {
        &self.labels[idx]
    }

    /// Position of `label` in the set's order, if it is a member.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }
}

/// Directed attack edge: `attacker` challenges `target`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attack {
    pub attacker: String,
    pub target: String,
}

impl Attack {
    pub fn new(attacker: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            attacker: attacker.into(),
            target: target.into(),
        }
    }
}

impl<A: Into<String>, T: Into<String>> From<(A, T)> for Attack {
    fn from((attacker, target): (A, T)) -> Self {
        Self::new(attacker, target)
    }
}

/// Per-target attacker lists, aligned to the `ArgumentSet` order.
///
/// Building is total: attacks on a target outside the set are dropped, but an
/// attacker outside the set is kept when its target is a member. Such a
/// foreign attacker only fails later, at [`AttackerIndex::resolve`], since no
/// weight or score can exist for it.
#[derive(Clone, Debug)]
pub struct AttackerIndex {
    attackers: Vec<Vec<String>>,
}

impl AttackerIndex {
    pub fn build(set: &ArgumentSet, attacks: &[Attack]) -> Self {
        let mut attackers = vec![Vec::new(); set.len()];
        for attack in attacks {
            if let Some(t) = set.index_of(&attack.target) {
                attackers[t].push(attack.attacker.clone());
            }
        }
        Self { attackers }
    }

    /// Attackers of the argument at position `idx`, in insertion order.
    pub fn attackers_of(&self, idx: usize) -> &[String] {
        &self.attackers[idx]
    }

    /// Map attacker labels to argument indices for the solver.
    ///
    /// A recorded attacker that is not a member of `set` is a contract
    /// violation: its score would be undefined in the recurrence.
    pub fn resolve(&self, set: &ArgumentSet) -> Result<ResolvedIndex> {
        let mut resolved = Vec::with_capacity(self.attackers.len());
        for (t, list) in self.attackers.iter().enumerate() {
            let mut ids = Vec::with_capacity(list.len());
            for attacker in list {
                let idx = set.index_of(attacker).ok_or_else(|| Error::UnknownAttacker {
                    attacker: attacker.clone(),
                    target: set.label(t).to_string(),
                })?;
                ids.push(idx);
            }
            resolved.push(ids);
        }
        Ok(ResolvedIndex { attackers: resolved })
    }
}

/// Attacker lists as argument indices; what the solver iterates over.
#[derive(Clone, Debug)]
pub struct ResolvedIndex {
    attackers: Vec<Vec<usize>>,
}

impl ResolvedIndex {
    pub fn attackers_of(&self, idx: usize) -> &[usize] {
        &self.attackers[idx]
    }

    pub fn len(&self) -> usize {
        self.attackers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attackers.is_empty()
    }
}
