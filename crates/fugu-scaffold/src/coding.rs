// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! Encoding schemes for values carried on channels

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::types::ScaffoldError;

/// How a channel represents a value as a sequence of neurons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Coding {
    /// One neuron per element, spiking on the steps given by a raster
    Raster,
    /// Value proportional to firing rate
    Rate,
    /// Single spike (completion and control signals)
    Spike,
    /// Value encoded by spike latency
    Temporal,
    /// Positional binary representation
    Binary,
    /// Thermometer representation
    Unary,
    /// Value spread over a population
    Population,
    /// Injected current
    Current,
}

impl Coding {
    pub const ALL: [Coding; 8] = [
        Coding::Raster,
        Coding::Rate,
        Coding::Spike,
        Coding::Temporal,
        Coding::Binary,
        Coding::Unary,
        Coding::Population,
        Coding::Current,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Coding::Raster => "Raster",
            Coding::Rate => "Rate",
            Coding::Spike => "Spike",
            Coding::Temporal => "Temporal",
            Coding::Binary => "Binary",
            Coding::Unary => "Unary",
            Coding::Population => "Population",
            Coding::Current => "Current",
        }
    }
}

impl fmt::Display for Coding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Coding {
    type Err = ScaffoldError;

    /// Case-insensitive; unknown tags are rejected rather than passed through.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Coding::ALL
            .iter()
            .copied()
            .find(|coding| coding.as_str().eq_ignore_ascii_case(tag.trim()))
            .ok_or_else(|| ScaffoldError::InvalidSpec(format!("unknown coding '{}'", tag)))
    }
}

/// Ordered set of codings
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodingSet(BTreeSet<Coding>);

impl CodingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Coding::ALL.into_iter().collect()
    }

    pub fn contains(&self, coding: Coding) -> bool {
        self.0.contains(&coding)
    }

    pub fn insert(&mut self, coding: Coding) -> bool {
        self.0.insert(coding)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Coding> + '_ {
        self.0.iter().copied()
    }

    pub fn intersection(&self, other: &CodingSet) -> CodingSet {
        CodingSet(self.0.intersection(&other.0).copied().collect())
    }

    pub fn intersects(&self, other: &CodingSet) -> bool {
        self.0.iter().any(|coding| other.0.contains(coding))
    }

    pub fn union(&self, other: &CodingSet) -> CodingSet {
        CodingSet(self.0.union(&other.0).copied().collect())
    }
}

impl FromIterator<Coding> for CodingSet {
    fn from_iter<I: IntoIterator<Item = Coding>>(iter: I) -> Self {
        CodingSet(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Coding; N]> for CodingSet {
    fn from(codings: [Coding; N]) -> Self {
        codings.into_iter().collect()
    }
}

impl fmt::Display for CodingSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.0.iter().map(Coding::as_str).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("raster".parse::<Coding>().unwrap(), Coding::Raster);
        assert_eq!(" Spike ".parse::<Coding>().unwrap(), Coding::Spike);
    }

    #[test]
    fn test_unknown_tag_rejected() {
        assert!(matches!(
            "binary-L".parse::<Coding>(),
            Err(ScaffoldError::InvalidSpec(_))
        ));
    }

    #[test]
    fn test_set_operations() {
        let a = CodingSet::from([Coding::Raster, Coding::Binary]);
        let b = CodingSet::from([Coding::Binary, Coding::Rate]);
        let c = CodingSet::from([Coding::Spike]);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert_eq!(a.intersection(&b), CodingSet::from([Coding::Binary]));
        assert_eq!(a.union(&c).len(), 3);
        assert_eq!(a.to_string(), "{Raster, Binary}");
    }
}
