use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    fmt::Display,
    hash::Hash,
    ops::{Add, Mul, Sub},
    path::{Path, PathBuf},
};

use ndarray::Array1;
use tracing::{debug, warn};

use crate::{
    entity::Entity,
    query::Criteria,
    record::{EntityRecord, ErrorRecord},
};

// `select` and `remove` filter the parsed records only, the error table is passed through
// Equality compares both tables as sets of rows
#[derive(Debug, Clone, Default)]
pub struct Architecture {
    root: Option<PathBuf>,
    records: Vec<EntityRecord>,
    errors: Vec<ErrorRecord>,
}

impl Architecture {
    pub(crate) fn from_tables(
        root: Option<PathBuf>,
        records: Vec<EntityRecord>,
        errors: Vec<ErrorRecord>,
    ) -> Self {
        Self {
            root,
            records,
            errors,
        }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn records(&self) -> &[EntityRecord] {
        &self.records
    }

    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&EntityRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntityRecord> {
        self.records.iter()
    }

    pub fn values(&self, entity: Entity) -> Vec<&str> {
        self.records
            .iter()
            .filter_map(|r| r.get(entity))
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .collect()
    }

    pub fn subjects(&self) -> Vec<&str> {
        self.values(Entity::Subject)
    }

    pub fn sessions(&self) -> Vec<&str> {
        self.values(Entity::Session)
    }

    pub fn tasks(&self) -> Vec<&str> {
        self.values(Entity::Task)
    }

    pub fn acquisitions(&self) -> Vec<&str> {
        self.values(Entity::Acquisition)
    }

    pub fn runs(&self) -> Vec<&str> {
        self.values(Entity::Run)
    }

    pub fn datatypes(&self) -> Vec<&str> {
        self.values(Entity::Datatype)
    }

    pub fn suffixes(&self) -> Vec<&str> {
        self.values(Entity::Suffix)
    }

    pub fn extensions(&self) -> Vec<&str> {
        self.values(Entity::Extension)
    }

    pub fn descriptions(&self) -> Vec<&str> {
        self.values(Entity::Description)
    }

    pub fn error_summary(&self) -> BTreeMap<&'static str, usize> {
        let mut summary = BTreeMap::new();
        for error in &self.errors {
            *summary.entry(error.reason().kind()).or_insert(0) += 1;
        }
        summary
    }

    pub fn select(&self, criteria: &Criteria) -> Architecture {
        if criteria.is_empty() {
            warn!("select without criteria: every record is kept");
        }
        let mask = criteria.mask(&self.records);
        self.filtered(&mask, true)
    }

    pub fn remove(&self, criteria: &Criteria) -> Architecture {
        if criteria.is_empty() {
            warn!("remove without criteria: every record is dropped");
        }
        let mask = criteria.mask(&self.records);
        self.filtered(&mask, false)
    }

    pub fn matching_errors(&self, criteria: &Criteria) -> Vec<&ErrorRecord> {
        let mask = criteria.mask(&self.errors);
        self.errors
            .iter()
            .zip(mask.iter())
            .filter_map(|(error, m)| m.then_some(error))
            .collect()
    }

    fn filtered(&self, mask: &Array1<bool>, keep: bool) -> Architecture {
        let records = self
            .records
            .iter()
            .zip(mask.iter())
            .filter(|(_, m)| **m == keep)
            .map(|(record, _)| record.clone())
            .collect::<Vec<_>>();
        debug!(before = self.records.len(), after = records.len(), "filtered records");

        Architecture {
            root: self.root.clone(),
            records,
            errors: self.errors.clone(),
        }
    }

    pub fn merge(&self, other: &Architecture) -> Architecture {
        Architecture {
            root: common_root(self, other),
            records: union(&self.records, &other.records),
            errors: union(&self.errors, &other.errors),
        }
    }

    pub fn difference(&self, other: &Architecture) -> Architecture {
        Architecture {
            root: self.root.clone(),
            records: retain(&self.records, &other.records, false),
            errors: retain(&self.errors, &other.errors, false),
        }
    }

    pub fn intersect(&self, other: &Architecture) -> Architecture {
        Architecture {
            root: common_root(self, other),
            records: retain(&self.records, &other.records, true),
            errors: retain(&self.errors, &other.errors, true),
        }
    }
}

fn common_root(left: &Architecture, right: &Architecture) -> Option<PathBuf> {
    match (&left.root, &right.root) {
        (Some(l), Some(r)) if l == r => Some(l.clone()),
        _ => None,
    }
}

fn union<T: Clone + Eq + Hash>(left: &[T], right: &[T]) -> Vec<T> {
    let mut seen = HashSet::new();
    left.iter()
        .chain(right)
        .filter(|row| seen.insert(*row))
        .cloned()
        .collect()
}

// Rows of `left` whose presence in `right` equals `present`, deduplicated
fn retain<T: Clone + Eq + Hash>(left: &[T], right: &[T], present: bool) -> Vec<T> {
    let right = right.iter().collect::<HashSet<&T>>();
    let mut seen = HashSet::new();
    left.iter()
        .filter(|row| right.contains(*row) == present && seen.insert(*row))
        .cloned()
        .collect()
}

fn same_rows<T: Eq + Hash>(left: &[T], right: &[T]) -> bool {
    left.iter().collect::<HashSet<_>>() == right.iter().collect::<HashSet<_>>()
}

impl PartialEq for Architecture {
    fn eq(&self, other: &Self) -> bool {
        same_rows(&self.records, &other.records) && same_rows(&self.errors, &other.errors)
    }
}

impl Eq for Architecture {}

impl Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Architecture: {} files, {} errors, subjects: {}, sessions: {}, datatypes: {}, tasks: {}",
            self.records.len(),
            self.errors.len(),
            self.subjects().len(),
            self.sessions().len(),
            self.datatypes().len(),
            self.tasks().len()
        )
    }
}

impl<'a> IntoIterator for &'a Architecture {
    type Item = &'a EntityRecord;
    type IntoIter = std::slice::Iter<'a, EntityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Add<&Architecture> for &Architecture {
    type Output = Architecture;

    fn add(self, rhs: &Architecture) -> Architecture {
        self.merge(rhs)
    }
}

impl Add for Architecture {
    type Output = Architecture;

    fn add(self, rhs: Architecture) -> Architecture {
        self.merge(&rhs)
    }
}

impl Sub<&Architecture> for &Architecture {
    type Output = Architecture;

    fn sub(self, rhs: &Architecture) -> Architecture {
        self.difference(rhs)
    }
}

impl Sub for Architecture {
    type Output = Architecture;

    fn sub(self, rhs: Architecture) -> Architecture {
        self.difference(&rhs)
    }
}

impl Mul<&Architecture> for &Architecture {
    type Output = Architecture;

    fn mul(self, rhs: &Architecture) -> Architecture {
        self.intersect(rhs)
    }
}

impl Mul for Architecture {
    type Output = Architecture;

    fn mul(self, rhs: Architecture) -> Architecture {
        self.intersect(&rhs)
    }
}
