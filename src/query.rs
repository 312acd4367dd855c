use std::collections::BTreeMap;

use ndarray::{Array1, Zip};
use tracing::warn;

use crate::{
    entity::Entity,
    error::{Error, Result},
    record::Entities,
};

// Matching is exact and case sensitive, a record lacking the entity never matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    Exact(String),
    // Empty list matches nothing
    AnyOf(Vec<String>),
    Range { start: Option<u64>, stop: Option<u64> },
}

impl Criterion {
    pub fn parse_range(s: &str) -> Result<Criterion> {
        let bound = |b: &str| -> Result<Option<u64>> {
            if b == "*" {
                return Ok(None);
            }
            if b.is_empty() || !b.bytes().all(|c| c.is_ascii_digit()) {
                return Err(Error::InvalidRange(s.to_string()));
            }
            b.parse::<u64>()
                .map(Some)
                .map_err(|_| Error::InvalidRange(s.to_string()))
        };

        let (start, stop) = s
            .split_once('-')
            .ok_or_else(|| Error::InvalidRange(s.to_string()))?;

        Ok(Criterion::Range {
            start: bound(start)?,
            stop: bound(stop)?,
        })
    }

    pub fn matches(&self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return false;
        };

        match self {
            Criterion::Exact(expected) => value == expected,
            Criterion::AnyOf(values) => values.iter().any(|v| v == value),
            Criterion::Range { start, stop } => {
                if value.is_empty() || !value.bytes().all(|c| c.is_ascii_digit()) {
                    return false;
                }
                let Ok(n) = value.parse::<u64>() else {
                    return false;
                };
                start.map_or(true, |s| n >= s) && stop.map_or(true, |s| n <= s)
            }
        }
    }
}

impl From<&str> for Criterion {
    fn from(value: &str) -> Self {
        Criterion::Exact(value.to_string())
    }
}

impl From<String> for Criterion {
    fn from(value: String) -> Self {
        Criterion::Exact(value)
    }
}

impl From<Vec<String>> for Criterion {
    fn from(values: Vec<String>) -> Self {
        Criterion::AnyOf(values)
    }
}

impl From<Vec<&str>> for Criterion {
    fn from(values: Vec<&str>) -> Self {
        Criterion::AnyOf(values.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Criterion {
    fn from(values: &[&str]) -> Self {
        Criterion::AnyOf(values.iter().map(|v| v.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Criterion {
    fn from(values: [&str; N]) -> Self {
        Criterion::AnyOf(values.iter().map(|v| v.to_string()).collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    criteria: BTreeMap<Entity, Criterion>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, entity: Entity, criterion: impl Into<Criterion>) -> Self {
        self.criteria.insert(entity, criterion.into());
        self
    }

    pub fn try_with(self, key: &str, criterion: impl Into<Criterion>) -> Result<Self> {
        Ok(self.with(key.parse::<Entity>()?, criterion))
    }

    pub fn from_pairs<I, K, C>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, C)>,
        K: AsRef<str>,
        C: Into<Criterion>,
    {
        pairs
            .into_iter()
            .try_fold(Criteria::new(), |criteria, (key, criterion)| {
                criteria.try_with(key.as_ref(), criterion)
            })
    }

    pub fn get(&self, entity: Entity) -> Option<&Criterion> {
        self.criteria.get(&entity)
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &Criterion)> {
        self.criteria.iter().map(|(e, c)| (*e, c))
    }

    pub fn mask<R: AsRef<Entities>>(&self, rows: &[R]) -> Array1<bool> {
        let mut mask = Array1::from_elem(rows.len(), true);

        for (entity, criterion) in &self.criteria {
            let column = rows
                .iter()
                .map(|row| criterion.matches(row.as_ref().get(*entity)))
                .collect::<Array1<bool>>();
            if !rows.is_empty() && !column.iter().any(|m| *m) {
                warn!(%entity, ?criterion, "no record matches criterion");
            }

            Zip::from(&mut mask)
                .and(&column)
                .for_each(|m, &c| *m = *m && c);
        }

        mask
    }
}
