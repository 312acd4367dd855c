use std::{fmt::Display, str::FromStr};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Entity {
    Subject,
    Session,
    Task,
    Acquisition,
    Run,
    Description,
    Datatype,
    Suffix,
    Extension,
}

impl Entity {
    pub const ALL: [Entity; 9] = [
        Entity::Subject,
        Entity::Session,
        Entity::Task,
        Entity::Acquisition,
        Entity::Run,
        Entity::Description,
        Entity::Datatype,
        Entity::Suffix,
        Entity::Extension,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Entity::Subject => "subject",
            Entity::Session => "session",
            Entity::Task => "task",
            Entity::Acquisition => "acquisition",
            Entity::Run => "run",
            Entity::Description => "description",
            Entity::Datatype => "datatype",
            Entity::Suffix => "suffix",
            Entity::Extension => "extension",
        }
    }

    pub fn key(self) -> Option<&'static str> {
        match self {
            Entity::Subject => Some("sub"),
            Entity::Session => Some("ses"),
            Entity::Task => Some("task"),
            Entity::Acquisition => Some("acq"),
            Entity::Run => Some("run"),
            Entity::Description => Some("desc"),
            Entity::Datatype | Entity::Suffix | Entity::Extension => None,
        }
    }

    pub fn from_key(key: &str) -> Option<Entity> {
        Entity::ALL.into_iter().find(|e| e.key() == Some(key))
    }
}

impl FromStr for Entity {
    type Err = Error;

    // Accepts both the long name and the filename key
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Entity::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .or_else(|| Entity::from_key(s))
            .ok_or_else(|| Error::UnknownEntity(s.to_string()))
    }
}

impl Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
