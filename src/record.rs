use std::path::{Path, PathBuf};

use crate::entity::Entity;

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entities {
    pub subject: Option<String>,
    pub session: Option<String>,
    pub task: Option<String>,
    pub acquisition: Option<String>,
    pub run: Option<String>,
    pub description: Option<String>,
    pub datatype: Option<String>,
    pub suffix: Option<String>,
    pub extension: Option<String>,
}

impl Entities {
    pub fn get(&self, entity: Entity) -> Option<&str> {
        self.slot(entity).as_deref()
    }

    pub(crate) fn set(&mut self, entity: Entity, value: impl Into<String>) {
        *self.slot_mut(entity) = Some(value.into());
    }

    fn slot(&self, entity: Entity) -> &Option<String> {
        match entity {
            Entity::Subject => &self.subject,
            Entity::Session => &self.session,
            Entity::Task => &self.task,
            Entity::Acquisition => &self.acquisition,
            Entity::Run => &self.run,
            Entity::Description => &self.description,
            Entity::Datatype => &self.datatype,
            Entity::Suffix => &self.suffix,
            Entity::Extension => &self.extension,
        }
    }

    fn slot_mut(&mut self, entity: Entity) -> &mut Option<String> {
        match entity {
            Entity::Subject => &mut self.subject,
            Entity::Session => &mut self.session,
            Entity::Task => &mut self.task,
            Entity::Acquisition => &mut self.acquisition,
            Entity::Run => &mut self.run,
            Entity::Description => &mut self.description,
            Entity::Datatype => &mut self.datatype,
            Entity::Suffix => &mut self.suffix,
            Entity::Extension => &mut self.extension,
        }
    }
}

// Only the parser builds these, so the entities always agree with `path`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityRecord {
    path: PathBuf,
    entities: Entities,
}

impl EntityRecord {
    pub(crate) fn new(path: PathBuf, entities: Entities) -> Self {
        Self { path, entities }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entities(&self) -> &Entities {
        &self.entities
    }

    pub fn get(&self, entity: Entity) -> Option<&str> {
        self.entities.get(entity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ErrorRecord {
    path: PathBuf,
    entities: Entities,
    reason: ParseFailure,
}

impl ErrorRecord {
    pub(crate) fn new(path: PathBuf, entities: Entities, reason: ParseFailure) -> Self {
        Self {
            path,
            entities,
            reason,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entities(&self) -> &Entities {
        &self.entities
    }

    pub fn reason(&self) -> &ParseFailure {
        &self.reason
    }
}

impl AsRef<Entities> for EntityRecord {
    fn as_ref(&self) -> &Entities {
        &self.entities
    }
}

impl AsRef<Entities> for ErrorRecord {
    fn as_ref(&self) -> &Entities {
        &self.entities
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
pub enum ParseFailure {
    #[error("file is not inside a `sub-<label>` directory")]
    MissingSubjectDirectory,

    #[error("invalid directory `{found}`: expected `{expected}`")]
    InvalidDirectory { found: String, expected: String },

    #[error("missing datatype directory below `{0}`")]
    MissingDatatypeDirectory(String),

    #[error("unexpected directory depth: {0} levels between root and file")]
    UnexpectedDepth(usize),

    #[error("invalid datatype `{0}`: should be a lowercase alphanumeric string")]
    InvalidDatatype(String),

    #[error("filename is not valid UTF-8")]
    NonUtf8,

    #[error("missing file extension")]
    MissingExtension,

    #[error("missing required suffix: last token `{0}` is a key-value pair")]
    MissingSuffix(String),

    #[error("unparsable entity token `{0}`: should be `<key>-<value>`")]
    UnparsableToken(String),

    #[error("missing value for key `{0}`")]
    MissingValue(String),

    #[error("unknown entity key `{key}` (value `{value}`)")]
    UnknownKey { key: String, value: String },

    #[error("entity key `{0}` appears more than once")]
    DuplicateKey(String),

    #[error("invalid label `{value}` for key `{key}`: should be alphanumeric")]
    InvalidLabel { key: String, value: String },

    #[error("invalid run `{0}`: should be a number")]
    InvalidRun(String),

    #[error("subject mismatch: directory has `sub-{directory}` but filename has {filename}")]
    SubjectMismatch { directory: String, filename: String },

    #[error("session mismatch: directory has {directory} but filename has {filename}")]
    SessionMismatch { directory: String, filename: String },
}

impl ParseFailure {
    pub fn kind(&self) -> &'static str {
        match self {
            ParseFailure::MissingSubjectDirectory => "missing-subject-directory",
            ParseFailure::InvalidDirectory { .. } => "invalid-directory",
            ParseFailure::MissingDatatypeDirectory(_) => "missing-datatype-directory",
            ParseFailure::UnexpectedDepth(_) => "unexpected-depth",
            ParseFailure::InvalidDatatype(_) => "invalid-datatype",
            ParseFailure::NonUtf8 => "non-utf8",
            ParseFailure::MissingExtension => "missing-extension",
            ParseFailure::MissingSuffix(_) => "missing-suffix",
            ParseFailure::UnparsableToken(_) => "unparsable-token",
            ParseFailure::MissingValue(_) => "missing-value",
            ParseFailure::UnknownKey { .. } => "unknown-key",
            ParseFailure::DuplicateKey(_) => "duplicate-key",
            ParseFailure::InvalidLabel { .. } => "invalid-label",
            ParseFailure::InvalidRun(_) => "invalid-run",
            ParseFailure::SubjectMismatch { .. } => "subject-mismatch",
            ParseFailure::SessionMismatch { .. } => "session-mismatch",
        }
    }
}
