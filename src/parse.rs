// A file below the dataset root is expected at
// sub-<label>/[ses-<label>/]<datatype>/sub-<label>[_ses-<label>]_<key>-<value>..._<suffix><extension>
// Files that do not fit come back as an `ErrorRecord` holding the first failure and whatever
// entities were read before it
use std::path::Path;

use crate::{
    entity::Entity,
    record::{Entities, EntityRecord, ErrorRecord, ParseFailure},
};

#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'a> {
    pub root: &'a Path,
    pub description: Option<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self {
            root,
            description: None,
        }
    }

    pub fn with_description(mut self, description: Option<&'a str>) -> Self {
        self.description = description;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Valid(EntityRecord),
    Invalid(ErrorRecord),
}

pub fn parse(context: &ParseContext, path: &Path) -> Parsed {
    let mut entities = Entities::default();
    match parse_into(context, path, &mut entities) {
        Ok(()) => Parsed::Valid(EntityRecord::new(path.to_path_buf(), entities)),
        Err(reason) => Parsed::Invalid(ErrorRecord::new(path.to_path_buf(), entities, reason)),
    }
}

fn parse_into(
    context: &ParseContext,
    path: &Path,
    entities: &mut Entities,
) -> Result<(), ParseFailure> {
    let relative = path.strip_prefix(context.root).unwrap_or(path);
    let mut components = relative
        .iter()
        .map(|c| c.to_str().ok_or(ParseFailure::NonUtf8))
        .collect::<Result<Vec<&str>, _>>()?;
    let filename = components
        .pop()
        .ok_or(ParseFailure::MissingSubjectDirectory)?;

    parse_directories(&components, entities)?;

    let (stem, extension) = match filename.split_once('.') {
        Some((stem, extension)) if !extension.is_empty() => (stem, extension),
        _ => return Err(ParseFailure::MissingExtension),
    };
    entities.set(Entity::Extension, format!(".{}", extension));

    let mut tokens = stem.split('_').collect::<Vec<&str>>();
    // `split` always yields at least one item
    let suffix = tokens.pop().unwrap_or_default();
    if suffix.contains('-') {
        return Err(ParseFailure::MissingSuffix(suffix.to_string()));
    }
    if !is_label(suffix) {
        return Err(ParseFailure::InvalidLabel {
            key: Entity::Suffix.name().to_string(),
            value: suffix.to_string(),
        });
    }
    entities.set(Entity::Suffix, suffix);

    let mut seen = Vec::with_capacity(tokens.len());
    let mut filename_subject = None;
    let mut filename_session = None;
    for token in tokens {
        let (key, value) = match token.split_once('-') {
            Some((key, value)) if !key.is_empty() => (key, value),
            _ => return Err(ParseFailure::UnparsableToken(token.to_string())),
        };
        if value.is_empty() {
            return Err(ParseFailure::MissingValue(key.to_string()));
        }
        let entity = Entity::from_key(key).ok_or_else(|| ParseFailure::UnknownKey {
            key: key.to_string(),
            value: value.to_string(),
        })?;
        if seen.contains(&entity) {
            return Err(ParseFailure::DuplicateKey(key.to_string()));
        }
        seen.push(entity);
        if !is_label(value) {
            return Err(ParseFailure::InvalidLabel {
                key: key.to_string(),
                value: value.to_string(),
            });
        }

        match entity {
            Entity::Subject => filename_subject = Some(value),
            Entity::Session => filename_session = Some(value),
            Entity::Run if !value.bytes().all(|b| b.is_ascii_digit()) => {
                return Err(ParseFailure::InvalidRun(value.to_string()))
            }
            _ => entities.set(entity, value),
        }
    }

    let directory_subject = entities.get(Entity::Subject).unwrap_or_default();
    if filename_subject != Some(directory_subject) {
        return Err(ParseFailure::SubjectMismatch {
            directory: directory_subject.to_string(),
            filename: describe("sub", filename_subject),
        });
    }

    let directory_session = entities.get(Entity::Session);
    if filename_session != directory_session {
        return Err(ParseFailure::SessionMismatch {
            directory: match directory_session {
                Some(session) => format!("`ses-{}`", session),
                None => "no session directory".to_string(),
            },
            filename: describe("ses", filename_session),
        });
    }

    if entities.description.is_none() {
        entities.description = context.description.map(str::to_string);
    }

    Ok(())
}

fn parse_directories(directories: &[&str], entities: &mut Entities) -> Result<(), ParseFailure> {
    let (subject_dir, rest) = directories
        .split_first()
        .ok_or(ParseFailure::MissingSubjectDirectory)?;
    entities.set(Entity::Subject, directory_label(subject_dir, "sub")?);

    let datatype = match rest {
        [] => return Err(ParseFailure::MissingDatatypeDirectory(subject_dir.to_string())),
        [datatype] if datatype.starts_with("ses-") => {
            return Err(ParseFailure::MissingDatatypeDirectory(datatype.to_string()))
        }
        [datatype] => *datatype,
        [session_dir, datatype] => {
            entities.set(Entity::Session, directory_label(session_dir, "ses")?);
            *datatype
        }
        _ => return Err(ParseFailure::UnexpectedDepth(directories.len())),
    };

    if datatype.is_empty()
        || !datatype
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
    {
        return Err(ParseFailure::InvalidDatatype(datatype.to_string()));
    }
    entities.set(Entity::Datatype, datatype);

    Ok(())
}

fn directory_label<'p>(directory: &'p str, key: &str) -> Result<&'p str, ParseFailure> {
    match directory
        .strip_prefix(key)
        .and_then(|rest| rest.strip_prefix('-'))
    {
        Some(label) if is_label(label) => Ok(label),
        _ => Err(ParseFailure::InvalidDirectory {
            found: directory.to_string(),
            expected: format!("{}-<label>", key),
        }),
    }
}

fn is_label(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_alphanumeric())
}

fn describe(key: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("`{}-{}`", key, value),
        None => format!("no `{}` entity", key),
    }
}
