use std::path::{Path, PathBuf};

use crate::entity::Entity;

mod description;

pub use description::DatasetDescription;

// The location of one BIDS recording directory below a dataset root
// Each recording directory is uniquely identified by a root, `subject`, an optional `session`
// and a datatype:
//
// sub-<subject>/
//     -> [ses-<ses>]/
//         -> <datatype>/
//
// <https://bids-specification.readthedocs.io/en/stable/common-principles.html#filesystem-structure>
pub struct BIDSPath<'a> {
    path: PathBuf,
    subject: &'a str,
    session: Option<&'a str>,
}

impl<'a> BIDSPath<'a> {
    pub fn new<P: AsRef<Path>>(
        root: P,
        subject: &'a str,
        session: Option<&'a str>,
        datatype: &str,
    ) -> Self {
        let mut path = root.as_ref().join(format!("sub-{}", subject));
        if let Some(session) = session {
            path.push(format!("ses-{}", session));
        }
        path.push(datatype);

        Self {
            path,
            subject,
            session,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.path
    }

    pub fn filename(&self, entities: &[(Entity, &str)], suffix: &str, extension: &str) -> String {
        let mut name = format!("sub-{}", self.subject);
        if let Some(session) = self.session {
            name.push_str(&format!("_ses-{}", session));
        }
        for (entity, value) in entities {
            if matches!(entity, Entity::Subject | Entity::Session) {
                continue;
            }
            if let Some(key) = entity.key() {
                name.push_str(&format!("_{}-{}", key, value));
            }
        }
        format!("{}_{}{}", name, suffix, extension)
    }

    pub fn file(&self, entities: &[(Entity, &str)], suffix: &str, extension: &str) -> PathBuf {
        self.path.join(self.filename(entities, suffix, extension))
    }
}
