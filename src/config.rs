use std::{fs, path::Path};

use crate::error::{Error, Result};

// Which files of a dataset tree are handed to the parser, loadable from an INI file:
//
// [Index]
// Extensions=.vhdr,.edf
// IncludeHidden=NO
// Exclude=test,backup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexOptions {
    pub extensions: Option<Vec<String>>,
    pub include_hidden: bool,
    pub exclude: Vec<String>,
}

impl IndexOptions {
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = Some(
            extensions
                .into_iter()
                .map(|e| normalize_extension(e.into()))
                .collect(),
        );
        self
    }

    pub fn with_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }

    pub fn with_exclude<I, S>(mut self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = fragments.into_iter().map(|f| f.into().to_lowercase()).collect();
        self
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<IndexOptions> {
        let buf = fs::read_to_string(path.as_ref()).map_err(|source| Error::ConfigIo {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        IndexOptions::from_ini_str(&buf)
    }

    pub fn from_ini_str(buf: &str) -> Result<IndexOptions> {
        let file = ini::Ini::load_from_str(buf)?;

        let mut options = IndexOptions::default();
        let Some(index) = file.section(Some("Index")) else {
            return Ok(options);
        };

        if let Some(extensions) = index.get("Extensions") {
            options = options.with_extensions(split_list(extensions));
        }
        options.include_hidden = index.get("IncludeHidden").map_or_else(
            || false,
            |s| match s {
                "YES" => true,
                _ => false,
            },
        );
        if let Some(exclude) = index.get("Exclude") {
            options = options.with_exclude(split_list(exclude));
        }

        Ok(options)
    }

    pub(crate) fn accepts(&self, filename: &str) -> bool {
        if let Some(extensions) = &self.extensions {
            let extension = filename.split_once('.').map(|(_, e)| format!(".{}", e));
            match extension {
                Some(extension) if extensions.contains(&extension) => {}
                _ => return false,
            }
        }

        let lowered = filename.to_lowercase();
        !self.exclude.iter().any(|fragment| lowered.contains(fragment.as_str()))
    }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn normalize_extension(extension: String) -> String {
    if extension.starts_with('.') {
        extension
    } else {
        format!(".{}", extension)
    }
}
