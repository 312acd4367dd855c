use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::{
    architecture::Architecture,
    config::IndexOptions,
    error::{Error, Result},
    parse::{parse, ParseContext, Parsed},
    read::DatasetDescription,
};

// Root-level files describing the dataset rather than holding recordings
const METADATA_FILES: [&str; 5] = [
    DatasetDescription::FILE_NAME,
    "CHANGES",
    "LICENSE",
    "participants.tsv",
    "participants.json",
];

pub fn index<P: AsRef<Path>>(root: P) -> Result<Architecture> {
    Indexer::new(root).run()
}

pub struct Indexer {
    root: PathBuf,
    options: IndexOptions,
}

impl Indexer {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            options: IndexOptions::default(),
        }
    }

    pub fn with_options(mut self, options: IndexOptions) -> Self {
        self.options = options;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn run(&self) -> Result<Architecture> {
        if !self.root.exists() {
            return Err(Error::RootNotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(Error::InvalidRoot(self.root.clone()));
        }

        let include_hidden = self.options.include_hidden;
        let mut paths = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| include_hidden || !is_hidden(e))
        {
            let entry = entry?;
            // Symlinked recordings (git-annex, DataLad) count as files, even dangling ones
            let linked_file = entry.path_is_symlink() && !entry.path().is_dir();
            if entry.file_type().is_file() || linked_file {
                paths.push(entry.into_path());
            }
        }
        debug!(root = %self.root.display(), files = paths.len(), "walked dataset tree");

        Ok(self.index_paths(paths))
    }

    pub fn index_paths<I, Q>(&self, paths: I) -> Architecture
    where
        I: IntoIterator<Item = Q>,
        Q: AsRef<Path>,
    {
        let description = DatasetDescription::load(&self.root);
        let context = ParseContext::new(&self.root)
            .with_description(description.as_ref().and_then(|d| d.name.as_deref()));

        let mut seen = HashSet::new();
        let mut records = Vec::new();
        let mut errors = Vec::new();
        for path in paths {
            let path = path.as_ref();
            if !self.is_candidate(path) || !seen.insert(path.to_path_buf()) {
                continue;
            }

            match parse(&context, path) {
                Parsed::Valid(record) => records.push(record),
                Parsed::Invalid(error) => {
                    debug!(path = %path.display(), reason = %error.reason(), "unparsable file");
                    errors.push(error);
                }
            }
        }

        info!(
            root = %self.root.display(),
            files = records.len(),
            errors = errors.len(),
            "indexed dataset"
        );

        Architecture::from_tables(Some(self.root.clone()), records, errors)
    }

    fn is_candidate(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let Some(filename) = relative.file_name().and_then(|n| n.to_str()) else {
            // Non UTF-8 names are left to the parser to report
            return true;
        };

        if !self.options.include_hidden
            && relative
                .iter()
                .any(|c| c.to_str().is_some_and(|c| c.starts_with('.')))
        {
            return false;
        }

        let at_root = relative.parent().is_some_and(|p| p.as_os_str().is_empty());
        if at_root && (METADATA_FILES.contains(&filename) || filename.starts_with("README")) {
            return false;
        }

        self.options.accepts(filename)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.'))
}
