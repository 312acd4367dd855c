use std::{fs, path::Path};

use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DatasetDescription {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "DatasetType")]
    pub dataset_type: Option<String>,
}

impl DatasetDescription {
    pub const FILE_NAME: &'static str = "dataset_description.json";

    pub fn load<P: AsRef<Path>>(root: P) -> Option<DatasetDescription> {
        let path = root.as_ref().join(Self::FILE_NAME);
        if !path.is_file() {
            debug!(path = %path.display(), "no dataset description");
            return None;
        }

        let buf = match fs::read_to_string(&path) {
            Ok(buf) => buf,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "unreadable dataset description");
                return None;
            }
        };

        match serde_json::from_str::<DatasetDescription>(&buf) {
            Ok(description) => {
                if let Some(kind) = description.dataset_type.as_deref() {
                    if kind != "raw" && kind != "derivative" {
                        warn!(path = %path.display(), dataset_type = kind, "unknown dataset type");
                    }
                }
                Some(description)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "malformed dataset description");
                None
            }
        }
    }
}
