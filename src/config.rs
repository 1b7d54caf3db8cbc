use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Where generated documents are written: `root/folder/file_name`.
///
/// Passed explicitly to whatever saves a document, so several outputs can be routed
/// to different places in the same process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub root: PathBuf,
    pub folder: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            root: PathBuf::from("output"),
            folder: PathBuf::new(),
        }
    }
}

impl OutputConfig {
    pub fn new<P: AsRef<Path>>(root: P) -> OutputConfig {
        OutputConfig {
            root: root.as_ref().to_path_buf(),
            folder: PathBuf::new(),
        }
    }

    /// The same root, routed into a sub-folder
    pub fn in_folder<P: AsRef<Path>>(&self, folder: P) -> OutputConfig {
        OutputConfig {
            root: self.root.clone(),
            folder: folder.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> PathBuf {
        self.root.join(&self.folder)
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir().join(file_name)
    }

    /// Create (or truncate) a file for output, creating any missing directories first
    pub fn create(&self, file_name: &str) -> std::io::Result<File> {
        std::fs::create_dir_all(self.dir())?;
        File::create(self.path_for(file_name))
    }
}
