use crate::areas::REPOSITORY_DIR;
use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use std::path::Path;
use walkdir::WalkDir;

/// The working directory
///
/// The engine tracks flat file names: only plain files directly inside the
/// working directory participate in version control. The repository
/// directory itself is always ignored.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Plain file names in the working directory, sorted
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .filter(|name| name != REPOSITORY_DIR)
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.path.join(name).is_file()
    }

    pub fn read_file(&self, name: &str) -> anyhow::Result<String> {
        let file_path = self.path.join(name);

        std::fs::read_to_string(&file_path)
            .with_context(|| format!("Unable to read file {}", file_path.display()))
    }

    /// Snapshot a working file into a blob
    pub fn parse_blob(&self, name: &str) -> anyhow::Result<Blob> {
        let content = self.read_file(name)?;
        Ok(Blob::new(content))
    }

    /// Overwrite (or create) a working file, bypassing staging
    pub fn write_file(&self, name: &str, content: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(name);

        std::fs::write(&file_path, content)
            .with_context(|| format!("Unable to write file {}", file_path.display()))
    }

    /// Delete a working file; a file already gone is not an error
    pub fn remove_file(&self, name: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(name);

        match std::fs::remove_file(&file_path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error)
                .with_context(|| format!("Unable to remove file {}", file_path.display())),
        }
    }
}
