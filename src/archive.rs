use miette::{IntoDiagnostic, Result, WrapErr};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// One JAR archive opened for analysis.
///
/// Enumeration and entry access are separate so the two analysis passes
/// can each walk the full archive independently.
pub struct ClassArchive {
    path: PathBuf,
    zip: ZipArchive<File>,
}

impl ClassArchive {
    /// Validate the path and open the archive's central directory.
    ///
    /// A missing path, a directory, or an unreadable ZIP structure is an
    /// archive-level error: the caller skips this archive and marks the
    /// run failed.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            miette::bail!(
                "archive does not exist or is not a file: {}",
                path.display()
            );
        }

        let file = File::open(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to open archive: {}", path.display()))?;
        let zip = ZipArchive::new(file)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read archive structure: {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            zip,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of the archive's class file entries, directory entries
    /// excluded. Callable any number of times; each analysis pass starts
    /// from its own full enumeration.
    ///
    /// The central directory map iterates in arbitrary order, so the
    /// names are sorted to keep processing order deterministic.
    pub fn class_entries(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .zip
            .file_names()
            .filter(|name| is_class_entry(name))
            .map(str::to_string)
            .collect();
        names.sort();
        names
    }

    /// Open one entry's byte stream and hand it to `f`. The stream is
    /// released when `f` returns, on success and failure paths alike,
    /// before any further entry is touched.
    pub fn read_entry<T>(&mut self, name: &str, f: impl FnOnce(&mut dyn Read) -> T) -> Result<T> {
        let mut entry = self
            .zip
            .by_name(name)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to open archive entry: {name}"))?;
        Ok(f(&mut entry))
    }
}

fn is_class_entry(name: &str) -> bool {
    name.ends_with(".class") && !name.ends_with('/')
}
