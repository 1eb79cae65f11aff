//! Input materialization
//!
//! The executable only reads files. In-memory values are written to a
//! uniquely named temporary directory owned by a [`ScopedInput`] and removed
//! when it is released or dropped, whichever happens first.

use lawkit_core::{LawkitError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

/// File name of the materialized values inside the temporary directory.
pub const INPUT_FILE_NAME: &str = "data.txt";

const TEMP_PREFIX: &str = "lawkit-";

/// Data handed to an analysis command.
#[derive(Debug, Clone, PartialEq)]
pub enum InputData {
    /// A file the executable reads directly.
    Path(PathBuf),
    /// Scalar values, written one per line to a temporary file.
    Values(Vec<String>),
}

impl InputData {
    /// Build value input from anything displayable.
    ///
    /// Numbers go through `Display`, which never inserts grouping separators.
    pub fn values<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        InputData::Values(values.into_iter().map(|v| v.to_string()).collect())
    }
}

impl From<PathBuf> for InputData {
    fn from(path: PathBuf) -> Self {
        InputData::Path(path)
    }
}

impl From<&Path> for InputData {
    fn from(path: &Path) -> Self {
        InputData::Path(path.to_path_buf())
    }
}

impl From<&str> for InputData {
    fn from(path: &str) -> Self {
        InputData::Path(PathBuf::from(path))
    }
}

impl From<String> for InputData {
    fn from(path: String) -> Self {
        InputData::Path(PathBuf::from(path))
    }
}

impl From<Vec<String>> for InputData {
    fn from(values: Vec<String>) -> Self {
        InputData::Values(values)
    }
}

impl From<&[&str]> for InputData {
    fn from(values: &[&str]) -> Self {
        InputData::values(values)
    }
}

impl From<Vec<f64>> for InputData {
    fn from(values: Vec<f64>) -> Self {
        InputData::values(values)
    }
}

impl From<&[f64]> for InputData {
    fn from(values: &[f64]) -> Self {
        InputData::values(values)
    }
}

impl From<Vec<i64>> for InputData {
    fn from(values: Vec<i64>) -> Self {
        InputData::values(values)
    }
}

impl From<&[i64]> for InputData {
    fn from(values: &[i64]) -> Self {
        InputData::values(values)
    }
}

/// A path usable by the executable, plus ownership of any temporary
/// directory created to hold it.
///
/// The directory is removed exactly once: by [`ScopedInput::release`] or,
/// failing that, on drop. Dropping covers early returns, `?` propagation and
/// cancelled futures.
#[derive(Debug)]
pub struct ScopedInput {
    path: PathBuf,
    dir: Option<TempDir>,
}

impl ScopedInput {
    /// Resolve `data` to a file path, writing values to a temporary file
    /// when needed.
    pub fn materialize(data: &InputData) -> Result<Self> {
        match data {
            InputData::Path(path) => Ok(Self {
                path: path.clone(),
                dir: None,
            }),
            InputData::Values(values) => {
                let dir = tempfile::Builder::new()
                    .prefix(TEMP_PREFIX)
                    .tempdir()
                    .map_err(LawkitError::InputMaterializeFailed)?;

                let path = dir.path().join(INPUT_FILE_NAME);
                // On failure `dir` drops here and takes the partial file with it.
                fs::write(&path, values.join("\n")).map_err(LawkitError::InputMaterializeFailed)?;

                debug!(path = %path.display(), count = values.len(), "materialized input values");
                Ok(Self {
                    path,
                    dir: Some(dir),
                })
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this input owns a temporary directory that is not yet released.
    pub fn is_temporary(&self) -> bool {
        self.dir.is_some()
    }

    /// Remove the temporary directory, if any.
    ///
    /// Idempotent, and tolerates the directory having been removed by
    /// someone else. A no-op for path inputs.
    pub fn release(&mut self) -> Result<()> {
        match self.dir.take() {
            Some(dir) => remove_temp_dir(dir).map_err(LawkitError::IoError),
            None => Ok(()),
        }
    }
}

impl Drop for ScopedInput {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            let path = dir.path().to_path_buf();
            if let Err(e) = remove_temp_dir(dir) {
                warn!(path = %path.display(), error = %e, "failed to remove temporary input");
            }
        }
    }
}

fn remove_temp_dir(dir: TempDir) -> std::io::Result<()> {
    match dir.close() {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_input_is_passed_through() {
        let data = InputData::from("data/sales.csv");
        let mut input = ScopedInput::materialize(&data).unwrap();

        assert_eq!(input.path(), Path::new("data/sales.csv"));
        assert!(!input.is_temporary());
        input.release().unwrap();
        input.release().unwrap();
    }

    #[test]
    fn test_values_round_trip() {
        let data = InputData::from(vec!["1".to_string(), "2".to_string(), "3".to_string()]);
        let mut input = ScopedInput::materialize(&data).unwrap();

        let path = input.path().to_path_buf();
        let dir = path.parent().unwrap().to_path_buf();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1\n2\n3");
        assert_eq!(path.file_name().unwrap(), INPUT_FILE_NAME);
        assert!(
            dir.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with(TEMP_PREFIX)
        );

        input.release().unwrap();
        assert!(!path.exists());
        assert!(!dir.exists());
        assert!(!input.is_temporary());
    }

    #[test]
    fn test_release_twice_is_ok() {
        let mut input = ScopedInput::materialize(&InputData::values([1, 2, 3])).unwrap();
        input.release().unwrap();
        input.release().unwrap();
    }

    #[test]
    fn test_release_tolerates_directory_already_gone() {
        let mut input = ScopedInput::materialize(&InputData::values([1])).unwrap();
        let dir = input.path().parent().unwrap().to_path_buf();

        fs::remove_dir_all(&dir).unwrap();
        assert!(input.release().is_ok());
    }

    #[test]
    fn test_drop_removes_directory() {
        let dir = {
            let input = ScopedInput::materialize(&InputData::values([10, 20])).unwrap();
            input.path().parent().unwrap().to_path_buf()
        };
        assert!(!dir.exists());
    }

    #[test]
    fn test_drop_after_release_does_nothing() {
        let mut input = ScopedInput::materialize(&InputData::values([1])).unwrap();
        input.release().unwrap();
        drop(input);
    }

    #[test]
    fn test_each_materialization_gets_its_own_directory() {
        let a = ScopedInput::materialize(&InputData::values([1])).unwrap();
        let b = ScopedInput::materialize(&InputData::values([1])).unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_numbers_have_no_grouping() {
        let data = InputData::from(vec![1000.0, 1234567.5, 0.25]);
        assert_eq!(
            data,
            InputData::Values(vec![
                "1000".to_string(),
                "1234567.5".to_string(),
                "0.25".to_string()
            ])
        );
    }

    #[test]
    fn test_empty_values_write_empty_file() {
        let input = ScopedInput::materialize(&InputData::Values(vec![])).unwrap();
        assert_eq!(fs::read_to_string(input.path()).unwrap(), "");
    }

    #[test]
    fn test_string_is_path_semantics() {
        assert_eq!(
            InputData::from(String::from("numbers.txt")),
            InputData::Path(PathBuf::from("numbers.txt"))
        );
    }
}
