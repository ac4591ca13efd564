use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The best score seen across all sessions, persisted as a single JSON
/// object on disk.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct HighScore {
    #[serde(rename = "high-score")]
    best: u32,
}

impl HighScore {
    pub(crate) fn best(&self) -> u32 {
        self.best
    }

    /// Update the stored value if `score` beats it.  Returns whether an
    /// update happened.
    pub(crate) fn record(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Return the default high-score file path
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("slither").join("highscore.json"))
    }

    /// Read the high score from a file on disk.  A missing file is not an
    /// error; it just means nobody has scored yet.
    pub(crate) fn load(path: &Path) -> Result<HighScore, LoadError> {
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HighScore::default()),
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src).map_err(LoadError::deserialize)
    }

    pub(crate) fn save(&self, path: &Path) -> Result<(), SaveError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string(self).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

#[derive(Debug, Error)]
#[error("Failed to save high score to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    pub(crate) fn no_path() -> Self {
        SaveError(SaveErrorSource::NoPath)
    }

    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize high score")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write high score to disk")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high score from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    pub(crate) fn no_path() -> Self {
        LoadError(LoadErrorSource::NoPath)
    }

    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to read high score file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize high score")]
    Deserialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_only_improvements() {
        let mut hs = HighScore::default();
        assert_eq!(hs.best(), 0);
        assert!(hs.record(30));
        assert_eq!(hs.best(), 30);
        assert!(!hs.record(30));
        assert!(!hs.record(10));
        assert_eq!(hs.best(), 30);
        assert!(hs.record(40));
        assert_eq!(hs.best(), 40);
    }

    #[test]
    fn save_load_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("scores").join("highscore.json");
        let mut hs = HighScore::default();
        hs.record(120);
        hs.save(&path).unwrap();
        assert_eq!(HighScore::load(&path).unwrap(), hs);
    }

    #[test]
    fn load_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("highscore.json");
        assert_eq!(HighScore::load(&path).unwrap(), HighScore::default());
    }

    #[test]
    fn load_garbage_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("highscore.json");
        fs_err::write(&path, "not json").unwrap();
        assert!(HighScore::load(&path).is_err());
    }

    #[test]
    fn on_disk_format() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("highscore.json");
        let mut hs = HighScore::default();
        hs.record(50);
        hs.save(&path).unwrap();
        let src = fs_err::read_to_string(&path).unwrap();
        assert_eq!(src, "{\"high-score\":50}\n");
    }
}
