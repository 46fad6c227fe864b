//! The volume, which is remembered between sessions in
//! `<config dir>/pulse/volume.txt` as a plain percentage.

use std::{num::ParseIntError, path::PathBuf};

use tokio::fs;
use tracing::debug;

/// The volume used when nothing has been saved yet, as a percentage.
pub const DEFAULT: u16 = 70;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("there's no config directory to keep the volume in")]
    Directory,

    #[error("couldn't access the volume file: {0}")]
    Io(#[from] std::io::Error),

    #[error("the saved volume isn't a percentage: {0}")]
    Parse(#[from] ParseIntError),
}

/// A volume percentage, as it's saved on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistentVolume {
    pub(crate) percent: u16,
}

impl PersistentVolume {
    /// Where the volume lives, creating the directory if needed.
    async fn path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or(Error::Directory)?.join("pulse");
        fs::create_dir_all(&dir).await?;

        Ok(dir.join("volume.txt"))
    }

    /// Reads a percentage like `70` or `70%`.
    pub fn parse(contents: &str) -> Result<u16> {
        let contents = contents.trim();
        let number = contents.strip_suffix('%').unwrap_or(contents);

        Ok(number.trim().parse()?)
    }

    /// The volume as the sink wants it, from 0 to 1.
    pub fn float(self) -> f32 {
        f32::from(self.percent) / 100.0
    }

    /// Loads the saved volume, saving the default if there wasn't one.
    pub async fn load() -> Result<Self> {
        let path = Self::path().await?;

        let percent = match fs::read_to_string(&path).await {
            Ok(contents) => Self::parse(&contents)?.min(100),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                fs::write(&path, DEFAULT.to_string()).await?;
                DEFAULT
            }
            Err(error) => return Err(error.into()),
        };

        debug!(percent, "loaded volume");
        Ok(Self { percent })
    }

    /// Saves a volume from the sink, which is from 0 to 1.
    ///
    /// Anything out of range, including NaN, is clamped.
    pub async fn save(volume: f32) -> Result<()> {
        let percent = Self::from_float(volume).percent;
        fs::write(Self::path().await?, percent.to_string()).await?;

        Ok(())
    }

    /// Rounds a volume from 0 to 1 into a percentage.
    pub fn from_float(volume: f32) -> Self {
        let volume = if volume.is_finite() { volume.clamp(0.0, 1.0) } else { 0.0 };

        Self {
            percent: (volume * 100.0).round() as u16,
        }
    }
}
