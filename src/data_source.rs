//! Reading numeric samples from text
//!
//! Values are separated by whitespace, commas or semicolons, and `#` starts a
//! comment that runs to the end of the line. Every value is read as `f64`;
//! integers are exact up to 2^53.

use crate::errors::{Result, StatsError};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the command-line tool reads its samples from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleSource {
    Path(PathBuf),
    Stdin,
}

impl SampleSource {
    /// `None` or `-` means standard input
    #[must_use]
    pub fn from_arg(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) if p.as_os_str() != "-" => Self::Path(p),
            _ => Self::Stdin,
        }
    }

    /// Read every sample from this source
    ///
    /// # Errors
    ///
    /// See [`read_samples`]. A path that cannot be opened gives
    /// [`StatsError::IoError`].
    pub fn read(&self) -> Result<Vec<f64>> {
        match self {
            Self::Path(path) => read_samples_from_path(path),
            Self::Stdin => read_samples(io::stdin().lock()),
        }
    }
}

/// Parse samples from any buffered reader
///
/// # Errors
///
/// Returns [`StatsError::ParseError`] with the 1-based line number for the
/// first token that is not a number, or [`StatsError::IoError`] if reading
/// fails.
pub fn read_samples<R: BufRead>(reader: R) -> Result<Vec<f64>> {
    let mut values = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let content = match line.split_once('#') {
            Some((before, _comment)) => before,
            None => line.as_str(),
        };

        for token in content
            .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
            .filter(|t| !t.is_empty())
        {
            let value = token.parse::<f64>().map_err(|_| StatsError::ParseError {
                line: index + 1,
                token: token.to_string(),
            })?;
            values.push(value);
        }
    }

    debug!(count = values.len(), "read samples");
    Ok(values)
}

/// Parse samples from a file
///
/// # Errors
///
/// Returns [`StatsError::IoError`] if the file cannot be opened or read and
/// [`StatsError::ParseError`] for a token that is not a number.
pub fn read_samples_from_path(path: impl AsRef<Path>) -> Result<Vec<f64>> {
    let file = File::open(path.as_ref())?;
    read_samples(BufReader::new(file))
}
