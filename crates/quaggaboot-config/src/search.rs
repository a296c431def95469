//! Ordered directory lists probed for executables.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};

/// Ordered, immutable list of directories searched for a program.
///
/// Parsed from the opaque strings operators supply: entries are separated by
/// whitespace or `:` and may carry the shell quoting used by older boot
/// scripts, which is stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    directories: Vec<Utf8PathBuf>,
}

impl SearchPath {
    /// Builds a search path from directories in probe order.
    pub fn new<I, P>(directories: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        Self {
            directories: directories.into_iter().map(Into::into).collect(),
        }
    }

    /// Splits a delimited directory list, dropping empty segments.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let directories = raw
            .split(|character: char| character.is_whitespace() || character == ':')
            .map(|segment| segment.trim_matches(|character| character == '"' || character == '\''))
            .filter(|segment| !segment.is_empty())
            .map(Utf8PathBuf::from)
            .collect();
        Self { directories }
    }

    /// Iterates directories in probe order.
    pub fn iter(&self) -> impl Iterator<Item = &Utf8Path> {
        self.directories.iter().map(Utf8PathBuf::as_path)
    }

    /// Number of directories on the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.directories.len()
    }

    /// True when no directory would be probed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }
}

impl FromStr for SearchPath {
    type Err = Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(raw))
    }
}

impl fmt::Display for SearchPath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for directory in &self.directories {
            if !first {
                formatter.write_str(" ")?;
            }
            formatter.write_str(directory.as_str())?;
            first = false;
        }
        Ok(())
    }
}
