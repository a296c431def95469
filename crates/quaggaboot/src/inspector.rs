//! Line-oriented inspection of the routing configuration.
//!
//! The configuration is never parsed structurally. Each line is normalised to
//! its whitespace-separated words and only `router <protocol> ...` statements
//! are retained, so nested blocks, comments and continuation lines are not
//! understood. A commented-out statement such as `! router bgp 1` does not
//! match because the first word is `!`, but a statement inside an unrelated
//! block still does.

use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

const ROUTER_KEYWORD: &str = "router";

/// The routing configuration could not be read.
#[derive(Debug, Error)]
#[error("failed to read routing configuration '{path}': {source}")]
pub struct ConfigUnavailableError {
    /// Configuration file that was requested.
    pub path: Utf8PathBuf,
    /// Underlying IO error.
    #[source]
    pub source: io::Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RouterStatement {
    protocol: String,
    bare: bool,
}

impl RouterStatement {
    fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        if words.next()? != ROUTER_KEYWORD {
            return None;
        }
        let protocol = words.next()?.to_owned();
        Some(Self {
            protocol,
            bare: words.next().is_none(),
        })
    }
}

/// Answers which protocols a routing configuration enables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigInspector {
    statements: Vec<RouterStatement>,
}

impl ConfigInspector {
    /// Reads and indexes the configuration at `path`.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigUnavailableError> {
        let bytes = fs::read(path).map_err(|source| ConfigUnavailableError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_text(String::from_utf8_lossy(&bytes)))
    }

    /// Indexes configuration text already in memory.
    pub fn from_text(text: impl AsRef<str>) -> Self {
        let statements = text
            .as_ref()
            .lines()
            .filter_map(RouterStatement::parse)
            .collect();
        Self { statements }
    }

    /// True when a line starts with `router <protocol>` followed by
    /// whitespace or the end of the line.
    #[must_use]
    pub fn is_protocol_enabled(&self, protocol: &str) -> bool {
        self.statements
            .iter()
            .any(|statement| statement.protocol == protocol)
    }

    /// True when a line is exactly `router pim6`.
    #[must_use]
    pub fn wants_ipv6_variant(&self) -> bool {
        self.has_bare_statement(&["pim6"])
    }

    /// True when a line is exactly `router pim` or `router pim6`.
    #[must_use]
    pub fn wants_pim_family(&self) -> bool {
        self.has_bare_statement(&["pim", "pim6"])
    }

    fn has_bare_statement(&self, protocols: &[&str]) -> bool {
        self.statements.iter().any(|statement| {
            statement.bare && protocols.contains(&statement.protocol.as_str())
        })
    }
}
