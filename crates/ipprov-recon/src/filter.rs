//! BPF `host` filter expressions.

use ipprov_core::Address;
use std::fmt;
use std::path::Path;
use tracing::info;

/// Join `host <addr>` clauses with `or`, keeping input order.
///
/// No addresses gives the empty string.
#[must_use]
pub fn build_filter(matched: &[Address]) -> String {
    matched
        .iter()
        .map(|addr| format!("host {addr}"))
        .collect::<Vec<_>>()
        .join(" or ")
}

/// A filter expression ready to be handed to a capture tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpression(String);

impl FilterExpression {
    #[must_use]
    pub fn from_matches(matched: &[Address]) -> Self {
        Self(build_filter(matched))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the expression has no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overwrite `path` with the expression and a trailing newline.
    ///
    /// An empty expression still produces the file.
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, format!("{}\n", self.0))?;
        info!(path = %path.display(), bytes = self.0.len() + 1, "filter expression written");
        Ok(())
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
