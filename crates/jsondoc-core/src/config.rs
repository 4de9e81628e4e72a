//! Configuration for parsing.

use serde::{Deserialize, Serialize};

/// Options for [`parse`](crate::parse).
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case` (e.g., `collect-comments`). This
/// naming convention is part of the public API contract for config files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ParseOptions {
    /// Record the source ranges of line and block comments on the returned
    /// document. Default: `false`.
    pub collect_comments: bool,
    /// Accept `//` and `/* */` comments (JSONC). When `false`, every
    /// comment is reported as an error. Default: `true`.
    pub allow_comments: bool,
    /// Accept a trailing comma before `]`/`}` without a diagnostic. When
    /// `false`, trailing commas are still parsed but flagged. Default:
    /// `false`.
    pub allow_trailing_commas: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            collect_comments: false,
            allow_comments: true,
            allow_trailing_commas: false,
        }
    }
}
