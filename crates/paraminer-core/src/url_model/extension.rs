//! File-extension extraction and the extension denylist.

use std::collections::HashSet;

/// Extensions of static assets that never carry useful parameters.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".pdf", ".svg", ".json", ".css", ".js", ".webp", ".woff",
    ".woff2", ".eot", ".ttf", ".otf", ".mp4", ".txt",
];

/// Set of lowercase extensions, each with its leading dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionDenylist {
    extensions: HashSet<String>,
}

impl Default for ExtensionDenylist {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS.iter().copied())
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExtensionDenylist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl ExtensionDenylist {
    /// Builds a denylist; entries are trimmed, lowercased and given a leading
    /// dot when missing (`"PNG"` becomes `".png"`). Blank entries are skipped.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .filter_map(|e| {
                let e = e.as_ref().trim().trim_start_matches('.').to_ascii_lowercase();
                if e.is_empty() {
                    None
                } else {
                    Some(format!(".{}", e))
                }
            })
            .collect();
        Self { extensions }
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.extensions.contains(extension)
    }

    /// True if the last segment of `path` ends in a denied extension.
    pub fn denies_path(&self, path: &str) -> bool {
        path_extension(path).is_some_and(|ext| self.contains(&ext))
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

/// Extension of the last path segment, lowercased and including the dot.
///
/// Leading dots of the segment do not start an extension (`/.htaccess` has
/// none), and dots in earlier segments are ignored (`/v1.2/users` has none).
/// Path parameters after the first `;` are not part of the name, so
/// `/file.JPG;jsessionid=1` has `.jpg`.
pub fn path_extension(path: &str) -> Option<String> {
    let segment = path.rsplit('/').next()?;
    let segment = segment.split(';').next().unwrap_or(segment);
    let name = segment.trim_start_matches('.');
    let dot = name.rfind('.')?;
    Some(name[dot..].to_ascii_lowercase())
}
