use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::errors::{BridgeError, BridgeResult};

/// Characters escaped when a path segment is rendered into a daemon URL.
/// Literal `%` is already `%25` in the canonical form, so it is absent here.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// An absolute, slash-separated path confined to a server's file root.
///
/// Always begins with `/`, contains no `..` or empty segments, and carries no
/// trailing slash except for the root itself. Literal `%` characters are
/// stored as `%25`, so the canonical string is a fixed point of percent
/// decoding and re-normalizing it never changes it. Only
/// [`PathSpec::normalize`] constructs values of this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSpec(String);

impl PathSpec {
    /// Canonicalize caller-supplied path input.
    ///
    /// The input is percent-decoded exactly once before any checks run, so
    /// encoded traversal sequences like `..%2F` cannot slip past the `..`
    /// rejection below.
    pub fn normalize(raw: &str) -> BridgeResult<Self> {
        let decoded = percent_decode_str(raw)
            .decode_utf8()
            .map_err(|_| BridgeError::InvalidPath("path is not valid UTF-8".to_string()))?;

        let trimmed = decoded.trim_matches('/');
        if trimmed.is_empty() {
            return Ok(PathSpec("/".to_string()));
        }

        let mut segments = Vec::new();
        for segment in trimmed.split('/') {
            if segment.is_empty() || segment == "." {
                continue;
            }
            if segment == ".." {
                return Err(BridgeError::InvalidPath(
                    "path may not traverse outside the server root".to_string(),
                ));
            }
            // Re-escape literal percents so the stored form cannot decode
            // any further on a second pass.
            segments.push(segment.replace('%', "%25"));
        }

        if segments.is_empty() {
            return Ok(PathSpec("/".to_string()));
        }
        Ok(PathSpec(format!("/{}", segments.join("/"))))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Breadcrumb target for the file browser: the path with its last segment
    /// removed, offered only when the path is at least two segments deep.
    /// Presentation metadata, computed from an already-normalized path.
    pub fn parent_link(&self) -> Option<PathSpec> {
        let segments: Vec<&str> = self.segments().collect();
        if segments.len() < 2 {
            return None;
        }
        Some(PathSpec(format!(
            "/{}",
            segments[..segments.len() - 1].join("/")
        )))
    }

    /// Render the path as a daemon URL suffix, one encoded segment at a time.
    pub(crate) fn encoded(&self) -> String {
        if self.is_root() {
            return "/".to_string();
        }
        let encoded: Vec<String> = self
            .segments()
            .map(|s| utf8_percent_encode(s, SEGMENT).to_string())
            .collect();
        format!("/{}", encoded.join("/"))
    }
}

impl fmt::Display for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
