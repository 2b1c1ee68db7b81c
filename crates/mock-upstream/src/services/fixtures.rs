use bytes::Bytes;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Content type for fixtures whose extension says nothing.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone)]
pub struct Fixture {
    pub body: Bytes,
    pub content_type: &'static str,
}

/// Canned response files looked up by request path under a root directory.
#[derive(Debug, Clone)]
pub struct FixtureStore {
    root: PathBuf,
}

impl FixtureStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps `/api/users.json` to `<root>/api/users.json`. Paths that try to
    /// leave the root (`..`, absolute prefixes) resolve to nothing.
    pub fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let relative = Path::new(request_path.trim_start_matches('/'));
        let mut resolved = self.root.clone();
        let mut segments = 0;

        for component in relative.components() {
            match component {
                Component::Normal(part) => {
                    resolved.push(part);
                    segments += 1;
                }
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }

        (segments > 0).then_some(resolved)
    }

    /// Reads the fixture for `request_path`. `Ok(None)` means a miss.
    pub async fn read(&self, request_path: &str) -> io::Result<Option<Fixture>> {
        let Some(path) = self.resolve(request_path) else {
            debug!("Rejected fixture path {}", request_path);
            return Ok(None);
        };

        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Ok(None),
            Err(e) => {
                debug!("Fixture lookup {} failed: {}", path.display(), e);
                return Ok(None);
            }
        }

        let body = tokio::fs::read(&path).await?;
        let content_type = mime_guess::from_path(&path)
            .first_raw()
            .unwrap_or(DEFAULT_CONTENT_TYPE);

        Ok(Some(Fixture {
            body: Bytes::from(body),
            content_type,
        }))
    }
}
