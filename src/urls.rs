//! Asset URL resolution.

use crate::types::Result;
use tracing::warn;
use url::Url;

/// Builds asset paths and absolute URLs for the host instance.
pub trait UrlResolver: Send + Sync {
    /// Web path of an app's image asset.
    fn image_path(&self, app: &str, image: &str) -> String;

    /// Turn a web path into an absolute URL.
    fn absolute_url(&self, path: &str) -> String;
}

/// Resolves URLs relative to a fixed instance base URL.
#[derive(Debug, Clone)]
pub struct BaseUrlResolver {
    base: Url,
}

impl BaseUrlResolver {
    /// Create a resolver for the instance at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url)?;
        // A trailing slash keeps subdirectory installs when joining.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    /// Base URL, always ending in `/`.
    pub fn base(&self) -> &Url {
        &self.base
    }
}

impl UrlResolver for BaseUrlResolver {
    fn image_path(&self, app: &str, image: &str) -> String {
        format!("/apps/{}/img/{}", app, image.trim_start_matches('/'))
    }

    fn absolute_url(&self, path: &str) -> String {
        match self.base.join(path.trim_start_matches('/')) {
            Ok(url) => url.to_string(),
            Err(e) => {
                warn!("Failed to resolve {} against {}: {}", path, self.base, e);
                format!("{}{}", self.base, path.trim_start_matches('/'))
            }
        }
    }
}
