//! CDN edge pools serving mobile components.
//!
//! Each component in the component list names the pool it is served from with
//! a `SERVER_SECURE` or `SERVER_UNSECURE` token. The pool also determines the
//! content root on the origin server and the CDN zone used for cache purges.

use std::fmt;
use std::path::{Path, PathBuf};

/// Content root on the origin server shared by both pools.
pub const CDN_CONTENT_ROOT: &str = "/var/www/cdn-root/content";

/// Which CDN edge pool serves a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CdnServer {
    /// Authenticated pool (`SERVER_SECURE`).
    Secure,
    /// Public pool (`SERVER_UNSECURE`).
    Unsecured,
}

impl CdnServer {
    /// Token used for this pool in `component_list.txt`.
    pub fn component_list_token(&self) -> &'static str {
        match self {
            CdnServer::Secure => "SERVER_SECURE",
            CdnServer::Unsecured => "SERVER_UNSECURE",
        }
    }

    /// Look up a pool by its component list token.
    ///
    /// Returns `None` for anything other than the two known tokens.
    pub fn from_component_list_token(token: &str) -> Option<Self> {
        match token.trim() {
            "SERVER_SECURE" => Some(CdnServer::Secure),
            "SERVER_UNSECURE" => Some(CdnServer::Unsecured),
            _ => None,
        }
    }

    /// CDN zone identifier for this pool.
    pub fn zone_id(&self) -> &'static str {
        match self {
            CdnServer::Secure => "b3y9j3a5",
            CdnServer::Unsecured => "j4b5j9p4",
        }
    }

    /// Directory under [`CDN_CONTENT_ROOT`] holding this pool's content.
    pub fn content_subdir(&self) -> &'static str {
        match self {
            CdnServer::Secure => "mobile_secured",
            CdnServer::Unsecured => "mobile_unsecured",
        }
    }

    /// Absolute path on the origin server for a path relative to this pool.
    ///
    /// # Example
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use xcomponent::component::CdnServer;
    ///
    /// assert_eq!(
    ///     CdnServer::Unsecured.abs_server_path("airports/KSEA.zip"),
    ///     PathBuf::from("/var/www/cdn-root/content/mobile_unsecured/airports/KSEA.zip")
    /// );
    /// ```
    pub fn abs_server_path(&self, rel_path: impl AsRef<Path>) -> PathBuf {
        Path::new(CDN_CONTENT_ROOT)
            .join(self.content_subdir())
            .join(rel_path)
    }

    /// URL the CDN expects in a purge request for an absolute pool path.
    ///
    /// Returns `None` when the path is not absolute.
    pub fn purge_url(&self, abs_path: &str) -> Option<String> {
        if !abs_path.starts_with('/') {
            return None;
        }
        Some(format!("http://cds.{}.hwcdn.net{}", self.zone_id(), abs_path))
    }
}

impl fmt::Display for CdnServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.component_list_token())
    }
}
