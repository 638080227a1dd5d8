//! Routes served by the gateway.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Header carrying the signed-message signature over the raw body.
pub const SIGNATURE_HEADER: &str = "X-Bitcoin-Sig";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Route {
    /// Service name, version and pricing
    Info,
    /// Every leased name
    Domains,
    Register,
    Update,
    Delete,
    /// A live lease with its records
    HostInfo,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Info,
        Route::Domains,
        Route::Register,
        Route::Update,
        Route::Delete,
        Route::HostInfo,
    ];

    /// Parse a request path. A leading `/` is optional.
    pub fn parse(path: &str) -> Option<Self> {
        match path.trim_start_matches('/') {
            "" => Some(Route::Info),
            "domains" => Some(Route::Domains),
            "host.register" => Some(Route::Register),
            "host.update" => Some(Route::Update),
            "host.delete" => Some(Route::Delete),
            "host.info" => Some(Route::HostInfo),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Info => "/",
            Route::Domains => "/domains",
            Route::Register => "/host.register",
            Route::Update => "/host.update",
            Route::Delete => "/host.delete",
            Route::HostInfo => "/host.info",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
