//! HTTP server configuration object.

use std::net::SocketAddr;

use user_directory::inbound::http::state::HttpState;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: Option<HttpState>,
}

impl ServerConfig {
    /// Construct a configuration listening on `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            http_state: None,
        }
    }

    /// Serve the directory from an already wired state.
    ///
    /// Without one, the server falls back to an empty in-memory store.
    #[must_use]
    pub fn with_http_state(mut self, state: HttpState) -> Self {
        self.http_state = Some(state);
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(dead_code, reason = "Exercised by bootstrap tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
