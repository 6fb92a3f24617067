//! Reachability check for a custom presence backend.
use std::time::Duration;

use anyhow::{Context as _, Result, bail};

/// Identity marker a presence backend must mention in its root response.
pub const SERVICE_MARKER: &str = "lanyard";

/// Upper bound for the whole probe request.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Confirms that a backend URL serves the presence API.
pub trait BackendProbe {
    /// Succeed only if `url` answered and identified itself.
    ///
    /// # Errors
    ///
    /// Returns an error describing why the backend was not confirmed.
    fn confirm(&self, url: &str) -> Result<()>;
}

/// [`BackendProbe`] performing a single blocking HTTP GET.
pub struct HttpProbe {
    agent: ureq::Agent,
}

impl std::fmt::Debug for HttpProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProbe")
            .field("agent", &"<ureq::Agent>")
            .finish()
    }
}

impl Default for HttpProbe {
    fn default() -> Self {
        Self::new(PROBE_TIMEOUT)
    }
}

impl HttpProbe {
    /// Create a probe whose request is abandoned after `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

impl BackendProbe for HttpProbe {
    fn confirm(&self, url: &str) -> Result<()> {
        let mut response = self
            .agent
            .get(url)
            .call()
            .with_context(|| format!("GET {url}"))?;
        let status = response.status();
        if !status.is_success() {
            bail!("GET {url} returned {status}");
        }
        let body = response
            .body_mut()
            .read_to_string()
            .with_context(|| format!("reading response from {url}"))?;
        if !identifies_service(&body) {
            bail!("{url} does not identify itself as a presence service");
        }
        Ok(())
    }
}

/// Whether a response body names the presence service.
#[must_use]
pub fn identifies_service(body: &str) -> bool {
    body.to_ascii_lowercase().contains(SERVICE_MARKER)
}
