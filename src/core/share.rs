//=========================================================================
// Share
//=========================================================================
//
// Hands the player's result to an external share intent.
//
//   Game → push(ShareRequest) → MessageBus → ShareSystem::update()
//                                              ↓
//                                      ShareTarget::open(request)
//
// Failures (bad endpoint, blocked popup) are logged and dropped; the game
// never waits on or observes the outcome.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};
use thiserror::Error;
use url::Url;

//=== Internal Dependencies ===============================================

use crate::core::message_bus::MessageBus;

//=== ShareRequest ========================================================

/// Pre-formatted share payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub text: String,
    pub url: String,
}

//=== ShareError ==========================================================

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("invalid share endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("share action was blocked: {0}")]
    Blocked(String),
}

//=== ShareTarget =========================================================

/// Something that can open a share action.
pub trait ShareTarget: Send {
    fn open(&mut self, request: &ShareRequest) -> Result<(), ShareError>;
}

/// Launches a URL with the system handler.
pub type Launcher = fn(&str) -> std::io::Result<()>;

/// Builds a web intent URL (`?text=...&url=...`) and opens it in the
/// default browser.
#[derive(Debug, Clone)]
pub struct IntentShareTarget {
    endpoint: String,
    launch: Launcher,
}

impl IntentShareTarget {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_launcher(endpoint, |url| open::that(url))
    }

    /// Same target, opening URLs through `launch` instead of the browser.
    pub fn with_launcher(endpoint: impl Into<String>, launch: Launcher) -> Self {
        Self {
            endpoint: endpoint.into(),
            launch,
        }
    }

    /// Intent URL with the payload percent-encoded into the query.
    pub fn intent_url(&self, request: &ShareRequest) -> Result<Url, ShareError> {
        let url = Url::parse_with_params(
            &self.endpoint,
            &[("text", request.text.as_str()), ("url", request.url.as_str())],
        )?;
        Ok(url)
    }
}

impl ShareTarget for IntentShareTarget {
    fn open(&mut self, request: &ShareRequest) -> Result<(), ShareError> {
        let url = self.intent_url(request)?;
        info!(target: "share", "Opening share intent: {}", url);
        (self.launch)(url.as_str()).map_err(|e| ShareError::Blocked(e.to_string()))
    }
}

//=== ShareSystem =========================================================

/// Drains queued share requests once per tick.
pub struct ShareSystem {
    target: Box<dyn ShareTarget>,
}

impl ShareSystem {
    pub fn new(target: Box<dyn ShareTarget>) -> Self {
        Self { target }
    }

    pub fn update(&mut self, bus: &mut MessageBus) {
        for request in bus.drain::<ShareRequest>() {
            if let Err(e) = self.target.open(&request) {
                warn!(target: "share", "Share failed: {}", e);
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
