//! Best-effort reporting of interactions to the tracking service.
//!
//! Each report is sent at most once on its own Tokio task with no retry.
//! Outcomes come back over an unbounded channel that the frame driver
//! drains, so the host's frame callback never waits on the network.
//!
//! Uses enum dispatch so hosts without a service can run with
//! [`Reporter::Disabled`].

use std::time::Duration;

use eon_types::{ErrorResponse, RecordInteractionRequest, RecordInteractionResponse};
use tokio::sync::mpsc;

use crate::error::ClientError;

/// Path of the recording endpoint, appended to the base URL.
pub const INTERACTIONS_PATH: &str = "/api/interactions";

/// Result of one background report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The service stored the interaction.
    Accepted(RecordInteractionResponse),
    /// The report was lost. Local tracking continues.
    Failed(String),
}

/// Receiving end for [`ReportOutcome`]s.
pub type OutcomeReceiver = mpsc::UnboundedReceiver<ReportOutcome>;

/// Sends interactions to the tracking service.
#[derive(Debug, Clone)]
pub enum Reporter {
    /// POST to a live service.
    Http(HttpReporter),
    /// Drop every report.
    Disabled,
}

impl Reporter {
    /// An HTTP reporter for `base_url` and the receiver for its outcomes.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn http(base_url: &str, timeout: Duration) -> Result<(Self, OutcomeReceiver), ClientError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let reporter = HttpReporter::new(base_url, timeout, tx)?;
        Ok((Self::Http(reporter), rx))
    }

    /// A reporter that sends nothing, with a receiver that stays empty.
    pub fn disabled() -> (Self, OutcomeReceiver) {
        let (_tx, rx) = mpsc::unbounded_channel();
        (Self::Disabled, rx)
    }

    /// Queue `request` for background delivery.
    ///
    /// Requires a Tokio runtime. Without one the report is dropped with a
    /// `debug` log, as any other failed report would be.
    pub fn report(&self, request: RecordInteractionRequest) {
        match self {
            Self::Http(reporter) => reporter.report(request),
            Self::Disabled => {}
        }
    }

    /// Send `request` and wait for the response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Disabled`] for a disabled reporter,
    /// [`ClientError::Http`] on transport or decoding failure, and
    /// [`ClientError::Status`] on a non-success status.
    pub async fn send(
        &self,
        request: &RecordInteractionRequest,
    ) -> Result<RecordInteractionResponse, ClientError> {
        match self {
            Self::Http(reporter) => reporter.send(request).await,
            Self::Disabled => Err(ClientError::Disabled),
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Disabled => "disabled",
        }
    }
}

// ---------------------------------------------------------------------------
// HTTP reporter
// ---------------------------------------------------------------------------

/// Reporter that POSTs JSON to `{base_url}/api/interactions`.
#[derive(Debug, Clone)]
pub struct HttpReporter {
    client: reqwest::Client,
    endpoint: String,
    outcomes: mpsc::UnboundedSender<ReportOutcome>,
}

impl HttpReporter {
    /// Create a reporter delivering outcomes to `outcomes`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        outcomes: mpsc::UnboundedSender<ReportOutcome>,
    ) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}{INTERACTIONS_PATH}", base_url.trim_end_matches('/')),
            outcomes,
        })
    }

    /// Full URL of the recording endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn report(&self, request: RecordInteractionRequest) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("No async runtime, interaction not reported");
            return;
        };
        let reporter = self.clone();
        runtime.spawn(async move {
            let outcome = match reporter.send(&request).await {
                Ok(response) => ReportOutcome::Accepted(response),
                Err(e) => {
                    tracing::debug!(error = %e, "Backend offline, continuing with local tracking");
                    ReportOutcome::Failed(e.to_string())
                }
            };
            if reporter.outcomes.send(outcome).is_err() {
                tracing::trace!("Outcome receiver dropped");
            }
        });
    }

    async fn send(
        &self,
        request: &RecordInteractionRequest,
    ) -> Result<RecordInteractionResponse, ClientError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| status.to_string());
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}
