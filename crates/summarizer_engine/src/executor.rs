use std::time::{Duration, Instant};

use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use summarizer_core::{
    Endpoint, FailureCause, FileDescriptor, Payload, RequestOutcome, SubmissionRequest,
    DEFAULT_SERVICE_URL,
};
use summarizer_logging::{summarizer_debug, summarizer_warn};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::wire;

#[derive(Debug, Clone)]
pub struct ExecutorSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            max_response_bytes: 5 * 1024 * 1024,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("invalid service url {url}: {source}")]
    InvalidServiceUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Performs one exchange with the summarization service.
///
/// Implementations must always settle: on cancellation of `cancel` they return
/// `FailureCause::Cancelled`, and when `request.timeout` elapses they cancel the
/// token, abandon the exchange and return `FailureCause::Timeout`.
#[async_trait::async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, request: &SubmissionRequest, cancel: CancellationToken)
        -> RequestOutcome;
}

#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: reqwest::Client,
    generate_url: Url,
    upload_url: Url,
    max_response_bytes: u64,
}

impl ReqwestExecutor {
    pub fn new(settings: ExecutorSettings) -> Result<Self, ExecutorError> {
        let invalid = |source| ExecutorError::InvalidServiceUrl {
            url: settings.base_url.clone(),
            source,
        };
        // A trailing slash keeps any path prefix of the base when joining.
        let base = if settings.base_url.ends_with('/') {
            Url::parse(&settings.base_url)
        } else {
            Url::parse(&format!("{}/", settings.base_url))
        }
        .map_err(invalid)?;
        let join = |endpoint: Endpoint| base.join(endpoint.path().trim_start_matches('/'));
        let generate_url = join(Endpoint::Generate).map_err(invalid)?;
        let upload_url = join(Endpoint::Upload).map_err(invalid)?;

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()?;

        Ok(Self {
            client,
            generate_url,
            upload_url,
            max_response_bytes: settings.max_response_bytes,
        })
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> &Url {
        match endpoint {
            Endpoint::Generate => &self.generate_url,
            Endpoint::Upload => &self.upload_url,
        }
    }

    async fn exchange(&self, request: &SubmissionRequest) -> RequestOutcome {
        let url = self.endpoint_url(request.endpoint).clone();
        let builder = match &request.payload {
            Payload::Text(text) => self.client.post(url).json(&wire::GenerateRequest { text }),
            Payload::File(file) => self.client.post(url).multipart(upload_form(file)),
        };

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if status.is_success() {
            let body = self.read_body(response).await?;
            return wire::parse_summary(status.as_u16(), &body);
        }

        // The status alone decides the failure; an unreadable body only loses the message.
        let body = match self.read_body(response).await {
            Ok(body) => body,
            Err(cause) => {
                summarizer_debug!("Ignoring unreadable {} error body: {}", status, cause);
                Vec::new()
            }
        };
        Err(wire::parse_error(status.as_u16(), &body))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FailureCause> {
        if let Some(content_len) = response.content_length() {
            if content_len > self.max_response_bytes {
                summarizer_warn!(
                    "Response too large: {} bytes (max {})",
                    content_len,
                    self.max_response_bytes
                );
                return Err(FailureCause::MalformedResponse);
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.max_response_bytes {
                summarizer_warn!(
                    "Response exceeded {} bytes while streaming",
                    self.max_response_bytes
                );
                return Err(FailureCause::MalformedResponse);
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Executor for ReqwestExecutor {
    async fn execute(
        &self,
        request: &SubmissionRequest,
        cancel: CancellationToken,
    ) -> RequestOutcome {
        let started = Instant::now();
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FailureCause::Cancelled),
            _ = tokio::time::sleep(request.timeout) => {
                // Leaving this arm drops the exchange future, which aborts the connection.
                cancel.cancel();
                Err(FailureCause::Timeout)
            }
            outcome = self.exchange(request) => outcome,
        };

        match &outcome {
            Ok(_) => summarizer_debug!(
                "{} answered in {:?}",
                request.endpoint.path(),
                started.elapsed()
            ),
            Err(cause) => summarizer_debug!(
                "{} failed after {:?}: {}",
                request.endpoint.path(),
                started.elapsed(),
                cause
            ),
        }
        outcome
    }
}

fn upload_form(file: &FileDescriptor) -> Form {
    let make_part = || Part::bytes(file.content.to_vec()).file_name(file.name.clone());
    let part = match make_part().mime_str(&file.mime_type) {
        Ok(part) => part,
        Err(err) => {
            summarizer_warn!("Ignoring MIME type {:?}: {}", file.mime_type, err);
            make_part()
        }
    };
    Form::new().part("file", part)
}

fn map_reqwest_error(err: reqwest::Error) -> FailureCause {
    if err.is_connect() {
        return FailureCause::Network;
    }
    if err.is_timeout() {
        return FailureCause::Timeout;
    }
    if err.is_decode() {
        return FailureCause::MalformedResponse;
    }
    if err.is_builder() {
        return FailureCause::Other(err.to_string());
    }
    FailureCause::ConnectionLost
}
