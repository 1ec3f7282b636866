//! Bounded external address probe.

use std::time::Duration;

use url::Url;

use super::{HttpClient, HttpRequest, LookupError};

/// Asks a remote "echo my address" service for the host's external address.
///
/// Each call issues exactly one GET and never waits longer than the
/// configured timeout, whatever the HTTP client does. Retries happen only
/// through the next scheduled refresh.
///
/// # Type Parameters
///
/// * `H` - The [`HttpClient`] used to send the request
///
/// # Example
///
/// ```no_run
/// use ipwatch::lookup::{ExternalAddressProbe, ReqwestClient};
/// use std::time::Duration;
/// use url::Url;
///
/// # async fn example() {
/// let probe = ExternalAddressProbe::new(
///     ReqwestClient::new(),
///     Url::parse("http://ifconfig.me/ip").unwrap(),
///     Duration::from_secs(5),
/// );
/// match probe.probe().await {
///     Ok(addr) => println!("external: {addr}"),
///     Err(e) => println!("{e}"),
/// }
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ExternalAddressProbe<H> {
    client: H,
    url: Url,
    timeout: Duration,
}

impl<H: HttpClient> ExternalAddressProbe<H> {
    /// Creates a probe that queries `url` with the given timeout.
    #[must_use]
    pub const fn new(client: H, url: Url, timeout: Duration) -> Self {
        Self {
            client,
            url,
            timeout,
        }
    }

    /// Returns the lookup endpoint.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetches the external address.
    ///
    /// On success returns the response body with surrounding whitespace
    /// removed. The text is not checked to be a well-formed address.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Unavailable`] on timeout, transport failure,
    /// non-2xx status, or a body that is not UTF-8.
    pub async fn probe(&self) -> Result<String, LookupError> {
        let request = HttpRequest::get(self.url.clone());

        let response = tokio::time::timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| {
                LookupError::unavailable(format!("no response within {:?}", self.timeout))
            })??;

        if !response.is_success() {
            return Err(LookupError::unavailable(format!("HTTP {}", response.status)));
        }

        let text = response
            .body_text()
            .ok_or_else(|| LookupError::unavailable("response body is not valid UTF-8"))?;

        Ok(text.trim().to_string())
    }
}
