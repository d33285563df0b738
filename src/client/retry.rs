use std::time::Duration;

use tracing::warn;

use super::http::{BoxFuture, HttpRequest, HttpResponse, HttpTransport, TransportFailure};

/// Retry/backoff policy applied to every request, GET and POST alike.
///
/// Transport failures (timeouts, connection errors) and the statuses in
/// [`RetryPolicy::RETRY_STATUSES`] are retried. Gateway-level rejections
/// arrive with a 2xx status and are never retried.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    max_retries: u32,
    backoff_factor: f64,
}

impl RetryPolicy {
    pub const RETRY_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

    /// `max_retries` counts attempts after the first one; `backoff_factor` is in seconds.
    ///
    /// Negative or non-finite factors are treated as zero.
    pub fn new(max_retries: u32, backoff_factor: f64) -> Self {
        let backoff_factor = if backoff_factor.is_finite() && backoff_factor > 0.0 {
            backoff_factor
        } else {
            0.0
        };
        Self {
            max_retries,
            backoff_factor,
        }
    }

    /// Never retry.
    pub fn none() -> Self {
        Self::new(0, 0.0)
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn backoff_factor(&self) -> f64 {
        self.backoff_factor
    }

    /// Delay before retry number `retry` (0-based): `backoff_factor * 2^retry`.
    pub fn delay(&self, retry: u32) -> Duration {
        let exponent = retry.min(32) as i32;
        Duration::try_from_secs_f64(self.backoff_factor * 2f64.powi(exponent))
            .unwrap_or(Duration::MAX)
    }

    pub fn is_retryable_status(status: u16) -> bool {
        Self::RETRY_STATUSES.contains(&status)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, 0.5)
    }
}

/// Wraps a transport and re-issues requests according to a [`RetryPolicy`].
///
/// When retries run out, the last outcome is returned unchanged.
#[derive(Debug, Clone)]
pub(crate) struct RetryingTransport<T> {
    inner: T,
    policy: RetryPolicy,
}

impl<T> RetryingTransport<T> {
    pub fn new(inner: T, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl<T: HttpTransport> HttpTransport for RetryingTransport<T> {
    fn send<'a>(
        &'a self,
        request: &'a HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportFailure>> {
        Box::pin(async move {
            let mut retry = 0;
            loop {
                let outcome = self.inner.send(request).await;
                let reason = match &outcome {
                    Ok(response) if RetryPolicy::is_retryable_status(response.status) => {
                        format!("HTTP {}", response.status)
                    }
                    Ok(_) => return outcome,
                    Err(failure) => failure.to_string(),
                };

                if retry >= self.policy.max_retries {
                    return outcome;
                }

                let delay = self.policy.delay(retry);
                retry += 1;
                warn!(
                    endpoint = request.url.path(),
                    attempt = retry,
                    max_retries = self.policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    reason = %reason,
                    "retrying request"
                );
                tokio::time::sleep(delay).await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;
    use crate::client::fake::FakeTransport;

    fn request() -> HttpRequest {
        HttpRequest::post_form(
            Url::parse("https://example.invalid/api/smsapi").unwrap(),
            vec![("number".to_owned(), "8801712345678".to_owned())],
        )
    }

    #[test]
    fn delay_grows_exponentially() {
        let policy = RetryPolicy::new(5, 0.5);
        assert_eq!(policy.delay(0), Duration::from_millis(500));
        assert_eq!(policy.delay(1), Duration::from_secs(1));
        assert_eq!(policy.delay(2), Duration::from_secs(2));
        assert_eq!(policy.delay(3), Duration::from_secs(4));
    }

    #[test]
    fn invalid_backoff_factor_means_no_delay() {
        assert_eq!(RetryPolicy::new(3, -1.0).delay(2), Duration::ZERO);
        assert_eq!(RetryPolicy::new(3, f64::NAN).delay(0), Duration::ZERO);
    }

    #[test]
    fn only_transient_statuses_are_retryable() {
        for status in [429, 500, 502, 503, 504] {
            assert!(RetryPolicy::is_retryable_status(status));
        }
        for status in [200, 400, 401, 404, 501] {
            assert!(!RetryPolicy::is_retryable_status(status));
        }
    }

    #[tokio::test]
    async fn connection_reset_then_success_retries_once() {
        let fake = FakeTransport::default();
        fake.push_connection_reset();
        fake.push_reply(200, r#"{"code":202}"#);
        let transport = RetryingTransport::new(fake.clone(), RetryPolicy::new(1, 0.0));

        let response = transport.send(&request()).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(fake.requests().len(), 2);
    }

    #[tokio::test]
    async fn retryable_status_is_returned_when_retries_run_out() {
        let fake = FakeTransport::default();
        for _ in 0..3 {
            fake.push_reply(503, "unavailable");
        }
        let transport = RetryingTransport::new(fake.clone(), RetryPolicy::new(2, 0.0));

        let response = transport.send(&request()).await.unwrap();
        assert_eq!(response.status, 503);
        assert_eq!(fake.requests().len(), 3);
    }

    #[tokio::test]
    async fn last_failure_surfaces_after_exhaustion() {
        let fake = FakeTransport::default();
        fake.push_connection_reset();
        fake.push_timeout();
        let transport = RetryingTransport::new(fake.clone(), RetryPolicy::new(1, 0.0));

        let err = transport.send(&request()).await.unwrap_err();
        assert!(matches!(err, TransportFailure::Timeout(_)));
        assert_eq!(fake.requests().len(), 2);
    }

    #[tokio::test]
    async fn non_retryable_status_is_not_retried() {
        let fake = FakeTransport::replying(404, "missing");
        fake.push_reply(200, "{}");
        let transport = RetryingTransport::new(fake.clone(), RetryPolicy::default());

        let response = transport.send(&request()).await.unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(fake.requests().len(), 1);
    }

    #[tokio::test]
    async fn zero_retries_sends_once() {
        let fake = FakeTransport::default();
        fake.push_connection_reset();
        fake.push_reply(200, "{}");
        let transport = RetryingTransport::new(fake.clone(), RetryPolicy::none());

        assert!(transport.send(&request()).await.is_err());
        assert_eq!(fake.requests().len(), 1);
    }

    #[tokio::test]
    async fn retries_apply_to_get_requests_too() {
        let fake = FakeTransport::default();
        fake.push_reply(502, "");
        fake.push_reply(200, r#"{"balance":"10.00"}"#);
        let transport = RetryingTransport::new(fake.clone(), RetryPolicy::new(3, 0.0));
        let get = HttpRequest::get(
            Url::parse("https://example.invalid/api/getBalanceApi").unwrap(),
            vec![("api_key".to_owned(), "key".to_owned())],
        );

        let response = transport.send(&get).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(fake.requests().len(), 2);
    }
}
