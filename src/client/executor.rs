use std::time::Duration;

use tracing::{debug, info};

use super::BulkSmsError;
use super::http::{HttpRequest, HttpResponse, HttpTransport, TransportFailure};
use crate::domain::{ApiError, ApiResponse};

/// Send one request through `http` and interpret the reply.
pub(crate) async fn execute(
    http: &dyn HttpTransport,
    request: HttpRequest,
    timeout: Duration,
) -> Result<ApiResponse, BulkSmsError> {
    debug!(
        method = ?request.method,
        endpoint = request.url.path(),
        "sending request"
    );

    let response = http
        .send(&request)
        .await
        .map_err(|failure| map_failure(failure, timeout))?;

    interpret(response)
}

fn map_failure(failure: TransportFailure, timeout: Duration) -> BulkSmsError {
    match failure {
        TransportFailure::Timeout(source) => BulkSmsError::Timeout { timeout, source },
        other => BulkSmsError::Transport(Box::new(other)),
    }
}

/// HTTP status check, envelope decoding and response-code routing.
pub(crate) fn interpret(response: HttpResponse) -> Result<ApiResponse, BulkSmsError> {
    debug!(
        status = response.status,
        body = %response.body,
        "response received"
    );

    if response.status >= 400 {
        return Err(BulkSmsError::HttpStatus {
            status: response.status,
            body: response.body,
        });
    }

    let parsed = crate::transport::decode_envelope(&response.body);
    match parsed.code() {
        Some(code) if code.is_success() => {
            info!(code = %code, "request accepted");
            Ok(parsed)
        }
        Some(code) => Err(BulkSmsError::Api(ApiError::from_response(code, parsed))),
        None => Ok(parsed),
    }
}
