use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;

use url::Url;

pub(crate) type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone)]
pub(crate) struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub form: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: Url, query: Vec<(String, String)>) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            form: Vec::new(),
            query,
        }
    }

    pub fn post_form(url: Url, form: Vec<(String, String)>) -> Self {
        Self {
            method: HttpMethod::Post,
            url,
            form,
            query: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// A request that never produced an HTTP response.
#[derive(Debug, thiserror::Error)]
pub(crate) enum TransportFailure {
    #[error("request timed out: {0}")]
    Timeout(#[source] Box<dyn StdError + Send + Sync>),

    #[error("connection error: {0}")]
    Connect(#[source] Box<dyn StdError + Send + Sync>),

    #[error("request error: {0}")]
    Request(#[source] Box<dyn StdError + Send + Sync>),
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(Box::new(err))
        } else if err.is_connect() {
            Self::Connect(Box::new(err))
        } else {
            Self::Request(Box::new(err))
        }
    }
}

pub(crate) trait HttpTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        request: &'a HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportFailure>>;
}

#[derive(Debug, Clone)]
pub(crate) struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(
        &'a self,
        request: &'a HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportFailure>> {
        Box::pin(async move {
            let mut builder = match request.method {
                HttpMethod::Get => self.client.get(request.url.clone()),
                HttpMethod::Post => self.client.post(request.url.clone()).form(&request.form),
            };
            if !request.query.is_empty() {
                builder = builder.query(&request.query);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}
