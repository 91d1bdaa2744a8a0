//! REST [`Backend`] implementation.

mod impls;

use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::infra::Backend;
use crate::{
    domain::user::session::Token,
    infra::backend::{Authorize, Error, ErrorKind, Operation},
};

/// [`Rest`] client configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Base URL of the backend, without the `/api` prefix.
    #[default("http://localhost:8080".to_owned())]
    pub base_url: String,

    /// Timeout of a single request.
    ///
    /// [`None`] leaves the HTTP client default.
    pub timeout: Option<Duration>,
}

/// REST [`Backend`] client.
///
/// Cloning is cheap: clones share the same connection pool.
#[derive(Clone, Debug)]
pub struct Rest {
    /// Underlying HTTP client.
    client: reqwest::Client,

    /// Base URL of the API endpoints, ending with `/api`.
    api_url: String,

    /// Bearer [`Token`] attached to every request, if any.
    token: Option<Token>,
}

impl Rest {
    /// Creates a new anonymous [`Rest`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the underlying HTTP client cannot be initialized.
    pub fn new(conf: &Config) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = conf.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            api_url: format!("{}/api", conf.base_url.trim_end_matches('/')),
            token: None,
        })
    }

    /// Returns the full URL of the provided `path` relative to the `/api/`
    /// prefix.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    /// Starts a new request to the provided `path`, attaching the [`Token`]
    /// if there is one.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Sends the provided request, returning the response body of a 2xx
    /// response.
    ///
    /// `404` is returned as [`None`] if `not_found_is_none` is set.
    async fn send(
        &self,
        operation: Operation,
        req: RequestBuilder,
        not_found_is_none: bool,
    ) -> Result<Option<Vec<u8>>, Traced<Error>> {
        let req = req
            .build()
            .map_err(|e| tracerr::new!(Error::new(operation, e)))?;
        log::debug!(method = %req.method(), url = %req.url(), "{operation}");

        let resp = self
            .client
            .execute(req)
            .await
            .map_err(|e| tracerr::new!(Error::new(operation, e)))?;
        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| tracerr::new!(Error::new(operation, e)))?;

        if status.is_success() {
            return Ok(Some(body.to_vec()));
        }
        if not_found_is_none && status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        log::warn!(
            status = status.as_u16(),
            body = %String::from_utf8_lossy(&body),
            "{operation} failed",
        );
        Err(tracerr::new!(Error::new(
            operation,
            ErrorKind::from_status(status.as_u16()),
        )))
    }

    /// Sends the provided request, decoding the JSON body of its 2xx response.
    async fn json<T: DeserializeOwned>(
        &self,
        operation: Operation,
        req: RequestBuilder,
    ) -> Result<T, Traced<Error>> {
        let body = self
            .send(operation, req, false)
            .await
            .map_err(tracerr::wrap!())?
            .unwrap_or_default();
        decode(operation, &body)
    }

    /// Sends the provided request, ignoring the body of its 2xx response.
    async fn unit(
        &self,
        operation: Operation,
        req: RequestBuilder,
    ) -> Result<(), Traced<Error>> {
        self.send(operation, req, false)
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl Authorize for Rest {
    fn authorized(&self, token: Token) -> Self {
        Self {
            token: Some(token),
            ..self.clone()
        }
    }

    fn anonymous(&self) -> Self {
        Self {
            token: None,
            ..self.clone()
        }
    }
}

/// Decodes the provided JSON `body` of an [`Operation`] response.
fn decode<T: DeserializeOwned>(
    operation: Operation,
    body: &[u8],
) -> Result<T, Traced<Error>> {
    serde_json::from_slice(body).map_err(|e| {
        log::warn!(
            body = %String::from_utf8_lossy(body),
            "{operation} returned malformed body: {e}",
        );
        tracerr::new!(Error::new(operation, e))
    })
}
