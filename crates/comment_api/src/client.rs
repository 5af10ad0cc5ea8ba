use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use tracing::debug;

use crate::config::CommentApiConfig;
use crate::error::CommentApiError;
use crate::headers::build_headers;
use crate::payload::CommentRequest;
use crate::stream::TextStream;
use crate::url::normalize_endpoint;

/// Raw response body: byte chunks in arrival order, read failures mapped to
/// [`CommentApiError::Stream`].
pub type ResponseBody = BoxStream<'static, Result<Vec<u8>, CommentApiError>>;

#[derive(Debug)]
pub struct CommentApiClient {
    http: Client,
    config: CommentApiConfig,
}

impl CommentApiClient {
    pub fn new(config: CommentApiConfig) -> Result<Self, CommentApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &CommentApiConfig {
        &self.config
    }

    pub fn normalized_endpoint(&self) -> String {
        normalize_endpoint(&self.config.base_url)
    }

    pub fn build_headers(&self) -> Result<HeaderMap, CommentApiError> {
        let mut out = HeaderMap::new();
        for (key, value) in build_headers(&self.config) {
            let name =
                HeaderName::from_bytes(key.as_bytes()).map_err(|_| CommentApiError::InvalidHeader {
                    name: key.clone(),
                    reason: "invalid header name",
                })?;
            let value = HeaderValue::from_str(&value).map_err(|_| CommentApiError::InvalidHeader {
                name: key.clone(),
                reason: "invalid header value",
            })?;
            out.insert(name, value);
        }
        Ok(out)
    }

    pub fn build_request(
        &self,
        request: &CommentRequest,
    ) -> Result<reqwest::RequestBuilder, CommentApiError> {
        let headers = self.build_headers()?;
        Ok(self
            .http
            .post(self.normalized_endpoint())
            .headers(headers)
            .json(request))
    }

    /// Sends the request and waits for response headers.
    ///
    /// Any status outside 2xx fails with [`CommentApiError::Status`] without
    /// reading the body. There is no retry.
    pub async fn send(&self, request: &CommentRequest) -> Result<Response, CommentApiError> {
        let endpoint = self.normalized_endpoint();
        debug!(%endpoint, code_len = request.code.len(), "sending comment request");

        let response = self.build_request(request)?.send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(%status, "comment request rejected");
            return Err(CommentApiError::Status { status });
        }

        debug!(%status, "comment response headers received");
        Ok(response)
    }

    /// Sends the request and returns the raw body stream on success.
    pub async fn submit(&self, request: &CommentRequest) -> Result<ResponseBody, CommentApiError> {
        let response = self.send(request).await?;
        Ok(response
            .bytes_stream()
            .map(|chunk| {
                chunk
                    .map(|bytes| bytes.to_vec())
                    .map_err(|error| CommentApiError::stream(error.to_string()))
            })
            .boxed())
    }

    /// Opens a [`TextStream`] over a successful response.
    pub async fn stream(
        &self,
        request: &CommentRequest,
    ) -> Result<TextStream<ResponseBody>, CommentApiError> {
        Ok(TextStream::open(self.submit(request).await?))
    }

    /// Drains the full response into one string.
    pub async fn collect(&self, request: &CommentRequest) -> Result<String, CommentApiError> {
        let mut stream = self.stream(request).await?;
        let mut out = String::new();
        while let Some(chunk) = stream.next_chunk().await? {
            out.push_str(&chunk);
        }
        Ok(out)
    }
}
