// API service layer for communicating with the backend
use flores_shared::api::{ApiRequest, Listed, Method};
use flores_shared::ApiError;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::app_config;

pub type ApiResult<T> = Result<T, ApiError>;

// ============================================
// HTTP CLIENT
// ============================================

pub struct ApiClient;

impl ApiClient {
    fn builder(method: Method, url: &str) -> RequestBuilder {
        match method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Put => Request::put(url),
            Method::Patch => Request::patch(url),
            Method::Delete => Request::delete(url),
        }
    }

    /// Sends a request and returns the response only if it is a 2xx. Other
    /// statuses become `ApiError::Http` carrying the response text.
    pub async fn send(request: &ApiRequest) -> ApiResult<Response> {
        let url = app_config().endpoint(&request.path);
        let builder = Self::builder(request.method, &url);
        log::debug!("{} {}", request.method.as_str(), url);

        let response = match &request.body {
            Some(body) => builder
                .header("Accept", "application/json")
                .json(body)
                .map_err(|e| ApiError::Serialize(e.to_string()))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Http { status, body })
        }
    }

    /// Runs a mutation; the response body is ignored.
    pub async fn execute(request: &ApiRequest) -> ApiResult<()> {
        Self::send(request).await.map(|_| ())
    }

    pub async fn get<T: DeserializeOwned>(path: &str) -> ApiResult<T> {
        let response = Self::send(&ApiRequest::get(path)).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    pub async fn list<T: Listed>() -> ApiResult<Vec<T>> {
        Self::get(&T::list_path()).await
    }
}
