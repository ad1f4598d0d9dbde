use async_trait::async_trait;
use deck_logging::{deck_debug, deck_info};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientSettings;
use crate::error::{ApiError, ApiFailureKind};
use crate::types::{
    ErrorBody, HealthResponse, Job, JobCreateRequest, JobCreateResponse, JobId, JobsEnvelope,
};

/// The API gateway seam. Watchers and mutations only ever talk to this
/// trait, so tests can substitute a scripted backend.
#[async_trait]
pub trait JobsApi: Send + Sync {
    /// `GET /` health probe.
    async fn health(&self) -> Result<HealthResponse, ApiError>;
    /// `GET /jobs`, unwrapped from its `{ jobs: [...] }` envelope.
    async fn list_jobs(&self) -> Result<Vec<Job>, ApiError>;
    /// `GET /jobs/:id`.
    async fn get_job(&self, id: JobId) -> Result<Job, ApiError>;
    /// `POST /jobs`.
    async fn create_job(&self, request: &JobCreateRequest) -> Result<JobCreateResponse, ApiError>;
    /// `GET /jobs/results`.
    async fn list_job_results(&self) -> Result<Vec<Job>, ApiError>;
    /// `GET /jobs/results/:id`.
    async fn get_job_result(&self, id: JobId) -> Result<Job, ApiError>;
}

/// Reqwest-backed [`JobsApi`] carrying the base URL and timeouts.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpApiClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(ApiFailureKind::InvalidBaseUrl, err.to_string()))?;

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(ApiFailureKind::Network, err.to_string()))?;

        deck_info!("API base URL: {base_url}");
        Ok(Self { base_url, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::new(ApiFailureKind::InvalidBaseUrl, err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        deck_debug!("API request: GET {url}");

        let response = self.client.get(url.clone()).send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        deck_debug!("API response: {status} {url}");

        if !status.is_success() {
            return Err(ApiError::new(
                ApiFailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::new(ApiFailureKind::Decode, err.to_string()))
    }
}

#[async_trait]
impl JobsApi for HttpApiClient {
    async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.get_json("/").await
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
        let envelope: JobsEnvelope = self.get_json("/jobs").await?;
        Ok(envelope.jobs)
    }

    async fn get_job(&self, id: JobId) -> Result<Job, ApiError> {
        self.get_json(&format!("/jobs/{id}")).await
    }

    async fn create_job(&self, request: &JobCreateRequest) -> Result<JobCreateResponse, ApiError> {
        let url = self.endpoint("/jobs")?;
        deck_debug!("API request: POST {url} job_name={}", request.job_name);

        let response = self
            .client
            .post(url.clone())
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        deck_debug!("API response: {status} {url}");

        if !status.is_success() {
            let error = ApiError::new(
                ApiFailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            );
            // The backend attaches `{ "error": ... }` to failed creations;
            // surface it so notifications can show the server's own words.
            return match response.json::<ErrorBody>().await {
                Ok(body) => Err(error.with_server_message(body.error)),
                Err(_) => Err(error),
            };
        }

        response
            .json::<JobCreateResponse>()
            .await
            .map_err(|err| ApiError::new(ApiFailureKind::Decode, err.to_string()))
    }

    async fn list_job_results(&self) -> Result<Vec<Job>, ApiError> {
        self.get_json("/jobs/results").await
    }

    async fn get_job_result(&self, id: JobId) -> Result<Job, ApiError> {
        self.get_json(&format!("/jobs/results/{id}")).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiFailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(ApiFailureKind::Decode, err.to_string());
    }
    ApiError::new(ApiFailureKind::Network, err.to_string())
}
