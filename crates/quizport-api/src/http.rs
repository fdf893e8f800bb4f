//! HTTP implementation of the content API.

use async_trait::async_trait;
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use tracing::instrument;

use quizport_core::error::ContentError;
use quizport_core::model::{
    AttemptDetail, AttemptRecord, Credential, Question, Submission, SubjectResult,
};
use quizport_core::traits::ContentApi;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Content API client over HTTP/JSON.
pub struct HttpContentApi {
    base_url: Url,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpContentApi {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ContentError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ContentError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ContentError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ContentError::NetworkError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            timeout_secs,
            client,
        })
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ContentError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ContentError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn transport_error(&self, e: reqwest::Error) -> ContentError {
        if e.is_timeout() {
            ContentError::Timeout(self.timeout_secs)
        } else {
            ContentError::NetworkError(e.to_string())
        }
    }

    async fn get(&self, url: Url, credential: Option<&Credential>) -> Result<Response, ContentError> {
        let mut req = self.client.get(url.clone());
        if let Some(credential) = credential {
            req = req.header("Authorization", credential.bearer());
        }
        let response = req.send().await.map_err(|e| self.transport_error(e))?;
        check_status(response, &url).await
    }
}

async fn check_status(response: Response, url: &Url) -> Result<Response, ContentError> {
    let status = response.status().as_u16();
    match status {
        401 | 403 => {
            let body = response.text().await.unwrap_or_default();
            Err(ContentError::Unauthorized(body))
        }
        404 => Err(ContentError::NotFound(url.path().to_string())),
        s if s >= 400 => {
            let body = response.text().await.unwrap_or_default();
            Err(ContentError::ApiError {
                status: s,
                message: body,
            })
        }
        _ => Ok(response),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ContentError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ContentError::InvalidResponse(format!("failed to parse response: {e}")))
}

#[async_trait]
impl ContentApi for HttpContentApi {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self), fields(base = %self.base_url))]
    async fn fetch_questions(&self, subject: &str) -> Result<Vec<Question>, ContentError> {
        let url = self.endpoint(&["quiz", "questions", subject])?;
        let response = self.get(url, None).await?;
        decode(response).await
    }

    #[instrument(skip(self, credential, submission), fields(subject = %submission.subject))]
    async fn submit_results(
        &self,
        credential: &Credential,
        submission: &Submission,
    ) -> Result<(), ContentError> {
        let url = self.endpoint(&["quiz", "submit"])?;
        let response = self
            .client
            .post(url.clone())
            .header("Authorization", credential.bearer())
            .json(submission)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        // The acknowledgement body carries nothing the caller needs.
        check_status(response, &url).await?;
        Ok(())
    }

    #[instrument(skip(self, credential))]
    async fn history(&self, credential: &Credential) -> Result<Vec<AttemptRecord>, ContentError> {
        let url = self.endpoint(&["quiz", "history"])?;
        let response = self.get(url, Some(credential)).await?;
        decode(response).await
    }

    #[instrument(skip(self, credential))]
    async fn attempt_detail(
        &self,
        credential: &Credential,
        attempt_id: &str,
    ) -> Result<AttemptDetail, ContentError> {
        let url = self.endpoint(&["quiz", "details", attempt_id])?;
        let response = self.get(url, Some(credential)).await?;
        decode(response).await
    }

    #[instrument(skip(self))]
    async fn subject_results(&self, subject: &str) -> Result<Vec<SubjectResult>, ContentError> {
        let url = self.endpoint(&["admin", "results", subject])?;
        let response = self.get(url, None).await?;
        decode(response).await
    }
}
