use async_trait::async_trait;
use reqwest::{header, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::application::ports::{RegistryError, RegistryGateway};
use crate::domain::entities::{Repository, Tag};

const MANIFEST_ACCEPT: &str = "application/vnd.docker.distribution.manifest.v2+json, \
     application/vnd.docker.distribution.manifest.list.v2+json, \
     application/vnd.oci.image.manifest.v1+json, \
     application/vnd.oci.image.index.v1+json";

const CONTENT_DIGEST: &str = "docker-content-digest";

/// Error envelope returned by Docker Registry v2 endpoints
#[derive(Debug, Deserialize)]
struct RegistryErrorBody {
    #[serde(default)]
    errors: Vec<RegistryErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct RegistryErrorDetail {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Docker Registry v2 client that removes manifests over HTTP
pub struct HttpRegistryGateway {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl HttpRegistryGateway {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, RegistryError> {
        Url::parse(base_url).map_err(|e| {
            RegistryError::Unreachable(format!("invalid registry URL {}: {}", base_url, e))
        })?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RegistryError::Unreachable(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            timeout,
        })
    }

    fn manifest_url(&self, repository: &Repository, reference: &str) -> String {
        format!(
            "{}/v2/{}/manifests/{}",
            self.base_url,
            repository.full_name(),
            reference
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> RegistryError {
        if e.is_timeout() {
            RegistryError::Timeout(self.timeout)
        } else {
            RegistryError::Unreachable(e.without_url().to_string())
        }
    }

    /// Look up the manifest digest a tag currently points to
    async fn resolve_digest(&self, repository: &Repository, tag: &Tag) -> Result<String, RegistryError> {
        let url = self.manifest_url(repository, tag.name());
        let response = self
            .authorize(self.http.head(&url).header(header::ACCEPT, MANIFEST_ACCEPT))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(RegistryError::ManifestNotFound(format!(
                "{}:{}",
                repository.full_name(),
                tag.name()
            )));
        }
        if !status.is_success() {
            return Err(status_error(status, String::new()));
        }

        response
            .headers()
            .get(CONTENT_DIGEST)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| RegistryError::Remote {
                status: status.as_u16(),
                message: "response carried no Docker-Content-Digest header".to_string(),
            })
    }
}

#[async_trait]
impl RegistryGateway for HttpRegistryGateway {
    async fn delete(&self, repository: &Repository, tag: &Tag) -> Result<(), RegistryError> {
        let digest = if tag.digest().is_empty() {
            self.resolve_digest(repository, tag).await?
        } else {
            tag.digest().as_str().to_string()
        };

        let url = self.manifest_url(repository, &digest);
        debug!(%url, tag = %tag.name(), "deleting manifest");

        let response = self
            .authorize(self.http.delete(&url))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        match status {
            StatusCode::OK | StatusCode::ACCEPTED => Ok(()),
            StatusCode::NOT_FOUND => {
                debug!(%digest, "manifest already absent from registry");
                Ok(())
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                let err = status_error(status, body);
                warn!(%digest, status = status.as_u16(), error = %err, "manifest deletion failed");
                Err(err)
            }
        }
    }
}

fn status_error(status: StatusCode, body: String) -> RegistryError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            RegistryError::Unauthorized(error_message(status, &body))
        }
        StatusCode::METHOD_NOT_ALLOWED => RegistryError::DeleteUnsupported,
        _ => RegistryError::Remote {
            status: status.as_u16(),
            message: error_message(status, &body),
        },
    }
}

/// Human readable message out of a registry error body
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<RegistryErrorBody>(body) {
        let messages: Vec<String> = parsed
            .errors
            .into_iter()
            .map(|e| match (e.code.is_empty(), e.message.is_empty()) {
                (false, false) => format!("{}: {}", e.code, e.message),
                (true, false) => e.message,
                _ => e.code,
            })
            .filter(|m| !m.is_empty())
            .collect();
        if !messages.is_empty() {
            return messages.join(", ");
        }
    }

    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string()
    } else {
        body.to_string()
    }
}
