//! GitLab REST v4 host over blocking `reqwest`.
//!
//! Calls are sequential and single-shot: a failed request surfaces as a
//! `HostError` for the project being processed.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use pomguard_core::config::FleetConfig;
use pomguard_core::errors::{FleetError, HostError};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{StatusCode, Url};
use serde::Deserialize;

use super::{FileUpdate, ProjectRef, SourceHost};

/// Connection settings for [`GitLabHost`].
#[derive(Debug, Clone)]
pub struct GitLabConfig {
    /// Instance base URL, without `/api/v4`.
    pub base_url: String,
    pub token: String,
    pub group_id: String,
    pub timeout: Duration,
    pub page_size: u32,
}

impl GitLabConfig {
    pub fn from_fleet_config(config: &FleetConfig) -> Result<Self, FleetError> {
        Ok(Self {
            base_url: config.effective_gitlab_url().to_string(),
            token: config.require_token()?.to_string(),
            group_id: config.require_group_id()?.to_string(),
            timeout: Duration::from_secs(config.effective_timeout_secs()),
            page_size: config.effective_page_size(),
        })
    }
}

/// File payload returned by `GET /projects/:id/repository/files/:path`.
#[derive(Debug, Deserialize)]
struct RepositoryFile {
    content: String,
    #[serde(default)]
    encoding: Option<String>,
}

/// GitLab implementation of [`SourceHost`].
#[derive(Debug)]
pub struct GitLabHost {
    client: Client,
    api: Url,
    token: String,
    group_id: String,
    page_size: u32,
}

impl GitLabHost {
    pub fn new(config: GitLabConfig) -> Result<Self, HostError> {
        let api_str = format!("{}/api/v4/", config.base_url.trim_end_matches('/'));
        let api = Url::parse(&api_str).map_err(|e| HostError::InvalidUrl {
            url: api_str.clone(),
            message: e.to_string(),
        })?;
        if api.cannot_be_a_base() {
            return Err(HostError::InvalidUrl {
                url: api_str,
                message: "not a base URL".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .build()
            .map_err(|e| HostError::Http {
                url: api.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            api,
            token: config.token,
            group_id: config.group_id,
            page_size: config.page_size.clamp(1, 100),
        })
    }

    pub fn from_fleet_config(config: &FleetConfig) -> Result<Self, FleetError> {
        Ok(Self::new(GitLabConfig::from_fleet_config(config)?)?)
    }

    /// `api` joined with URL-encoded path segments (a `/` inside a segment
    /// becomes `%2F`, as the files API requires).
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn send(&self, request: RequestBuilder, url: &Url) -> Result<Response, HostError> {
        tracing::debug!(%url, "gitlab request");
        request
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .map_err(|e| HostError::Http {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    fn ensure_success(response: Response, url: &Url) -> Result<Response, HostError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(HostError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            body: truncate(&body, 200),
        })
    }
}

impl SourceHost for GitLabHost {
    fn list_projects(&self) -> Result<Vec<ProjectRef>, HostError> {
        let mut projects = Vec::new();
        let mut page: u32 = 1;

        loop {
            let mut url = self.endpoint(&["groups", &self.group_id, "projects"]);
            url.query_pairs_mut()
                .append_pair("include_subgroups", "true")
                .append_pair("order_by", "id")
                .append_pair("sort", "asc")
                .append_pair("per_page", &self.page_size.to_string())
                .append_pair("page", &page.to_string());

            let response = Self::ensure_success(self.send(self.client.get(url.clone()), &url)?, &url)?;
            let next_page = response
                .headers()
                .get("x-next-page")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u32>().ok());

            let batch: Vec<ProjectRef> = response.json().map_err(|e| HostError::Decode {
                what: format!("project list page {page}"),
                message: e.to_string(),
            })?;
            tracing::debug!(page, count = batch.len(), "listed projects");
            projects.extend(batch);

            match next_page {
                Some(next) if next > page => page = next,
                _ => break,
            }
        }

        tracing::info!(group = %self.group_id, projects = projects.len(), "group projects listed");
        Ok(projects)
    }

    fn get_file(
        &self,
        project: &ProjectRef,
        path: &str,
        git_ref: &str,
    ) -> Result<Option<String>, HostError> {
        let id = project.id.to_string();
        let mut url = self.endpoint(&["projects", &id, "repository", "files", path]);
        url.query_pairs_mut().append_pair("ref", git_ref);

        let response = self.send(self.client.get(url.clone()), &url)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let file: RepositoryFile = Self::ensure_success(response, &url)?
            .json()
            .map_err(|e| HostError::Decode {
                what: format!("{path} in {}", project.name),
                message: e.to_string(),
            })?;

        decode_content(&file, path).map(Some)
    }

    fn update_file(&self, project: &ProjectRef, update: &FileUpdate) -> Result<(), HostError> {
        let id = project.id.to_string();
        let url = self.endpoint(&["projects", &id, "repository", "files", &update.path]);
        let response = self.send(self.client.put(url.clone()).json(update), &url)?;
        Self::ensure_success(response, &url)?;
        tracing::info!(project = %project.name, path = %update.path, branch = %update.branch, "file updated");
        Ok(())
    }
}

fn decode_content(file: &RepositoryFile, path: &str) -> Result<String, HostError> {
    let bytes = match file.encoding.as_deref() {
        Some("base64") | None => {
            let compact: String = file.content.split_whitespace().collect();
            STANDARD.decode(compact).map_err(|e| HostError::Decode {
                what: path.to_string(),
                message: e.to_string(),
            })?
        }
        Some("text") => file.content.clone().into_bytes(),
        Some(other) => {
            return Err(HostError::Decode {
                what: path.to_string(),
                message: format!("unsupported encoding `{other}`"),
            })
        }
    };
    String::from_utf8(bytes).map_err(|e| HostError::Decode {
        what: path.to_string(),
        message: e.to_string(),
    })
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}
