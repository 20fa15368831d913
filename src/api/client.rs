//! HTTP client for the marketplace API

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::{Result, VeilaError};
use crate::schemas::dates::format_due_date;
use crate::schemas::{
    Config, Milestone, NewTask, Page, PageRequest, ProgressStatus, Task, TaskPatch,
};

use super::envelope::{decode_empty, decode_item, decode_page};
use super::MilestoneApi;

/// Connection settings, passed explicitly rather than read from globals
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ApiSettings {
    pub fn from_config(config: &Config) -> Self {
        ApiSettings {
            base_url: config.api_base_url.clone(),
            token: config.api_token.clone(),
            timeout: Duration::from_secs(u64::from(config.timeout_seconds.max(1))),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DueDateBody {
    due_date: String,
}

#[derive(Debug, Serialize)]
struct StatusBody {
    status: ProgressStatus,
}

/// [`MilestoneApi`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpMilestoneApi {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpMilestoneApi {
    pub fn new(settings: ApiSettings) -> Result<Self> {
        let base_url = Url::parse(&settings.base_url).map_err(|e| {
            VeilaError::ConfigError(format!("invalid api_base_url '{}': {}", settings.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(VeilaError::ConfigError(format!(
                "api_base_url '{}' cannot be used as a base URL",
                settings.base_url
            )));
        }

        let http = Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("veila/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| VeilaError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            token: settings.token,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(ApiSettings::from_config(config))
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| VeilaError::ConfigError("api_base_url cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("api request {} {}", method, url);
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and hand back the status code and raw body
    async fn send(&self, builder: RequestBuilder) -> Result<(u16, String)> {
        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;
        if !(200..300).contains(&status) {
            warn!(status, "api request rejected");
        }
        Ok((status, body))
    }
}

fn map_reqwest_error(e: reqwest::Error) -> VeilaError {
    if e.is_timeout() {
        VeilaError::Network("request timed out".to_string())
    } else {
        VeilaError::Network(e.to_string())
    }
}

#[async_trait]
impl MilestoneApi for HttpMilestoneApi {
    async fn list_milestones(&self, order_id: &str, page: &PageRequest) -> Result<Page<Milestone>> {
        let url = self.url(&["orders", order_id, "milestones"])?;
        let (status, body) = self
            .send(self.request(Method::GET, url).query(&page.query()))
            .await?;
        decode_page(status, &body)?.into_result()
    }

    async fn update_milestone_due_date(
        &self,
        milestone_id: &str,
        due: NaiveDate,
    ) -> Result<Milestone> {
        let url = self.url(&["milestones", milestone_id])?;
        let body = DueDateBody {
            due_date: format_due_date(due),
        };
        let (status, body) = self.send(self.request(Method::PUT, url).json(&body)).await?;
        decode_item(status, &body)?.into_result()
    }

    async fn transition_milestone_status(
        &self,
        milestone_id: &str,
        status: ProgressStatus,
    ) -> Result<()> {
        let url = self.url(&["milestones", milestone_id, "status"])?;
        let (code, body) = self
            .send(self.request(Method::PUT, url).json(&StatusBody { status }))
            .await?;
        decode_empty(code, &body).into_result()
    }

    async fn list_milestone_tasks(
        &self,
        milestone_id: &str,
        page: &PageRequest,
    ) -> Result<Page<Task>> {
        let url = self.url(&["milestones", milestone_id, "tasks"])?;
        let (status, body) = self
            .send(self.request(Method::GET, url).query(&page.query()))
            .await?;
        decode_page(status, &body)?.into_result()
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task> {
        let url = self.url(&["milestones", task.milestone_id.as_str(), "tasks"])?;
        let (status, body) = self.send(self.request(Method::POST, url).json(task)).await?;
        decode_item(status, &body)?.into_result()
    }

    async fn update_task(
        &self,
        milestone_id: &str,
        task_id: &str,
        patch: &TaskPatch,
    ) -> Result<Task> {
        let url = self.url(&["milestones", milestone_id, "tasks", task_id])?;
        let (status, body) = self.send(self.request(Method::PUT, url).json(patch)).await?;
        decode_item(status, &body)?.into_result()
    }

    async fn transition_task_status(
        &self,
        milestone_id: &str,
        task_id: &str,
        status: ProgressStatus,
    ) -> Result<()> {
        let url = self.url(&["milestones", milestone_id, "tasks", task_id, "status"])?;
        let (code, body) = self
            .send(self.request(Method::PUT, url).json(&StatusBody { status }))
            .await?;
        decode_empty(code, &body).into_result()
    }
}
