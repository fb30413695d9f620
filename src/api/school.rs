//! HTTP client for the school attendance API.
//!
//! ## Endpoints
//!
//! - `GET {api_url}/attendance?date=YYYY-MM-DD[&classId=][&page=&pageSize=]`
//! - `GET {api_url}/students[?classId=]`
//! - `GET {api_url}/classes`
//!
//! Requests carry `Authorization: Bearer {auth_token}` when a token is set.

use super::{ApiError, AttendanceQuery, AttendanceSource};
use crate::libs::attendance::{ClassSummary, RosterEntry};
use crate::libs::config::ConfigModule;
use crate::libs::messages::Message;
use crate::libs::normalizer::extract_sequence;
use crate::msg_print;
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const ATTENDANCE_URL: &str = "attendance";
const STUDENTS_URL: &str = "students";
const CLASSES_URL: &str = "classes";

#[derive(Debug, Clone)]
pub struct SchoolApi {
    client: Client,
    config: ApiConfig,
}

impl SchoolApi {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
        }
    }

    fn url(&self, path: &str) -> Result<String, ApiError> {
        let base = self.config.api_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(ApiError::NotConfigured);
        }
        Ok(format!("{}/{}", base, path))
    }

    async fn get_json(&self, path: &str, params: &[(&str, String)]) -> Result<Value, ApiError> {
        let url = self.url(path)?;
        let mut request = self.client.get(&url).query(params);
        if !self.config.auth_token.is_empty() {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", self.config.auth_token));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        tracing::debug!(%url, bytes = body.len(), "school api response");
        Ok(serde_json::from_str(&body)?)
    }
}

impl AttendanceSource for SchoolApi {
    async fn attendance_for_date(&self, query: &AttendanceQuery) -> Result<Value, ApiError> {
        let mut params = vec![("date", query.date.format("%Y-%m-%d").to_string())];
        if let Some(class_id) = query.class_id {
            params.push(("classId", class_id.to_string()));
        }
        if let Some(page) = query.page {
            params.push(("page", page.to_string()));
        }
        if let Some(page_size) = query.page_size {
            params.push(("pageSize", page_size.to_string()));
        }
        self.get_json(ATTENDANCE_URL, &params).await
    }

    async fn roster(&self, class_id: Option<i64>) -> Result<Vec<RosterEntry>, ApiError> {
        let params: Vec<(&str, String)> = class_id.map(|id| ("classId", id.to_string())).into_iter().collect();
        let payload = self.get_json(STUDENTS_URL, &params).await?;
        Ok(extract_sequence(&payload).iter().map(RosterEntry::from_value).collect())
    }

    async fn classes(&self) -> Result<Vec<ClassSummary>, ApiError> {
        let payload = self.get_json(CLASSES_URL, &[]).await?;
        Ok(extract_sequence(&payload).iter().map(ClassSummary::from_value).collect())
    }
}

/// Connection settings for the school API.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub api_url: String,
    pub auth_token: String,
}

impl ApiConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "api".to_string(),
            name: "School API".to_string(),
        }
    }

    pub fn init(config: &Option<ApiConfig>) -> anyhow::Result<Self> {
        let config = config.clone().unwrap_or(Self {
            api_url: "".to_string(),
            auth_token: "".to_string(),
        });
        msg_print!(Message::ConfigModuleApi);
        Ok(Self {
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptApiUrl.to_string())
                .default(config.api_url)
                .interact_text()?,
            auth_token: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptApiToken.to_string())
                .default(config.auth_token)
                .allow_empty(true)
                .interact_text()?,
        })
    }
}
