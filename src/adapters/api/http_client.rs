use std::future::Future;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::app_config::ApiSection;
use crate::core::errors::{IssueLensError, Result};
use crate::core::models::event::EventRecord;
use crate::core::models::member::{CurrentUser, Member, UserId};
use crate::core::models::notification::{NewNotification, Notification};
use crate::core::models::project::{NewProject, RemoteProject};
use crate::core::traits::admin::AdminApi;
use crate::core::traits::event_source::EventSource;
use crate::core::traits::membership::MembershipApi;

/// Blocking facade over the backend's REST API.
///
/// Every call spins a current-thread runtime, awaits one request and
/// returns. There is no retry and no de-duplication of in-flight calls.
pub struct ApiClient {
    base_url: String,
    cookie: Option<String>,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: &str, session_cookie: &str, session: Option<&str>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            cookie: session
                .filter(|s| !s.is_empty())
                .map(|s| format!("{session_cookie}={s}")),
            timeout,
        }
    }

    /// Build a client from `[api]`; an explicit `base_url` wins over the
    /// configured one.
    pub fn from_config(section: &ApiSection, base_url: Option<&str>, session: Option<&str>) -> Self {
        Self::new(
            base_url.unwrap_or(&section.base_url),
            &section.session_cookie,
            session,
            Duration::from_secs(section.timeout_secs),
        )
    }

    /// Absolute URL for an `/api/...` path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// The account the session belongs to.
    pub fn current_user(&self) -> Result<CurrentUser> {
        self.get_json("auth/me")
    }

    fn build_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(format!("issuelens/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| IssueLensError::ApiRequestFailed {
                endpoint: self.base_url.clone(),
                reason: format!("Failed to create HTTP client: {e}"),
            })
    }

    fn block_on<F, T>(&self, endpoint: &str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| IssueLensError::ApiRequestFailed {
                endpoint: endpoint.to_string(),
                reason: format!("Failed to create async runtime: {e}"),
            })?;
        rt.block_on(fut)
    }

    /// Request with the JSON accept header and the session cookie.
    fn request(&self, client: &reqwest::Client, method: Method, url: &str) -> RequestBuilder {
        debug!(%method, url, "api request");
        let request = client.request(method, url).header("Accept", "application/json");
        match &self.cookie {
            Some(cookie) => request.header("Cookie", cookie),
            None => request,
        }
    }

    /// Send one request and hand back the successful response.
    async fn dispatch(&self, url: &str, request: RequestBuilder) -> Result<reqwest::Response> {
        let resp = request
            .send()
            .await
            .map_err(|e| IssueLensError::ApiRequestFailed {
                endpoint: url.to_string(),
                reason: e.to_string(),
            })?;

        check_status(url, resp.status())?;
        Ok(resp)
    }

    async fn read_json<T: DeserializeOwned>(url: &str, resp: reqwest::Response) -> Result<T> {
        resp.json::<T>()
            .await
            .map_err(|e| IssueLensError::ApiRequestFailed {
                endpoint: url.to_string(),
                reason: format!("Unexpected response body: {e}"),
            })
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path);
        self.block_on(&url, async {
            let client = self.build_client()?;
            let resp = self
                .dispatch(&url, self.request(&client, Method::GET, &url))
                .await?;
            Self::read_json(&url, resp).await
        })
    }

    fn send_json<B: Serialize, T: DeserializeOwned>(&self, method: Method, path: &str, body: &B) -> Result<T> {
        let url = self.endpoint(path);
        self.block_on(&url, async {
            let client = self.build_client()?;
            let request = self.request(&client, method, &url).json(body);
            let resp = self.dispatch(&url, request).await?;
            Self::read_json(&url, resp).await
        })
    }

    /// Request whose response body is ignored.
    fn call(&self, method: Method, path: &str) -> Result<()> {
        let url = self.endpoint(path);
        self.block_on(&url, async {
            let client = self.build_client()?;
            self.dispatch(&url, self.request(&client, method, &url))
                .await?;
            Ok::<(), IssueLensError>(())
        })
    }
}

/// Map a response status to the crate's error kinds.
fn check_status(url: &str, status: StatusCode) -> Result<()> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(IssueLensError::Unauthorized {
            endpoint: url.to_string(),
        });
    }
    if !status.is_success() {
        return Err(IssueLensError::ApiRequestFailed {
            endpoint: url.to_string(),
            reason: format!("HTTP {status}"),
        });
    }
    Ok(())
}

impl EventSource for ApiClient {
    fn fetch_events(&self) -> Result<Vec<EventRecord>> {
        self.get_json("events")
    }

    fn describe(&self) -> String {
        self.endpoint("events")
    }
}

impl MembershipApi for ApiClient {
    fn list_members(&self, project_uuid: &str) -> Result<Vec<Member>> {
        self.get_json(&format!("projects/{project_uuid}/members"))
    }

    fn add_member(&self, project_uuid: &str, user_id: UserId) -> Result<()> {
        self.call(Method::POST, &format!("projects/{project_uuid}/members/{user_id}"))
    }

    fn remove_member(&self, project_uuid: &str, user_id: UserId) -> Result<()> {
        self.call(
            Method::DELETE,
            &format!("projects/{project_uuid}/members/{user_id}"),
        )
    }
}

// Collection routes are mounted with a trailing slash on the backend.
impl AdminApi for ApiClient {
    fn list_projects(&self) -> Result<Vec<RemoteProject>> {
        self.get_json("projects/")
    }

    fn create_project(&self, project: &NewProject) -> Result<()> {
        self.send_json::<_, serde_json::Value>(Method::POST, "projects/", project)
            .map(|_| ())
    }

    fn delete_project(&self, uuid: &str) -> Result<()> {
        self.call(Method::DELETE, &format!("projects/{uuid}"))
    }

    fn list_notifications(&self) -> Result<Vec<Notification>> {
        self.get_json("notifications/")
    }

    fn create_notification(&self, notification: &NewNotification) -> Result<Notification> {
        self.send_json(Method::POST, "notifications/", notification)
    }

    fn delete_notification(&self, id: i64) -> Result<()> {
        self.call(Method::DELETE, &format!("notifications/{id}"))
    }

    fn list_users(&self) -> Result<Vec<Member>> {
        self.get_json("users/")
    }
}
