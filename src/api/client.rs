//! REST client for the cues backend.
//!
//! Authenticated requests run through a one-shot refresh state machine:
//! request → 401 → refresh → retry once → give up. The retry is tracked by
//! an explicit flag on the request context, and giving up clears the
//! persisted session.

use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::{Error, Result};

use super::session::{Session, SessionStore};
use super::types::{NewTask, Project, Task, TaskPatch, User};

/// Client for the cues REST API.
pub struct ApiClient {
    http: Client,
    base: Url,
    sessions: SessionStore,
}

/// One in-flight authenticated request, with the one-shot retry flag.
struct RequestContext {
    method: Method,
    path: String,
    body: Option<Value>,
    retried: bool,
}

impl ApiClient {
    /// Create a client for the given base URL, using `sessions` for the
    /// session lifecycle.
    pub fn new(base_url: &str, sessions: SessionStore) -> Result<Self> {
        let mut base = Url::parse(base_url)
            .map_err(|err| Error::Config(format!("invalid base URL {base_url}: {err}")))?;
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        let http = Client::builder().user_agent(Self::user_agent()).build()?;
        Ok(Self {
            http,
            base,
            sessions,
        })
    }

    /// User agent sent with every request.
    pub fn user_agent() -> &'static str {
        concat!("cues/", env!("CARGO_PKG_VERSION"))
    }

    /// Get the session store backing this client.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Get the current session, if one is persisted.
    pub fn session(&self) -> Option<Session> {
        self.sessions.load()
    }

    // ---- auth ----

    /// Log in with a username or e-mail address.
    ///
    /// An identity containing `@` is sent as `email`, otherwise as
    /// `username`. On success the session is persisted and returned.
    pub async fn login(&self, identity: &str, password: &str) -> Result<Session> {
        let body = login_body(identity, password);
        let value = self
            .execute(Method::POST, "auth/login", Some(body), None)
            .await?;
        self.establish(value).await
    }

    /// Create an account and log in.
    pub async fn signup(&self, username: &str, email: &str, password: &str) -> Result<Session> {
        let body = json!({ "username": username, "email": email, "password": password });
        let value = self
            .execute(Method::POST, "auth/signup", Some(body), None)
            .await?;
        self.establish(value).await
    }

    /// Log out. The server call is best-effort; the local session is
    /// cleared regardless.
    pub async fn logout(&self) -> Result<()> {
        if let Some(session) = self.sessions.load() {
            let result = self
                .execute(
                    Method::POST,
                    "auth/logout",
                    None,
                    Some(&session.access_token),
                )
                .await;
            if let Err(err) = result {
                log::debug!("logout request failed: {}", err);
            }
        }
        self.sessions.clear()
    }

    /// Fetch the user for the current session.
    pub async fn current_user(&self) -> Result<User> {
        let value = self.authed(Method::GET, "auth/user", None).await?;
        entity(&value, "user")
    }

    // ---- projects ----

    /// List the user's projects.
    pub async fn projects(&self) -> Result<Vec<Project>> {
        let value = self.authed(Method::GET, "projects", None).await?;
        entity(&value, "projects")
    }

    /// Create a project.
    pub async fn create_project(&self, name: &str) -> Result<Project> {
        let value = self
            .authed(Method::POST, "projects/new", Some(json!({ "name": name })))
            .await?;
        entity(&value, "project")
    }

    /// Rename a project.
    pub async fn rename_project(&self, id: i64, name: &str) -> Result<Project> {
        let value = self
            .authed(
                Method::PUT,
                &format!("projects/{id}"),
                Some(json!({ "name": name })),
            )
            .await?;
        entity(&value, "project")
    }

    /// Delete a project; the server also deletes its tasks.
    pub async fn delete_project(&self, id: i64) -> Result<Project> {
        let value = self
            .authed(Method::DELETE, &format!("projects/{id}"), None)
            .await?;
        entity(&value, "project")
    }

    // ---- tasks ----

    /// List all of the user's tasks, across projects.
    pub async fn tasks(&self) -> Result<Vec<Task>> {
        let value = self.authed(Method::GET, "tasks", None).await?;
        entity(&value, "tasks")
    }

    /// Create a task.
    pub async fn create_task(&self, new: &NewTask) -> Result<Task> {
        let value = self
            .authed(Method::POST, "tasks/new", Some(serde_json::to_value(new)?))
            .await?;
        entity(&value, "task")
    }

    /// Apply a partial update to a task.
    pub async fn update_task(&self, id: i64, patch: &TaskPatch) -> Result<Task> {
        let value = self
            .authed(
                Method::PUT,
                &format!("tasks/{id}"),
                Some(serde_json::to_value(patch)?),
            )
            .await?;
        entity(&value, "task")
    }

    /// Delete a task.
    pub async fn delete_task(&self, id: i64) -> Result<Task> {
        let value = self
            .authed(Method::DELETE, &format!("tasks/{id}"), None)
            .await?;
        entity(&value, "task")
    }

    // ---- plumbing ----

    /// Run an authenticated request through the refresh state machine.
    async fn authed(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let mut session = self.sessions.load().ok_or(Error::Unauthorized)?;
        let mut ctx = RequestContext {
            method,
            path: path.to_string(),
            body,
            retried: false,
        };

        loop {
            let response = self.send(&ctx, &session.access_token).await?;
            if response.status() == StatusCode::UNAUTHORIZED {
                if ctx.retried {
                    self.sessions.clear()?;
                    return Err(Error::Unauthorized);
                }
                ctx.retried = true;
                match self.refresh(&session).await {
                    Ok(renewed) => {
                        log::debug!("access token refreshed, retrying {}", ctx.path);
                        session = renewed;
                        continue;
                    }
                    Err(err) => {
                        log::debug!("token refresh failed: {}", err);
                        self.sessions.clear()?;
                        return Err(Error::Unauthorized);
                    }
                }
            }
            return decode(response).await;
        }
    }

    async fn send(&self, ctx: &RequestContext, token: &str) -> Result<Response> {
        let mut request = self
            .http
            .request(ctx.method.clone(), self.url(&ctx.path)?)
            .bearer_auth(token);
        if let Some(body) = &ctx.body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    /// Exchange the refresh token (or the stale access token) for a new
    /// access token and persist the renewed session.
    async fn refresh(&self, session: &Session) -> Result<Session> {
        let token = session
            .refresh_token
            .as_deref()
            .unwrap_or(&session.access_token);
        let value = self
            .execute(Method::POST, "auth/refresh", None, Some(token))
            .await?;

        let mut renewed = session.clone();
        renewed.access_token = entity(&value, "accessToken")?;
        if let Some(refresh) = value.get("refreshToken").and_then(Value::as_str) {
            renewed.refresh_token = Some(refresh.to_string());
        }
        self.sessions.save(&renewed)?;
        Ok(renewed)
    }

    /// Build and persist a session from a login/signup response: take the
    /// access token, then fetch the user it belongs to.
    async fn establish(&self, value: Value) -> Result<Session> {
        let access_token: String = entity(&value, "accessToken")?;
        let refresh_token = value
            .get("refreshToken")
            .and_then(Value::as_str)
            .map(str::to_string);

        let user_value = self
            .execute(Method::GET, "auth/user", None, Some(&access_token))
            .await?;
        let user: User = entity(&user_value, "user")?;

        let mut session = Session::new(access_token, user);
        session.refresh_token = refresh_token;
        self.sessions.save(&session)?;
        Ok(session)
    }

    /// Run a request outside the refresh machinery, optionally with an
    /// explicit bearer token.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Result<Value> {
        let mut request = self.http.request(method, self.url(path)?);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }
        decode(request.send().await?).await
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|err| Error::Config(format!("invalid request path {path}: {err}")))
    }
}

/// Identities containing `@` log in by e-mail, otherwise by username.
fn login_body(identity: &str, password: &str) -> Value {
    if identity.contains('@') {
        json!({ "email": identity, "password": password })
    } else {
        json!({ "username": identity, "password": password })
    }
}

/// Decode a response body, surfacing `error`/`message` payloads as
/// [`Error::Api`].
async fn decode(response: Response) -> Result<Value> {
    let status = response.status();
    let bytes = response.bytes().await?;
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    if let Some(message) = failure_of(&value) {
        return Err(Error::Api(message));
    }
    if !status.is_success() {
        return Err(Error::Api(format!("unexpected status {status}")));
    }
    Ok(value)
}

/// Extract the entity payload under `key`; anything else is a failed call.
fn entity<T: DeserializeOwned>(value: &Value, key: &str) -> Result<T> {
    match value.get(key) {
        Some(found) if !found.is_null() => Ok(serde_json::from_value(found.clone())?),
        _ => Err(Error::Api(
            failure_of(value).unwrap_or_else(|| format!("response is missing `{key}`")),
        )),
    }
}

/// The `error` field wins over `message` when both are present.
fn failure_of(value: &Value) -> Option<String> {
    let error = value.get("error").and_then(Value::as_str);
    let message = value.get("message").and_then(Value::as_str);
    error.or(message).map(str::to_string)
}
