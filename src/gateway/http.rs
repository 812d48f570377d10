//! Blocking REST client for the report backend.

use super::dto::{
    ErrorBody, EventRequest, EventResponse, EventsEnvelope, LikeDislikeResponse, LoginRequest,
    LoginResponse, PoznanResponse, RegisterRequest,
};
use super::{EventQuery, Gateway};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::event::Event;
use crate::models::reaction::Reaction;
use crate::models::report_type::ReportType;
use crate::models::stop::Stop;
use crate::models::user::{Credentials, User};
use crate::utils::formatting::truncate;
use crate::utils::time::now_millis;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("tramreport/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Self::new(&cfg.api_base_url, Duration::from_secs(cfg.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send the request and turn non-2xx responses into `AppError::Api`.
    fn send(&self, req: RequestBuilder) -> AppResult<Response> {
        let resp = req.send()?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or_else(|_| {
                let text = body.trim();
                if text.is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    truncate(text, 200)
                }
            });

        Err(AppError::Api {
            status: status.as_u16(),
            message,
        })
    }

    fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> AppResult<T> {
        let resp = self.send(req)?;
        let body = resp.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl Gateway for HttpGateway {
    fn fetch_stops(&self) -> AppResult<Vec<Stop>> {
        let items: Vec<PoznanResponse> = self.send_json(self.client.get(self.url("poznan")))?;
        Ok(items.into_iter().map(Stop::from).collect())
    }

    fn fetch_events(&self, query: &EventQuery) -> AppResult<Vec<Event>> {
        let mut req = self.client.get(self.url("events"));
        if let Some(kind) = &query.kind {
            req = req.query(&[("type", kind.as_str())]);
        }
        if let Some(since) = query.since {
            req = req.query(&[("timestamp", since.to_string())]);
        }

        let envelope: EventsEnvelope = self.send_json(req)?;
        let now = now_millis();
        Ok(envelope
            .events
            .into_iter()
            .map(|e| e.into_event(now))
            .collect())
    }

    fn fetch_event(&self, id: &str) -> AppResult<Event> {
        let resp: EventResponse =
            self.send_json(self.client.get(self.url(&format!("events/{}", id))))?;
        Ok(resp.into_event(now_millis()))
    }

    fn submit_event(
        &self,
        stop_id: &str,
        kind: ReportType,
        description: &str,
        token: &str,
    ) -> AppResult<Event> {
        let body = EventRequest {
            stop_id,
            kind: kind.label(),
            description,
        };
        let resp: EventResponse = self.send_json(
            self.client
                .post(self.url("events"))
                .bearer_auth(token)
                .json(&body),
        )?;
        Ok(resp.into_event(now_millis()))
    }

    fn react(&self, event_id: &str, reaction: Reaction, token: &str) -> AppResult<(u32, u32)> {
        let path = format!("events/{}/{}", event_id, reaction.path_segment());
        let resp: LikeDislikeResponse =
            self.send_json(self.client.post(self.url(&path)).bearer_auth(token))?;
        Ok((resp.likes, resp.dislikes))
    }

    fn login(&self, credentials: &Credentials) -> AppResult<(String, User)> {
        let body = LoginRequest {
            username_or_email: &credentials.username_or_email,
            password: &credentials.password,
        };
        let resp: LoginResponse =
            self.send_json(self.client.post(self.url("auth/login")).json(&body))?;
        Ok((resp.token, resp.user))
    }

    fn register(&self, username: &str, email: &str, password: &str) -> AppResult<User> {
        let body = RegisterRequest {
            username,
            email,
            password,
        };
        self.send_json(self.client.post(self.url("auth/register")).json(&body))
    }

    fn logout(&self, token: &str) -> AppResult<()> {
        self.send(self.client.post(self.url("auth/logout")).bearer_auth(token))?;
        Ok(())
    }

    fn me(&self, token: &str) -> AppResult<User> {
        self.send_json(self.client.get(self.url("auth/me")).bearer_auth(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_double_slashes() {
        let gw = HttpGateway::new("http://localhost:8080/v1/", Duration::from_secs(1)).unwrap();
        assert_eq!(gw.base_url(), "http://localhost:8080/v1");
        assert_eq!(gw.url("/events/7/like"), "http://localhost:8080/v1/events/7/like");
        assert_eq!(gw.url("poznan"), "http://localhost:8080/v1/poznan");
    }
}
