//! In-memory gateway serving fixed data. Used by the test suite and for
//! trying the client without a backend.

use super::{EventQuery, Gateway};
use crate::errors::{AppError, AppResult};
use crate::models::event::Event;
use crate::models::reaction::Reaction;
use crate::models::report_type::ReportType;
use crate::models::stop::Stop;
use crate::models::user::{Credentials, User};
use crate::utils::time::now_millis;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

fn api_err(status: u16, message: &str) -> AppError {
    AppError::Api {
        status,
        message: message.to_string(),
    }
}

#[derive(Default)]
pub struct InMemoryGateway {
    stops: RefCell<Vec<Stop>>,
    events: RefCell<Vec<Event>>,
    users: RefCell<Vec<(User, String)>>,
    tokens: RefCell<HashMap<String, String>>, // token → user id
    next_id: Cell<u32>,
    stops_unavailable: Cell<bool>,
}

impl InMemoryGateway {
    pub fn new(stops: Vec<Stop>, events: Vec<Event>) -> Self {
        Self {
            stops: RefCell::new(stops),
            events: RefCell::new(events),
            ..Default::default()
        }
    }

    pub fn add_user(&self, username: &str, email: &str, password: &str) -> User {
        let user = User {
            id: format!("u{}", self.users.borrow().len() + 1),
            username: username.to_string(),
            email: email.to_string(),
            created_at: None,
        };
        self.users
            .borrow_mut()
            .push((user.clone(), password.to_string()));
        user
    }

    /// Make `fetch_stops` fail with 503 until reset.
    pub fn set_stops_unavailable(&self, unavailable: bool) {
        self.stops_unavailable.set(unavailable);
    }

    pub fn replace_stops(&self, stops: Vec<Stop>) {
        *self.stops.borrow_mut() = stops;
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    fn user_for(&self, token: &str) -> AppResult<User> {
        let tokens = self.tokens.borrow();
        let user_id = tokens
            .get(token)
            .ok_or_else(|| api_err(401, "invalid token"))?;
        self.users
            .borrow()
            .iter()
            .find(|(u, _)| &u.id == user_id)
            .map(|(u, _)| u.clone())
            .ok_or_else(|| api_err(401, "invalid token"))
    }

    fn next(&self, prefix: &str) -> String {
        let n = self.next_id.get() + 1;
        self.next_id.set(n);
        format!("{}{}", prefix, n)
    }
}

impl Gateway for InMemoryGateway {
    fn fetch_stops(&self) -> AppResult<Vec<Stop>> {
        if self.stops_unavailable.get() {
            return Err(api_err(503, "stop service unavailable"));
        }
        Ok(self.stops.borrow().clone())
    }

    fn fetch_events(&self, query: &EventQuery) -> AppResult<Vec<Event>> {
        Ok(self
            .events
            .borrow()
            .iter()
            .filter(|e| query.matches(e))
            .cloned()
            .collect())
    }

    fn fetch_event(&self, id: &str) -> AppResult<Event> {
        self.events
            .borrow()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| api_err(404, "event not found"))
    }

    fn submit_event(
        &self,
        stop_id: &str,
        kind: ReportType,
        description: &str,
        token: &str,
    ) -> AppResult<Event> {
        let user = self.user_for(token)?;
        let ev = Event {
            id: self.next("ev"),
            stop_id: stop_id.to_string(),
            kind: kind.label().to_string(),
            description: description.to_string(),
            timestamp: now_millis(),
            created_by: Some(user.id),
            likes: 0,
            dislikes: 0,
        };
        self.events.borrow_mut().push(ev.clone());
        Ok(ev)
    }

    fn react(&self, event_id: &str, reaction: Reaction, token: &str) -> AppResult<(u32, u32)> {
        self.user_for(token)?;
        let mut events = self.events.borrow_mut();
        let ev = events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| api_err(404, "event not found"))?;
        match reaction {
            Reaction::Like => ev.likes += 1,
            Reaction::Dislike => ev.dislikes += 1,
        }
        Ok((ev.likes, ev.dislikes))
    }

    fn login(&self, credentials: &Credentials) -> AppResult<(String, User)> {
        let user = self
            .users
            .borrow()
            .iter()
            .find(|(u, pw)| {
                (u.username == credentials.username_or_email
                    || u.email == credentials.username_or_email)
                    && *pw == credentials.password
            })
            .map(|(u, _)| u.clone())
            .ok_or_else(|| api_err(401, "invalid credentials"))?;

        let token = self.next("tok");
        self.tokens
            .borrow_mut()
            .insert(token.clone(), user.id.clone());
        Ok((token, user))
    }

    fn register(&self, username: &str, email: &str, password: &str) -> AppResult<User> {
        let taken = self
            .users
            .borrow()
            .iter()
            .any(|(u, _)| u.username == username || u.email == email);
        if taken {
            return Err(api_err(409, "user already exists"));
        }
        Ok(self.add_user(username, email, password))
    }

    fn logout(&self, token: &str) -> AppResult<()> {
        self.tokens
            .borrow_mut()
            .remove(token)
            .map(|_| ())
            .ok_or_else(|| api_err(401, "invalid token"))
    }

    fn me(&self, token: &str) -> AppResult<User> {
        self.user_for(token)
    }
}
