// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use finboard::error::TransportError;
use finboard::gateway::{Gateway, Transport};
use serde_json::Value;

pub const URL: &str = "https://sheets.example.test/exec";
pub const KEY: &str = "secret-key";

#[derive(Debug, Clone)]
pub struct Call {
    pub method: &'static str,
    pub action: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Call {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

pub enum Reply {
    Body(String),
    Down,
}

/// Answers per `action` from a queue of canned replies; an action with no
/// reply left behaves like an unreachable host.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, action: &str, body: Value) -> Self {
        self.push(action, Reply::Body(body.to_string()))
    }

    pub fn reply_text(self, action: &str, text: &str) -> Self {
        self.push(action, Reply::Body(text.to_string()))
    }

    pub fn down(self, action: &str) -> Self {
        self.push(action, Reply::Down)
    }

    fn push(self, action: &str, reply: Reply) -> Self {
        self.replies
            .lock()
            .unwrap()
            .entry(action.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    /// Gateway over this transport plus a handle on the recorded calls.
    pub fn into_gateway(self) -> (Gateway, Arc<Mutex<Vec<Call>>>) {
        let calls = self.calls.clone();
        (Gateway::new(Box::new(self), URL, KEY), calls)
    }

    fn answer(&self, call: Call) -> Result<String, TransportError> {
        let action = call.action.clone();
        self.calls.lock().unwrap().push(call);
        let next = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&action)
            .and_then(|q| q.pop_front());
        match next {
            Some(Reply::Body(text)) => Ok(text),
            Some(Reply::Down) | None => Err(TransportError::Unreachable(format!("no route for {}", action))),
        }
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, TransportError> {
        assert_eq!(url, URL);
        let query: Vec<(String, String)> = query
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        let action = query
            .iter()
            .find(|(k, _)| k == "action")
            .map(|(_, v)| v.clone())
            .unwrap_or_default();
        self.answer(Call {
            method: "GET",
            action,
            query,
            body: None,
        })
    }

    fn post_json(&self, url: &str, body: &Value) -> Result<String, TransportError> {
        assert_eq!(url, URL);
        let action = body["action"].as_str().unwrap_or_default().to_string();
        self.answer(Call {
            method: "POST",
            action,
            query: Vec::new(),
            body: Some(body.clone()),
        })
    }
}

pub fn calls_for(calls: &Arc<Mutex<Vec<Call>>>, action: &str) -> Vec<Call> {
    calls
        .lock()
        .unwrap()
        .iter()
        .filter(|c| c.action == action)
        .cloned()
        .collect()
}
