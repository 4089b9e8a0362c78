// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Disposal guidance via a chat-completion API.

use crate::error::AppError;
use serde::{Deserialize, Serialize};

const SYSTEM_PROMPT: &str = "You help home cooks deal with spoiled or expired food. \
Given an ingredient name, reply with two or three short sentences on how to dispose of it \
safely, including composting or reuse options when they are safe. Do not suggest eating it.";

const MAX_TOKENS: u32 = 200;

/// Disposal tip response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisposalTip {
    pub tip: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Completion API client for disposal tips.
#[derive(Clone)]
pub struct TipService {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl TipService {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            model,
        }
    }

    /// Ask the completion API how to dispose of `ingredient`.
    pub async fn disposal_tip(&self, ingredient: &str) -> Result<DisposalTip, AppError> {
        const ACTION: &str = "fetch disposal tip";

        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("OPENAI_API_KEY is not set".to_string()))?;

        let user_prompt = format!("Ingredient: {}", ingredient);
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::upstream(ACTION, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(ACTION, format!("HTTP {}: {}", status, body)));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::upstream(ACTION, format!("JSON parse error: {}", e)))?;

        let tip = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| AppError::upstream(ACTION, "completion contained no text"))?;

        tracing::debug!(ingredient, chars = tip.len(), "Disposal tip generated");
        Ok(DisposalTip { tip })
    }
}
