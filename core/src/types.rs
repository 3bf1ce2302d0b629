use serde::{Deserialize, Serialize};

/// Who authored a message. The set is closed: deserializing any other role
/// string fails at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single entry in the conversation log. Immutable once appended.
///
/// `suggested_prompts` is client-side display state; the wire format for an
/// outbound message carries role and content only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing)]
    pub suggested_prompts: Vec<String>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            suggested_prompts: Vec::new(),
        }
    }

    pub fn assistant(content: impl Into<String>, suggested_prompts: Vec<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            suggested_prompts,
        }
    }
}

/// Request body for `POST {base}/api/chat`
#[derive(Serialize, Debug)]
pub struct ChatRequest<'a> {
    pub messages: &'a [Message],
}

/// Assistant payload nested under `response` in a successful chat reply
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssistantReply {
    pub content: String,
    #[serde(default)]
    pub suggested_prompts: Vec<String>,
}

/// Response body for `POST {base}/api/chat`
#[derive(Deserialize, Debug)]
pub struct ChatResponse {
    pub success: bool,
    #[serde(default)]
    pub response: Option<AssistantReply>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Request body for `POST {base}/api/greeting`
#[derive(Serialize, Debug)]
pub struct GreetingRequest<'a> {
    pub employee_id: &'a str,
}

/// Response body for `POST {base}/api/greeting`
#[derive(Deserialize, Debug)]
pub struct GreetingResponse {
    pub success: bool,
    #[serde(default)]
    pub greeting: Option<String>,
    #[serde(default)]
    pub urgent_tasks_count: u32,
    #[serde(default)]
    pub error: Option<String>,
}
