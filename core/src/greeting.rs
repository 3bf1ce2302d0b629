//! Proactive greeting loader.
//!
//! Fetched exactly once when a session opens, before any message is sent.
//! Independent of the message log: clearing the conversation does not
//! re-fetch it.

use async_trait::async_trait;
use tracing::warn;

use crate::errors::OnboardResult;

/// Shown when the greeting endpoint is unreachable or refuses
pub const FALLBACK_GREETING: &str =
    "👋 Xin chào! Em là Trợ lý Onboarding của FPT Software. Em có thể giúp gì cho bạn?";

/// The resolved welcome banner for a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeting {
    pub text: String,
    pub urgent_tasks_count: u32,
}

/// Server side of the greeting fetch; `OnboardClient` is the production
/// implementation.
#[async_trait]
pub trait GreetingSource {
    async fn fetch_greeting(&self, employee_id: &str) -> OnboardResult<Greeting>;
}

/// Fetches the proactive greeting for the configured employee, degrading to
/// the fixed fallback on any failure. Never errors and is not retried.
pub async fn load<S: GreetingSource + ?Sized>(source: &S, employee_id: &str) -> Greeting {
    match source.fetch_greeting(employee_id).await {
        Ok(greeting) => greeting,
        Err(e) => {
            warn!(error = %e, "greeting fetch failed, using fallback");
            Greeting {
                text: FALLBACK_GREETING.to_string(),
                urgent_tasks_count: 0,
            }
        }
    }
}
