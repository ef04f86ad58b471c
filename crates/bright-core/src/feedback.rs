//! Feedback on entry content.
//!
//! Online, feedback comes from `POST /api/feedback`. Offline there is no
//! server, so a short comment is composed locally from word count and a few
//! keywords.

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::models::EntryId;
use crate::session::Session;

#[derive(Debug, Clone)]
pub enum FeedbackRequester {
    Remote { api: ApiClient, session: Session },
    Local,
}

impl FeedbackRequester {
    pub const fn remote(api: ApiClient, session: Session) -> Self {
        Self::Remote { api, session }
    }

    /// Request feedback for `content`, optionally tied to a stored entry.
    ///
    /// Blank content is rejected before anything is sent. The session token
    /// is attached when present but not required. Results are not cached.
    pub async fn request_feedback(
        &self,
        entry_id: Option<&EntryId>,
        content: &str,
    ) -> Result<String> {
        if content.trim().is_empty() {
            return Err(Error::validation("Content is required for feedback"));
        }

        match self {
            Self::Remote { api, session } => {
                let token = session.token();
                api.request_feedback(token.as_ref(), entry_id, content).await
            }
            Self::Local => Ok(compose_local_feedback(content)),
        }
    }
}

/// Compose feedback without a server: a remark on length plus one insight.
pub fn compose_local_feedback(content: &str) -> String {
    let word_count = content.split_whitespace().count();
    let base = match word_count {
        0..=19 => {
            "Your reflection is quite brief. Consider expanding on your thoughts to gain deeper insights."
        }
        20..=49 => {
            "You've made a good start. Try to connect these ideas to your previous knowledge."
        }
        50..=99 => {
            "This is a thoughtful reflection. Consider how you might apply these learnings in practice."
        }
        _ => {
            "Your detailed reflection shows deep engagement with the material. Consider what specific actions you can take based on these insights."
        }
    };

    let lowered = content.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|word| lowered.contains(word));
    let insight = if mentions(&["learned", "discovered"]) {
        "Your focus on new discoveries is valuable for building knowledge."
    } else if mentions(&["challenge", "difficult"]) {
        "Reflecting on challenges helps build resilience and problem-solving skills."
    } else if mentions(&["connect", "relate"]) {
        "Making connections between concepts strengthens your understanding."
    } else {
        "Regular reflection like this builds self-awareness and metacognition."
    };

    format!("{base} {insight}")
}
