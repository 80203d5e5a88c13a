//! Conversation controller: one chat session's transcript and turn-taking.
//!
//! ```text
//! Idle --submit(text)--> AwaitingReply --resolve(result)--> Idle
//! ```
//!
//! Pure state: no I/O happens here except through the `CompletionClient` passed
//! to `send`. While `AwaitingReply` the input is locked and a loading placeholder
//! sits after the user message that triggered the request.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::chat::prompts::{CHAT_FALLBACK, CHAT_SYSTEM_TEMPLATE};
use crate::context::ResumeContext;
use crate::llm_client::prompts::{fill_resume_template, GROUNDING_INSTRUCTION};
use crate::llm_client::{CompletionClient, CompletionRequest, CompletionResult};
use crate::models::chat::{ChatMessage, Role};
use crate::models::submission::Submission;
use crate::render::markdown_to_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatState {
    Idle,
    AwaitingReply,
}

/// A transcript position as the page shows it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TranscriptEntry<'a> {
    Message(&'a ChatMessage),
    /// Presentation cue only; never stored in the transcript.
    Loading,
}

/// Rendering snapshot handed to the page.
#[derive(Debug, Clone, Serialize)]
pub struct ChatView {
    pub state: ChatState,
    pub input_enabled: bool,
    pub entries: Vec<ChatEntryView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChatEntryView {
    Message {
        role: Role,
        text: String,
        html: String,
        created_at: DateTime<Utc>,
    },
    Loading,
}

#[derive(Debug, Clone)]
pub struct ConversationController {
    context: ResumeContext,
    transcript: Vec<ChatMessage>,
    state: ChatState,
}

impl ConversationController {
    pub fn new(context: ResumeContext) -> Self {
        Self {
            context,
            transcript: Vec::new(),
            state: ChatState::Idle,
        }
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    /// The input surface is enabled iff no request is outstanding.
    pub fn input_enabled(&self) -> bool {
        self.state == ChatState::Idle
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Transcript plus the loading placeholder while a reply is pending.
    pub fn entries(&self) -> Vec<TranscriptEntry<'_>> {
        let mut entries: Vec<_> = self.transcript.iter().map(TranscriptEntry::Message).collect();
        if self.state == ChatState::AwaitingReply {
            entries.push(TranscriptEntry::Loading);
        }
        entries
    }

    pub fn system_instruction(&self) -> String {
        let persona = fill_resume_template(
            CHAT_SYSTEM_TEMPLATE,
            self.context.subject_name(),
            self.context.as_json(),
        );
        format!("{persona}\n{GROUNDING_INSTRUCTION}")
    }

    /// `Idle --submit--> AwaitingReply`. Appends the trimmed user message and
    /// returns the request to send. Blank input and submits while awaiting a
    /// reply change nothing.
    pub fn submit(&mut self, text: &str) -> Submission {
        let text = text.trim();
        if text.is_empty() {
            debug!("Ignoring blank chat input");
            return Submission::Blank;
        }
        if self.state == ChatState::AwaitingReply {
            debug!("Chat input refused: reply still pending");
            return Submission::Busy;
        }

        self.transcript.push(ChatMessage::user(text));
        self.state = ChatState::AwaitingReply;

        Submission::Started(CompletionRequest {
            prompt: text.to_string(),
            system_instruction: self.system_instruction(),
        })
    }

    /// `AwaitingReply --resolve--> Idle`. Appends the reply, or the fallback on
    /// failure, and unlocks the input. Returns `None` if nothing was pending.
    pub fn resolve(&mut self, result: CompletionResult) -> Option<&ChatMessage> {
        if self.state != ChatState::AwaitingReply {
            warn!("Chat result arrived with no pending request; dropped");
            return None;
        }

        let reply = match result {
            CompletionResult::Success(text) => text,
            CompletionResult::Unavailable => CHAT_FALLBACK.to_string(),
        };
        self.transcript.push(ChatMessage::assistant(reply));
        self.state = ChatState::Idle;
        self.transcript.last()
    }

    /// Full turn: submit, call the client, resolve.
    pub async fn send(
        &mut self,
        client: &dyn CompletionClient,
        text: &str,
    ) -> Option<&ChatMessage> {
        let request = match self.submit(text) {
            Submission::Started(request) => request,
            Submission::Blank | Submission::Busy => return None,
        };
        let result = client.execute(&request).await;
        self.resolve(result)
    }

    pub fn view(&self) -> ChatView {
        let entries = self
            .entries()
            .into_iter()
            .map(|entry| match entry {
                TranscriptEntry::Message(msg) => ChatEntryView::Message {
                    role: msg.role,
                    text: msg.text.clone(),
                    html: markdown_to_html(&msg.text),
                    created_at: msg.created_at,
                },
                TranscriptEntry::Loading => ChatEntryView::Loading,
            })
            .collect();

        ChatView {
            state: self.state,
            input_enabled: self.input_enabled(),
            entries,
        }
    }
}
