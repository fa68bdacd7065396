#![allow(dead_code)]

//! Client-side conversation state machine.
//!
//! Sequences the multi-step asynchronous flow (upload → extract →
//! search → display) without races or stuck UI states:
//! `Idle → Sending → AwaitingExtraction → ShowingProfile →
//! SearchingJobs → ShowingResults → Idle`. Error transitions from any
//! in-flight state return directly to `Idle` after a bot-visible
//! Spanish error message.
//!
//! Input stays disabled for the full in-flight duration. That flag is
//! the system's sole concurrency guard: a second submission is rejected
//! as busy, which substitutes for a mutex around the network calls.

pub mod transport;

use std::sync::Mutex;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

use crate::matching::orchestrator::JobMatchResponse;
use crate::models::job::RankedJob;
use transport::{ChatTransport, UploadedFile};

/// Pause after showing the extracted profile, before the status
/// sequence starts.
const PROFILE_DISPLAY_DELAY: Duration = Duration::from_millis(1200);

/// Simulated "typing" announcements shown between extraction and the
/// real search call. Cosmetic pacing only — not retries or backoff.
/// Each entry is (message, pause after showing it); the sequence runs
/// strictly in order and completes before `search_jobs` fires.
const TYPING_SEQUENCE: &[(&str, Duration)] = &[
    ("Analizando tu perfil...", Duration::from_millis(1500)),
    (
        "Buscando ofertas que calcen contigo...",
        Duration::from_millis(1500),
    ),
    ("Ordenando los resultados...", Duration::from_millis(1000)),
];

const ERROR_MESSAGE: &str = "Lo siento, algo salió mal. Inténtalo de nuevo en un momento.";
const NO_MATCHES_MESSAGE: &str = "Por ahora no encontré ofertas que calcen con tu perfil.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Sending,
    AwaitingExtraction,
    ShowingProfile,
    SearchingJobs,
    ShowingResults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

/// One entry in the session transcript. Held only in memory for the
/// active session; never sent back to the server as history.
#[derive(Debug, Clone)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
    /// File name for user uploads; public job URL for ranked-job
    /// messages (the "open offer" action control).
    pub attachment: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("a submission is already in flight")]
    Busy,
    #[error("nothing to send")]
    Empty,
}

struct Inner {
    state: SessionState,
    transcript: Vec<ConversationMessage>,
    input_enabled: bool,
}

/// A single chat widget session. Owns the transcript exclusively; a
/// page reload discards it.
pub struct ChatSession<T> {
    transport: T,
    inner: Mutex<Inner>,
}

impl<T: ChatTransport> ChatSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            inner: Mutex::new(Inner {
                state: SessionState::Idle,
                transcript: Vec::new(),
                input_enabled: true,
            }),
        }
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock().unwrap().state
    }

    pub fn input_enabled(&self) -> bool {
        self.inner.lock().unwrap().input_enabled
    }

    pub fn transcript(&self) -> Vec<ConversationMessage> {
        self.inner.lock().unwrap().transcript.clone()
    }

    /// Submits one conversational turn and runs it to completion.
    ///
    /// A file wins over text when both are present; the text rides
    /// along as the accompanying message. There is no cancellation: a
    /// turn, once started, runs to completion or failure, and the
    /// session returns to `Idle` either way.
    pub async fn submit(
        &self,
        text: Option<String>,
        file: Option<UploadedFile>,
    ) -> Result<(), SubmitError> {
        if text.is_none() && file.is_none() {
            return Err(SubmitError::Empty);
        }

        {
            let mut inner = self.inner.lock().unwrap();
            if !inner.input_enabled {
                return Err(SubmitError::Busy);
            }
            inner.input_enabled = false;
            inner.state = SessionState::Sending;
            inner.transcript.push(ConversationMessage {
                role: Role::User,
                content: text.clone().unwrap_or_default(),
                attachment: file.as_ref().map(|f| f.file_name.clone()),
            });
        }

        let outcome = match file {
            Some(file) => self.run_upload_turn(file, text).await,
            None => self.run_chat_turn(&text.unwrap_or_default()).await,
        };

        let mut inner = self.inner.lock().unwrap();
        if let Err(e) = outcome {
            warn!("conversation turn failed: {e:#}");
            inner.transcript.push(ConversationMessage {
                role: Role::Bot,
                content: ERROR_MESSAGE.to_string(),
                attachment: None,
            });
        }
        inner.state = SessionState::Idle;
        inner.input_enabled = true;
        Ok(())
    }

    async fn run_chat_turn(&self, query: &str) -> anyhow::Result<()> {
        let reply = self.transport.ask(query).await?;
        for turn in reply.responses {
            self.push_bot(turn.content, None);
        }
        Ok(())
    }

    async fn run_upload_turn(
        &self,
        file: UploadedFile,
        message: Option<String>,
    ) -> anyhow::Result<()> {
        self.set_state(SessionState::AwaitingExtraction);
        let profile = self
            .transport
            .extract_profile(&file, message.as_deref())
            .await?;

        self.set_state(SessionState::ShowingProfile);
        self.push_bot(
            format!("Esto fue lo que encontré en tu CV:\n{}", profile.profile),
            None,
        );
        tokio::time::sleep(PROFILE_DISPLAY_DELAY).await;

        // Each announcement's pause runs before the next fires; the real
        // search request only goes out after the whole sequence.
        for (content, delay) in TYPING_SEQUENCE {
            self.push_bot((*content).to_string(), None);
            tokio::time::sleep(*delay).await;
        }

        self.set_state(SessionState::SearchingJobs);
        let results = self.transport.search_jobs(&profile).await?;

        self.render_results(&results);
        self.set_state(SessionState::ShowingResults);
        Ok(())
    }

    fn render_results(&self, results: &JobMatchResponse) {
        if results.jobs.is_empty() {
            self.push_bot(NO_MATCHES_MESSAGE.to_string(), None);
            return;
        }
        for job in &results.jobs {
            let url = job.listing.url.clone();
            self.push_bot(format_ranked_job(job), url);
        }
    }

    fn set_state(&self, state: SessionState) {
        self.inner.lock().unwrap().state = state;
    }

    fn push_bot(&self, content: String, attachment: Option<String>) {
        self.inner.lock().unwrap().transcript.push(ConversationMessage {
            role: Role::Bot,
            content,
            attachment,
        });
    }
}

fn format_ranked_job(job: &RankedJob) -> String {
    let title = job.listing.title.as_deref().unwrap_or("Oferta sin título");
    let mut lines = vec![format!("{title} — {:.0}% de afinidad", job.match_score)];
    if !job.match_reasons.is_empty() {
        lines.push(format!("Por qué calza: {}", job.match_reasons.join("; ")));
    }
    if !job.recommendations.is_empty() {
        lines.push(format!("Recomendaciones: {}", job.recommendations.join("; ")));
    }
    lines.join("\n")
}
