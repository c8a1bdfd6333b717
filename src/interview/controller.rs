use log::{error, info, warn};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use tauri::{AppHandle, State};

use super::{ConversationTurn, InterviewPhase, INTERVIEW_TOPICS};
use crate::speech;
use crate::AppState;

/// Client-generated random token correlating every request of one interview.
fn new_session_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

/// Everything the practice screen renders, held in one place. At most one
/// of these exists per app window.
#[derive(Serialize, Clone, Debug)]
pub struct InterviewSession {
    pub session_id: String,
    pub phase: InterviewPhase,
    pub topic: String,
    pub transcript: Vec<ConversationTurn>,
    pub current_question: String,
    pub answer: String,
    pub summary: String,
    pub loading: bool,
}

impl Default for InterviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl InterviewSession {
    pub fn new() -> Self {
        Self {
            session_id: new_session_id(),
            phase: InterviewPhase::Idle,
            topic: String::new(),
            transcript: Vec::new(),
            current_question: String::new(),
            answer: String::new(),
            summary: String::new(),
            loading: false,
        }
    }

    /// Idle -> Active. Requires a non-empty topic; the transcript becomes
    /// exactly one question entry.
    pub fn begin(&mut self, topic: &str, first_question: String) -> bool {
        if self.phase != InterviewPhase::Idle || topic.trim().is_empty() {
            return false;
        }
        self.phase = InterviewPhase::Active;
        self.topic = topic.to_string();
        self.current_question = first_question.clone();
        self.transcript = vec![ConversationTurn::Question(first_question)];
        true
    }

    /// Active -> Active. Appends the answer then the next question, in that
    /// order, and clears the answer buffer. Empty/whitespace answers are a
    /// no-op.
    pub fn record_exchange(&mut self, answer: String, next_question: String) -> bool {
        if self.phase != InterviewPhase::Active || answer.trim().is_empty() {
            return false;
        }
        self.transcript.push(ConversationTurn::Answer(answer));
        self.transcript
            .push(ConversationTurn::Question(next_question.clone()));
        self.current_question = next_question;
        self.answer.clear();
        true
    }

    /// Active -> Ended. The transcript stays visible behind the summary.
    pub fn finish(&mut self, summary: String) -> bool {
        if self.phase != InterviewPhase::Active {
            return false;
        }
        self.phase = InterviewPhase::Ended;
        self.summary = summary;
        true
    }

    /// Back to Idle with a fresh session id; clears every field.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Whether a response correlated to `request_session_id` still belongs
    /// to this session. A reset rotates the session id, so responses from
    /// requests that were in flight across a reset are discarded.
    pub fn accepts_response(&self, request_session_id: &str) -> bool {
        self.session_id == request_session_id
    }
}

#[tauri::command]
pub fn list_topics() -> Vec<String> {
    INTERVIEW_TOPICS.iter().map(|t| t.to_string()).collect()
}

#[tauri::command]
pub fn get_interview_state(state: State<'_, AppState>) -> Result<InterviewSession, String> {
    Ok(state.interview.lock().clone())
}

#[tauri::command]
pub fn set_answer(text: String, state: State<'_, AppState>) -> Result<(), String> {
    state.interview.lock().answer = text;
    Ok(())
}

#[tauri::command]
pub async fn start_interview(
    topic: String,
    state: State<'_, AppState>,
    app: AppHandle,
) -> Result<InterviewSession, String> {
    if topic.trim().is_empty() {
        return Err("Select a topic before starting the interview.".to_string());
    }

    let session_id = {
        let mut session = state.interview.lock();
        if session.loading {
            // A request is already in flight; leave state untouched.
            return Ok(session.clone());
        }
        if session.phase != InterviewPhase::Idle {
            return Err("An interview is already in progress.".to_string());
        }
        session.loading = true;
        session.session_id.clone()
    };

    let api = match state.ensure_api() {
        Ok(api) => api,
        Err(e) => {
            state.interview.lock().loading = false;
            return Err(e);
        }
    };

    info!("Starting interview on topic '{}'", topic);
    let result = api.start_interview(&topic, &session_id).await;

    let snapshot = {
        let mut session = state.interview.lock();
        if !session.accepts_response(&session_id) {
            warn!("Discarding stale start-interview response for session {}", session_id);
            return Ok(session.clone());
        }
        session.loading = false;
        match result {
            Ok(question) => {
                session.begin(&topic, question);
                session.clone()
            }
            Err(e) => {
                error!("Error starting interview: {}", e);
                return Err("Error starting interview. Please check your connection.".to_string());
            }
        }
    };

    speech::play_question(&app, &state, &snapshot.current_question);
    Ok(snapshot)
}

#[tauri::command]
pub async fn submit_answer(
    state: State<'_, AppState>,
    app: AppHandle,
) -> Result<InterviewSession, String> {
    let (session_id, topic, answer) = {
        let mut session = state.interview.lock();
        if session.loading {
            return Ok(session.clone());
        }
        if session.phase != InterviewPhase::Active {
            return Err("No active interview.".to_string());
        }
        if session.answer.trim().is_empty() {
            // Nothing to submit; treat as a no-op rather than an error.
            return Ok(session.clone());
        }
        session.loading = true;
        (
            session.session_id.clone(),
            session.topic.clone(),
            session.answer.clone(),
        )
    };

    let api = match state.ensure_api() {
        Ok(api) => api,
        Err(e) => {
            state.interview.lock().loading = false;
            return Err(e);
        }
    };

    let result = api.continue_interview(&session_id, &answer, &topic).await;

    let snapshot = {
        let mut session = state.interview.lock();
        if !session.accepts_response(&session_id) {
            warn!("Discarding stale answer response for session {}", session_id);
            return Ok(session.clone());
        }
        session.loading = false;
        match result {
            Ok(question) => {
                session.record_exchange(answer, question);
                session.clone()
            }
            Err(e) => {
                error!("Error submitting answer: {}", e);
                return Err("Error submitting answer. Please try again.".to_string());
            }
        }
    };

    speech::play_question(&app, &state, &snapshot.current_question);
    Ok(snapshot)
}

#[tauri::command]
pub async fn end_interview(
    state: State<'_, AppState>,
    app: AppHandle,
) -> Result<InterviewSession, String> {
    let (session_id, topic) = {
        let mut session = state.interview.lock();
        if session.loading {
            return Ok(session.clone());
        }
        if session.phase != InterviewPhase::Active {
            return Err("No active interview to end.".to_string());
        }
        session.loading = true;
        (session.session_id.clone(), session.topic.clone())
    };

    // Question playback stops as soon as the interview winds down.
    speech::halt_playback(&app, &state);

    let api = match state.ensure_api() {
        Ok(api) => api,
        Err(e) => {
            state.interview.lock().loading = false;
            return Err(e);
        }
    };

    let result = api.end_interview(&session_id, &topic).await;

    let mut session = state.interview.lock();
    if !session.accepts_response(&session_id) {
        warn!("Discarding stale end-interview response for session {}", session_id);
        return Ok(session.clone());
    }
    session.loading = false;
    match result {
        Ok(summary) => {
            session.finish(summary);
            info!("Interview {} ended", session_id);
            Ok(session.clone())
        }
        Err(e) => {
            error!("Error ending interview: {}", e);
            Err("Error ending interview. Please try again.".to_string())
        }
    }
}

#[tauri::command]
pub fn reset_interview(
    state: State<'_, AppState>,
    app: AppHandle,
) -> Result<InterviewSession, String> {
    speech::halt_all(&app, &state);

    let mut session = state.interview.lock();
    if session.loading {
        // A pending request is never aborted; the reset rotates the session
        // id, so its response fails the accepts_response check and is dropped.
        warn!("Resetting interview while a request is in flight");
    }
    session.reset();
    info!("Interview reset; new session {}", session.session_id);
    Ok(session.clone())
}
