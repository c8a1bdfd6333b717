use log::{info, warn};
use serde::Serialize;
use tauri::{AppHandle, Emitter, State};

use crate::AppState;

// Events consumed by the webview, which owns the actual Web Speech API
// objects. The Rust side owns the flags and the control decisions.
pub const EVENT_SPEECH_PLAY: &str = "speech-play";
pub const EVENT_SPEECH_STOP: &str = "speech-stop";
pub const EVENT_RECOGNITION_START: &str = "recognition-start";
pub const EVENT_RECOGNITION_STOP: &str = "recognition-stop";

/// Playback and recognition are independent, both optional based on what
/// the webview reports at page load. Absent support degrades to text-only.
#[derive(Serialize, Clone, Debug, Default)]
pub struct SpeechState {
    pub synthesis_supported: bool,
    pub recognition_supported: bool,
    pub is_playing: bool,
    pub is_listening: bool,
}

/// What a listening toggle should do given the current flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListeningAction {
    Unsupported,
    Stop,
    Start { halt_playback: bool },
}

impl SpeechState {
    /// Decide the toggle outcome without touching any flags; the flags flip
    /// on the recognition_started/stopped callbacks from the webview.
    pub fn listening_action(&self) -> ListeningAction {
        if !self.recognition_supported {
            ListeningAction::Unsupported
        } else if self.is_listening {
            ListeningAction::Stop
        } else {
            // Capturing while the question is still being read aloud would
            // feed the synthesized voice back into the answer.
            ListeningAction::Start {
                halt_playback: self.is_playing,
            }
        }
    }

    /// Recognition errors kill the capture session on the webview side, so
    /// the flag resets immediately rather than waiting for a stop callback.
    pub fn on_recognition_error(&mut self, code: &str) -> String {
        self.is_listening = false;
        alert_for_recognition_error(code)
    }
}

#[derive(Serialize, Clone)]
struct PlaybackRequest {
    text: String,
    rate: f32,
    pitch: f32,
    volume: f32,
}

pub(crate) fn alert_for_recognition_error(code: &str) -> String {
    if code == "not-allowed" {
        "Microphone access denied. Please allow microphone access and try again.".to_string()
    } else {
        format!("Speech recognition error: {}", code)
    }
}

/// Hand a question to the webview for playback. No-op when synthesis is
/// unsupported; the flag flips on the playback_started callback.
pub fn play_question(app: &AppHandle, state: &AppState, text: &str) {
    if text.is_empty() {
        return;
    }
    if !state.speech.lock().synthesis_supported {
        info!("Speech synthesis unavailable; question shown as text only");
        return;
    }
    let request = PlaybackRequest {
        text: text.to_string(),
        rate: 0.9,
        pitch: 1.0,
        volume: 0.8,
    };
    if let Err(e) = app.emit(EVENT_SPEECH_PLAY, request) {
        warn!("Failed to emit playback request: {}", e);
    }
}

pub fn halt_playback(app: &AppHandle, state: &AppState) {
    {
        let mut speech = state.speech.lock();
        if !speech.synthesis_supported {
            return;
        }
        speech.is_playing = false;
    }
    if let Err(e) = app.emit(EVENT_SPEECH_STOP, ()) {
        warn!("Failed to emit playback stop: {}", e);
    }
}

/// Stops playback and recognition both; used by reset.
pub fn halt_all(app: &AppHandle, state: &AppState) {
    halt_playback(app, state);
    let was_listening = {
        let mut speech = state.speech.lock();
        std::mem::take(&mut speech.is_listening)
    };
    if was_listening {
        if let Err(e) = app.emit(EVENT_RECOGNITION_STOP, ()) {
            warn!("Failed to emit recognition stop: {}", e);
        }
    }
}

#[tauri::command]
pub fn set_speech_support(
    synthesis: bool,
    recognition: bool,
    state: State<'_, AppState>,
) -> Result<(), String> {
    let mut speech = state.speech.lock();
    speech.synthesis_supported = synthesis;
    speech.recognition_supported = recognition;
    if !recognition {
        info!("Speech recognition unsupported; voice input disabled");
    }
    Ok(())
}

#[tauri::command]
pub fn get_speech_status(state: State<'_, AppState>) -> Result<SpeechState, String> {
    Ok(state.speech.lock().clone())
}

/// Replay the current question out loud.
#[tauri::command]
pub fn replay_question(state: State<'_, AppState>, app: AppHandle) -> Result<(), String> {
    let question = state.interview.lock().current_question.clone();
    if question.is_empty() {
        return Err("No question to play.".to_string());
    }
    play_question(&app, &state, &question);
    Ok(())
}

#[tauri::command]
pub fn stop_playback(state: State<'_, AppState>, app: AppHandle) -> Result<(), String> {
    halt_playback(&app, &state);
    Ok(())
}

/// Toggle answer capture. Returns the intended listening state; the flag
/// itself flips on the recognition_started/stopped callbacks.
#[tauri::command]
pub fn toggle_listening(state: State<'_, AppState>, app: AppHandle) -> Result<bool, String> {
    let action = state.speech.lock().listening_action();
    match action {
        ListeningAction::Unsupported => Err(
            "Speech recognition is not supported here. Type your answer instead.".to_string(),
        ),
        ListeningAction::Stop => {
            app.emit(EVENT_RECOGNITION_STOP, ())
                .map_err(|e| e.to_string())?;
            Ok(false)
        }
        ListeningAction::Start { halt_playback: halt } => {
            if halt {
                halt_playback(&app, &state);
            }
            app.emit(EVENT_RECOGNITION_START, ())
                .map_err(|e| e.to_string())?;
            Ok(true)
        }
    }
}

#[tauri::command]
pub fn playback_started(state: State<'_, AppState>) -> Result<(), String> {
    state.speech.lock().is_playing = true;
    Ok(())
}

#[tauri::command]
pub fn playback_finished(state: State<'_, AppState>) -> Result<(), String> {
    state.speech.lock().is_playing = false;
    Ok(())
}

#[tauri::command]
pub fn recognition_started(state: State<'_, AppState>) -> Result<(), String> {
    state.speech.lock().is_listening = true;
    Ok(())
}

#[tauri::command]
pub fn recognition_stopped(state: State<'_, AppState>) -> Result<(), String> {
    state.speech.lock().is_listening = false;
    Ok(())
}

/// A finalized recognition result; appended straight onto the visible
/// answer buffer, no other persistence.
#[tauri::command]
pub fn append_transcript(text: String, state: State<'_, AppState>) -> Result<String, String> {
    if text.is_empty() {
        return Ok(state.interview.lock().answer.clone());
    }
    let mut session = state.interview.lock();
    session.answer.push_str(&text);
    Ok(session.answer.clone())
}

#[tauri::command]
pub fn recognition_error(code: String, state: State<'_, AppState>) -> Result<(), String> {
    warn!("Speech recognition error: {}", code);
    Err(state.speech.lock().on_recognition_error(&code))
}
