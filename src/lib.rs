#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::sync::Arc;

use anyhow::Result;
use log::info;
use parking_lot::Mutex;
use tauri::Builder;

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod interview;
pub mod speech;
pub mod submissions;

use api::ApiClient;
use auth::UserAccount;
use config::ApiConfig;
use interview::InterviewSession;
use speech::SpeechState;
use submissions::InterviewRecord;

/// Global application state, managed by the Tauri builder. One of each per
/// app window; no state crosses session boundaries.
pub struct AppState {
    api: Arc<Mutex<Option<ApiClient>>>,
    pub user: Arc<Mutex<Option<UserAccount>>>,
    pub interview: Arc<Mutex<InterviewSession>>,
    pub speech: Arc<Mutex<SpeechState>>,
    pub submissions: Arc<Mutex<Vec<InterviewRecord>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            api: Arc::new(Mutex::new(None)),
            user: Arc::new(Mutex::new(None)),
            interview: Arc::new(Mutex::new(InterviewSession::new())),
            speech: Arc::new(Mutex::new(SpeechState::default())),
            submissions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Lazily build the HTTP client from the environment configuration.
    pub fn ensure_api(&self) -> Result<ApiClient, String> {
        let mut guard = self.api.lock();
        let client = guard.get_or_insert_with(|| {
            let config = ApiConfig::from_env();
            info!("Backend endpoint: {}", config.base_url);
            ApiClient::new(&config)
        });
        Ok(client.clone())
    }
}

pub fn run() -> Result<()> {
    info!("VocaHire desktop starting...");

    Builder::default()
        .plugin(tauri_plugin_opener::init())
        .invoke_handler(tauri::generate_handler![
            // Session store (signup/login pages)
            auth::sign_up,
            auth::log_in,
            auth::current_user,
            auth::log_out,
            // Interview session controller (practice page)
            interview::controller::list_topics,
            interview::controller::get_interview_state,
            interview::controller::set_answer,
            interview::controller::start_interview,
            interview::controller::submit_answer,
            interview::controller::end_interview,
            interview::controller::reset_interview,
            // Speech I/O adapter
            speech::set_speech_support,
            speech::get_speech_status,
            speech::replay_question,
            speech::stop_playback,
            speech::toggle_listening,
            speech::playback_started,
            speech::playback_finished,
            speech::recognition_started,
            speech::recognition_stopped,
            speech::append_transcript,
            speech::recognition_error,
            // Submissions viewer (dashboard page)
            submissions::fetch_submissions,
            submissions::query_submissions,
            submissions::submission_stats,
            submissions::get_submission
        ])
        .manage(AppState::new())
        .setup(|_app| {
            let config = ApiConfig::from_env();
            info!(
                "VocaHire ready; backend at {} (timeout {}s)",
                config.base_url, config.timeout_secs
            );
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("Error while running tauri application");

    Ok(())
}
