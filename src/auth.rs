use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use tauri::State;
use uuid::Uuid;

use crate::AppState;

/// The in-memory user record. Lives for the duration of the process only;
/// there is no persistence across restarts.
#[derive(Clone, Debug)]
pub struct UserAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// What crosses the command boundary; the password never does.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&UserAccount> for UserInfo {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.id.clone(),
            name: account.name.clone(),
            email: account.email.clone(),
        }
    }
}

#[derive(Deserialize)]
pub struct SignupPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[tauri::command]
pub async fn sign_up(payload: SignupPayload, state: State<'_, AppState>) -> Result<String, String> {
    if payload.name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.password.is_empty()
    {
        return Err("All fields are required.".to_string());
    }
    if payload.password != payload.confirm_password {
        return Err("Passwords do not match. Please try again.".to_string());
    }

    let api = state.ensure_api()?;
    match api
        .signup(&payload.name, &payload.email, &payload.password)
        .await
    {
        Ok(response) => {
            info!("Signup succeeded for {}: {}", payload.email, response);
            Ok("Signup successful! Kindly log in.".to_string())
        }
        Err(e) => {
            error!("Signup failed for {}: {}", payload.email, e);
            Err("An error occurred during signup.".to_string())
        }
    }
}

#[tauri::command]
pub async fn log_in(payload: LoginPayload, state: State<'_, AppState>) -> Result<UserInfo, String> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err("All fields are required.".to_string());
    }

    // The login form carries no name; the backend keys on email + password.
    // Display name falls back to the email local part until the user signs
    // up again in this session.
    let display_name = payload
        .email
        .split('@')
        .next()
        .unwrap_or_default()
        .to_string();

    let api = state.ensure_api()?;
    match api.login(&display_name, &payload.email, &payload.password).await {
        Ok(response) if response.loggedin => {
            let account = UserAccount {
                id: Uuid::new_v4().to_string(),
                name: display_name,
                email: payload.email,
                password: payload.password,
            };
            let info = UserInfo::from(&account);
            *state.user.lock() = Some(account);
            info!("User {} logged in", info.email);
            Ok(info)
        }
        Ok(response) => {
            warn!("Login rejected for {}", payload.email);
            Err(response
                .message
                .unwrap_or_else(|| "Login failed. Please check your credentials.".to_string()))
        }
        Err(e) => {
            error!("Login request failed for {}: {}", payload.email, e);
            Err("An error occurred during login. Please try again.".to_string())
        }
    }
}

#[tauri::command]
pub fn current_user(state: State<'_, AppState>) -> Result<Option<UserInfo>, String> {
    Ok(state.user.lock().as_ref().map(UserInfo::from))
}

#[tauri::command]
pub fn log_out(state: State<'_, AppState>) -> Result<(), String> {
    if state.user.lock().take().is_some() {
        info!("User logged out");
    }
    Ok(())
}
