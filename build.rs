use std::env;

fn main() {
    // Load .env file during build so the API endpoint can be embedded
    if let Err(e) = dotenvy::dotenv() {
        println!(
            "cargo:warning=No .env file loaded ({}). Using system environment variables.",
            e
        );
    }

    // Embed the backend endpoint at compile time as a fallback for packaged
    // builds; runtime env vars still take precedence.
    if let Ok(api_url) = env::var("VOCAHIRE_API_URL") {
        println!("cargo:rustc-env=VOCAHIRE_API_URL={}", api_url);
    }

    if let Ok(timeout) = env::var("VOCAHIRE_HTTP_TIMEOUT_SECS") {
        println!("cargo:rustc-env=VOCAHIRE_HTTP_TIMEOUT_SECS={}", timeout);
    }

    tauri_build::build()
}
