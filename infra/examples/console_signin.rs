//! Example: phone sign-in flow on the terminal
//!
//! Wires the sign-in flow to a console UI: the busy indicator, code prompt,
//! and alerts all render as terminal output. The risk check and identity
//! provider are the real HTTP clients, configured from the environment
//! (SIM_CHECK_URL, IDENTITY_BASE_URL, IDENTITY_API_KEY); the handle store is
//! in-memory.
//!
//! Run with: cargo run --example console_signin -p sg_infra -- "+1 555 0100"

use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use sg_core::services::flow::{FlowOutcome, FlowUiTrait, SignInFlow, UiInputState};
use sg_infra::identity::HttpIdentityProvider;
use sg_infra::risk::SimCheckClient;
use sg_infra::storage::MemoryHandleStore;

/// Terminal rendition of the UI surface.
struct ConsoleUi;

#[async_trait]
impl FlowUiTrait for ConsoleUi {
    async fn set_input_state(&self, state: UiInputState) {
        match state {
            UiInputState::Busy => println!("... verifying, input disabled ..."),
            UiInputState::Idle => println!("... input enabled ..."),
        }
    }

    async fn prompt_code(&self) -> Option<String> {
        println!("Sign in with Phone Auth");
        print!("Enter OTP code (blank to cancel): ");
        std::io::Write::flush(&mut std::io::stdout()).ok();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        match lines.next_line().await {
            Ok(Some(line)) if !line.trim().is_empty() => Some(line.trim().to_string()),
            _ => None,
        }
    }

    async fn alert(&self, title: &str, message: &str) {
        println!("[{}] {}", title, message);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let phone = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: console_signin <phone number>"))?;

    let flow = SignInFlow::new(
        Arc::new(SimCheckClient::from_env()?),
        Arc::new(HttpIdentityProvider::from_env()?),
        Arc::new(MemoryHandleStore::new()),
        Arc::new(ConsoleUi),
    );

    match flow.submit(&phone).await {
        FlowOutcome::SignedIn(session) => {
            println!("Signed in as {}", session.user_id);
        }
        FlowOutcome::NotStarted => println!("No phone number entered."),
        FlowOutcome::Cancelled => println!("Sign-in cancelled."),
        FlowOutcome::SimChangeDetected => println!("Sign-in refused."),
        FlowOutcome::Failed(e) => println!("Sign-in failed: {}", e),
    }

    Ok(())
}
