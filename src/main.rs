//! Make a Meal - ingredient-driven meal ideas from a generative backend
//!
//! An interactive client: collect ingredients, ask for meal suggestions,
//! open one as a full recipe and keep asking follow-up questions about it.

mod backend;
mod config;
mod ingredients;
mod repl;
mod session;
mod state_machine;

use backend::{HttpBackend, LoggingBackend};
use config::Config;
use session::ConversationSession;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    // Initialize logging. Stdout belongs to the prompt, so logs go to stderr.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "meal_ideas=warn".into());
    if config.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!(
        api_url = %config.api_url,
        timeout_secs = config.request_timeout.as_secs(),
        "Configuration loaded"
    );

    let backend = LoggingBackend::new(HttpBackend::new(&config)?);
    let session = ConversationSession::new(backend);

    repl::run(session).await?;

    Ok(())
}
