use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jlpt_quiz::config::Settings;
use jlpt_quiz::content::WordPool;
use jlpt_quiz::domain::{I_ADJ, NA_ADJ};
use jlpt_quiz::handlers;
use jlpt_quiz::state::AppState;

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "jlpt_quiz=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let settings = Settings::load();

  let words = match WordPool::load(&settings.dataset_path) {
    Ok(words) => words,
    Err(e) => {
      tracing::error!("Cannot start without a word list: {}", e);
      std::process::exit(1);
    }
  };
  tracing::info!("Dataset columns: {:?}", words.columns());

  // Adjectives at the configured level only
  let pool = words.filter(&settings.level, &[I_ADJ, NA_ADJ]);
  for (pos, count) in pool.count_by_pos() {
    tracing::info!("{} {} words at level {}", count, pos, settings.level);
  }
  if pool.is_empty() {
    tracing::warn!("No adjectives found for level {}", settings.level);
  }

  let state = AppState::new(pool, settings.question_count);
  let app = handlers::router(state).layer(TraceLayer::new_for_http());

  let listener = match tokio::net::TcpListener::bind(&settings.bind_addr).await {
    Ok(listener) => listener,
    Err(e) => {
      tracing::error!("Failed to bind to {}: {}", settings.bind_addr, e);
      std::process::exit(1);
    }
  };

  tracing::info!("Server running on http://{}", settings.bind_addr);

  if let Err(e) = axum::serve(listener, app).await {
    tracing::error!("Server error: {}", e);
    std::process::exit(1);
  }
}
