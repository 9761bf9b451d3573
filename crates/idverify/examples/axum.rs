//! Google Sign-In login endpoint
//!
//! Run with
//!
//! ```not_rust
//! GOOGLE_CLIENT_ID=1234.apps.googleusercontent.com \
//! ALLOWED_DOMAINS=example.com \
//!     cargo run --example axum
//! ```
//!
//! and post the credential returned by the Sign-In button:
//!
//! ```not_rust
//! curl -d credential=eyJhbGciOi... http://127.0.0.1:4000/login
//! ```

use std::collections::HashMap;

use axum::{
    Form, Router,
    extract::State,
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::post,
};
use idverify::{CachingKeyResolver, Error, HttpKeyResolver, Verifier, VerifierConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone)]
struct AppState {
    verifier: Verifier,
    config: VerifierConfig,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "axum=debug,idverify=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client_id = std::env::var("GOOGLE_CLIENT_ID").expect("GOOGLE_CLIENT_ID is not set");
    let mut config = VerifierConfig::new(client_id);
    if let Ok(domains) = std::env::var("ALLOWED_DOMAINS") {
        config = config.whitelisted_domains(domains);
    }

    let verifier = Verifier::new()
        .resolver(CachingKeyResolver::new(HttpKeyResolver::google(
            reqwest::Client::new(),
        )))
        .build();

    let app = Router::new()
        .route("/login", post(login))
        .with_state(AppState { verifier, config });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:4000")
        .await
        .unwrap();
    tracing::debug!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}

async fn login(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let Some(token) = form.get("credential").or_else(|| form.get("token")) else {
        return (StatusCode::BAD_REQUEST, "Missing credential").into_response();
    };

    match state.verifier.verify_token(token, &state.config).await {
        Ok(identity) => (
            StatusCode::OK,
            [(CONTENT_TYPE, "application/json")],
            identity.to_json(),
        )
            .into_response(),
        Err(error) => (status_for(&error), error.user_message()).into_response(),
    }
}

fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::MalformedToken(_) | Error::MissingHeaderFields { .. } => StatusCode::BAD_REQUEST,
        Error::DomainNotAllowed { .. } => StatusCode::FORBIDDEN,
        Error::ConfigurationInvalid(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::UNAUTHORIZED,
    }
}
