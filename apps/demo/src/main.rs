//! Demo Server Entry Point
//!
//! A password-protected prototype page behind the gate. Uses `anyhow` for
//! startup errors; request-cycle errors never leave the gate.
//!
//! Run `demo hash <password>` to produce a verifier for the users list in
//! the configuration file.

use anyhow::Context;
use axum::response::Html;
use axum::routing::get;
use axum::{Extension, Router};
use gate::{AuthenticatedUser, Gate, GateConfig};
use platform::password::{SubmittedPassword, hash_password};
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // `demo hash <password>` prints a PHC verifier and exits.
    if env::args().nth(1).as_deref() == Some("hash") {
        let password = env::args()
            .nth(2)
            .context("usage: demo hash <password>")?;
        let verifier = hash_password(&SubmittedPassword::new(password))?;
        println!("{}", verifier.as_phc_string());
        return Ok(());
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "demo=info,gate=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = env::var("GATE_CONFIG").unwrap_or_else(|_| "demo.json".to_string());
    let config = GateConfig::from_file(&config_path)
        .with_context(|| format!("loading gate configuration from {config_path}"))?;

    let host = platform::host::host_identity();
    let gate = Gate::new(config, &host).context("building the gate")?;

    let protected = Router::new().route("/", get(welcome));

    let app = gate
        .wrap(protected)
        .merge(gate.router())
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([127, 0, 0, 1], 8080));
    tracing::info!("Listening on http://{}/", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// The page worth protecting in this totally viable prototype.
async fn welcome(Extension(user): Extension<AuthenticatedUser>) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
	<head>
		<title>Password protected prototype</title>
	</head>
	<body>
		<div>You totally got in, {}!</div>
		<div><a href="/logout">Hop back out?</a></div>
	</body>
</html>"#,
        user.as_str()
    ))
}
