//! # Internship Portal Binary
//!
//! The composition root: loads configuration, installs logging, owns the
//! store and the login session, runs the demo walkthrough and prints the
//! resulting state as JSON. The auth plugin is selected by compile-time
//! features.

mod walkthrough;

use anyhow::Context;
use configs::{AppConfig, AuthConfig, LogConfig, LogFormat};
use ip_core::{Assignment, Company, InternshipStore, Session, Student};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[cfg(feature = "auth-simple")]
use ip_auth_simple::StaticAuthProvider;
#[cfg(feature = "auth-simple")]
use secrecy::ExposeSecret;

#[cfg(not(feature = "auth-simple"))]
compile_error!("no auth plugin selected; enable the `auth-simple` feature");

#[derive(Serialize)]
struct Snapshot<'a> {
    companies: &'a [Company],
    students: &'a [Student],
    assignments: &'a [Assignment],
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.log);

    let mut store = if config.portal.seed_mock_data {
        InternshipStore::seeded()
    } else {
        InternshipStore::new()
    };

    let auth = build_auth(&config.auth)?;
    tracing::info!(accounts = auth.len(), "credential list ready");
    let mut session = Session::new(auth);

    if should_run_walkthrough(&config) {
        walkthrough::run(&mut store, &mut session).await?;
    } else {
        tracing::info!(
            seed = config.portal.seed_mock_data,
            configured_users = config.auth.users.len(),
            "skipping walkthrough"
        );
    }

    let snapshot = Snapshot {
        companies: store.companies(),
        students: store.students(),
        assignments: store.assignments(),
    };
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// The walkthrough logs in with the demo accounts, which only exist when no
/// users are configured, and drives the seeded company.
fn should_run_walkthrough(config: &AppConfig) -> bool {
    config.portal.seed_mock_data && config.auth.users.is_empty()
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log.level.as_str().into());
    let json = log.format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();
}

#[cfg(feature = "auth-simple")]
fn build_auth(auth: &AuthConfig) -> anyhow::Result<StaticAuthProvider> {
    if auth.users.is_empty() {
        return StaticAuthProvider::with_mock_users();
    }
    StaticAuthProvider::from_plaintext(
        auth.users
            .iter()
            .map(|u| (u.to_user(), u.password.expose_secret())),
    )
}
