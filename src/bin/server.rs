//! Group chat server with persisted rooms and messages.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin idobata-server -- --auth-secret <secret>
//! ```

use std::sync::Arc;

use clap::Parser;

use idobata::auth::{AuthGate, VerifiedIdentity};
use idobata::common::time::now_secs;
use idobata::domain::{Age, UserName};
use idobata::infrastructure::repository::{
    InMemoryGroupStore, InMemoryIdentityStore, InMemoryMessageStore,
};
use idobata::logger::setup_logger;
use idobata::session::Stores;
use idobata::ui::state::AppState;

/// Default token lifetime for `--mint-token` (24 hours)
const MINT_TOKEN_TTL_SECS: i64 = 24 * 3600;

#[derive(Debug, Parser)]
#[command(name = "idobata-server", about = "WebSocket group chat server")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to bind
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Secret for bearer token verification. Falls back to the
    /// IDOBATA_AUTH_SECRET environment variable.
    #[arg(long)]
    auth_secret: Option<String>,

    /// Print a bearer token for "name:age" and exit
    #[arg(long, value_name = "NAME:AGE")]
    mint_token: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let secret = args
        .auth_secret
        .or_else(|| std::env::var("IDOBATA_AUTH_SECRET").ok())
        .unwrap_or_else(|| {
            tracing::warn!("no auth secret configured, using development default");
            "idobata-dev-secret".to_string()
        });
    let auth = AuthGate::new(secret);

    if let Some(spec) = args.mint_token {
        match mint_token(&auth, &spec) {
            Ok(token) => {
                println!("{token}");
                return;
            }
            Err(e) => {
                eprintln!("cannot mint token: {e}");
                std::process::exit(2);
            }
        }
    }

    let stores = Stores {
        identity: Arc::new(InMemoryIdentityStore::new()),
        groups: Arc::new(InMemoryGroupStore::new()),
        messages: Arc::new(InMemoryMessageStore::new()),
    };
    let state = Arc::new(AppState::new(stores, auth));

    // Run the server
    if let Err(e) = idobata::run_server(&args.host, args.port, state).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

fn mint_token(auth: &AuthGate, spec: &str) -> Result<String, String> {
    let (name, age) = spec
        .split_once(':')
        .ok_or_else(|| "expected NAME:AGE".to_string())?;
    let name = UserName::new(name.to_string()).map_err(|e| e.to_string())?;
    let age: u32 = age.parse().map_err(|_| "age must be a number".to_string())?;
    let age = Age::new(age).map_err(|e| e.to_string())?;

    Ok(auth.issue(
        &VerifiedIdentity { name, age },
        MINT_TOKEN_TTL_SECS,
        now_secs(),
    ))
}
