// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! homely-server binary.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use homely_server::{create_app_state, create_router, version};
use homely_server_auth::{Role, TokenIssuer, UserId};
use homely_server_config::{LogFormat, ServerConfig};
use tower_http::{
	cors::{Any, CorsLayer},
	trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Homely server - rental property management API.
#[derive(Parser, Debug)]
#[command(name = "homely-server", about = "Homely rental property server", version)]
struct Args {
	/// Configuration file layered over the built-in defaults.
	#[arg(long, env = "HOMELY_SERVER_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Run the HTTP server (default)
	Serve,
	/// Mint an access token signed with the configured secret
	IssueToken {
		/// Subject; a random id is generated when omitted.
		#[arg(long)]
		user_id: Option<Uuid>,
		/// tenant, landlord, workman or admin
		#[arg(long)]
		role: String,
		/// Lifetime in seconds; defaults to auth.token_ttl_secs.
		#[arg(long)]
		ttl_secs: Option<u64>,
	},
	/// Show version and build information
	Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	// Before parsing, so `.env` can supply clap's `env` fallbacks.
	dotenvy::dotenv().ok();

	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	let config = match &args.config {
		Some(path) => homely_server_config::load_config_with_file(path),
		None => homely_server_config::load_config(),
	}
	.context("failed to load configuration")?;

	if let Some(Command::IssueToken {
		user_id,
		role,
		ttl_secs,
	}) = args.command
	{
		return issue_token(&config, user_id, &role, ttl_secs);
	}

	init_tracing(&config);
	config.log_summary();
	serve(config).await
}

fn init_tracing(config: &ServerConfig) {
	let json = config.logging.format == LogFormat::Json;

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(json.then(|| tracing_subscriber::fmt::layer().json()))
		.with((!json).then(|| tracing_subscriber::fmt::layer()))
		.init();
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
	tracing::info!(version = version::VERSION, "starting homely-server");

	let pool = homely_server_db::create_pool(&config.database.url)
		.await
		.context("failed to open database")?;
	homely_server_db::run_migrations(&pool)
		.await
		.context("failed to run migrations")?;

	let state = create_app_state(pool, &config);
	let app = create_router(state)
		.layer(TraceLayer::new_for_http())
		.layer(
			CorsLayer::new()
				.allow_origin(Any)
				.allow_methods(Any)
				.allow_headers(Any),
		);

	let addr = config.socket_addr();
	tracing::info!(base_url = %config.http.base_url, "listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr)
		.await
		.with_context(|| format!("failed to bind {addr}"))?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}

fn issue_token(
	config: &ServerConfig,
	user_id: Option<Uuid>,
	role: &str,
	ttl_secs: Option<u64>,
) -> anyhow::Result<()> {
	if Role::parse(role).is_none() {
		eprintln!("warning: '{role}' is not a known role; the token will authenticate but grant nothing");
	}
	if config.auth.using_dev_secret {
		eprintln!("warning: signing with the development secret");
	}

	let ttl_secs = ttl_secs.unwrap_or(config.auth.token_ttl_secs);
	let ttl = i64::try_from(ttl_secs)
		.ok()
		.and_then(chrono::Duration::try_seconds)
		.context("ttl_secs is out of range")?;
	let user_id = user_id.map(UserId::new).unwrap_or_else(UserId::generate);

	let issuer = TokenIssuer::new(&config.auth.jwt_secret, config.auth.jwt_issuer.clone());
	let token = issuer
		.issue(user_id, role, ttl)
		.context("failed to sign token")?;

	eprintln!("user_id: {user_id}");
	println!("{token}");
	Ok(())
}
