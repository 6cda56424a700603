use std::{
	fs,
	path::{Path, PathBuf},
};

use clap::Parser;
use color_eyre::eyre::{self, WrapErr};
use tracing_subscriber::EnvFilter;

use portal_config::Config;
use portal_search::{FilterParams, UserSearch};
use portal_storage::{db::Db, memory::MemoryUsers, models::User};

/// Search portal users and print them as JSON.
#[derive(Debug, Parser)]
#[command(
	version = portal_cli::VERSION,
	rename_all = "kebab",
	styles = portal_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Search a JSON array of users instead of Postgres.
	#[arg(long, value_name = "FILE")]
	pub fixture: Option<PathBuf>,
	/// all, assigned_non_vendor, or assigned_vendor. Defaults to search.default_scope.
	#[arg(long)]
	pub scope: Option<String>,
	#[arg(long)]
	pub org_status: Option<String>,
	#[arg(long)]
	pub requested_org: Option<String>,
	#[arg(long)]
	pub requested_org_type: Option<String>,
	#[arg(long, value_name = "TIMESTAMP")]
	pub created_after: Option<String>,
	#[arg(long, value_name = "TIMESTAMP")]
	pub created_before: Option<String>,
	#[arg(long)]
	pub keyword: Option<String>,
	/// Defaults to search.max_results.
	#[arg(long)]
	pub limit: Option<u32>,
}
impl Args {
	pub fn filter_params(&self) -> FilterParams {
		FilterParams {
			org_status: self.org_status.clone(),
			requested_org: self.requested_org.clone(),
			requested_org_type: self.requested_org_type.clone(),
			created_after: self.created_after.clone(),
			created_before: self.created_before.clone(),
			keyword: self.keyword.clone(),
		}
	}
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = portal_config::load(&args.config)?;
	init_tracing(&config)?;
	let users = search(&args, &config).await?;

	println!("{}", serde_json::to_string_pretty(&users)?);
	Ok(())
}

pub async fn search(args: &Args, config: &Config) -> color_eyre::Result<Vec<User>> {
	let scope = args.scope.as_deref().unwrap_or(&config.search.default_scope);
	let limit = args.limit.unwrap_or(config.search.max_results);
	if limit == 0 {
		return Err(eyre::eyre!("--limit must be greater than zero."));
	}
	let search = UserSearch::try_new(args.filter_params(), scope)?;

	let users = match &args.fixture {
		Some(path) => {
			let store = load_fixture(path)?;
			tracing::info!(path = %path.display(), users = store.len(), "Loaded user fixture.");
			search.fetch_from(&store, limit)?
		},
		None => {
			let db = Db::connect(&config.storage.postgres).await?;
			db.ensure_schema().await?;
			search.fetch(&db, limit).await?
		},
	};

	tracing::info!(scope = %search.initial_scope(), matched = users.len(), "User search finished.");
	Ok(users)
}

fn load_fixture(path: &Path) -> color_eyre::Result<MemoryUsers> {
	let raw = fs::read_to_string(path)
		.wrap_err_with(|| format!("Failed to read fixture at {path:?}."))?;
	let users: Vec<User> = serde_json::from_str(&raw)
		.wrap_err_with(|| format!("Failed to parse fixture at {path:?}."))?;

	Ok(MemoryUsers::new(users))
}

fn init_tracing(config: &Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
	Ok(())
}
