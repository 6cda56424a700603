use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub search: Search,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	/// One of `all`, `assigned_non_vendor`, or `assigned_vendor`.
	#[serde(default = "default_scope")]
	pub default_scope: String,
	/// Upper bound on rows returned by a single search.
	#[serde(default = "default_max_results")]
	pub max_results: u32,
}
impl Default for Search {
	fn default() -> Self {
		Self { default_scope: default_scope(), max_results: default_max_results() }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_scope() -> String {
	"all".to_string()
}

fn default_max_results() -> u32 {
	100
}
