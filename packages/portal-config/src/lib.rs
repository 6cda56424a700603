mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Postgres, Search, Service, Storage};

use std::{fs, path::Path};

pub const ALLOWED_SCOPES: [&str; 3] = ["all", "assigned_non_vendor", "assigned_vendor"];

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.search.max_results == 0 {
		return Err(Error::Validation {
			message: "search.max_results must be greater than zero.".to_string(),
		});
	}
	if !ALLOWED_SCOPES.contains(&cfg.search.default_scope.as_str()) {
		return Err(Error::Validation {
			message:
				"search.default_scope must be one of all, assigned_non_vendor, or assigned_vendor."
					.to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let scope = cfg.search.default_scope.trim();

	if scope.len() != cfg.search.default_scope.len() {
		cfg.search.default_scope = scope.to_string();
	}
}
