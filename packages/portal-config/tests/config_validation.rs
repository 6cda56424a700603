use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use portal_config::{Config, Error};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with(table: &str, key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let mut section = root.as_table_mut().expect("Template config must be a table.");

	for name in table.split('.') {
		section = section
			.get_mut(name)
			.and_then(Value::as_table_mut)
			.unwrap_or_else(|| panic!("Template config must include [{table}]."));
	}

	section.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("portal_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse test config.")
}

#[test]
fn sample_config_is_valid() {
	let path = write_temp_config(SAMPLE_CONFIG_TEMPLATE_TOML.to_string());
	let result = portal_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Expected sample config to load.");

	assert_eq!(cfg.search.default_scope, "all");
	assert_eq!(cfg.search.max_results, 100);
	assert_eq!(cfg.storage.postgres.pool_max_conns, 4);
}

#[test]
fn search_section_is_optional() {
	let cfg: Config = toml::from_str(
		r#"
[service]

[storage.postgres]
dsn = "postgres://localhost/portal"
pool_max_conns = 1
"#,
	)
	.expect("Failed to parse minimal config.");

	assert!(portal_config::validate(&cfg).is_ok());
	assert_eq!(cfg.service.log_level, "info");
	assert_eq!(cfg.search.default_scope, "all");
	assert_eq!(cfg.search.max_results, 100);
}

#[test]
fn default_scope_must_be_allowed() {
	let payload = sample_toml_with("search", "default_scope", Value::String("everyone".into()));
	let path = write_temp_config(payload);
	let result = portal_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected default_scope validation error.");

	assert!(
		err.to_string().contains("search.default_scope must be one of"),
		"Unexpected error: {err}"
	);
}

#[test]
fn default_scope_is_trimmed_before_validation() {
	let payload =
		sample_toml_with("search", "default_scope", Value::String(" assigned_vendor ".into()));
	let path = write_temp_config(payload);
	let result = portal_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Expected padded scope to load.");

	assert_eq!(cfg.search.default_scope, "assigned_vendor");
}

#[test]
fn max_results_must_be_positive() {
	let mut cfg = base_config();

	cfg.search.max_results = 0;

	let err = portal_config::validate(&cfg).expect_err("Expected max_results validation error.");

	assert!(
		err.to_string().contains("search.max_results must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn pool_size_must_be_positive() {
	let mut cfg = base_config();

	cfg.storage.postgres.pool_max_conns = 0;

	let err = portal_config::validate(&cfg).expect_err("Expected pool size validation error.");

	assert!(
		err.to_string().contains("storage.postgres.pool_max_conns must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn dsn_cannot_be_blank() {
	let mut cfg = base_config();

	cfg.storage.postgres.dsn = "  ".to_string();

	let err = portal_config::validate(&cfg).expect_err("Expected dsn validation error.");

	assert!(matches!(err, Error::Validation { .. }));
	assert!(err.to_string().contains("storage.postgres.dsn must be non-empty."));
}

#[test]
fn log_level_cannot_be_blank() {
	let mut cfg = base_config();

	cfg.service.log_level = String::new();

	let err = portal_config::validate(&cfg).expect_err("Expected log_level validation error.");

	assert!(err.to_string().contains("service.log_level must be non-empty."));
}

#[test]
fn missing_file_reports_read_error() {
	let path = env::temp_dir().join("portal_config_test_missing.toml");
	let err = portal_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }));
}

#[test]
fn malformed_file_reports_parse_error() {
	let path = write_temp_config("[service\nlog_level = 1".to_string());
	let result = portal_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	assert!(matches!(result, Err(Error::ParseConfig { .. })));
}

#[test]
fn portal_example_toml_is_valid() {
	let cfg: Config = toml::from_str(include_str!("../../../portal.example.toml"))
		.expect("Failed to parse portal.example.toml.");

	portal_config::validate(&cfg).expect("portal.example.toml must be valid.");
}
