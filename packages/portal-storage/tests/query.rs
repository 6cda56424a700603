use time::macros::datetime;
use uuid::Uuid;

use portal_storage::{
	Error,
	memory::{self, MemoryUsers},
	models::User,
	query::{Field, Predicate, UserQuery},
};

fn sample_user(id: u128, org: Option<&str>) -> User {
	User {
		id: Uuid::from_u128(id),
		first_name: "Grace".to_string(),
		last_name: "Hopper".to_string(),
		email: "grace@example.com".to_string(),
		requested_organization: org.map(str::to_string),
		requested_organization_type: None,
		created_at: datetime!(2024-06-01 12:00 UTC),
		assigned: false,
	}
}

#[test]
fn all_scope_renders_without_clauses() {
	let builder = UserQuery::all().to_select(25);
	let sql = builder.sql();

	assert!(sql.contains("FROM users\nWHERE TRUE ORDER BY"), "Unexpected SQL: {sql}");
	assert!(sql.ends_with("ORDER BY users.created_at DESC, users.id LIMIT $1"));
}

#[test]
fn named_scopes_render_assignment_and_vendor_checks() {
	let builder = UserQuery::assigned_vendor().to_select(25);
	let sql = builder.sql();

	assert!(sql.contains(
		" AND EXISTS (SELECT 1 FROM organization_user_assignments a WHERE a.user_id = users.id) AND users.requested_organization_type = $1"
	));

	let builder = UserQuery::all().unassigned().to_select(25);

	assert!(builder.sql().contains(" AND NOT EXISTS (SELECT 1 FROM organization_user_assignments"));
}

#[test]
fn predicates_bind_every_value() {
	let query = UserQuery::all()
		.filter(Predicate::lower_like(Field::RequestedOrganization, "%acme%"))
		.filter(Predicate::eq(Field::RequestedOrganizationType, "clinic"))
		.filter(Predicate::gt(Field::CreatedAt, "2024-01-01"))
		.filter(Predicate::lt(Field::CreatedAt, "2024-12-31"))
		.by_keyword("O'Brien");
	let builder = query.to_select(10);
	let sql = builder.sql();

	assert!(sql.contains("LOWER(users.requested_organization) LIKE $1"), "Unexpected SQL: {sql}");
	assert!(sql.contains("users.requested_organization_type = $2"));
	assert!(sql.contains("users.created_at > CAST($3 AS timestamptz)"));
	assert!(sql.contains("users.created_at < CAST($4 AS timestamptz)"));
	assert!(sql.contains(
		"(LOWER(users.first_name) LIKE $5 OR LOWER(users.last_name) LIKE $6 OR LOWER(users.email) LIKE $7)"
	));
	assert!(sql.ends_with("LIMIT $8"));
	assert!(!sql.contains("O'Brien") && !sql.contains("acme"));
}

#[test]
fn narrowing_never_touches_the_original() {
	let base = UserQuery::assigned_non_vendor();
	let narrowed = base.clone().by_keyword("grace");

	assert_eq!(base.clauses().len(), 2);
	assert_eq!(narrowed.clauses().len(), 3);
	assert_eq!(&narrowed.clauses()[..2], base.clauses());
}

#[test]
fn like_patterns_follow_sql_wildcards() {
	let pattern = memory::like_regex("%ac_e%").expect("Valid pattern.");

	assert!(pattern.is_match("acme corp"));
	assert!(pattern.is_match("the acre"));
	assert!(!pattern.is_match("ace"));

	let escaped = memory::like_regex("100\\%").expect("Valid pattern.");

	assert!(escaped.is_match("100%"));
	assert!(!escaped.is_match("1000"));

	let literal = memory::like_regex("a.b(c)").expect("Valid pattern.");

	assert!(literal.is_match("a.b(c)"));
	assert!(!literal.is_match("axb(c)"));
}

#[test]
fn timestamps_accept_rfc3339_and_dates() {
	let ts = memory::parse_timestamp(Field::CreatedAt, "2024-06-01T12:00:00+02:00")
		.expect("Valid timestamp.");

	assert_eq!(ts, datetime!(2024-06-01 10:00 UTC));

	let date = memory::parse_timestamp(Field::CreatedAt, " 2024-06-01 ").expect("Valid date.");

	assert_eq!(date, datetime!(2024-06-01 0:00 UTC));

	let err = memory::parse_timestamp(Field::CreatedAt, "06/01/2024").expect_err("Invalid date.");

	assert!(matches!(err, Error::InvalidArgument(message) if message.contains("created_at")));
}

#[test]
fn missing_text_values_never_match() {
	let store: MemoryUsers =
		[sample_user(1, None), sample_user(2, Some("Acme"))].into_iter().collect();
	let query = UserQuery::all().filter(Predicate::lower_like(Field::RequestedOrganization, "%"));
	let users = store.search(&query, 10).expect("Failed to search.");

	assert_eq!(users.len(), 1);
	assert_eq!(users[0].id, Uuid::from_u128(2));
}

#[test]
fn memory_search_orders_newest_first_and_limits() {
	let mut older = sample_user(9, None);

	older.created_at = datetime!(2023-01-01 0:00 UTC);

	let mut store = MemoryUsers::new(vec![older, sample_user(3, None), sample_user(1, None)]);

	store.insert(sample_user(2, None));

	assert_eq!(store.len(), 4);

	let users = store.search(&UserQuery::all(), 3).expect("Failed to search.");
	let ids: Vec<u128> = users.iter().map(|user| user.id.as_u128()).collect();

	assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn invalid_bounds_fail_even_without_rows() {
	let store = MemoryUsers::default();
	let query = UserQuery::all().filter(Predicate::lt(Field::CreatedAt, "soon"));

	assert!(store.is_empty());
	assert!(matches!(store.search(&query, 10), Err(Error::InvalidArgument(_))));
}

#[test]
fn users_round_trip_through_json_fixtures() {
	let raw = serde_json::json!([{
		"id": "00000000-0000-0000-0000-000000000007",
		"first_name": "Ada",
		"last_name": "Lovelace",
		"email": "ada@example.com",
		"requested_organization": "Analytical Engines",
		"requested_organization_type": null,
		"created_at": "2024-06-01T12:00:00Z"
	}]);
	let users: Vec<User> = serde_json::from_value(raw).expect("Failed to parse fixture.");

	assert_eq!(users[0].id, Uuid::from_u128(7));
	assert!(!users[0].assigned);
}
