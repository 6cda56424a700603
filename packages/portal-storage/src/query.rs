//! Immutable, chainable user scopes.
//!
//! A [`UserQuery`] is a conjunction of [`Clause`]s. Every narrowing operation consumes the query
//! and returns a new one with one more clause, so a query can only ever get stricter. Execution
//! lives elsewhere: [`crate::users::search`] renders the clauses as SQL and
//! [`crate::memory::MemoryUsers`] evaluates them in process.

use std::fmt::{Display, Formatter};

use sqlx::{Postgres, QueryBuilder};

/// Requested organization type that marks a health IT vendor account.
pub const VENDOR_ORGANIZATION_TYPE: &str = "health_it_vendor";

const USER_COLUMNS: &str = "\
SELECT
	users.id,
	users.first_name,
	users.last_name,
	users.email,
	users.requested_organization,
	users.requested_organization_type,
	users.created_at,
	EXISTS (
		SELECT 1 FROM organization_user_assignments a WHERE a.user_id = users.id
	) AS assigned
FROM users
WHERE TRUE";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserQuery {
	clauses: Vec<Clause>,
}
impl UserQuery {
	pub fn all() -> Self {
		Self::default()
	}

	pub fn assigned_non_vendor() -> Self {
		Self::all().assigned().with(Clause::NonVendor)
	}

	pub fn assigned_vendor() -> Self {
		Self::all().assigned().with(Clause::Vendor)
	}

	pub fn assigned(self) -> Self {
		self.with(Clause::Assigned)
	}

	pub fn unassigned(self) -> Self {
		self.with(Clause::Unassigned)
	}

	pub fn filter(self, predicate: Predicate) -> Self {
		self.with(Clause::Filter(predicate))
	}

	/// Case-insensitive substring match on first name, last name, or email.
	pub fn by_keyword(self, keyword: &str) -> Self {
		self.with(Clause::Keyword(keyword.to_string()))
	}

	pub fn clauses(&self) -> &[Clause] {
		&self.clauses
	}

	/// Builds the `SELECT` for this scope, newest users first.
	pub fn to_select(&self, limit: u32) -> QueryBuilder<'static, Postgres> {
		let mut builder = QueryBuilder::new(USER_COLUMNS);

		for clause in &self.clauses {
			builder.push(" AND ");
			clause.push_sql(&mut builder);
		}

		builder.push(" ORDER BY users.created_at DESC, users.id LIMIT ");
		builder.push_bind(i64::from(limit));

		builder
	}

	fn with(mut self, clause: Clause) -> Self {
		self.clauses.push(clause);

		self
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Clause {
	Assigned,
	Unassigned,
	Vendor,
	NonVendor,
	Filter(Predicate),
	Keyword(String),
}
impl Clause {
	fn push_sql(&self, builder: &mut QueryBuilder<'static, Postgres>) {
		match self {
			Self::Assigned => {
				builder.push(
					"EXISTS (SELECT 1 FROM organization_user_assignments a WHERE a.user_id = users.id)",
				);
			},
			Self::Unassigned => {
				builder.push(
					"NOT EXISTS (SELECT 1 FROM organization_user_assignments a WHERE a.user_id = users.id)",
				);
			},
			Self::Vendor => {
				builder.push("users.requested_organization_type = ");
				builder.push_bind(VENDOR_ORGANIZATION_TYPE);
			},
			Self::NonVendor => {
				builder.push("users.requested_organization_type <> ");
				builder.push_bind(VENDOR_ORGANIZATION_TYPE);
			},
			Self::Filter(predicate) => predicate.push_sql(builder),
			Self::Keyword(keyword) => {
				let pattern = format!("%{}%", keyword.to_lowercase());

				builder.push("(LOWER(users.first_name) LIKE ");
				builder.push_bind(pattern.clone());
				builder.push(" OR LOWER(users.last_name) LIKE ");
				builder.push_bind(pattern.clone());
				builder.push(" OR LOWER(users.email) LIKE ");
				builder.push_bind(pattern);
				builder.push(")");
			},
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
	RequestedOrganization,
	RequestedOrganizationType,
	CreatedAt,
}
impl Field {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::RequestedOrganization => "requested_organization",
			Self::RequestedOrganizationType => "requested_organization_type",
			Self::CreatedAt => "created_at",
		}
	}

	pub fn is_timestamp(&self) -> bool {
		matches!(self, Self::CreatedAt)
	}
}
impl Display for Field {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
	/// `LOWER(field) LIKE pattern`. The pattern is used as given.
	LowerLike,
	Eq,
	Gt,
	Lt,
}

/// A single field comparison. Values stay textual until execution, where the store decides how
/// to interpret them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Predicate {
	pub field: Field,
	pub op: Op,
	pub value: String,
}
impl Predicate {
	pub fn lower_like(field: Field, pattern: impl Into<String>) -> Self {
		Self { field, op: Op::LowerLike, value: pattern.into() }
	}

	pub fn eq(field: Field, value: impl Into<String>) -> Self {
		Self { field, op: Op::Eq, value: value.into() }
	}

	pub fn gt(field: Field, value: impl Into<String>) -> Self {
		Self { field, op: Op::Gt, value: value.into() }
	}

	pub fn lt(field: Field, value: impl Into<String>) -> Self {
		Self { field, op: Op::Lt, value: value.into() }
	}

	fn push_sql(&self, builder: &mut QueryBuilder<'static, Postgres>) {
		let column = format!("users.{}", self.field);
		let operator = match self.op {
			Op::LowerLike => {
				if self.field.is_timestamp() {
					builder.push(format!("LOWER(CAST({column} AS text)) LIKE "));
				} else {
					builder.push(format!("LOWER({column}) LIKE "));
				}

				builder.push_bind(self.value.clone());

				return;
			},
			Op::Eq => " = ",
			Op::Gt => " > ",
			Op::Lt => " < ",
		};

		builder.push(column);
		builder.push(operator);

		if self.field.is_timestamp() {
			builder.push("CAST(");
			builder.push_bind(self.value.clone());
			builder.push(" AS timestamptz)");
		} else {
			builder.push_bind(self.value.clone());
		}
	}
}
