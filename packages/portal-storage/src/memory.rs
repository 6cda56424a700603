//! In-process evaluation of [`UserQuery`] against a fixed set of users.
//!
//! Semantics track the SQL rendering in [`crate::query`]: `LIKE` patterns keep their `%`, `_`
//! and backslash-escape meaning, comparisons against a missing text value never match, and
//! timestamp bounds are parsed once, before any row is visited.

use std::cmp::Ordering;

use regex::Regex;
use time::{
	Date, OffsetDateTime, format_description::well_known::Rfc3339, macros::format_description,
};

use crate::{
	Error, Result,
	models::User,
	query::{Clause, Field, Op, Predicate, UserQuery, VENDOR_ORGANIZATION_TYPE},
};

#[derive(Clone, Debug, Default)]
pub struct MemoryUsers {
	users: Vec<User>,
}
impl MemoryUsers {
	pub fn new(users: Vec<User>) -> Self {
		Self { users }
	}

	pub fn insert(&mut self, user: User) {
		self.users.push(user);
	}

	pub fn len(&self) -> usize {
		self.users.len()
	}

	pub fn is_empty(&self) -> bool {
		self.users.is_empty()
	}

	pub fn search(&self, query: &UserQuery, limit: u32) -> Result<Vec<User>> {
		let checks = query.clauses().iter().map(Check::compile).collect::<Result<Vec<_>>>()?;
		let mut matched: Vec<User> = self
			.users
			.iter()
			.filter(|user| checks.iter().all(|check| check.matches(user)))
			.cloned()
			.collect();

		matched.sort_by(|a, b| match b.created_at.cmp(&a.created_at) {
			Ordering::Equal => a.id.cmp(&b.id),
			other => other,
		});
		matched.truncate(limit as usize);

		tracing::debug!(
			total = self.users.len(),
			matched = matched.len(),
			"Evaluated user query in memory."
		);

		Ok(matched)
	}
}
impl FromIterator<User> for MemoryUsers {
	fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
		Self::new(iter.into_iter().collect())
	}
}

enum Check {
	Assigned(bool),
	Vendor(bool),
	Like { field: Field, pattern: Regex },
	Text { field: Field, op: Op, value: String },
	Time { op: Op, bound: OffsetDateTime },
	Keyword(Regex),
}
impl Check {
	fn compile(clause: &Clause) -> Result<Self> {
		let check = match clause {
			Clause::Assigned => Self::Assigned(true),
			Clause::Unassigned => Self::Assigned(false),
			Clause::Vendor => Self::Vendor(true),
			Clause::NonVendor => Self::Vendor(false),
			Clause::Keyword(keyword) =>
				Self::Keyword(like_regex(&format!("%{}%", keyword.to_lowercase()))?),
			Clause::Filter(Predicate { field, op: Op::LowerLike, value }) =>
				Self::Like { field: *field, pattern: like_regex(value)? },
			Clause::Filter(Predicate { field, op, value }) =>
				if field.is_timestamp() {
					Self::Time { op: *op, bound: parse_timestamp(*field, value)? }
				} else {
					Self::Text { field: *field, op: *op, value: value.clone() }
				},
		};

		Ok(check)
	}

	fn matches(&self, user: &User) -> bool {
		match self {
			Self::Assigned(expected) => user.assigned == *expected,
			Self::Vendor(expected) => match user.requested_organization_type.as_deref() {
				Some(kind) => (kind == VENDOR_ORGANIZATION_TYPE) == *expected,
				None => false,
			},
			Self::Like { field, pattern } => match text_value(user, *field) {
				Some(value) => pattern.is_match(&value.to_lowercase()),
				None => false,
			},
			Self::Text { field, op, value } => match text_value(user, *field) {
				Some(actual) => compare(actual.as_str().cmp(value.as_str()), *op),
				None => false,
			},
			Self::Time { op, bound } => compare(user.created_at.cmp(bound), *op),
			Self::Keyword(pattern) => [&user.first_name, &user.last_name, &user.email]
				.into_iter()
				.any(|value| pattern.is_match(&value.to_lowercase())),
		}
	}
}

fn text_value(user: &User, field: Field) -> Option<String> {
	match field {
		Field::RequestedOrganization => user.requested_organization.clone(),
		Field::RequestedOrganizationType => user.requested_organization_type.clone(),
		Field::CreatedAt => user.created_at.format(&Rfc3339).ok(),
	}
}

fn compare(ordering: Ordering, op: Op) -> bool {
	match op {
		Op::Eq => ordering == Ordering::Equal,
		Op::Gt => ordering == Ordering::Greater,
		Op::Lt => ordering == Ordering::Less,
		Op::LowerLike => false,
	}
}

/// Translates a SQL `LIKE` pattern into an anchored regular expression.
pub fn like_regex(pattern: &str) -> Result<Regex> {
	let mut expr = String::from("(?s)^");
	let mut chars = pattern.chars();
	let mut buf = [0_u8; 4];

	while let Some(ch) = chars.next() {
		match ch {
			'%' => expr.push_str(".*"),
			'_' => expr.push('.'),
			'\\' => {
				let literal = chars.next().unwrap_or('\\');

				expr.push_str(&regex::escape(literal.encode_utf8(&mut buf)));
			},
			_ => expr.push_str(&regex::escape(ch.encode_utf8(&mut buf))),
		}
	}

	expr.push('$');

	Regex::new(&expr)
		.map_err(|err| Error::InvalidArgument(format!("Invalid LIKE pattern {pattern:?}: {err}.")))
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_timestamp(field: Field, raw: &str) -> Result<OffsetDateTime> {
	let trimmed = raw.trim();

	if let Ok(ts) = OffsetDateTime::parse(trimmed, &Rfc3339) {
		return Ok(ts);
	}

	Date::parse(trimmed, format_description!("[year]-[month]-[day]"))
		.map(|date| date.midnight().assume_utc())
		.map_err(|_| Error::InvalidArgument(format!("{field} bound {raw:?} is not a timestamp.")))
}
