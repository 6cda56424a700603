use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A portal account as seen by user search.
///
/// `assigned` is derived: it is true when at least one organization assignment references the
/// user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
	pub id: Uuid,
	pub first_name: String,
	pub last_name: String,
	pub email: String,
	pub requested_organization: Option<String>,
	pub requested_organization_type: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	#[serde(default)]
	pub assigned: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Organization {
	pub id: Uuid,
	pub name: String,
	pub organization_type: String,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}
