use uuid::Uuid;

use crate::{Result, db::Db, models::User, query::UserQuery};

pub async fn search(db: &Db, query: &UserQuery, limit: u32) -> Result<Vec<User>> {
	let mut builder = query.to_select(limit);
	let users: Vec<User> = builder.build_query_as().fetch_all(&db.pool).await?;

	tracing::debug!(clauses = query.clauses().len(), rows = users.len(), "Fetched users.");

	Ok(users)
}

pub async fn insert_user(db: &Db, user: &User) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO users (
	id,
	first_name,
	last_name,
	email,
	requested_organization,
	requested_organization_type,
	created_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7)",
	)
	.bind(user.id)
	.bind(user.first_name.as_str())
	.bind(user.last_name.as_str())
	.bind(user.email.as_str())
	.bind(user.requested_organization.as_deref())
	.bind(user.requested_organization_type.as_deref())
	.bind(user.created_at)
	.execute(&db.pool)
	.await?;

	Ok(())
}

/// Links a user to an organization. Repeating an existing link is a no-op.
pub async fn assign_organization(db: &Db, user_id: Uuid, organization_id: Uuid) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO organization_user_assignments (id, organization_id, user_id)
VALUES ($1, $2, $3)
ON CONFLICT (organization_id, user_id) DO NOTHING",
	)
	.bind(Uuid::new_v4())
	.bind(organization_id)
	.bind(user_id)
	.execute(&db.pool)
	.await?;

	Ok(())
}
