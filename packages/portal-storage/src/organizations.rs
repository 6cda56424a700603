use crate::{Error, Result, db::Db, models::Organization};

pub async fn insert_organization(db: &Db, organization: &Organization) -> Result<()> {
	if organization.name.trim().is_empty() {
		return Err(Error::InvalidArgument("organization name must not be empty.".to_string()));
	}

	sqlx::query(
		"\
INSERT INTO organizations (id, name, organization_type, created_at)
VALUES ($1, $2, $3, $4)",
	)
	.bind(organization.id)
	.bind(organization.name.as_str())
	.bind(organization.organization_type.as_str())
	.bind(organization.created_at)
	.execute(&db.pool)
	.await?;

	Ok(())
}
