const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS users (
	id uuid PRIMARY KEY,
	first_name text NOT NULL,
	last_name text NOT NULL,
	email text NOT NULL UNIQUE,
	requested_organization text,
	requested_organization_type text,
	created_at timestamptz NOT NULL DEFAULT now()
);
CREATE INDEX IF NOT EXISTS users_created_at_idx ON users (created_at DESC, id);
CREATE TABLE IF NOT EXISTS organizations (
	id uuid PRIMARY KEY,
	name text NOT NULL,
	organization_type text NOT NULL,
	created_at timestamptz NOT NULL DEFAULT now()
);
CREATE TABLE IF NOT EXISTS organization_user_assignments (
	id uuid PRIMARY KEY,
	organization_id uuid NOT NULL REFERENCES organizations (id) ON DELETE CASCADE,
	user_id uuid NOT NULL REFERENCES users (id) ON DELETE CASCADE,
	created_at timestamptz NOT NULL DEFAULT now(),
	UNIQUE (organization_id, user_id)
);
CREATE INDEX IF NOT EXISTS organization_user_assignments_user_idx
	ON organization_user_assignments (user_id);
";

pub fn statements() -> impl Iterator<Item = &'static str> {
	SCHEMA.split(';').map(str::trim).filter(|statement| !statement.is_empty())
}
