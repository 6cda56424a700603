use std::cell::OnceCell;

use portal_storage::{
	db::Db,
	memory::MemoryUsers,
	models::User,
	query::{Field, Predicate, UserQuery},
	users,
};

use crate::{FilterParams, InitialScope, OrgStatus, Result};

type Stage = fn(&FilterParams, UserQuery) -> UserQuery;

const STAGES: [Stage; 3] = [apply_org_queries, apply_date_queries, apply_keyword_search];

/// Narrows an initial user scope by the filters in [`FilterParams`].
///
/// The composed query is built on the first call to [`UserSearch::results`] and reused for the
/// lifetime of the instance. An instance is meant to serve a single request.
#[derive(Debug)]
pub struct UserSearch {
	params: FilterParams,
	initial_scope: InitialScope,
	base: fn() -> UserQuery,
	results: OnceCell<UserQuery>,
}
impl UserSearch {
	pub fn new(params: FilterParams, scope: InitialScope) -> Self {
		Self { params, initial_scope: scope, base: scope.base(), results: OnceCell::new() }
	}

	/// Like [`UserSearch::new`], with the scope given by name.
	pub fn try_new(params: FilterParams, scope: &str) -> Result<Self> {
		let scope = scope.parse::<InitialScope>()?;

		Ok(Self::new(params, scope))
	}

	pub fn params(&self) -> &FilterParams {
		&self.params
	}

	pub fn initial_scope(&self) -> InitialScope {
		self.initial_scope
	}

	pub fn results(&self) -> &UserQuery {
		self.results.get_or_init(|| self.query())
	}

	pub async fn fetch(&self, db: &Db, limit: u32) -> Result<Vec<User>> {
		Ok(users::search(db, self.results(), limit).await?)
	}

	pub fn fetch_from(&self, store: &MemoryUsers, limit: u32) -> Result<Vec<User>> {
		Ok(store.search(self.results(), limit)?)
	}

	fn query(&self) -> UserQuery {
		let query = STAGES.iter().fold((self.base)(), |scope, stage| stage(&self.params, scope));

		tracing::debug!(
			initial_scope = %self.initial_scope,
			clauses = query.clauses().len(),
			"Composed user search."
		);

		query
	}
}

fn apply_org_queries(params: &FilterParams, scope: UserQuery) -> UserQuery {
	let mut scope = match params.org_status() {
		Some(OrgStatus::Unassigned) => scope.unassigned(),
		Some(OrgStatus::Assigned) => scope.assigned(),
		None => scope,
	};

	if let Some(org) = params.requested_org() {
		scope = scope.filter(Predicate::lower_like(
			Field::RequestedOrganization,
			format!("%{}%", org.to_lowercase()),
		));
	}
	if let Some(org_type) = params.requested_org_type() {
		scope = scope.filter(Predicate::eq(Field::RequestedOrganizationType, org_type));
	}

	scope
}

fn apply_date_queries(params: &FilterParams, mut scope: UserQuery) -> UserQuery {
	if let Some(after) = params.created_after() {
		scope = scope.filter(Predicate::gt(Field::CreatedAt, after));
	}
	if let Some(before) = params.created_before() {
		scope = scope.filter(Predicate::lt(Field::CreatedAt, before));
	}

	scope
}

fn apply_keyword_search(params: &FilterParams, scope: UserQuery) -> UserQuery {
	match params.keyword() {
		Some(keyword) => scope.by_keyword(keyword),
		None => scope,
	}
}
