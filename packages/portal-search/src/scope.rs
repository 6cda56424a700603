use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

use portal_storage::query::UserQuery;

use crate::Error;

/// Entry points a user search may start from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialScope {
	#[default]
	All,
	AssignedNonVendor,
	AssignedVendor,
}
impl InitialScope {
	pub const ALLOWED: [Self; 3] = [Self::All, Self::AssignedNonVendor, Self::AssignedVendor];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::All => "all",
			Self::AssignedNonVendor => "assigned_non_vendor",
			Self::AssignedVendor => "assigned_vendor",
		}
	}

	/// The store constructor this scope starts from.
	pub fn base(self) -> fn() -> UserQuery {
		match self {
			Self::All => UserQuery::all,
			Self::AssignedNonVendor => UserQuery::assigned_non_vendor,
			Self::AssignedVendor => UserQuery::assigned_vendor,
		}
	}
}
impl FromStr for InitialScope {
	type Err = Error;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		Self::ALLOWED
			.into_iter()
			.find(|scope| scope.as_str() == raw)
			.ok_or_else(|| Error::InvalidScope { scope: raw.to_string() })
	}
}
impl Display for InitialScope {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
