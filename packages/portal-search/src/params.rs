use serde::{Deserialize, Serialize};

/// Optional user search filters. Every key may be absent; blank values count as absent.
///
/// Values are kept as the caller sent them. Timestamps in particular are not parsed here, the
/// store interprets them when the query runs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
	pub org_status: Option<String>,
	pub requested_org: Option<String>,
	pub requested_org_type: Option<String>,
	pub created_after: Option<String>,
	pub created_before: Option<String>,
	pub keyword: Option<String>,
}
impl FilterParams {
	/// Collects filters from loose key/value pairs, such as decoded query string pairs. Unknown
	/// keys are ignored; a repeated key keeps its last value.
	pub fn from_pairs<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: Into<String>,
	{
		let mut params = Self::default();

		for (key, value) in pairs {
			let slot = match key.as_ref() {
				"org_status" => &mut params.org_status,
				"requested_org" => &mut params.requested_org,
				"requested_org_type" => &mut params.requested_org_type,
				"created_after" => &mut params.created_after,
				"created_before" => &mut params.created_before,
				"keyword" => &mut params.keyword,
				_ => continue,
			};

			*slot = Some(value.into());
		}

		params
	}

	pub fn org_status(&self) -> Option<OrgStatus> {
		match self.org_status.as_deref() {
			Some("unassigned") => Some(OrgStatus::Unassigned),
			Some("assigned") => Some(OrgStatus::Assigned),
			_ => None,
		}
	}

	pub fn requested_org(&self) -> Option<&str> {
		present(&self.requested_org)
	}

	pub fn requested_org_type(&self) -> Option<&str> {
		present(&self.requested_org_type)
	}

	pub fn created_after(&self) -> Option<&str> {
		present(&self.created_after)
	}

	pub fn created_before(&self) -> Option<&str> {
		present(&self.created_before)
	}

	pub fn keyword(&self) -> Option<&str> {
		present(&self.keyword)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrgStatus {
	Assigned,
	Unassigned,
}

fn present(value: &Option<String>) -> Option<&str> {
	value.as_deref().filter(|value| !value.trim().is_empty())
}
