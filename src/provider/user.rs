use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// User record shared by all providers.
///
/// Every field is optional: providers fill in what their profile endpoint
/// returns, anything without a dedicated field ends up in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
	#[serde(default, deserialize_with = "string_or_number")]
	pub id: Option<String>,

	pub email: Option<String>,

	pub name: Option<String>,

	pub first_name: Option<String>,

	pub last_name: Option<String>,

	pub nickname: Option<String>,

	#[serde(default)]
	pub roles: Vec<Role>,

	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Group role of a Hitobito person, returned with the `with_roles` scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Role {
	#[serde(default, deserialize_with = "string_or_number")]
	pub group_id: Option<String>,

	pub group_name: Option<String>,

	pub role_name: Option<String>,

	pub role_class: Option<String>,

	#[serde(default)]
	pub permissions: Vec<String>,

	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Identifiers are numbers in Hitobito, strings elsewhere.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Id {
		String(String),
		Unsigned(u64),
		Signed(i64),
	}

	Ok(Option::<Id>::deserialize(deserializer)?.map(|id| match id {
		Id::String(s) => s,
		Id::Unsigned(n) => n.to_string(),
		Id::Signed(n) => n.to_string(),
	}))
}
