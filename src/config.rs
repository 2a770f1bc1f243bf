//! Hitobito provider settings and their loader.
//!
//! The provider itself only ever sees a resolved [`HitobitoConfig`]; where
//! the values come from (environment, flags, a broker config file) is up to
//! the loader.
use serde::Deserialize;

use crate::{ClientSecret, grant::authorization_code::ClientAuthMethod};

/// A configuration setting, by its flag and environment names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setting {
	pub flag: &'static str,
	pub env: &'static str,
}

pub const DOMAIN: Setting = Setting {
	flag: "providers.hitobito.domain",
	env: "HITOBITO_DOMAIN",
};

pub const CLIENT_ID: Setting = Setting {
	flag: "providers.hitobito.client-id",
	env: "HITOBITO_CLIENT_ID",
};

pub const CLIENT_SECRET: Setting = Setting {
	flag: "providers.hitobito.client-secret",
	env: "HITOBITO_CLIENT_SECRET",
};

pub const REQUIRED_SETTINGS: [Setting; 3] = [DOMAIN, CLIENT_ID, CLIENT_SECRET];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HitobitoConfig {
	/// Base URL of the Hitobito instance, without trailing slash
	/// (e.g. `https://db.scout.ch`).
	#[serde(default)]
	pub domain: String,

	#[serde(default)]
	pub client_id: String,

	#[serde(default)]
	pub client_secret: ClientSecret,

	#[serde(default)]
	pub auth_method: ClientAuthMethod,
}

impl HitobitoConfig {
	pub fn new(
		domain: impl Into<String>,
		client_id: impl Into<String>,
		client_secret: impl Into<ClientSecret>,
	) -> Self {
		Self {
			domain: domain.into(),
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			auth_method: ClientAuthMethod::default(),
		}
	}

	/// Reads the settings from the process environment.
	///
	/// Unset variables are left empty; [`HitobitoConfig::missing`] reports
	/// them.
	pub fn from_env() -> Self {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Reads the settings through `lookup`, called with each environment
	/// variable name.
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
		let get = |setting: Setting| lookup(setting.env).unwrap_or_default();

		Self::new(get(DOMAIN), get(CLIENT_ID), get(CLIENT_SECRET))
	}

	/// Required settings that are empty.
	pub fn missing(&self) -> Vec<Setting> {
		let mut missing = Vec::new();

		if self.domain.is_empty() {
			missing.push(DOMAIN);
		}

		if self.client_id.is_empty() {
			missing.push(CLIENT_ID);
		}

		if self.client_secret.is_empty() {
			missing.push(CLIENT_SECRET);
		}

		missing
	}
}
