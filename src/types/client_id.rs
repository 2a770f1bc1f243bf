use str_newtype::StrNewType;

/// OAuth 2.0 client identifier, as registered in the Hitobito OAuth
/// application settings.
///
/// The identifier is opaque: any text is accepted and percent-encoded where
/// it is sent. Emptiness is rejected by the provider configuration instead.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-2.2>
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(
	serde,
	owned(ClientIdBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash))
)]
pub struct ClientId(str);

impl ClientId {
	pub const fn validate_str(_s: &str) -> bool {
		true
	}

	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		std::str::from_utf8(bytes).is_ok()
	}
}

impl ClientIdBuf {
	/// Wraps a configured client identifier.
	pub fn new_opaque(client_id: String) -> Self {
		// SAFETY: every string is a valid client identifier.
		unsafe { Self::new_unchecked(client_id) }
	}
}
