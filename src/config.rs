use serde::Deserialize;

/// Three-state option flag.
///
/// Only an explicit `false` opts out; anything else (including an absent
/// key) resolves to enabled. Kept as its own type so `0`-style truthiness
/// bugs cannot sneak in through deserialization.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(from = "bool")]
pub enum Flag {
	#[default]
	Unset,
	Enabled,
	Disabled,
}

impl From<bool> for Flag {
	fn from(value: bool) -> Self {
		if value { Flag::Enabled } else { Flag::Disabled }
	}
}

impl Flag {
	pub fn resolve(self) -> bool {
		!matches!(self, Flag::Disabled)
	}
}

/// Options for [`PathCaseNormalizer`](crate::normalizer::PathCaseNormalizer).
///
/// Built once at setup time and shared read-only across all requests.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
	defer: Flag,
	chained: Flag,
}

impl NormalizerConfig {
	pub fn new() -> Self {
		Self::default()
	}

	/// Run the rest of the chain before the case check (default: enabled).
	pub fn defer(mut self, enabled: bool) -> Self {
		self.defer = enabled.into();
		self
	}

	/// Also act on a redirect `Location` a later stage already produced
	/// (default: enabled).
	pub fn chained(mut self, enabled: bool) -> Self {
		self.chained = enabled.into();
		self
	}

	pub fn is_deferred(&self) -> bool {
		self.defer.resolve()
	}

	pub fn is_chained(&self) -> bool {
		self.chained.resolve()
	}
}
