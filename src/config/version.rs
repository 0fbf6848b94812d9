//! Shopify Admin API version selection.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Shopify Admin API version used in the `/admin/api/{version}` path segment.
///
/// Shopify releases quarterly (January, April, July, October). Versions not
/// listed here can still be used through [`ApiVersion::Custom`].
///
/// ```rust
/// use shopify_ebay_sync::ApiVersion;
///
/// let version: ApiVersion = "2026-01".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2026_01);
/// assert_eq!(version.to_string(), "2026-01");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version 2025-07
    V2025_07,
    /// API version 2025-10
    V2025_10,
    /// API version 2026-01
    V2026_01,
    /// API version 2026-04
    V2026_04,
    /// API version 2026-07
    V2026_07,
    /// Unstable API version.
    Unstable,
    /// Any other `YYYY-MM` release.
    Custom(String),
}

impl ApiVersion {
    /// Returns the latest stable API version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2026_07
    }

    /// Returns the oldest version still inside Shopify's support window.
    #[must_use]
    pub const fn minimum_supported() -> Self {
        Self::V2025_10
    }

    /// Returns `true` for the named stable releases.
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        !matches!(self, Self::Unstable | Self::Custom(_))
    }

    /// Returns `true` when the version has left the support window.
    ///
    /// `Unstable` and `Custom` are never considered deprecated.
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.is_stable() && self.ordinal() < Self::minimum_supported().ordinal()
    }

    const fn ordinal(&self) -> u32 {
        match self {
            Self::V2025_07 => 1,
            Self::V2025_10 => 2,
            Self::V2026_01 => 3,
            Self::V2026_04 => 4,
            Self::V2026_07 => 5,
            Self::Unstable => 100,
            Self::Custom(_) => 101,
        }
    }

    fn is_release_format(s: &str) -> bool {
        let Some((year, month)) = s.split_once('-') else {
            return false;
        };
        year.len() == 4
            && year.chars().all(|c| c.is_ascii_digit())
            && matches!(month, "01" | "04" | "07" | "10")
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version_str = match self {
            Self::V2025_07 => "2025-07",
            Self::V2025_10 => "2025-10",
            Self::V2026_01 => "2026-01",
            Self::V2026_04 => "2026-04",
            Self::V2026_07 => "2026-07",
            Self::Unstable => "unstable",
            Self::Custom(s) => s,
        };
        f.write_str(version_str)
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "2025-07" => Ok(Self::V2025_07),
            "2025-10" => Ok(Self::V2025_10),
            "2026-01" => Ok(Self::V2026_01),
            "2026-04" => Ok(Self::V2026_04),
            "2026-07" => Ok(Self::V2026_07),
            "unstable" => Ok(Self::Unstable),
            _ if Self::is_release_format(&s) => Ok(Self::Custom(s)),
            _ => Err(ConfigError::InvalidApiVersion { version: s }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_known_and_custom_versions() {
        assert_eq!("2025-10".parse::<ApiVersion>().unwrap(), ApiVersion::V2025_10);
        assert_eq!("UNSTABLE".parse::<ApiVersion>().unwrap(), ApiVersion::Unstable);
        assert_eq!(
            "2027-01".parse::<ApiVersion>().unwrap(),
            ApiVersion::Custom("2027-01".to_string())
        );
    }

    #[test]
    fn test_rejects_malformed_versions() {
        assert!("latest".parse::<ApiVersion>().is_err());
        assert!("2026-02".parse::<ApiVersion>().is_err());
        assert!("26-01".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_deprecation_window() {
        assert!(ApiVersion::V2025_07.is_deprecated());
        assert!(!ApiVersion::minimum_supported().is_deprecated());
        assert!(!ApiVersion::latest().is_deprecated());
        assert!(!ApiVersion::Custom("2027-01".to_string()).is_deprecated());
    }
}
