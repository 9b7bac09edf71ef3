//! The outcome code enumeration and its wire strings.

use super::OutcomeGroup;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// What happened during one repository processing cycle.
///
/// Wire strings are the canonical values returned by [`OutcomeCode::as_str`].
/// A handful of codes also accept a descriptive alias when parsed (for example
/// `mirrored` for `mirror`); aliases never appear on output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutcomeCode {
    // success
    Done,
    Automerged,

    // repository disabled
    Uninitiated,
    Empty,
    ClosedOnboarding,
    Disabled,
    DisabledByConfig,
    NoConfig,
    Archived,
    Mirrored,
    Renamed,
    Blocked,
    AccessForbidden,
    NotFound,
    ForkModeForked,
    Forked,
    CannotFork,
    ForkMissing,
    NoPackageFiles,

    // temporary
    NoVulnerabilityAlerts,
    RepositoryChanged,
    TemporaryError,

    // configuration
    ConfigValidation,
    MissingApiCredentials,
    SecretsExposed,

    // system
    InsufficientDisk,
    InsufficientMemory,

    // host and platform
    ExternalHostError,
    RateLimitExceeded,
    BadCredentials,
    IntegrationUnauthorized,
    AuthenticationError,

    // other
    LockfileError,
    UnknownError,

    /// A code outside the known set, kept verbatim.
    Unrecognized(String),
}

impl OutcomeCode {
    /// Every known code, grouped in declaration order.
    pub const KNOWN: [Self; 34] = [
        Self::Done,
        Self::Automerged,
        Self::Uninitiated,
        Self::Empty,
        Self::ClosedOnboarding,
        Self::Disabled,
        Self::DisabledByConfig,
        Self::NoConfig,
        Self::Archived,
        Self::Mirrored,
        Self::Renamed,
        Self::Blocked,
        Self::AccessForbidden,
        Self::NotFound,
        Self::ForkModeForked,
        Self::Forked,
        Self::CannotFork,
        Self::ForkMissing,
        Self::NoPackageFiles,
        Self::NoVulnerabilityAlerts,
        Self::RepositoryChanged,
        Self::TemporaryError,
        Self::ConfigValidation,
        Self::MissingApiCredentials,
        Self::SecretsExposed,
        Self::InsufficientDisk,
        Self::InsufficientMemory,
        Self::ExternalHostError,
        Self::RateLimitExceeded,
        Self::BadCredentials,
        Self::IntegrationUnauthorized,
        Self::AuthenticationError,
        Self::LockfileError,
        Self::UnknownError,
    ];

    /// Parses a wire string. Never fails; unknown text becomes
    /// [`OutcomeCode::Unrecognized`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "done" => Self::Done,
            "automerged" => Self::Automerged,
            "uninitiated" => Self::Uninitiated,
            "empty" => Self::Empty,
            "disabled-closed-onboarding" | "closed-onboarding" => Self::ClosedOnboarding,
            "disabled" => Self::Disabled,
            "disabled-by-config" => Self::DisabledByConfig,
            "disabled-no-config" | "no-config" => Self::NoConfig,
            "archived" => Self::Archived,
            "mirror" | "mirrored" => Self::Mirrored,
            "renamed" => Self::Renamed,
            "blocked" => Self::Blocked,
            "forbidden" | "access-forbidden" => Self::AccessForbidden,
            "not-found" => Self::NotFound,
            "fork-mode-forked" => Self::ForkModeForked,
            "fork" | "forked" => Self::Forked,
            "cannot-fork" => Self::CannotFork,
            "fork-missing" => Self::ForkMissing,
            "no-package-files" => Self::NoPackageFiles,
            "no-vulnerability-alerts" => Self::NoVulnerabilityAlerts,
            "repository-changed" => Self::RepositoryChanged,
            "temporary-error" => Self::TemporaryError,
            "config-validation" => Self::ConfigValidation,
            "missing-api-credentials" => Self::MissingApiCredentials,
            "config-secrets-exposed" | "secrets-exposed" => Self::SecretsExposed,
            "disk-space" | "insufficient-disk" => Self::InsufficientDisk,
            "out-of-memory" | "insufficient-memory" => Self::InsufficientMemory,
            "external-host-error" => Self::ExternalHostError,
            "rate-limit-exceeded" => Self::RateLimitExceeded,
            "bad-credentials" => Self::BadCredentials,
            "integration-unauthorized" => Self::IntegrationUnauthorized,
            "authentication-error" => Self::AuthenticationError,
            "lockfile-error" => Self::LockfileError,
            "unknown-error" => Self::UnknownError,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Returns the canonical wire string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Done => "done",
            Self::Automerged => "automerged",
            Self::Uninitiated => "uninitiated",
            Self::Empty => "empty",
            Self::ClosedOnboarding => "disabled-closed-onboarding",
            Self::Disabled => "disabled",
            Self::DisabledByConfig => "disabled-by-config",
            Self::NoConfig => "disabled-no-config",
            Self::Archived => "archived",
            Self::Mirrored => "mirror",
            Self::Renamed => "renamed",
            Self::Blocked => "blocked",
            Self::AccessForbidden => "forbidden",
            Self::NotFound => "not-found",
            Self::ForkModeForked => "fork-mode-forked",
            Self::Forked => "fork",
            Self::CannotFork => "cannot-fork",
            Self::ForkMissing => "fork-missing",
            Self::NoPackageFiles => "no-package-files",
            Self::NoVulnerabilityAlerts => "no-vulnerability-alerts",
            Self::RepositoryChanged => "repository-changed",
            Self::TemporaryError => "temporary-error",
            Self::ConfigValidation => "config-validation",
            Self::MissingApiCredentials => "missing-api-credentials",
            Self::SecretsExposed => "config-secrets-exposed",
            Self::InsufficientDisk => "disk-space",
            Self::InsufficientMemory => "out-of-memory",
            Self::ExternalHostError => "external-host-error",
            Self::RateLimitExceeded => "rate-limit-exceeded",
            Self::BadCredentials => "bad-credentials",
            Self::IntegrationUnauthorized => "integration-unauthorized",
            Self::AuthenticationError => "authentication-error",
            Self::LockfileError => "lockfile-error",
            Self::UnknownError => "unknown-error",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Returns the semantic group of this code.
    #[must_use]
    pub fn group(&self) -> OutcomeGroup {
        match self {
            Self::Done | Self::Automerged => OutcomeGroup::Success,

            Self::Uninitiated
            | Self::Empty
            | Self::ClosedOnboarding
            | Self::Disabled
            | Self::DisabledByConfig
            | Self::NoConfig
            | Self::Archived
            | Self::Mirrored
            | Self::Renamed
            | Self::Blocked
            | Self::AccessForbidden
            | Self::NotFound
            | Self::ForkModeForked
            | Self::Forked
            | Self::CannotFork
            | Self::ForkMissing
            | Self::NoPackageFiles => OutcomeGroup::RepositoryDisabled,

            Self::NoVulnerabilityAlerts | Self::RepositoryChanged | Self::TemporaryError => {
                OutcomeGroup::Temporary
            }

            Self::ConfigValidation | Self::MissingApiCredentials | Self::SecretsExposed => {
                OutcomeGroup::ConfigError
            }

            Self::InsufficientDisk | Self::InsufficientMemory => OutcomeGroup::SystemError,

            Self::ExternalHostError
            | Self::RateLimitExceeded
            | Self::BadCredentials
            | Self::IntegrationUnauthorized
            | Self::AuthenticationError => OutcomeGroup::PlatformError,

            Self::LockfileError | Self::UnknownError => OutcomeGroup::Other,

            Self::Unrecognized(_) => OutcomeGroup::Unrecognized,
        }
    }

    /// Returns true if this code is outside the known set.
    #[must_use]
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized(_))
    }
}

impl FromStr for OutcomeCode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for OutcomeCode {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for OutcomeCode {
    fn from(raw: String) -> Self {
        match Self::parse(&raw) {
            Self::Unrecognized(_) => Self::Unrecognized(raw),
            known => known,
        }
    }
}

impl From<OutcomeCode> for String {
    fn from(code: OutcomeCode) -> Self {
        match code {
            OutcomeCode::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OutcomeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_strings_parse_back() {
        for code in OutcomeCode::KNOWN {
            assert_eq!(OutcomeCode::parse(code.as_str()), code);
        }
    }

    #[test]
    fn known_codes_never_fall_into_unrecognized_group() {
        for code in OutcomeCode::KNOWN {
            assert_ne!(code.group(), OutcomeGroup::Unrecognized, "{code}");
        }
    }

    #[test]
    fn accepts_descriptive_aliases() {
        assert_eq!(OutcomeCode::parse("mirrored"), OutcomeCode::Mirrored);
        assert_eq!(OutcomeCode::parse("forked"), OutcomeCode::Forked);
        assert_eq!(
            OutcomeCode::parse("access-forbidden"),
            OutcomeCode::AccessForbidden
        );
        assert_eq!(
            OutcomeCode::parse("closed-onboarding"),
            OutcomeCode::ClosedOnboarding
        );
        assert_eq!(OutcomeCode::parse("no-config"), OutcomeCode::NoConfig);
        assert_eq!(
            OutcomeCode::parse("secrets-exposed"),
            OutcomeCode::SecretsExposed
        );
        assert_eq!(
            OutcomeCode::parse("insufficient-disk"),
            OutcomeCode::InsufficientDisk
        );
        assert_eq!(
            OutcomeCode::parse("insufficient-memory"),
            OutcomeCode::InsufficientMemory
        );
    }

    #[test]
    fn aliases_render_canonically() {
        assert_eq!(OutcomeCode::parse("mirrored").to_string(), "mirror");
        assert_eq!(OutcomeCode::parse("forked").to_string(), "fork");
    }

    #[test]
    fn unknown_text_is_preserved() {
        let code = OutcomeCode::parse("quantum-flux");
        assert_eq!(code, OutcomeCode::Unrecognized("quantum-flux".to_string()));
        assert_eq!(code.as_str(), "quantum-flux");
        assert_eq!(code.group(), OutcomeGroup::Unrecognized);
        assert!(code.is_unrecognized());
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!(OutcomeCode::parse("DONE").is_unrecognized());
    }

    #[test]
    fn group_sizes() {
        let count = |group| {
            OutcomeCode::KNOWN
                .iter()
                .filter(|code| code.group() == group)
                .count()
        };

        assert_eq!(count(OutcomeGroup::Success), 2);
        assert_eq!(count(OutcomeGroup::RepositoryDisabled), 17);
        assert_eq!(count(OutcomeGroup::Temporary), 3);
        assert_eq!(count(OutcomeGroup::ConfigError), 3);
        assert_eq!(count(OutcomeGroup::SystemError), 2);
        assert_eq!(count(OutcomeGroup::PlatformError), 5);
        assert_eq!(count(OutcomeGroup::Other), 2);
    }

    #[test]
    fn serializes_as_wire_string() {
        let json = serde_json::to_string(&OutcomeCode::Archived).unwrap();
        assert_eq!(json, "\"archived\"");

        let parsed: OutcomeCode = serde_json::from_str("\"not-a-code\"").unwrap();
        assert_eq!(parsed, OutcomeCode::Unrecognized("not-a-code".to_string()));
    }
}
