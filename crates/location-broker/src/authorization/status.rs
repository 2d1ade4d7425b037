//! Authorization status values and the set of statuses allowed to operate.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LocationError, LocationResult};

/// The permission state governing whether location updates may be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthorizationStatus {
    #[serde(rename = "notDetermined")]
    NotDetermined,
    /// Granted while the app is in use.
    #[serde(rename = "authorizedWhenInUse")]
    AuthorizedLimited,
    /// Granted at all times.
    #[serde(rename = "authorizedAlways")]
    AuthorizedFull,
    #[serde(rename = "restricted")]
    Restricted,
    #[serde(rename = "denied")]
    Denied,
    /// A value the platform reported that this crate does not recognize.
    #[serde(rename = "unknown")]
    Unknown,
}

impl AuthorizationStatus {
    /// Map a raw platform status code. Unrecognized codes degrade to `Unknown`.
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            0 => AuthorizationStatus::NotDetermined,
            1 => AuthorizationStatus::Restricted,
            2 => AuthorizationStatus::Denied,
            3 => AuthorizationStatus::AuthorizedFull,
            4 => AuthorizationStatus::AuthorizedLimited,
            _ => AuthorizationStatus::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AuthorizationStatus::NotDetermined => "notDetermined",
            AuthorizationStatus::AuthorizedLimited => "authorizedWhenInUse",
            AuthorizationStatus::AuthorizedFull => "authorizedAlways",
            AuthorizationStatus::Restricted => "restricted",
            AuthorizationStatus::Denied => "denied",
            AuthorizationStatus::Unknown => "unknown",
        }
    }

    /// Whether this status grants access at some level.
    pub fn is_authorized(&self) -> bool {
        matches!(
            self,
            AuthorizationStatus::AuthorizedLimited | AuthorizationStatus::AuthorizedFull
        )
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The level of access to ask the platform for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthorizationRequestLevel {
    WhenInUse,
    Always,
}

impl AuthorizationRequestLevel {
    /// The request level that would grant `status`, if any.
    ///
    /// Only the two authorized statuses are requestable.
    pub fn for_status(status: AuthorizationStatus) -> Option<Self> {
        match status {
            AuthorizationStatus::AuthorizedLimited => Some(AuthorizationRequestLevel::WhenInUse),
            AuthorizationStatus::AuthorizedFull => Some(AuthorizationRequestLevel::Always),
            _ => None,
        }
    }
}

/// Statuses considered sufficient for `start()` to proceed.
///
/// Only authorized statuses can be members; `Denied`, `Restricted`,
/// `NotDetermined` and `Unknown` are rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<AuthorizationStatus>", into = "Vec<AuthorizationStatus>")]
pub struct AllowedStatusSet {
    statuses: HashSet<AuthorizationStatus>,
}

impl AllowedStatusSet {
    pub fn new(statuses: impl IntoIterator<Item = AuthorizationStatus>) -> LocationResult<Self> {
        let mut set = HashSet::new();
        for status in statuses {
            if !status.is_authorized() {
                return Err(LocationError::InvalidInput(format!(
                    "status '{status}' cannot be an allowed status"
                )));
            }
            set.insert(status);
        }
        Ok(Self { statuses: set })
    }

    pub fn contains(&self, status: AuthorizationStatus) -> bool {
        self.statuses.contains(&status)
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

impl Default for AllowedStatusSet {
    fn default() -> Self {
        Self {
            statuses: HashSet::from([
                AuthorizationStatus::AuthorizedLimited,
                AuthorizationStatus::AuthorizedFull,
            ]),
        }
    }
}

impl TryFrom<Vec<AuthorizationStatus>> for AllowedStatusSet {
    type Error = LocationError;

    fn try_from(statuses: Vec<AuthorizationStatus>) -> LocationResult<Self> {
        Self::new(statuses)
    }
}

impl From<AllowedStatusSet> for Vec<AuthorizationStatus> {
    fn from(set: AllowedStatusSet) -> Self {
        let mut statuses: Vec<_> = set.statuses.into_iter().collect();
        statuses.sort_by_key(|status| status.name());
        statuses
    }
}
