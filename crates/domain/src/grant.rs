use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use sharescope_core::{AppResult, NonEmptyString};

/// Composite key of one permission on a drive item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GrantKey {
    drive_id: NonEmptyString,
    item_id: NonEmptyString,
    permission_id: NonEmptyString,
}

impl GrantKey {
    /// Creates a validated grant key. Every part must be non-blank.
    pub fn new(
        drive_id: impl Into<String>,
        item_id: impl Into<String>,
        permission_id: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            drive_id: NonEmptyString::new(drive_id)?,
            item_id: NonEmptyString::new(item_id)?,
            permission_id: NonEmptyString::new(permission_id)?,
        })
    }

    /// Returns the drive identifier.
    #[must_use]
    pub fn drive_id(&self) -> &str {
        self.drive_id.as_str()
    }

    /// Returns the drive item identifier.
    #[must_use]
    pub fn item_id(&self) -> &str {
        self.item_id.as_str()
    }

    /// Returns the permission identifier.
    #[must_use]
    pub fn permission_id(&self) -> &str {
        self.permission_id.as_str()
    }

    /// Returns the `driveId:itemId:permissionId` entity identifier.
    #[must_use]
    pub fn composite_id(&self) -> String {
        self.to_string()
    }
}

impl Display for GrantKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}:{}:{}",
            self.drive_id.as_str(),
            self.item_id.as_str(),
            self.permission_id.as_str()
        )
    }
}

/// Sharing link metadata attached to a link-based permission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharingLink {
    /// Link audience, for example `anonymous` or `organization`.
    pub scope: Option<String>,
    /// Link kind, for example `view` or `edit`.
    #[serde(rename = "type")]
    pub link_type: Option<String>,
    /// Shareable URL.
    pub web_url: Option<String>,
    /// Expiration timestamp as reported by the directory service.
    pub expiration: Option<String>,
}

/// Pointer to the item a permission is inherited from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemReference {
    /// Drive containing the source item.
    pub drive_id: Option<String>,
    /// Source item identifier.
    pub item_id: Option<String>,
}

/// Live permission state fetched from the directory service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGrant {
    /// Composite key of the permission.
    pub key: GrantKey,
    /// Roles granted, for example `read`, `write` or `owner`.
    pub roles: Vec<String>,
    /// Link metadata for sharing-link permissions.
    pub link: Option<SharingLink>,
    /// Source item when the permission is inherited.
    pub inherited_from: Option<ItemReference>,
}
