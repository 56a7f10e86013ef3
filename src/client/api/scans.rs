//! Scan API trait

use async_trait::async_trait;

use crate::client::models::{Folder, PermissionEntry, Scan, ScanAcl, UserGroup, UserSummary};
use crate::error::Result;

/// Scan, folder, user and scan-ACL operations
#[async_trait]
pub trait ScanApi: Send + Sync {
    /// List scans, optionally restricted to a folder
    async fn list_scans(&self, folder_id: Option<u64>) -> Result<Vec<Scan>>;

    /// List scan folders
    async fn list_folders(&self) -> Result<Vec<Folder>>;

    /// Get user details
    async fn get_user(&self, user_id: u64) -> Result<UserSummary>;

    /// List user groups
    async fn list_groups(&self) -> Result<Vec<UserGroup>>;

    /// List the ACL entries of a scan
    async fn list_scan_permissions(&self, scan_id: u64) -> Result<Vec<PermissionEntry>>;

    /// Replace one ACL entry of a scan
    async fn change_scan_permission(&self, scan_id: u64, entry: &PermissionEntry) -> Result<()>;

    /// Apply a new ACL list to a scan, optionally transferring ownership
    async fn configure_scan_acls(
        &self,
        scan_id: u64,
        owner_id: Option<u64>,
        acls: &ScanAcl,
    ) -> Result<()>;
}
