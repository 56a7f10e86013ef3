//! `fix-scan-permissions` - reset scan ACLs to a known set

use std::path::Path;

use colored::Colorize;
use dialoguer::Input;
use log::debug;

use crate::cli::FixScanPermissionsArgs;
use crate::cli::args::GlobalOptions;
use crate::cli::context::CommandContext;
use crate::client::ScanApi;
use crate::client::models::{
    Permission, PermissionEntry, Scan, ScanAcl, UserGroup, UserSummary,
};
use crate::error::{ApiError, ConfigError, Error, Result};
use crate::models::AclDisplay;
use crate::output::table::format_table;

/// Scans addressed by one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Scan(u64),
    Folder(u64),
}

/// Check the arguments before anything is loaded; the folder wins over the scan.
pub fn validate(
    scan_id: Option<u64>,
    folder_id: Option<u64>,
    acls_file: Option<&Path>,
) -> Result<(Target, &Path)> {
    let target = match (folder_id, scan_id) {
        (Some(folder), _) => Target::Folder(folder),
        (None, Some(scan)) => Target::Scan(scan),
        (None, None) => {
            return Err(ConfigError::InvalidInput(
                "Option --scan-id or --folder-id must be set".to_string(),
            )
            .into());
        }
    };

    let acls_file = acls_file.ok_or_else(|| {
        ConfigError::InvalidInput("Option --acls-file must be set".to_string())
    })?;
    if !acls_file.exists() {
        return Err(ConfigError::InvalidInput(format!(
            "ACLs file does not exist: {}",
            acls_file.display()
        ))
        .into());
    }
    Ok((target, acls_file))
}

/// Load the replacement ACL list.
pub fn load_acls(path: &Path) -> Result<ScanAcl> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| {
        ConfigError::InvalidInput(format!("Unable to load ACLs from {}: {}", path.display(), e))
            .into()
    })
}

/// Look up the new owner, failing when the user does not exist.
pub async fn resolve_owner<C: ScanApi + ?Sized>(client: &C, owner_id: u64) -> Result<UserSummary> {
    match client.get_user(owner_id).await {
        Ok(owner) => {
            println!("(*) Owner found: {} ({})", owner.display_name(), owner.id);
            Ok(owner)
        }
        Err(Error::Api(ApiError::NotFound(_))) => Err(Error::Other(format!(
            "Owner with ID {} does not exist",
            owner_id
        ))),
        Err(e) => Err(e),
    }
}

/// Scans to fix for `target`.
pub async fn resolve_scans<C: ScanApi + ?Sized>(client: &C, target: Target) -> Result<Vec<Scan>> {
    match target {
        Target::Folder(folder_id) => {
            let folders = client.list_folders().await?;
            let folder = folders
                .iter()
                .find(|f| f.id == folder_id)
                .ok_or_else(|| Error::Other(format!("Folder with ID {} does not exist", folder_id)))?;
            println!("(*) Folder found: {} ({})", folder.name, folder.id);
            client.list_scans(Some(folder_id)).await
        }
        Target::Scan(scan_id) => {
            let scan = client
                .list_scans(None)
                .await?
                .into_iter()
                .find(|s| s.id == scan_id)
                .ok_or_else(|| Error::Other(format!("Scan with ID {} does not exist", scan_id)))?;
            println!("(*) Scan found: {} ({})", scan.name, scan.id);
            Ok(vec![scan])
        }
    }
}

fn print_permissions(title: &str, entries: &[PermissionEntry]) {
    let rows: Vec<AclDisplay> = entries.iter().map(AclDisplay::from).collect();
    println!("(*) {}:\n{}", title, format_table(&rows));
}

/// Name of the user or group an ACL entry refers to.
///
/// Groups are listed at most once per scan.
async fn object_name<C: ScanApi + ?Sized>(
    client: &C,
    entry: &PermissionEntry,
    groups: &mut Option<Vec<UserGroup>>,
) -> Result<Option<String>> {
    let Some(id) = entry.id else {
        return Ok(None);
    };
    match entry.kind.as_str() {
        "user" => match client.get_user(id).await {
            Ok(user) => Ok(Some(user.display_name().to_string())),
            Err(Error::Api(ApiError::NotFound(_))) => Ok(None),
            Err(e) => Err(e),
        },
        "group" => {
            if groups.is_none() {
                *groups = Some(client.list_groups().await?);
            }
            Ok(groups
                .as_ref()
                .and_then(|gs| gs.iter().find(|g| g.id == id))
                .map(|g| g.name.clone()))
        }
        _ => Ok(entry.name.clone()),
    }
}

/// Revoke every non-default entry of `scan`, then apply `acls` and `owner`.
///
/// Returns the number of entries revoked.
pub async fn fix_scan<C: ScanApi + ?Sized>(
    client: &C,
    scan: &Scan,
    owner: Option<&UserSummary>,
    acls: &ScanAcl,
) -> Result<usize> {
    println!("{} Scan: {} ({})", "(*)".green(), scan.name, scan.id);

    let current = client.list_scan_permissions(scan.id).await?;
    print_permissions("Current permissions", &current);

    let mut groups = None;
    let mut revoked = 0;
    for entry in current.iter().filter(|e| !e.is_default()) {
        let name = match object_name(client, entry, &mut groups).await? {
            Some(name) => name,
            None => {
                println!(
                    "{} Object with id {} not found",
                    "(!)".yellow(),
                    entry.id.map(|id| id.to_string()).unwrap_or_default()
                );
                "unknown".to_string()
            }
        };
        let label = Permission::from_mask(entry.permissions)
            .map(|p| p.label().to_string())
            .unwrap_or_else(|| entry.permissions.to_string());
        println!(
            "(*) Remove permission \"{}\" for {} \"{}\" ({})",
            label,
            entry.kind,
            name,
            entry.id.map(|id| id.to_string()).unwrap_or_default()
        );

        client
            .change_scan_permission(scan.id, &entry.revoked())
            .await?;
        revoked += 1;
    }

    if let Some(owner) = owner {
        println!("(*) Set ownership: {} ({})", owner.display_name(), owner.id);
    }
    println!("(*) Set ACLs: {}", acls);
    client
        .configure_scan_acls(scan.id, owner.map(|o| o.id), acls)
        .await?;

    let updated = client.list_scan_permissions(scan.id).await?;
    print_permissions("New permissions", &updated);
    Ok(revoked)
}

fn pause() -> Result<()> {
    let _: String = Input::new()
        .with_prompt("Press enter to continue")
        .allow_empty(true)
        .interact_text()?;
    Ok(())
}

/// Fix every scan of `target`; `interactive` pauses between scans.
pub async fn execute<C: ScanApi + ?Sized>(
    client: &C,
    target: Target,
    owner_id: Option<u64>,
    acls: &ScanAcl,
    interactive: bool,
) -> Result<usize> {
    let owner = match owner_id {
        Some(id) => Some(resolve_owner(client, id).await?),
        None => None,
    };
    let scans = resolve_scans(client, target).await?;
    debug!("{} scans to fix", scans.len());

    let mut fixed = 0;
    for (i, scan) in scans.iter().enumerate() {
        fix_scan(client, scan, owner.as_ref(), acls).await?;
        fixed += 1;
        if interactive && i + 1 < scans.len() {
            println!();
            pause()?;
        }
    }
    Ok(fixed)
}

/// Run the fix-scan-permissions command
pub async fn run(opts: &GlobalOptions, args: &FixScanPermissionsArgs) -> Result<()> {
    let (target, acls_file) = validate(args.scan_id, args.folder_id, args.acls_file.as_deref())?;
    let acls = load_acls(acls_file)?;

    let ctx = CommandContext::new(opts)?;
    execute(&ctx.client, target, args.owner_id, &acls, args.interactive).await?;
    Ok(())
}
