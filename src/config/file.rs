//
//  twapi-client
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration File I/O
//!
//! Thin helpers for reading and writing the TOML configuration file.
//! Used by [`ClientConfig`](super::ClientConfig); usable directly for custom
//! locations.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use twapi_client::config::{config_exists, read_config_file, write_config_file};
//!
//! let path = Path::new("/tmp/twapi/config.toml");
//!
//! if config_exists(path) {
//!     println!("{}", read_config_file(path)?);
//! } else {
//!     write_config_file(path, "auth_method = \"oauth2_bearer_token\"\n")?;
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Notes
//!
//! - Write operations create parent directories
//! - On Unix, written files are readable by the owner only, since they
//!   usually hold API secrets

use std::path::Path;

use anyhow::{Context, Result};

/// Reads a configuration file into a string.
///
/// # Errors
///
/// Fails if the file is missing, unreadable, or not UTF-8. The error names the path.
pub fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Writes a configuration file, creating parent directories as needed.
///
/// # Errors
///
/// Fails if a directory cannot be created or the file cannot be written.
pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    restrict_permissions(path)?;
    Ok(())
}

/// Returns `true` if a file exists at `path`.
pub fn config_exists(path: &Path) -> bool {
    path.is_file()
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .with_context(|| format!("failed to restrict permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
