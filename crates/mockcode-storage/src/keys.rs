//! Storage key generation

use chrono::Utc;
use uuid::Uuid;

use crate::traits::{StorageError, StorageResult};

const MAX_FILENAME_LENGTH: usize = 255;

/// Reduce a client-supplied filename to a safe basename.
///
/// Keeps `[A-Za-z0-9._-]`, replaces everything else with `_`, and falls back
/// to `file` for names that end up empty or shorter than three characters.
pub fn sanitize_filename(filename: &str) -> String {
    let filename_only = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let sanitized = sanitized.replace("..", "_");
    if sanitized.trim_matches(['.', '_']).is_empty() || sanitized.len() < 3 {
        return "file".to_string();
    }
    sanitized
}

/// Generate a key from the arrival time, a random token and the original name.
///
/// The timestamp keeps keys roughly ordered by arrival; the token keeps two
/// uploads of the same file within one millisecond from overwriting each other.
///
/// The whole key stays within `MAX_FILENAME_LENGTH` bytes; long names lose the
/// end of their stem, never their extension.
pub(crate) fn generate_key(original_filename: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    let prefix = format!("{}-{}-", Utc::now().timestamp_millis(), &token[..8]);
    let name = fit_filename(
        &sanitize_filename(original_filename),
        MAX_FILENAME_LENGTH - prefix.len(),
    );
    format!("{}{}", prefix, name)
}

/// Shorten a sanitized (ASCII) filename to `max_len` bytes, keeping the extension.
fn fit_filename(name: &str, max_len: usize) -> String {
    if name.len() <= max_len {
        return name.to_string();
    }

    match name.rfind('.') {
        Some(dot) if dot > 0 && name.len() - dot < max_len => {
            let extension = &name[dot..];
            let stem = name[..max_len - extension.len()].trim_end_matches('.');
            format!("{}{}", stem, extension)
        }
        _ => name[..max_len].to_string(),
    }
}

pub(crate) fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty()
        || storage_key.contains("..")
        || storage_key.starts_with('/')
        || storage_key.contains('\\')
    {
        return Err(StorageError::InvalidKey(format!(
            "Storage key '{}' contains invalid characters",
            storage_key
        )));
    }
    Ok(())
}
