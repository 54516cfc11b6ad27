use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Save any serializable value as pretty-printed JSON, overwriting the file
/// and creating missing parent directories
pub fn save_to_json<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(value)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;

    tracing::info!(path = %path.display(), bytes = json.len(), "saved JSON");
    Ok(())
}

/// Show only the first and last four characters of a secret
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() < 8 {
        return "****".to_string();
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// A row of `=` used to frame console sections
pub fn rule() -> String {
    "=".repeat(70)
}
