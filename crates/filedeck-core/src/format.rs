//! Formatting and filename validation helpers.

use chrono::{DateTime, Local};

const SIZE_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Format a byte count in human-readable form.
///
/// Bytes are shown as an integer, larger units with one decimal place,
/// using 1024 as the step: `0 B`, `512 B`, `1.5 KB`, `3.2 GB`.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} {}", SIZE_UNITS[0])
    } else {
        format!("{size:.1} {}", SIZE_UNITS[unit])
    }
}

/// Format an optional size; folders (no size) render as an empty string.
pub fn format_optional_size(bytes: Option<u64>) -> String {
    bytes.map(format_size).unwrap_or_default()
}

/// Format a timestamp for listings (`2024-03-01 14:05`).
pub fn format_datetime(time: Option<&DateTime<Local>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Format a timestamp with seconds, as shown in the properties dialog.
pub fn format_timestamp(time: Option<&DateTime<Local>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Whether a file name denotes a hidden entry.
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

/// Check that `name` can be used as a single file or folder name.
///
/// The error is a short sentence suitable for showing next to the input.
pub fn validate_filename(name: &str) -> Result<(), String> {
    let problem = match name {
        "" => Some("Name is required".to_string()),
        "." | ".." => Some(format!("\"{name}\" is reserved")),
        _ if name.len() > MAX_NAME_BYTES => {
            Some(format!("Name exceeds {MAX_NAME_BYTES} bytes"))
        }
        _ => forbidden_char(name).map(|c| format!("Name may not contain {c:?}")),
    };

    // Explorer strips trailing dots and spaces, so such names cannot be
    // opened again on Windows. Other systems store them as given.
    #[cfg(target_os = "windows")]
    let problem = problem
        .or_else(|| {
            (name.trim() != name).then(|| "Name has leading or trailing spaces".to_string())
        })
        .or_else(|| name.ends_with('.').then(|| "Name may not end in '.'".to_string()))
        .or_else(|| {
            is_windows_reserved(name).then(|| format!("\"{name}\" is a reserved device name"))
        });

    problem.map_or(Ok(()), Err)
}

const MAX_NAME_BYTES: usize = 255;

fn forbidden_char(name: &str) -> Option<char> {
    #[cfg(target_os = "windows")]
    let forbidden = |c: char| c == '/' || c == '\0' || WINDOWS_INVALID.contains(&c);
    #[cfg(not(target_os = "windows"))]
    let forbidden = |c: char| c == '/' || c == '\0';
    name.chars().find(|&c| forbidden(c))
}

/// Turn an arbitrary client-supplied name into a safe single path component.
///
/// Any directory part is dropped, invalid characters become `_`, and an
/// empty result becomes `unnamed`.
pub fn sanitize_filename(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .replace('\0', "");

    #[cfg(target_os = "windows")]
    let base = {
        let mut cleaned: String = base
            .chars()
            .map(|c| if WINDOWS_INVALID.contains(&c) { '_' } else { c })
            .collect();
        if is_windows_reserved(&cleaned) {
            cleaned.insert(0, '_');
        }
        cleaned
    };

    let trimmed = base.trim_end_matches(['.', ' ']).trim_start();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        "unnamed".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(target_os = "windows")]
const WINDOWS_INVALID: [char; 8] = ['\\', ':', '*', '?', '"', '<', '>', '|'];

#[cfg(target_os = "windows")]
fn is_windows_reserved(name: &str) -> bool {
    const RESERVED: [&str; 22] = [
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7",
        "COM8", "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    let upper = name.to_uppercase();
    let base = upper.split('.').next().unwrap_or("");
    RESERVED.contains(&base)
}
