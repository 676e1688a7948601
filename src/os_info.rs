use std::collections::HashMap;
use std::fs;

use sysinfo::System;

const OS_RELEASE_PATHS: &[&str] = &["/etc/os-release", "/usr/lib/os-release"];

/// Human-readable label for the host OS, sent to the model so the
/// generated commands fit the platform. Always succeeds.
pub fn user_os() -> String {
    if cfg!(target_os = "linux") {
        linux_os_label(OS_RELEASE_PATHS)
    } else {
        let name = System::name().unwrap_or_else(|| std::env::consts::OS.to_string());
        let release = System::kernel_version().unwrap_or_else(|| "unknown".to_string());
        let version = System::os_version().unwrap_or_else(|| "unknown".to_string());
        format_os_label(&name, &release, &version)
    }
}

pub fn format_os_label(name: &str, release: &str, version: &str) -> String {
    format!("{} {} (Version: {})", name, release, version)
}

/// Distribution name + version when available, bare "Linux" otherwise.
fn linux_os_label(paths: &[&str]) -> String {
    linux_label(paths).unwrap_or_else(|| "Linux".to_string())
}

fn linux_label(paths: &[&str]) -> Option<String> {
    let content = paths
        .iter()
        .find_map(|path| fs::read_to_string(path).ok())?;
    label_from_os_release(&content)
}

fn label_from_os_release(content: &str) -> Option<String> {
    let vars = parse_os_release(content);
    let name = vars.get("NAME")?;
    match vars.get("VERSION_ID") {
        Some(version) if !version.is_empty() => Some(format!("{} {}", name, version)),
        _ => Some(name.clone()),
    }
}

/// Parse os-release key-value lines, dropping comments and quoting.
fn parse_os_release(content: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim().to_string();
            let value = value
                .trim()
                .trim_matches('"')
                .trim_matches('\'')
                .to_string();
            vars.insert(key, value);
        }
    }

    vars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_os_release_quoted_values() {
        let content = r#"
# comment line
NAME="Ubuntu"
VERSION_ID="24.04"
PRETTY_NAME="Ubuntu 24.04 LTS"
"#;
        let vars = parse_os_release(content);
        assert_eq!(vars.get("NAME"), Some(&"Ubuntu".to_string()));
        assert_eq!(vars.get("VERSION_ID"), Some(&"24.04".to_string()));
    }

    #[test]
    fn test_label_with_version() {
        let content = "NAME=\"Fedora Linux\"\nVERSION_ID=40\n";
        assert_eq!(
            label_from_os_release(content),
            Some("Fedora Linux 40".to_string())
        );
    }

    #[test]
    fn test_label_without_version_id() {
        // Rolling distros like Arch carry no VERSION_ID
        let content = "NAME=\"Arch Linux\"\nID=arch\n";
        assert_eq!(label_from_os_release(content), Some("Arch Linux".to_string()));
    }

    #[test]
    fn test_label_missing_name_falls_through() {
        assert_eq!(label_from_os_release("ID=something\n"), None);
    }

    #[test]
    fn test_format_os_label() {
        assert_eq!(
            format_os_label("Darwin", "23.4.0", "14.4.1"),
            "Darwin 23.4.0 (Version: 14.4.1)"
        );
    }

    #[test]
    fn test_unreadable_metadata_returns_bare_linux() {
        assert_eq!(linux_os_label(&["/definitely/not/os-release"]), "Linux");
    }

    #[test]
    fn test_metadata_without_name_returns_bare_linux() {
        let path = std::env::temp_dir().join("ecli-os-release-no-name");
        fs::write(&path, "ID=mystery\n").unwrap();
        let path_str = path.to_string_lossy().into_owned();
        assert_eq!(linux_os_label(&[path_str.as_str()]), "Linux");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_second_path_is_consulted() {
        let path = std::env::temp_dir().join("ecli-os-release-fallback");
        fs::write(&path, "NAME=\"Debian GNU/Linux\"\nVERSION_ID=\"12\"\n").unwrap();
        let path_str = path.to_string_lossy().into_owned();
        assert_eq!(
            linux_os_label(&["/definitely/not/os-release", path_str.as_str()]),
            "Debian GNU/Linux 12"
        );
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_user_os_never_empty() {
        assert!(!user_os().is_empty());
    }
}
