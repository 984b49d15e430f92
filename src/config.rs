//! Persistent default flags.
//!
//! Config files hold command-line flags, one or more per line, with `#`
//! comments. The global file is merged with a local `.brdwizrc` and then with
//! the flags given on the command line, later sources winning.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Auto,
    Light,
    Dark,
}

impl ThemeMode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    /// Open documents straight into edit mode
    pub edit: bool,
    /// Where exports are written
    pub export_dir: Option<PathBuf>,
    /// Color theme for the terminal host
    pub theme: Option<ThemeMode>,
    /// Characters kept by `preview`
    pub preview_limit: Option<usize>,
}

impl ConfigFlags {
    /// Merge two flag sets; `other` wins for valued options.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            edit: self.edit || other.edit,
            export_dir: other
                .export_dir
                .clone()
                .or_else(|| self.export_dir.clone()),
            theme: other.theme.or(self.theme),
            preview_limit: other.preview_limit.or(self.preview_limit),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("brdwiz").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("brdwiz")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("brdwiz").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("brdwiz").join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".brdwizrc")
}

/// Load flags from `path`. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Write `flags` to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# brdwiz defaults (saved with --save)".to_string()];
    if flags.edit {
        lines.push("--edit".to_string());
    }
    if let Some(dir) = &flags.export_dir {
        lines.push(format!("--export-dir {}", dir.display()));
    }
    if let Some(theme) = flags.theme {
        lines.push(format!("--theme {}", theme.as_str()));
    }
    if let Some(limit) = flags.preview_limit {
        lines.push(format!("--limit {limit}"));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))?;
    tracing::info!(path = %path.display(), "saved config defaults");
    Ok(())
}

/// Remove the config file at `path` if it exists.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the known flags out of a token list, ignoring everything else.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token, None),
        };
        match name {
            "--edit" => flags.edit = true,
            "--export-dir" | "--theme" | "--limit" => {
                let value = match inline_value {
                    Some(value) => Some(value),
                    None => {
                        let next = tokens.get(i + 1).map(String::as_str);
                        if next.is_some() {
                            i += 1;
                        }
                        next
                    }
                };
                if let Some(value) = value {
                    apply_valued_flag(&mut flags, name, value);
                }
            }
            _ => {}
        }
        i += 1;
    }
    flags
}

fn apply_valued_flag(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--export-dir" => flags.export_dir = Some(PathBuf::from(value)),
        "--theme" => flags.theme = parse_theme(value),
        "--limit" => flags.preview_limit = value.parse().ok(),
        _ => {}
    }
}

fn parse_theme(s: &str) -> Option<ThemeMode> {
    match s {
        "auto" => Some(ThemeMode::Auto),
        "light" => Some(ThemeMode::Light),
        "dark" => Some(ThemeMode::Dark),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = tokens(&[
            "brdwiz",
            "open",
            "--edit",
            "--theme",
            "dark",
            "--export-dir=out",
            "--limit",
            "80",
            "brd.md",
        ]);
        let flags = parse_flag_tokens(&args);
        assert!(flags.edit);
        assert_eq!(flags.theme, Some(ThemeMode::Dark));
        assert_eq!(flags.export_dir, Some(PathBuf::from("out")));
        assert_eq!(flags.preview_limit, Some(80));
    }

    #[test]
    fn test_unknown_theme_is_dropped() {
        let flags = parse_flag_tokens(&tokens(&["--theme=neon"]));
        assert_eq!(flags.theme, None);
    }

    #[test]
    fn test_trailing_valued_flag_without_value() {
        let flags = parse_flag_tokens(&tokens(&["--edit", "--export-dir"]));
        assert!(flags.edit);
        assert_eq!(flags.export_dir, None);
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            edit: true,
            theme: Some(ThemeMode::Light),
            export_dir: Some(PathBuf::from("file-out")),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            theme: Some(ThemeMode::Dark),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.edit);
        assert_eq!(merged.theme, Some(ThemeMode::Dark));
        assert_eq!(merged.export_dir, Some(PathBuf::from("file-out")));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config");
        let flags = ConfigFlags {
            edit: true,
            export_dir: Some(PathBuf::from("exports")),
            theme: Some(ThemeMode::Light),
            preview_limit: Some(120),
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_config_is_default() {
        let dir = tempdir().unwrap();
        let loaded = load_config_flags(&dir.path().join("absent")).unwrap();
        assert_eq!(loaded, ConfigFlags::default());
    }
}
