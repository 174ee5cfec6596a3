//! Handler functions for `vitrine config` subcommands.
//!
//! Also provides the TOML dotted-key helpers used by `config get`.

use std::io::Write;
use std::path::PathBuf;

use vitrine_core::Error;

use crate::Result;
use crate::cli::ConfigAction;
use crate::config::SiteConfig;

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
pub fn handle_config_command<W: Write>(
    config_path: Option<&str>,
    action: ConfigAction,
    out: &mut W,
) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path, out),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key, out),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force, out),
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// Show the resolved config file path.
pub fn cmd_config_path<W: Write>(config_path: Option<&str>, out: &mut W) -> Result<()> {
    let path = SiteConfig::resolve_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;

    writeln!(out, "{}", path.display())?;
    if !path.exists() {
        log::warn!("Config file does not exist; run `vitrine config init` to create it");
    }
    Ok(())
}

/// Print a configuration value by dotted key.
pub fn cmd_config_get<W: Write>(config_path: Option<&str>, key: &str, out: &mut W) -> Result<()> {
    let config = SiteConfig::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;

    match get_nested_value(&value, key) {
        Some(val) => {
            writeln!(out, "{}", format_toml_value(val))?;
            Ok(())
        }
        None => Err(Error::config(format!("Key '{key}' not found in configuration")).into()),
    }
}

/// Write a default configuration file.
pub fn cmd_config_init<W: Write>(file: Option<&str>, force: bool, out: &mut W) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => SiteConfig::default_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        ))
        .into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = SiteConfig::default().to_toml_string()?;
    std::fs::write(&path, &toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    writeln!(out, "Config file created at {}", path.display())?;
    Ok(())
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Navigate a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Format a TOML value for display on stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(items) => {
            let items: Vec<String> = items.iter().map(format_toml_value).collect();
            items.join(", ")
        }
        toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_default(dir: &TempDir) -> String {
        let path = dir.path().join("vitrine.toml");
        std::fs::write(&path, SiteConfig::default().to_toml_string().unwrap()).unwrap();
        path.to_str().unwrap().to_string()
    }

    fn run(config: Option<&str>, action: ConfigAction) -> (Result<()>, String) {
        let mut out = Vec::new();
        let result = handle_config_command(config, action, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    // ------------------------------------------------------------------------
    // config path
    // ------------------------------------------------------------------------

    #[test]
    fn test_config_path_explicit() {
        let (result, out) = run(Some("/explicit/vitrine.toml"), ConfigAction::Path);
        assert!(result.is_ok());
        assert_eq!(out.trim(), "/explicit/vitrine.toml");
    }

    // ------------------------------------------------------------------------
    // config get
    // ------------------------------------------------------------------------

    #[test]
    fn test_config_get_top_level() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);

        let (result, out) = run(
            Some(&path),
            ConfigAction::Get {
                key: "site_name".into(),
            },
        );
        assert!(result.is_ok());
        assert_eq!(out.trim(), "Deep Ubuntu Research");
    }

    #[test]
    fn test_config_get_nested() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);

        let (_, out) = run(
            Some(&path),
            ConfigAction::Get {
                key: "categories.products.extensions".into(),
            },
        );
        assert_eq!(out.trim(), "mdx, md");
    }

    #[test]
    fn test_config_get_missing_key() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);

        let (result, _) = run(
            Some(&path),
            ConfigAction::Get {
                key: "nonexistent.key".into(),
            },
        );
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    // ------------------------------------------------------------------------
    // config init
    // ------------------------------------------------------------------------

    #[test]
    fn test_config_init_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("vitrine.toml");

        let (result, out) = run(
            None,
            ConfigAction::Init {
                file: Some(path.to_str().unwrap().into()),
                force: false,
            },
        );
        assert!(result.is_ok());
        assert!(out.contains("Config file created"));

        let loaded = SiteConfig::load_file(&path).unwrap();
        assert_eq!(loaded.categories, SiteConfig::default().categories);
    }

    #[test]
    fn test_config_init_no_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vitrine.toml");
        std::fs::write(&path, "existing").unwrap();

        let (result, _) = run(
            None,
            ConfigAction::Init {
                file: Some(path.to_str().unwrap().into()),
                force: false,
            },
        );
        assert!(result.unwrap_err().to_string().contains("already exists"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing");
    }

    #[test]
    fn test_config_init_force_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vitrine.toml");
        std::fs::write(&path, "old content").unwrap();

        let (result, _) = run(
            None,
            ConfigAction::Init {
                file: Some(path.to_str().unwrap().into()),
                force: true,
            },
        );
        assert!(result.is_ok());
        assert!(std::fs::read_to_string(&path).unwrap().contains("site_name"));
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    #[test]
    fn test_get_nested_value() {
        let val: toml::Value = toml::from_str("[render]\nmath = true").unwrap();
        assert_eq!(
            get_nested_value(&val, "render.math"),
            Some(&toml::Value::Boolean(true))
        );
        assert!(get_nested_value(&val, "render.nope").is_none());
        assert!(get_nested_value(&val, "render.math.deeper").is_none());
    }

    #[test]
    fn test_format_toml_value() {
        assert_eq!(format_toml_value(&toml::Value::String("hi".into())), "hi");
        assert_eq!(format_toml_value(&toml::Value::Integer(42)), "42");
        assert_eq!(format_toml_value(&toml::Value::Boolean(false)), "false");
        assert_eq!(
            format_toml_value(&toml::Value::Array(vec!["a".into(), "b".into()])),
            "a, b"
        );
    }
}
