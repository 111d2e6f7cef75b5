//! TOML parser for `stmm-setup.toml` with helpful error messages

use super::schema::SetupDefaults;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse a defaults file with detailed error messages
pub fn parse_defaults_toml(path: &Path) -> Result<SetupDefaults> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read defaults file: {}", path.display()))?;

    parse_defaults_toml_str(&content)
        .with_context(|| format!("Failed to parse defaults file: {}", path.display()))
}

/// Parse defaults file content from string
pub fn parse_defaults_toml_str(content: &str) -> Result<SetupDefaults> {
    let defaults: SetupDefaults =
        toml::from_str(content).map_err(|e| enhance_toml_error(e, content))?;

    defaults.validate()?;

    Ok(defaults)
}

/// Enhance TOML parsing errors with the offending lines
fn enhance_toml_error(error: toml::de::Error, content: &str) -> anyhow::Error {
    let error_msg = error.to_string();

    let line_hint = error_msg
        .lines()
        .find(|line| line.contains("line "))
        .and_then(|line| {
            line.split("line ")
                .nth(1)
                .and_then(|s| s.split(|c: char| !c.is_ascii_digit()).next())
                .and_then(|s| s.parse::<usize>().ok())
        });

    if let Some(line_num) = line_hint {
        let context = get_line_context(content, line_num);
        anyhow::anyhow!(
            "TOML parsing error at line {}:\n{}\n\nError: {}",
            line_num,
            context,
            error_msg
        )
    } else {
        anyhow::anyhow!("TOML parsing error: {}", error_msg)
    }
}

/// Get context lines around an error
fn get_line_context(content: &str, line_num: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let start = line_num.saturating_sub(2).min(lines.len());
    let end = (line_num + 2).min(lines.len());

    lines[start..end]
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let num = start + i + 1;
            let marker = if num == line_num { ">>>" } else { "   " };
            format!("{} {:4} | {}", marker, num, line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_defaults() {
        let toml = r#"
installdir = "~/.local"
schemasdir = "/opt/stmm"
buildtype = "Debug"
sudo = false
"#;

        let defaults = parse_defaults_toml_str(toml).unwrap();
        assert_eq!(defaults.installdir.as_deref(), Some("~/.local"));
        assert_eq!(defaults.schemasdir.as_deref(), Some("/opt/stmm"));
        assert_eq!(defaults.buildtype.as_deref(), Some("Debug"));
        assert_eq!(defaults.sudo, Some(false));
    }

    #[test]
    fn test_parse_empty_defaults() {
        let defaults = parse_defaults_toml_str("").unwrap();
        assert_eq!(defaults, SetupDefaults::new());
    }

    #[test]
    fn test_parse_invalid_toml_reports_line() {
        let toml = "buildtype = \"Debug\"\ninstalldir = \n";

        let err = parse_defaults_toml_str(toml).unwrap_err().to_string();
        assert!(err.contains("TOML parsing error"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = parse_defaults_toml_str("prefix = \"/usr\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_buildtype_is_rejected() {
        let err = parse_defaults_toml_str("buildtype = \"Fast\"\n").unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("Fast"));
    }

    #[test]
    fn test_empty_dir_is_rejected() {
        let result = parse_defaults_toml_str("installdir = \"\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "sudo = false").unwrap();

        let defaults = parse_defaults_toml(file.path()).unwrap();
        assert_eq!(defaults.sudo, Some(false));
    }
}
