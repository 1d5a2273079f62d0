use crate::io;
use anyhow::Result;
use std::path::Path;

pub const STARTER_BOOTSTRAP: &str = r#"# tplcheck bootstrap
#
# Describes how to compile templates and how to syntax-check the result.
# "{file}" in argument lists is replaced by the path being processed.

[compiler]
program = "latte-compile"
args = ["{file}"]
template_extension = "latte"
target_extension = "php"
# Named groups: message and line are required, file is optional and only
# used when it names an existing file
error_pattern = '(?P<message>.+) in (?P<file>.+?) on line (?P<line>\d+)'

[linter]
program = "php"
args = ["-l", "-d", "display_errors=1", "{file}"]
# Findings are always reported against the file being checked
error_pattern = '(?:Parse|Fatal) error:\s*(?P<message>.+) in .+ on line (?P<line>\d+)'

[discovery]
exclude = [
    "**/vendor/**",
    "**/node_modules/**",
]
"#;

pub fn init_bootstrap(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    io::write_file(path, STARTER_BOOTSTRAP)?;
    println!("Created {} bootstrap file", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{parse_bootstrap, BootstrapConfig};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_starter_bootstrap_matches_defaults() {
        let mut config = parse_bootstrap(STARTER_BOOTSTRAP).unwrap();
        assert_eq!(config.discovery.exclude.len(), 2);
        config.discovery.exclude.clear();
        assert_eq!(config, BootstrapConfig::default());
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tplcheck.toml");
        fs::write(&path, "# mine").unwrap();

        assert!(init_bootstrap(&path, false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "# mine");

        init_bootstrap(&path, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), STARTER_BOOTSTRAP);
    }
}
