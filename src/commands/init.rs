use crate::config::{default_config_toml, CONFIG_FILE_NAME};
use crate::io;
use anyhow::Result;
use std::path::Path;

pub fn init_config(force: bool) -> Result<()> {
    init_config_in(Path::new("."), force)
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if io::file_exists(&config_path) && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, &default_config_toml())?;
    println!("Created {CONFIG_FILE_NAME} configuration file");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_path;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        init_config_in(dir.path(), false).unwrap();
        let config = load_config_from_path(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(config.priority.is_some());
    }

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "# mine\n").unwrap();
        assert!(init_config_in(dir.path(), false).is_err());
        init_config_in(dir.path(), true).unwrap();
        let contents = std::fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(contents.starts_with("# jira-health configuration"));
    }
}
