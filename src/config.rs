use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the notes database when nothing else is configured
pub const DATABASE_FILE: &str = "notes.sqlite";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NotelogConfig {
    pub database: Option<PathBuf>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("notelog.toml")
}

/// `notes.sqlite` next to the running executable
pub fn default_database_path() -> anyhow::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe
        .parent()
        .ok_or_else(|| anyhow::anyhow!("executable {} has no parent directory", exe.display()))?;
    Ok(dir.join(DATABASE_FILE))
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<NotelogConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: NotelogConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Pick the database location: explicit flag, then config file, then the
/// executable's directory.
pub fn resolve_database_path(
    flag: Option<PathBuf>,
    config: Option<&NotelogConfig>,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Some(path) = config.and_then(|c| c.database.clone()) {
        return Ok(path);
    }
    default_database_path()
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_config_reads_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notelog.toml");
        std::fs::write(&path, "database = \"/tmp/elsewhere/notes.sqlite\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(config.database, Some(PathBuf::from("/tmp/elsewhere/notes.sqlite")));
    }

    #[test]
    fn test_load_config_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notelog.toml");
        std::fs::write(&path, "database = [").unwrap();

        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_flag_wins_over_config() {
        let config = NotelogConfig { database: Some(PathBuf::from("from-config.sqlite")) };

        let flag = Some(PathBuf::from("from-flag.sqlite"));
        let path = resolve_database_path(flag, Some(&config)).unwrap();
        assert_eq!(path, PathBuf::from("from-flag.sqlite"));

        let path = resolve_database_path(None, Some(&config)).unwrap();
        assert_eq!(path, PathBuf::from("from-config.sqlite"));
    }

    #[test]
    fn test_default_sits_next_to_executable() {
        let path = resolve_database_path(None, Some(&NotelogConfig::default())).unwrap();
        let exe_dir = std::env::current_exe().unwrap().parent().unwrap().to_path_buf();

        assert_eq!(path, exe_dir.join(DATABASE_FILE));
    }

    #[test]
    fn test_ensure_db_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("deeper").join(DATABASE_FILE);

        ensure_db_dir(&db).unwrap();
        assert!(db.parent().unwrap().is_dir());

        // bare file names have nothing to create
        ensure_db_dir(Path::new(DATABASE_FILE)).unwrap();
    }
}
