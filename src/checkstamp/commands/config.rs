use crate::commands::{CmdMessage, CmdResult, StampPaths};
use crate::config::StampConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &StampPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.config_dir;
    match action {
        ConfigAction::ShowAll => {
            let config = StampConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = StampConfig::load(dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = StampConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e));
                return Ok(res);
            }
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or_else(|| value.clone());
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(dir: &TempDir) -> StampPaths {
        StampPaths {
            config_dir: dir.path().to_path_buf(),
        }
    }

    #[test]
    fn set_persists_and_show_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths(&dir);

        let result = run(
            &paths,
            ConfigAction::Set("date-source".into(), "modified".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].content, "date-source set to modified");

        let shown = run(&paths, ConfigAction::ShowAll).unwrap();
        assert!(!shown.config.unwrap().use_file_creation_date);

        let key = run(&paths, ConfigAction::ShowKey("date-source".into())).unwrap();
        assert_eq!(key.messages[0].content, "modified");
    }

    #[test]
    fn invalid_value_is_reported_and_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths(&dir);

        let result = run(&paths, ConfigAction::Set("real-time".into(), "sometimes".into())).unwrap();
        assert!(result.has_errors());
        assert!(!StampConfig::path(dir.path()).exists());
    }

    #[test]
    fn unknown_key() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(&paths(&dir), ConfigAction::ShowKey("colour".into())).unwrap();
        assert_eq!(result.messages[0].content, "Unknown config key: colour");
    }
}
