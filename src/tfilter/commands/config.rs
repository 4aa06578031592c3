use crate::commands::{CmdMessage, CmdResult, TfilterPaths};
use crate::config::TfilterConfig;
use crate::error::{Result, TfilterError};

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &TfilterPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.config_dir;
    match action {
        ConfigAction::ShowAll => {
            let config = TfilterConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = TfilterConfig::load(dir)?;
            let val = config
                .get(&key)
                .ok_or_else(|| TfilterError::Api(format!("Unknown config key: {}", key)))?;
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::info(val));
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = TfilterConfig::load(dir)?;
            config.set(&key, &value)?;
            config.save(dir)?;
            tracing::info!("config {} updated in {}", key, dir.display());

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
