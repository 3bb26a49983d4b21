use config::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;

const ENV_PREFIX: &str = "QUILL_";

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub server: ServerSettings,
    pub supabase: SupabaseSettings,
    pub site: SiteSettings,
    pub log: LogSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SupabaseSettings {
    pub url: String,
    pub anon_key: String,
    pub schema: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SiteSettings {
    pub title: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct LogSettings {
    pub level: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        Self::build(&run_mode, collect_env_vars(std::env::vars()))
    }

    fn build(run_mode: &str, env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let env_json = serde_json::to_string(&env_map)
            .map_err(|e| ConfigError::Message(format!("failed to encode environment: {}", e)))?;

        let s = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.cors_origins", "*")?
            .set_default("supabase.url", "")?
            .set_default("supabase.anon_key", "")?
            .set_default("site.title", "My Personal Blog")?
            .set_default("log.level", "info")?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::File::with_name(&format!("config.{}", run_mode)).required(false))
            .add_source(config::File::from_str(&env_json, config::FileFormat::Json))
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.supabase.url.trim().is_empty() {
            return Err(ConfigError::Message(format!(
                "supabase.url is required (set {}SUPABASE__URL)",
                ENV_PREFIX
            )));
        }
        if self.supabase.anon_key.trim().is_empty() {
            return Err(ConfigError::Message(format!(
                "supabase.anon_key is required (set {}SUPABASE__ANON_KEY)",
                ENV_PREFIX
            )));
        }
        Ok(())
    }
}

// QUILL_SUPABASE__ANON_KEY -> supabase.anon_key
fn collect_env_vars(vars: impl Iterator<Item = (String, String)>) -> HashMap<String, String> {
    vars.filter(|(k, _)| k.starts_with(ENV_PREFIX))
        .map(|(k, v)| {
            let new_key = k
                .trim_start_matches(ENV_PREFIX)
                .replace("__", ".")
                .to_lowercase();
            (new_key, v)
        })
        .collect()
}
