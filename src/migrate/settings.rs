use crate::migrate::*;

use serde::{Deserialize, Serialize};

/// The optional JSON settings file. Every key may be left out.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "baseDomain")]
    pub base_domain: Option<String>,
    #[serde(rename = "sourceBaseUrl")]
    pub source_base_url: Option<String>,
    #[serde(rename = "destinationBaseUrl")]
    pub destination_base_url: Option<String>,
    pub director: Option<String>,
    pub authorities: Option<Vec<String>>,
    #[serde(rename = "acceptInvalidCerts")]
    pub accept_invalid_certs: Option<bool>,
}

pub fn read_settings(path: &str) -> AppResult<Settings> {
    let contents = fs::read_to_string(path).context(ReadingSettingsSnafu { path })?;
    debug!("read settings: {:?}", contents);
    parse_settings(&contents).context(ParsingSettingsSnafu { path })
}

fn parse_settings(contents: &str) -> Result<Settings, serde_json::Error> {
    serde_json::from_str(contents)
}

/// Layers the settings file, then `--domain`, then `--insecure` over the defaults.
pub fn client_config(settings: &Settings, domain: Option<&str>, insecure: bool) -> ClientConfig {
    let mut config = match &settings.base_domain {
        Some(d) => ClientConfig::for_domain(d),
        None => ClientConfig::default(),
    };
    if let Some(url) = &settings.source_base_url {
        config.source_base = url.clone();
    }
    if let Some(url) = &settings.destination_base_url {
        config.destination_base = url.clone();
    }
    if let Some(director) = &settings.director {
        config.director = director.clone();
    }
    if let Some(authorities) = &settings.authorities {
        config.authorities = authorities.clone();
    }
    config.accept_invalid_certs = settings.accept_invalid_certs.unwrap_or(false);

    if let Some(d) = domain {
        let for_domain = ClientConfig::for_domain(d);
        config.source_base = for_domain.source_base;
        config.destination_base = for_domain.destination_base;
    }
    if insecure {
        config.accept_invalid_certs = true;
    }
    config
}
