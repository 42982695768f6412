use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub dataset_path: String,
    pub window_from: Option<String>,
    pub window_to: Option<String>,
    #[serde(default = "default_lookback_hours")]
    pub lookback_hours: i64,
    #[serde(default)]
    pub clicks: Vec<String>,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_lookback_hours() -> i64 {
    24
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// Read `config/charts.*` (optional) overlaid with `CHARTS_*` environment
/// variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/charts").required(false))
        .add_source(
            config::Environment::with_prefix("CHARTS")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("clicks"),
        )
        .build()?;

    parse_app_config(settings)
}

pub fn parse_app_config(settings: config::Config) -> anyhow::Result<AppConfig> {
    Ok(settings.try_deserialize()?)
}
