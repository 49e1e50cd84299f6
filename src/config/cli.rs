use crate::config::client_config::ClientConfig;
use crate::domain::model::BodyEncoding;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "frag-client")]
#[command(about = "Load server-rendered fragments and submit forms with CSRF tokens")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Override server.base_url")]
    pub base_url: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print a cookie value from a cookie string
    Cookie {
        name: String,
        #[arg(long, default_value = "")]
        jar: String,
    },
    /// Load a fragment into the configured region and print its content
    Load {
        url: String,
        #[arg(long, help = "HTML page holding the target region")]
        page: Option<PathBuf>,
        #[arg(long, help = "Show the loading placeholder while waiting")]
        loading: bool,
    },
    /// Submit the configured form of a page
    Submit {
        #[arg(long, help = "HTML page holding the form")]
        page: PathBuf,
        #[arg(long, help = "Target URL (defaults to form.endpoint)")]
        url: Option<String>,
        #[arg(long, default_value = "")]
        jar: String,
        #[arg(long, value_enum)]
        encoding: Option<BodyEncoding>,
    },
}

impl CliConfig {
    /// 讀取配置檔並套用命令列覆寫
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.server.base_url = Some(base_url.clone());
        }

        match &self.command {
            Command::Load { loading: true, .. } => config.fragment.loading_indicator = true,
            Command::Submit {
                encoding: Some(encoding),
                ..
            } => config.form.encoding = *encoding,
            _ => {}
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_overrides() {
        let cli = CliConfig::parse_from([
            "frag-client",
            "--base-url",
            "http://127.0.0.1:8000",
            "submit",
            "--page",
            "page.html",
            "--encoding",
            "url-encoded",
        ]);

        let config = cli.client_config().unwrap();
        assert_eq!(config.base_url(), Some("http://127.0.0.1:8000"));
        assert_eq!(config.form.encoding, BodyEncoding::UrlEncoded);
    }

    #[test]
    fn test_load_enables_indicator() {
        let cli = CliConfig::parse_from(["frag-client", "load", "/entity/manage/", "--loading"]);

        let config = cli.client_config().unwrap();
        assert!(config.fragment.loading_indicator);
    }
}
