use crate::config::client_config::ServerConfig;
use crate::utils::error::{ClientError, Result};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// 瀏覽器端 AJAX 函式庫預設會送出的標頭
pub const REQUESTED_WITH: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

pub fn build_client(server: &ServerConfig) -> Result<Client> {
    let mut builder = Client::builder().user_agent(server.user_agent.clone());

    if let Some(timeout) = server.timeout_ms {
        builder = builder.timeout(Duration::from_millis(timeout));
    }

    Ok(builder.build()?)
}

/// 絕對 URL 直接使用，相對 URL 以 base_url 為基準
pub fn resolve_url(base_url: Option<&str>, target: &str) -> Result<Url> {
    match Url::parse(target) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = base_url.ok_or_else(|| ClientError::InvalidUrl {
                url: target.to_string(),
                reason: "relative URL requires server.base_url".to_string(),
            })?;
            let base = Url::parse(base).map_err(|e| ClientError::InvalidUrl {
                url: base.to_string(),
                reason: e.to_string(),
            })?;
            base.join(target).map_err(|e| ClientError::InvalidUrl {
                url: target.to_string(),
                reason: e.to_string(),
            })
        }
        Err(e) => Err(ClientError::InvalidUrl {
            url: target.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// 非 2xx 回應轉為錯誤並保留原始內容
pub async fn status_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    ClientError::Status {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_string(),
        body,
    }
}
