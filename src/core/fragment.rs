use crate::config::client_config::{ClientConfig, FragmentConfig};
use crate::core::sanitize::{apply_policy, escape_text};
use crate::core::sequence::RegionSequencer;
use crate::core::transport::{build_client, resolve_url, status_error, REQUESTED_WITH};
use crate::domain::model::{FragmentPayload, LoadOutcome, OrderingPolicy};
use crate::domain::ports::TargetRegion;
use crate::utils::error::{ClientError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// 以 GET 取得 HTML 片段並替換目標區塊內容
#[derive(Clone)]
pub struct FragmentLoader {
    client: Client,
    base_url: Option<String>,
    config: Arc<FragmentConfig>,
    sequencer: RegionSequencer,
}

impl FragmentLoader {
    pub fn new(client: Client, base_url: Option<String>, config: FragmentConfig) -> Self {
        Self {
            client,
            base_url,
            config: Arc::new(config),
            sequencer: RegionSequencer::new(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(
            build_client(&config.server)?,
            config.server.base_url.clone(),
            config.fragment.clone(),
        ))
    }

    /// 發出請求後立即返回，結果反映在區塊內容上
    ///
    /// 載入動畫在請求開始前同步寫入。重疊的呼叫不會互相取消。
    pub fn update(
        &self,
        region: Arc<dyn TargetRegion>,
        url: &str,
    ) -> JoinHandle<Result<LoadOutcome>> {
        let ticket = self.begin(region.as_ref());
        let loader = self.clone();
        let url = url.to_string();

        tokio::spawn(async move { loader.finish(region.as_ref(), &url, ticket).await })
    }

    /// 與 `update` 相同，但在呼叫端等待完成
    pub async fn load(&self, region: &dyn TargetRegion, url: &str) -> Result<LoadOutcome> {
        let ticket = self.begin(region);
        self.finish(region, url, ticket).await
    }

    fn begin(&self, region: &dyn TargetRegion) -> u64 {
        if self.config.loading_indicator {
            region.replace_content(&self.config.loading_html());
        }
        let ticket = self.sequencer.issue(region.id());
        tracing::debug!("🧩 {}: issued fragment request #{}", region.id(), ticket);
        ticket
    }

    async fn finish(&self, region: &dyn TargetRegion, url: &str, ticket: u64) -> Result<LoadOutcome> {
        let result = self.fetch(url).await;

        if self.config.ordering == OrderingPolicy::LatestRequestWins
            && !self.sequencer.is_latest(region.id(), ticket)
        {
            tracing::debug!(
                "🧩 {}: dropping response of request #{} (superseded)",
                region.id(),
                ticket
            );
            return Ok(LoadOutcome::Superseded);
        }

        match result {
            Ok(html) => {
                region.replace_content(&html);
                tracing::debug!("🧩 {}: applied fragment from {}", region.id(), url);
                Ok(LoadOutcome::Applied)
            }
            Err(e) => {
                region.replace_content(&self.error_markup(&e.transport_text()));
                tracing::error!("❌ {}: failed to load fragment from {}: {}", region.id(), url, e);
                Err(e)
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        let url = resolve_url(self.base_url.as_deref(), url)?;
        tracing::debug!("📡 GET {}", url);

        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .header(REQUESTED_WITH.0, REQUESTED_WITH.1)
            .send()
            .await?;

        tracing::debug!("📡 Fragment response status: {}", response.status());
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body = response.text().await?;
        let payload: FragmentPayload =
            serde_json::from_str(&body).map_err(|e| ClientError::InvalidPayload {
                message: e.to_string(),
            })?;

        apply_policy(self.config.html_policy, &payload.html)
    }

    fn error_markup(&self, error_text: &str) -> String {
        self.config
            .error_template
            .replace("{error}", &escape_text(error_text))
    }
}
