use crate::config::client_config::ClientConfig;
use crate::core::cookie::get_cookie;
use crate::core::fragment::FragmentLoader;
use crate::core::page::{MemoryRegion, Page};
use crate::core::submit::FormSubmitter;
use crate::core::transport::build_client;
use crate::domain::model::{LoadOutcome, SubmitResponse};
use crate::domain::ports::{CookieSource, FormSource};
use crate::utils::error::{ClientError, Result};
use std::sync::Arc;

/// 以同一份配置組合 cookie、片段載入與表單送出
pub struct PageClient {
    config: ClientConfig,
    jar: Arc<dyn CookieSource>,
    loader: FragmentLoader,
    submitter: FormSubmitter,
}

impl PageClient {
    pub fn new(config: ClientConfig, jar: Arc<dyn CookieSource>) -> Result<Self> {
        // 兩個元件共用同一個連線池
        let client = build_client(&config.server)?;
        let loader = FragmentLoader::new(
            client.clone(),
            config.server.base_url.clone(),
            config.fragment.clone(),
        );
        let submitter = FormSubmitter::new(
            client,
            config.server.base_url.clone(),
            config.csrf.clone(),
            config.form.clone(),
            jar.clone(),
        );

        Ok(Self {
            config,
            jar,
            loader,
            submitter,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn loader(&self) -> &FragmentLoader {
        &self.loader
    }

    pub fn csrf_token(&self) -> Option<String> {
        get_cookie(
            self.jar.cookie_string().as_deref(),
            &self.config.csrf.cookie_name,
        )
    }

    /// 將片段載入頁面上設定的區塊
    pub async fn load_into_page(&self, page: &Page, url: &str) -> Result<(MemoryRegion, LoadOutcome)> {
        let region_id = &self.config.fragment.region_id;
        let region = page.region(region_id)?.ok_or_else(|| {
            tracing::error!("❌ Element with id=\"{}\" not found", region_id);
            ClientError::MissingElement {
                id: region_id.clone(),
            }
        })?;

        let outcome = self.loader.load(&region, url).await?;
        Ok((region, outcome))
    }

    /// 送出頁面上設定的表單
    pub async fn submit_page_form(&self, page: &Page, url: Option<&str>) -> Result<SubmitResponse> {
        let form = page.form(&self.config.form.form_id)?;
        self.submitter
            .submit(form.as_ref().map(|f| f as &dyn FormSource), url)
            .await
    }
}
