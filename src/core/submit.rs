use crate::config::client_config::{ClientConfig, CsrfConfig, FormConfig};
use crate::core::cookie::CookieTokenReader;
use crate::core::transport::{build_client, resolve_url, status_error, REQUESTED_WITH};
use crate::domain::model::{BodyEncoding, FormSnapshot, ResponseBody, SubmitResponse};
use crate::domain::ports::{CookieSource, FormSource};
use crate::utils::error::{ClientError, Result};
use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::Client;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// 序列化表單並附上 CSRF token 送出
#[derive(Clone)]
pub struct FormSubmitter {
    client: Client,
    base_url: Option<String>,
    csrf: CsrfConfig,
    form: FormConfig,
    tokens: Arc<CookieTokenReader<Arc<dyn CookieSource>>>,
}

impl FormSubmitter {
    pub fn new(
        client: Client,
        base_url: Option<String>,
        csrf: CsrfConfig,
        form: FormConfig,
        jar: Arc<dyn CookieSource>,
    ) -> Self {
        let tokens = Arc::new(CookieTokenReader::new(jar, csrf.cookie_name.clone()));
        Self {
            client,
            base_url,
            csrf,
            form,
            tokens,
        }
    }

    pub fn from_config(config: &ClientConfig, jar: Arc<dyn CookieSource>) -> Result<Self> {
        Ok(Self::new(
            build_client(&config.server)?,
            config.server.base_url.clone(),
            config.csrf.clone(),
            config.form.clone(),
            jar,
        ))
    }

    /// 送出表單；`url` 為 `None` 時使用預設端點
    ///
    /// 表單不存在時只記錄錯誤，不會發出任何請求。
    pub async fn submit(
        &self,
        form: Option<&dyn FormSource>,
        url: Option<&str>,
    ) -> Result<SubmitResponse> {
        let snapshot = self.capture(form)?;
        self.send(snapshot, url).await
    }

    /// 同步擷取欄位後在背景送出
    pub fn spawn_submit(
        &self,
        form: Option<&dyn FormSource>,
        url: Option<&str>,
    ) -> Result<JoinHandle<Result<SubmitResponse>>> {
        let snapshot = self.capture(form)?;
        let submitter = self.clone();
        let url = url.map(str::to_string);

        Ok(tokio::spawn(async move {
            submitter.send(snapshot, url.as_deref()).await
        }))
    }

    fn capture(&self, form: Option<&dyn FormSource>) -> Result<FormSnapshot> {
        match form {
            Some(form) => {
                let snapshot = form.snapshot();
                tracing::debug!(
                    "📝 {}: captured {} field(s)",
                    form.id(),
                    snapshot.fields.len()
                );
                Ok(snapshot)
            }
            None => {
                tracing::error!("❌ Element with id=\"{}\" not found", self.form.form_id);
                Err(ClientError::MissingElement {
                    id: self.form.form_id.clone(),
                })
            }
        }
    }

    async fn send(&self, snapshot: FormSnapshot, url: Option<&str>) -> Result<SubmitResponse> {
        let url = resolve_url(
            self.base_url.as_deref(),
            url.unwrap_or(self.form.endpoint.as_str()),
        )?;

        let body = match self.form.encoding {
            BodyEncoding::Json => serde_json::to_string(&snapshot.to_json_object())?,
            BodyEncoding::UrlEncoded => snapshot.to_urlencoded(),
        };

        let mut request = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, self.form.encoding.content_type())
            .header(REQUESTED_WITH.0, REQUESTED_WITH.1)
            .body(body);

        // 每次送出都重新讀取 token
        match self.tokens.token() {
            Some(token) => request = request.header(self.csrf.header_name.as_str(), token),
            None => tracing::warn!(
                "⚠️ Cookie '{}' not found, sending without {} header",
                self.tokens.name(),
                self.csrf.header_name
            ),
        }

        if self.csrf.forward_cookies {
            if let Some(cookies) = self.tokens.jar().cookie_string().filter(|c| !c.is_empty()) {
                request = request.header(COOKIE, cookies);
            }
        }

        tracing::debug!("📡 POST {} ({:?})", url, self.form.encoding);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("❌ Error while submitting form data: {}", e);
                return Err(e.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let err = status_error(response).await;
            tracing::error!("❌ Error while submitting form data: {}", err);
            tracing::error!("Server response: {}", err.response_body().unwrap_or_default());
            return Err(err);
        }

        let text = response.text().await?;
        let body = match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text),
        };

        tracing::info!("✅ Form data submitted successfully: {}", body);
        Ok(SubmitResponse {
            status: status.as_u16(),
            body,
        })
    }
}
