use crate::core::loading::loading_markup;
use crate::domain::model::{BodyEncoding, HtmlPolicy, OrderingPolicy};
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ERROR_TEMPLATE: &str = "<p class=\"text-danger\">Error: {error}</p>";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub server: ServerConfig,
    pub csrf: CsrfConfig,
    pub fragment: FragmentConfig,
    pub form: FormConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 相對 URL 以此為基準
    pub base_url: Option<String>,
    /// 不設定時沿用 HTTP client 的預設值
    pub timeout_ms: Option<u64>,
    pub user_agent: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_ms: None,
            user_agent: format!("frag-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CsrfConfig {
    pub cookie_name: String,
    pub header_name: String,
    /// 送出表單時一併帶上 Cookie 標頭
    pub forward_cookies: bool,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            cookie_name: "csrftoken".to_string(),
            header_name: "X-CSRFToken".to_string(),
            forward_cookies: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FragmentConfig {
    pub region_id: String,
    pub loading_indicator: bool,
    pub ordering: OrderingPolicy,
    pub html_policy: HtmlPolicy,
    pub error_template: String,
    /// 覆寫預設的載入動畫標記
    pub loading_html: Option<String>,
}

impl Default for FragmentConfig {
    fn default() -> Self {
        Self {
            region_id: "dynamic-block".to_string(),
            loading_indicator: false,
            ordering: OrderingPolicy::default(),
            html_policy: HtmlPolicy::default(),
            error_template: DEFAULT_ERROR_TEMPLATE.to_string(),
            loading_html: None,
        }
    }
}

impl FragmentConfig {
    pub fn loading_html(&self) -> String {
        self.loading_html.clone().unwrap_or_else(loading_markup)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub form_id: String,
    /// 呼叫端未指定 URL 時使用
    pub endpoint: String,
    pub encoding: BodyEncoding,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            form_id: "entity-form".to_string(),
            endpoint: "/entity/create/".to_string(),
            encoding: BodyEncoding::default(),
        }
    }
}

impl ClientConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ClientError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BACKEND_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| ClientError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn base_url(&self) -> Option<&str> {
        self.server.base_url.as_deref()
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.server.base_url {
            validation::validate_url("server.base_url", base_url)?;
        }
        if let Some(timeout) = self.server.timeout_ms {
            validation::validate_positive_number("server.timeout_ms", timeout, 1)?;
        }

        validation::validate_cookie_name("csrf.cookie_name", &self.csrf.cookie_name)?;
        validation::validate_header_name("csrf.header_name", &self.csrf.header_name)?;

        validation::validate_non_empty_string("fragment.region_id", &self.fragment.region_id)?;
        validation::validate_contains(
            "fragment.error_template",
            &self.fragment.error_template,
            "{error}",
        )?;

        validation::validate_non_empty_string("form.form_id", &self.form.form_id)?;
        validation::validate_non_empty_string("form.endpoint", &self.form.endpoint)?;

        Ok(())
    }
}
