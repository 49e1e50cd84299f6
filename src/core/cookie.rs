use crate::domain::ports::CookieSource;
use percent_encoding::percent_decode_str;

/// 從 cookie 字串中取出指定名稱的值（已解碼）
///
/// 以 `;` 分隔、逐項去除空白，回傳第一個名稱完全相符的項目。
/// 沒有 cookie 字串或找不到時回傳 `None`。
pub fn get_cookie(cookie_string: Option<&str>, name: &str) -> Option<String> {
    let cookies = cookie_string.filter(|s| !s.is_empty())?;
    let prefix = format!("{}=", name);

    cookies
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(prefix.as_str()))
        .map(|raw| percent_decode_str(raw).decode_utf8_lossy().into_owned())
}

/// 固定內容的 cookie 來源
#[derive(Debug, Clone, Default)]
pub struct StaticCookieJar {
    cookies: Option<String>,
}

impl StaticCookieJar {
    pub fn new(cookies: impl Into<String>) -> Self {
        Self {
            cookies: Some(cookies.into()),
        }
    }

    pub fn empty() -> Self {
        Self { cookies: None }
    }
}

impl CookieSource for StaticCookieJar {
    fn cookie_string(&self) -> Option<String> {
        self.cookies.clone()
    }
}

pub struct CookieTokenReader<J: CookieSource> {
    jar: J,
    name: String,
}

impl<J: CookieSource> CookieTokenReader<J> {
    pub fn new(jar: J, name: impl Into<String>) -> Self {
        Self {
            jar,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn jar(&self) -> &J {
        &self.jar
    }

    /// 每次呼叫都重新讀取 cookie
    pub fn token(&self) -> Option<String> {
        get_cookie(self.jar.cookie_string().as_deref(), &self.name)
    }
}
