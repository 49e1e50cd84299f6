use crate::domain::model::FormSnapshot;

/// 提供 `name=value; ...` 形式的 cookie 字串
pub trait CookieSource: Send + Sync {
    fn cookie_string(&self) -> Option<String>;
}

/// 內容會被整體替換的目標區塊
pub trait TargetRegion: Send + Sync {
    fn id(&self) -> &str;
    fn replace_content(&self, html: &str);
}

pub trait FormSource: Send + Sync {
    fn id(&self) -> &str;
    fn snapshot(&self) -> FormSnapshot;
}

impl<T: CookieSource + ?Sized> CookieSource for std::sync::Arc<T> {
    fn cookie_string(&self) -> Option<String> {
        (**self).cookie_string()
    }
}
