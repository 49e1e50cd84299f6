use crate::core::page::selector;
use crate::domain::model::HtmlPolicy;
use crate::utils::error::Result;
use scraper::Html;

const ACTIVE_CONTENT: &str = "script, iframe, object, embed";

/// 依信任邊界處理要插入區塊的片段
pub fn apply_policy(policy: HtmlPolicy, html: &str) -> Result<String> {
    match policy {
        HtmlPolicy::Trusted => Ok(html.to_string()),
        HtmlPolicy::StripActiveContent => strip_active_content(html),
    }
}

fn strip_active_content(html: &str) -> Result<String> {
    let mut fragment = Html::parse_fragment(html);
    let active = selector(ACTIVE_CONTENT)?;

    let ids: Vec<_> = fragment.select(&active).map(|element| element.id()).collect();
    for id in ids {
        if let Some(mut node) = fragment.tree.get_mut(id) {
            node.detach();
        }
    }

    Ok(fragment.root_element().inner_html())
}

/// 錯誤文字插入標記前需跳脫
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
