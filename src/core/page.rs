use crate::domain::model::FormSnapshot;
use crate::domain::ports::{FormSource, TargetRegion};
use crate::utils::error::{ClientError, Result};
use scraper::{ElementRef, Html, Selector};
use std::sync::Mutex;

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ClientError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// 伺服器渲染頁面的記憶體模型
#[derive(Debug, Clone)]
pub struct Page {
    html: String,
}

impl Page {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        Ok(Self::new(std::fs::read_to_string(path)?))
    }

    /// 依 id 找出表單並擷取其欄位；找不到時回傳 `None`
    pub fn form(&self, id: &str) -> Result<Option<HtmlForm>> {
        let document = Html::parse_document(&self.html);
        let forms = selector("form")?;

        match document.select(&forms).find(|form| form.value().id() == Some(id)) {
            Some(form) => Ok(Some(HtmlForm {
                id: id.to_string(),
                fields: collect_fields(form)?,
            })),
            None => Ok(None),
        }
    }

    /// 以元素目前的內容建立可替換的區塊
    pub fn region(&self, id: &str) -> Result<Option<MemoryRegion>> {
        let document = Html::parse_document(&self.html);
        let any = selector("[id]")?;

        Ok(document
            .select(&any)
            .find(|element| element.value().id() == Some(id))
            .map(|element| MemoryRegion::with_content(id, element.inner_html())))
    }
}

/// 送出當下的表單欄位
#[derive(Debug, Clone)]
pub struct HtmlForm {
    id: String,
    fields: Vec<(String, String)>,
}

impl HtmlForm {
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

impl FormSource for HtmlForm {
    fn id(&self) -> &str {
        &self.id
    }

    fn snapshot(&self) -> FormSnapshot {
        FormSnapshot::new(self.fields.clone())
    }
}

// 依瀏覽器序列化表單的規則挑出有效欄位
fn collect_fields(form: ElementRef<'_>) -> Result<Vec<(String, String)>> {
    let controls = selector("input, select, textarea")?;
    let options = selector("option")?;
    let mut fields = Vec::new();

    for control in form.select(&controls) {
        let element = control.value();
        let name = match element.attr("name") {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };
        if element.attr("disabled").is_some() || in_disabled_fieldset(control) {
            continue;
        }

        match element.name() {
            "input" => {
                let input_type = element
                    .attr("type")
                    .unwrap_or("text")
                    .to_ascii_lowercase();
                match input_type.as_str() {
                    "submit" | "button" | "image" | "reset" | "file" => continue,
                    "checkbox" | "radio" => {
                        if element.attr("checked").is_some() {
                            fields.push((name, element.attr("value").unwrap_or("on").to_string()));
                        }
                    }
                    _ => fields.push((name, element.attr("value").unwrap_or("").to_string())),
                }
            }
            "select" => {
                let multiple = element.attr("multiple").is_some();
                let available: Vec<ElementRef<'_>> = control
                    .select(&options)
                    .filter(|option| option.value().attr("disabled").is_none())
                    .collect();
                let selected: Vec<&ElementRef<'_>> = available
                    .iter()
                    .filter(|option| option.value().attr("selected").is_some())
                    .collect();

                if selected.is_empty() {
                    // 單選下拉預設第一個選項
                    if let (false, Some(first)) = (multiple, available.first()) {
                        fields.push((name, option_value(first)));
                    }
                } else if multiple {
                    for option in selected {
                        fields.push((name.clone(), option_value(option)));
                    }
                } else if let Some(last) = selected.last() {
                    fields.push((name, option_value(last)));
                }
            }
            "textarea" => fields.push((name, control.text().collect())),
            _ => {}
        }
    }

    Ok(fields)
}

// 停用的 fieldset 會停用其後代，第一個 legend 內的欄位除外
fn in_disabled_fieldset(control: ElementRef<'_>) -> bool {
    control
        .ancestors()
        .filter_map(ElementRef::wrap)
        .filter(|ancestor| {
            ancestor.value().name() == "fieldset" && ancestor.value().attr("disabled").is_some()
        })
        .any(|fieldset| {
            let first_legend = fieldset
                .children()
                .filter_map(ElementRef::wrap)
                .find(|child| child.value().name() == "legend");
            match first_legend {
                Some(legend) => !control.ancestors().any(|node| node.id() == legend.id()),
                None => true,
            }
        })
}

fn option_value(option: &ElementRef<'_>) -> String {
    match option.value().attr("value") {
        Some(value) => value.to_string(),
        None => option
            .text()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// 執行緒安全的記憶體區塊
#[derive(Debug, Default)]
pub struct MemoryRegion {
    id: String,
    content: Mutex<String>,
}

impl MemoryRegion {
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_content(id, String::new())
    }

    pub fn with_content(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: Mutex::new(content.into()),
        }
    }

    pub fn content(&self) -> String {
        self.content
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl TargetRegion for MemoryRegion {
    fn id(&self) -> &str {
        &self.id
    }

    fn replace_content(&self, html: &str) {
        let mut content = self
            .content
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *content = html.to_string();
    }
}
