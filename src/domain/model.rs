use serde::{Deserialize, Serialize};

/// 表單送出當下擷取的欄位快照（依文件順序）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub fields: Vec<(String, String)>,
}

impl FormSnapshot {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// 轉為 JSON 物件；同名欄位以後者為準
    pub fn to_json_object(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut object = serde_json::Map::new();
        for (name, value) in &self.fields {
            object.insert(name.clone(), serde_json::Value::String(value.clone()));
        }
        object
    }

    /// application/x-www-form-urlencoded，保留所有欄位
    ///
    /// 值中的換行統一為 CRLF，與瀏覽器序列化表單一致。
    pub fn to_urlencoded(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.fields {
            serializer.append_pair(name, &normalize_newlines(value));
        }
        serializer.finish()
    }
}

fn normalize_newlines(value: &str) -> String {
    value.replace("\r\n", "\n").replace('\n', "\r\n")
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// 讀取端點回傳的片段
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FragmentPayload {
    pub html: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum BodyEncoding {
    #[default]
    Json,
    UrlEncoded,
}

impl BodyEncoding {
    pub fn content_type(&self) -> &'static str {
        match self {
            BodyEncoding::Json => "application/json",
            BodyEncoding::UrlEncoded => "application/x-www-form-urlencoded; charset=UTF-8",
        }
    }
}

/// 同一區塊有多個請求重疊時的套用規則
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderingPolicy {
    /// 每個回應抵達即套用，最後抵達者勝出
    #[default]
    LastResponseWins,
    /// 只套用該區塊最新發出請求的回應
    LatestRequestWins,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HtmlPolicy {
    /// 伺服器產生的標記視為已淨化，原樣插入
    #[default]
    Trusted,
    StripActiveContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Superseded,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

impl std::fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseBody::Json(value) => write!(f, "{}", value),
            ResponseBody::Text(text) => write!(f, "{}", text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitResponse {
    pub status: u16,
    pub body: ResponseBody,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_object_keeps_last_duplicate() {
        let snapshot: FormSnapshot = vec![("name", "a"), ("sort", "1"), ("name", "b")]
            .into_iter()
            .collect();

        let object = snapshot.to_json_object();
        assert_eq!(object.len(), 2);
        assert_eq!(object["name"], "b");
        assert_eq!(object["sort"], "1");
    }

    #[test]
    fn test_urlencoded_keeps_every_pair_in_order() {
        let snapshot: FormSnapshot = vec![
            ("name", "Ivan Petrov"),
            ("tag", "a&b"),
            ("tag", "c=d"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            snapshot.to_urlencoded(),
            "name=Ivan+Petrov&tag=a%26b&tag=c%3Dd"
        );
    }

    #[test]
    fn test_urlencoded_sends_crlf_line_breaks() {
        let snapshot: FormSnapshot = vec![("note", "a\nb\r\nc\rd")].into_iter().collect();

        assert_eq!(snapshot.to_urlencoded(), "note=a%0D%0Ab%0D%0Ac%0Dd");
        // JSON 保留原始值
        assert_eq!(snapshot.to_json_object()["note"], "a\nb\r\nc\rd");
    }

    #[test]
    fn test_policies_deserialize_from_kebab_case() {
        let ordering: OrderingPolicy = serde_json::from_str("\"latest-request-wins\"").unwrap();
        assert_eq!(ordering, OrderingPolicy::LatestRequestWins);

        let encoding: BodyEncoding = serde_json::from_str("\"url-encoded\"").unwrap();
        assert_eq!(encoding, BodyEncoding::UrlEncoded);
        assert_eq!(
            encoding.content_type(),
            "application/x-www-form-urlencoded; charset=UTF-8"
        );
    }
}
