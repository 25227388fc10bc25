#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize)]
pub struct ErrorResponse<K> {
    #[serde(rename = "error")]
    pub kind: K,
    #[serde(rename = "error_description")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Short, stable text describing an error kind to the caller.
pub trait Describe {
    fn describe(&self) -> &'static str;
    fn is_server_error(&self) -> bool;
}

impl<K: Describe> From<K> for ErrorResponse<K> {
    fn from(kind: K) -> Self {
        let description = Some(kind.describe().to_string());
        Self { kind, description }
    }
}
