use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("Browser global unavailable: {0}")]
    MissingGlobal(&'static str),

    #[error("Element not found: {0}")]
    MissingElement(String),

    #[error("JavaScript error: {0}")]
    Js(String),

    #[error("Section list is empty")]
    EmptySections,
}

impl From<JsValue> for PortfolioError {
    fn from(value: JsValue) -> Self {
        PortfolioError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<PortfolioError> for JsValue {
    fn from(err: PortfolioError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
