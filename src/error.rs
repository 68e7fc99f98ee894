//! Crate error type
//!
//! Core state machines are infallible. Errors only come from wiring the core
//! to the page, and the entry point logs them and skips the affected effect.

pub type MotionResult<T> = Result<T, MotionError>;

#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    #[error("missing element: #{0}")]
    MissingElement(String),

    #[error("element #{id} is not a {expected}")]
    WrongElementType { id: String, expected: &'static str },

    #[error("settings error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("browser api error: {0}")]
    Browser(String),

    #[error("renderer error: {0}")]
    Renderer(String),
}

impl MotionError {
    pub fn missing(id: impl Into<String>) -> Self {
        Self::MissingElement(id.into())
    }

    pub fn browser(msg: impl Into<String>) -> Self {
        Self::Browser(msg.into())
    }

    pub fn renderer(msg: impl Into<String>) -> Self {
        Self::Renderer(msg.into())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for MotionError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Browser(format!("{value:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes_are_stable() {
        assert_eq!(
            MotionError::missing("year").to_string(),
            "missing element: #year"
        );
        assert!(
            MotionError::browser("x")
                .to_string()
                .starts_with("browser api error:")
        );
        let wrong = MotionError::WrongElementType {
            id: "hero-canvas".into(),
            expected: "canvas",
        };
        assert_eq!(wrong.to_string(), "element #hero-canvas is not a canvas");
    }

    #[test]
    fn test_settings_error_from_serde() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: MotionError = err.into();
        assert!(err.to_string().starts_with("settings error:"));
    }
}
