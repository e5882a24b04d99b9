use thiserror::Error;
use wasm_bindgen::JsValue;

/// Faults raised while bringing the effect up.
///
/// Only [`EffectError::ContextUnavailable`] and missing document elements stop
/// initialisation. Shader build failures are logged and the effect carries on
/// with a null program.
#[derive(Debug, Error)]
pub enum EffectError {
    #[error("WebGL is not supported by your browser.")]
    ContextUnavailable,
    #[error("element `{0}` not found in document")]
    ElementNotFound(String),
    #[error("an error occurred compiling the {stage} shader: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },
    #[error("unable to initialize the shader program: {0}")]
    ProgramLink(String),
    #[error("render loop is already running")]
    LoopAlreadyRunning,
    #[error("javascript error: {0}")]
    Js(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Rejected `data-*` override on the canvas element.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("`{key}` expects a number, got `{value}`")]
    NotANumber { key: &'static str, value: String },
    #[error("easing factor must be in (0, 1], got {0}")]
    EasingOutOfRange(f64),
    #[error("unknown log level `{0}`")]
    UnknownLogLevel(String),
    #[error("`{key}` must not be empty")]
    Empty { key: &'static str },
}

impl From<JsValue> for EffectError {
    fn from(value: JsValue) -> Self {
        EffectError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<EffectError> for JsValue {
    fn from(err: EffectError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
