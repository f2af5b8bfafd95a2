use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures talking to the REST endpoints.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
	#[error("no browser window is available")]
	NoWindow,
	#[error("could not build request for {url}: {message}")]
	Request { url: String, message: String },
	#[error("network error while fetching {url}: {message}")]
	Network { url: String, message: String },
	#[error("{url} responded with status {status}")]
	Status { url: String, status: u16 },
	#[error("invalid response body from {url}: {message}")]
	Decode { url: String, message: String },
}

/// Failures producing a drawable graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
	#[error(transparent)]
	Api(#[from] ApiError),
	#[error("the connections payload does not mark a current user")]
	MissingCurrentUser,
}

/// Best-effort text for a JS exception value.
pub fn js_message(value: &JsValue) -> String {
	value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
