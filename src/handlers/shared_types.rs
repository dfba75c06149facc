use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Method and path pulled out of an API Gateway proxy event.
///
/// Fields that are missing or not strings are `None`; a malformed event is
/// never an error here, it simply fails the route match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyRequest {
    pub http_method: Option<String>,
    pub path: Option<String>,
}

impl ProxyRequest {
    // ---
    pub fn new(http_method: &str, path: &str) -> Self {
        // ---
        Self {
            http_method: Some(http_method.to_string()),
            path: Some(path.to_string()),
        }
    }

    /// Reads `httpMethod` and `path`, ignoring every other field.
    pub fn from_event(event: &Value) -> Self {
        // ---
        let field = |name: &str| event.get(name).and_then(Value::as_str).map(str::to_string);

        Self {
            http_method: field("httpMethod"),
            path: field("path"),
        }
    }

    pub fn method(&self) -> &str {
        self.http_method.as_deref().unwrap_or_default()
    }

    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or_default()
    }
}

/// The fixed header set carried by every response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeaders {
    #[serde(rename = "Content-Type")]
    pub content_type: String,

    #[serde(rename = "Access-Control-Allow-Headers")]
    pub allow_headers: String,

    #[serde(rename = "Access-Control-Allow-Origin")]
    pub allow_origin: String,

    #[serde(rename = "Access-Control-Allow-Methods")]
    pub allow_methods: String,
}

impl ResponseHeaders {
    // ---
    pub fn new(allowed_origin: &str) -> Self {
        // ---
        Self {
            content_type: "application/json".to_string(),
            allow_headers: "Content-Type".to_string(),
            allow_origin: allowed_origin.to_string(),
            allow_methods: "OPTIONS,POST,GET".to_string(),
        }
    }

    /// Header name/value pairs in wire order.
    pub fn pairs(&self) -> [(&'static str, &str); 4] {
        // ---
        [
            ("Content-Type", self.content_type.as_str()),
            ("Access-Control-Allow-Headers", self.allow_headers.as_str()),
            ("Access-Control-Allow-Origin", self.allow_origin.as_str()),
            ("Access-Control-Allow-Methods", self.allow_methods.as_str()),
        ]
    }
}

/// API Gateway proxy response: `{ statusCode, headers, body }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: ResponseHeaders,

    /// JSON text; always the encoding of a string.
    pub body: String,
}

impl ProxyResponse {
    // ---
    /// Builds a response whose body is `message` encoded as a JSON string.
    pub fn new(status_code: u16, headers: &ResponseHeaders, message: &str) -> Self {
        // ---
        Self {
            status_code,
            headers: headers.clone(),
            body: Value::String(message.to_string()).to_string(),
        }
    }
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        // ---
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = status;

        let headers = response.headers_mut();
        for (name, value) in self.headers.pairs() {
            match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::error!("Invalid response header {}: {}", name, value),
            }
        }

        response
    }
}
