use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::proxy::ProxyId;
use crate::ValidationError;

/// Standard response envelope for all `econcal` machine-readable outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub data: T,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<EnvelopeError>,
}

impl<T> Envelope<T> {
    pub fn success(meta: EnvelopeMeta, data: T) -> Self {
        Self {
            meta,
            data,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(
        meta: EnvelopeMeta,
        data: T,
        errors: Vec<EnvelopeError>,
    ) -> Result<Self, ValidationError> {
        meta.validate()?;
        for error in &errors {
            error.validate()?;
        }

        Ok(Self { meta, data, errors })
    }
}

/// Metadata attached to every envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    pub request_id: String,
    pub generated_at: String,
    pub proxy_chain: Vec<ProxyId>,
    pub latency_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl EnvelopeMeta {
    pub fn new(
        request_id: impl Into<String>,
        proxy_chain: Vec<ProxyId>,
        latency_ms: u64,
    ) -> Result<Self, ValidationError> {
        let meta = Self {
            request_id: request_id.into(),
            generated_at: OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .expect("UTC timestamp must be RFC3339 formattable"),
            proxy_chain,
            latency_ms,
            warnings: Vec::new(),
        };
        meta.validate()?;
        Ok(meta)
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.request_id.trim().len() < 8 {
            return Err(ValidationError::InvalidRequestId);
        }

        if self.proxy_chain.is_empty() {
            return Err(ValidationError::EmptyProxyChain);
        }

        Ok(())
    }
}

/// Structured error payload for partial or failed responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyId>,
}

impl EnvelopeError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let error = Self {
            code: code.into(),
            message: message.into(),
            proxy: None,
        };
        error.validate()?;
        Ok(error)
    }

    pub fn with_proxy(mut self, proxy: ProxyId) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.code.trim().is_empty() {
            return Err(ValidationError::EmptyErrorCode);
        }

        if self.message.trim().is_empty() {
            return Err(ValidationError::EmptyErrorMessage);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_meta() {
        let meta = EnvelopeMeta::new("req-12345678", vec![ProxyId::Local], 11)
            .expect("meta should be valid");
        assert_eq!(meta.proxy_chain, vec![ProxyId::Local]);
        assert!(meta.generated_at.ends_with('Z'));
    }

    #[test]
    fn rejects_short_request_id() {
        let err = EnvelopeMeta::new("req-1", vec![ProxyId::Local], 1).expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidRequestId));
    }

    #[test]
    fn rejects_empty_proxy_chain() {
        let err = EnvelopeMeta::new("req-12345678", Vec::new(), 1).expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyProxyChain));
    }

    #[test]
    fn rejects_empty_error_code() {
        let err = EnvelopeError::new("", "message").expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyErrorCode));
    }

    #[test]
    fn envelope_skips_empty_errors_in_json() {
        let meta = EnvelopeMeta::new("req-12345678", vec![ProxyId::CorsProxy], 3)
            .expect("meta should be valid");
        let envelope = Envelope::success(meta, serde_json::json!({"records": []}));
        let json = serde_json::to_value(&envelope).expect("must serialize");
        assert!(json.get("errors").is_none());
    }
}
