use econcal_core::{EnvelopeMeta, ProxyId, ValidationError};
use uuid::Uuid;

/// Accumulates envelope metadata while a command runs.
pub struct Metadata {
    request_id: String,
    proxy_chain: Vec<ProxyId>,
    latency_ms: u64,
    warnings: Vec<String>,
}

impl Metadata {
    pub fn new(proxy_chain: Vec<ProxyId>, latency_ms: u64) -> Self {
        Self {
            request_id: format!("req-{}", Uuid::new_v4().simple()),
            proxy_chain,
            latency_ms,
            warnings: Vec::new(),
        }
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn into_envelope_meta(self) -> Result<EnvelopeMeta, ValidationError> {
        let mut meta = EnvelopeMeta::new(self.request_id, self.proxy_chain, self.latency_ms)?;
        for warning in self.warnings {
            meta.push_warning(warning);
        }
        Ok(meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_ids_are_unique_and_long_enough() {
        let first = Metadata::new(vec![ProxyId::Local], 0)
            .into_envelope_meta()
            .expect("meta should be valid");
        let second = Metadata::new(vec![ProxyId::Local], 0)
            .into_envelope_meta()
            .expect("meta should be valid");

        assert_ne!(first.request_id, second.request_id);
        assert!(first.request_id.starts_with("req-"));
    }

    #[test]
    fn warnings_carry_into_the_meta() {
        let mut metadata = Metadata::new(vec![ProxyId::CorsProxy], 12);
        metadata.push_warning("mock transport active");
        let meta = metadata.into_envelope_meta().expect("meta should be valid");

        assert_eq!(meta.warnings, vec![String::from("mock transport active")]);
        assert_eq!(meta.latency_ms, 12);
    }
}
