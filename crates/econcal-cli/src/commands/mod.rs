mod calendar;
mod convert;
mod proxies;

use std::sync::Arc;

use econcal_core::{Envelope, EnvelopeError, HttpClient, NoopHttpClient, ProxyId, ReqwestHttpClient};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::metadata::Metadata;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
    pub latency_ms: u64,
    pub proxy_chain: Vec<ProxyId>,
}

impl CommandResult {
    pub fn ok(data: Value, proxy_chain: Vec<ProxyId>) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
            latency_ms: 0,
            proxy_chain,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn with_errors(mut self, errors: Vec<EnvelopeError>) -> Self {
        self.errors.extend(errors);
        self
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }
}

pub async fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let client: Arc<dyn HttpClient> = if cli.mock {
        Arc::new(NoopHttpClient)
    } else {
        Arc::new(ReqwestHttpClient::new())
    };

    let command_result = match &cli.command {
        Command::Calendar(args) => calendar::run(args, client, cli.mock).await?,
        Command::Convert(args) => convert::run(args)?,
        Command::Proxies => proxies::run(),
    };

    let CommandResult {
        data,
        warnings,
        errors,
        latency_ms,
        proxy_chain,
    } = command_result;

    let mut metadata = Metadata::new(proxy_chain, latency_ms);
    for warning in warnings {
        metadata.push_warning(warning);
    }

    let meta = metadata.into_envelope_meta()?;
    Envelope::with_errors(meta, data, errors).map_err(CliError::from)
}
