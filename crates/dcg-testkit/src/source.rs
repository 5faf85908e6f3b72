//! Stub Source
//!
//! Outbound endpoint stub that records instead of transmitting. Forwarded
//! payloads accumulate in memory where tests can read them back.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dcg_application::container::ResolveCtx;
use dcg_application::registry::{SOURCE_BINDINGS, SourceBindingEntry};
use dcg_domain::error::{CompositionResult, Error, Result};
use dcg_domain::ports::{SharedSource, Source};
use dcg_domain::value_objects::SourceParams;

/// Recording outbound endpoint
///
/// Honors the open/close lifecycle of the real endpoint; `forward` stores
/// the payload and reports its length as transmitted.
#[derive(Debug, Default)]
pub struct StubSource {
    state: Mutex<Option<SourceParams>>,
    forwarded: Mutex<Vec<Vec<u8>>>,
}

impl StubSource {
    /// Create a closed stub source
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters of the current open, when open
    pub fn open_params(&self) -> Option<SourceParams> {
        self.state.lock().expect("source state lock").clone()
    }

    /// Everything forwarded so far
    pub fn forwarded(&self) -> Vec<Vec<u8>> {
        self.forwarded.lock().expect("forwarded lock").clone()
    }
}

#[async_trait]
impl Source for StubSource {
    async fn open(&self, params: SourceParams) -> Result<()> {
        let mut state = self.state.lock().expect("source state lock");
        if state.is_some() {
            return Err(Error::channel("source is already open"));
        }
        *state = Some(params);
        Ok(())
    }

    async fn forward(&self, payload: &[u8]) -> Result<usize> {
        if !self.is_open() {
            return Err(Error::channel("source is closed"));
        }
        self.forwarded
            .lock()
            .expect("forwarded lock")
            .push(payload.to_vec());
        Ok(payload.len())
    }

    async fn close(&self) -> Result<()> {
        self.state.lock().expect("source state lock").take();
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.state.lock().expect("source state lock").is_some()
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}

fn construct_stub_source(_ctx: &ResolveCtx) -> CompositionResult<SharedSource> {
    Ok(Arc::new(StubSource::new()))
}

#[linkme::distributed_slice(SOURCE_BINDINGS)]
static STUB_SOURCE_BINDING: SourceBindingEntry = SourceBindingEntry {
    name: "stub",
    description: "Recording outbound endpoint for tests",
    requires: &[],
    construct: construct_stub_source,
};
