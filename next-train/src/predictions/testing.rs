//! In-memory transport for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::transport::{PredictionRequest, RawResponse, TlsMode, Transport, TransportError};

/// Replays scripted results in order and records every call.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    calls: Mutex<Vec<(PredictionRequest, TlsMode)>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Result<RawResponse, TransportError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn tls_modes(&self) -> Vec<TlsMode> {
        self.calls.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }

    pub fn requests(&self) -> Vec<PredictionRequest> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(r, _)| r.clone())
            .collect()
    }
}

impl Transport for ScriptedTransport {
    async fn get(
        &self,
        request: &PredictionRequest,
        tls: TlsMode,
    ) -> Result<RawResponse, TransportError> {
        self.calls.lock().unwrap().push((request.clone(), tls));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("script exhausted".into())))
    }
}
