//! Mock implementations for testing the sign-in flow

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::{PhoneNumber, Session, VerificationHandle};
use crate::errors::{IdentityProviderError, RiskCheckError};
use crate::services::flow::traits::{
    FlowUiTrait, HandleStoreTrait, IdentityProviderTrait, RiskCheckerTrait,
};
use crate::services::flow::types::{SimSwapVerdict, UiInputState};

// Mock risk checker with a fixed result
pub struct MockRiskChecker {
    result: Result<SimSwapVerdict, RiskCheckError>,
    pub calls: AtomicUsize,
    pub seen_phones: Mutex<Vec<String>>,
}

impl MockRiskChecker {
    pub fn safe() -> Self {
        Self::with_result(Ok(SimSwapVerdict::NoRecentChange))
    }

    pub fn risky() -> Self {
        Self::with_result(Ok(SimSwapVerdict::RecentChange))
    }

    pub fn failing(error: RiskCheckError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(result: Result<SimSwapVerdict, RiskCheckError>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            seen_phones: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RiskCheckerTrait for MockRiskChecker {
    async fn check_sim_swap(
        &self,
        phone: &PhoneNumber,
    ) -> Result<SimSwapVerdict, RiskCheckError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_phones
            .lock()
            .unwrap()
            .push(phone.as_str().to_string());
        self.result.clone()
    }
}

// Mock identity provider issuing handles in sequence
pub struct MockIdentityProvider {
    start_error: Option<String>,
    complete_error: Option<String>,
    handles: Mutex<VecDeque<String>>,
    pub start_calls: AtomicUsize,
    pub complete_calls: Mutex<Vec<(String, String)>>,
}

impl MockIdentityProvider {
    /// Provider that issues the given handles, one per start call.
    pub fn issuing(handles: &[&str]) -> Self {
        Self {
            start_error: None,
            complete_error: None,
            handles: Mutex::new(handles.iter().map(|h| h.to_string()).collect()),
            start_calls: AtomicUsize::new(0),
            complete_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_start(message: &str) -> Self {
        let mut provider = Self::issuing(&[]);
        provider.start_error = Some(message.to_string());
        provider
    }

    pub fn failing_complete(message: &str) -> Self {
        let mut provider = Self::issuing(&["H1"]);
        provider.complete_error = Some(message.to_string());
        provider
    }

    pub fn start_count(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn completions(&self) -> Vec<(String, String)> {
        self.complete_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProviderTrait for MockIdentityProvider {
    async fn start_verification(
        &self,
        _phone: &PhoneNumber,
    ) -> Result<VerificationHandle, IdentityProviderError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.start_error {
            return Err(IdentityProviderError::new(message.clone()));
        }
        let handle = self
            .handles
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock provider ran out of handles");
        Ok(VerificationHandle::new(handle))
    }

    async fn complete_verification(
        &self,
        handle: &VerificationHandle,
        code: &str,
    ) -> Result<Session, IdentityProviderError> {
        self.complete_calls
            .lock()
            .unwrap()
            .push((handle.as_str().to_string(), code.to_string()));
        if let Some(message) = &self.complete_error {
            return Err(IdentityProviderError::new(message.clone()));
        }
        Ok(Session::new("user-1", "session-token-1"))
    }
}

// Mock handle store with failure toggles
pub struct MockHandleStore {
    stored: Mutex<Option<String>>,
    fail_put: bool,
    fail_get: bool,
    amnesia: bool,
}

impl MockHandleStore {
    pub fn new() -> Self {
        Self {
            stored: Mutex::new(None),
            fail_put: false,
            fail_get: false,
            amnesia: false,
        }
    }

    /// Store whose writes succeed but are never readable again.
    pub fn amnesiac() -> Self {
        Self {
            amnesia: true,
            ..Self::new()
        }
    }

    pub fn failing_put() -> Self {
        Self {
            fail_put: true,
            ..Self::new()
        }
    }

    pub fn failing_get() -> Self {
        Self {
            fail_get: true,
            ..Self::new()
        }
    }

    pub fn stored_handle(&self) -> Option<String> {
        self.stored.lock().unwrap().clone()
    }
}

#[async_trait]
impl HandleStoreTrait for MockHandleStore {
    async fn put_handle(&self, handle: &VerificationHandle) -> Result<(), String> {
        if self.fail_put {
            return Err("handle store error".to_string());
        }
        *self.stored.lock().unwrap() = Some(handle.as_str().to_string());
        Ok(())
    }

    async fn get_handle(&self) -> Result<Option<VerificationHandle>, String> {
        if self.fail_get {
            return Err("handle store error".to_string());
        }
        if self.amnesia {
            return Ok(None);
        }
        Ok(self
            .stored
            .lock()
            .unwrap()
            .clone()
            .map(VerificationHandle::new))
    }
}

// Mock UI recording every interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Input(UiInputState),
    Prompt,
    Alert(String, String),
}

pub struct MockFlowUi {
    entries: Mutex<VecDeque<Option<String>>>,
    pub events: Mutex<Vec<UiEvent>>,
}

impl MockFlowUi {
    /// UI whose code prompt yields the given entries, one per prompt.
    pub fn with_entries(entries: Vec<Option<&str>>) -> Self {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|e| e.map(|c| c.to_string()))
                    .collect(),
            ),
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn entering(code: &str) -> Self {
        Self::with_entries(vec![Some(code)])
    }

    pub fn cancelling() -> Self {
        Self::with_entries(vec![None])
    }

    pub fn alerts(&self) -> Vec<(String, String)> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                UiEvent::Alert(title, message) => Some((title.clone(), message.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn input_states(&self) -> Vec<UiInputState> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                UiEvent::Input(state) => Some(*state),
                _ => None,
            })
            .collect()
    }

    pub fn prompt_count(&self) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| matches!(e, UiEvent::Prompt))
            .count()
    }
}

#[async_trait]
impl FlowUiTrait for MockFlowUi {
    async fn set_input_state(&self, state: UiInputState) {
        self.events.lock().unwrap().push(UiEvent::Input(state));
    }

    async fn prompt_code(&self) -> Option<String> {
        self.events.lock().unwrap().push(UiEvent::Prompt);
        self.entries.lock().unwrap().pop_front().flatten()
    }

    async fn alert(&self, title: &str, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(UiEvent::Alert(title.to_string(), message.to_string()));
    }
}
