//! # Mock Capabilities
//!
//! In-memory implementations of every outbound port. Clones share state, so a
//! test can keep a handle, wire a clone into the service and reconfigure the
//! handle between calls.

use crate::domain::{CapabilityError, MspPrincipal, SignedData};
use crate::ports::outbound::{
    ChannelConfigGetter, ChannelResources, ChannelVerifier, ConfigtxValidator, Evaluator,
    Identity, MspManager, PolicyManager, PolicyManagerGetter,
};
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

type Outcome = Result<(), CapabilityError>;

/// Results handed out in order; `Ok(())` once the script runs dry.
#[derive(Clone, Debug, Default)]
struct Script {
    queue: Arc<Mutex<VecDeque<Outcome>>>,
}

impl Script {
    fn push(&self, outcome: Outcome) {
        self.queue.lock().push_back(outcome);
    }

    fn next(&self) -> Outcome {
        self.queue.lock().pop_front().unwrap_or(Ok(()))
    }
}

// =============================================================================
// CHANNEL LOOKUP
// =============================================================================

/// Channel lookup keyed by channel name.
#[derive(Clone, Default)]
pub struct MockChannelConfig {
    channels: Arc<RwLock<HashMap<String, Arc<dyn ChannelResources>>>>,
    calls: Arc<AtomicUsize>,
}

impl MockChannelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, channel: &str, resources: impl ChannelResources + 'static) {
        self.channels
            .write()
            .insert(channel.to_string(), Arc::new(resources));
    }

    pub fn remove(&self, channel: &str) {
        self.channels.write().remove(channel);
    }

    /// Number of lookups performed.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ChannelConfigGetter for MockChannelConfig {
    fn get_channel_config(&self, channel: &str) -> Option<Arc<dyn ChannelResources>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.channels.read().get(channel).cloned()
    }
}

/// Channel resources with optional MSP manager and validator.
#[derive(Clone, Default)]
pub struct MockResources {
    msp_manager: Arc<RwLock<Option<Arc<dyn MspManager>>>>,
    validator: Arc<RwLock<Option<Arc<dyn ConfigtxValidator>>>>,
    msp_manager_calls: Arc<AtomicUsize>,
}

impl MockResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_msp_manager(&self, manager: impl MspManager + 'static) {
        *self.msp_manager.write() = Some(Arc::new(manager));
    }

    pub fn clear_msp_manager(&self) {
        *self.msp_manager.write() = None;
    }

    pub fn set_configtx_validator(&self, validator: impl ConfigtxValidator + 'static) {
        *self.validator.write() = Some(Arc::new(validator));
    }

    pub fn msp_manager_calls(&self) -> usize {
        self.msp_manager_calls.load(Ordering::SeqCst)
    }
}

impl ChannelResources for MockResources {
    fn msp_manager(&self) -> Option<Arc<dyn MspManager>> {
        self.msp_manager_calls.fetch_add(1, Ordering::SeqCst);
        self.msp_manager.read().clone()
    }

    fn configtx_validator(&self) -> Option<Arc<dyn ConfigtxValidator>> {
        self.validator.read().clone()
    }
}

/// Validator reporting a settable sequence.
#[derive(Clone, Debug, Default)]
pub struct MockConfigtxValidator {
    sequence: Arc<AtomicU64>,
}

impl MockConfigtxValidator {
    pub fn new(sequence: u64) -> Self {
        Self {
            sequence: Arc::new(AtomicU64::new(sequence)),
        }
    }

    pub fn set_sequence(&self, sequence: u64) {
        self.sequence.store(sequence, Ordering::SeqCst);
    }
}

impl ConfigtxValidator for MockConfigtxValidator {
    fn sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }
}

// =============================================================================
// MEMBERSHIP
// =============================================================================

/// MSP manager returning a configured identity or error.
#[derive(Clone)]
pub struct MockMspManager {
    result: Arc<RwLock<Result<MockIdentity, CapabilityError>>>,
    last_serialized: Arc<Mutex<Option<Vec<u8>>>>,
    calls: Arc<AtomicUsize>,
}

impl Default for MockMspManager {
    fn default() -> Self {
        Self {
            result: Arc::new(RwLock::new(Err(CapabilityError::new(
                "no identity configured",
            )))),
            last_serialized: Arc::default(),
            calls: Arc::default(),
        }
    }
}

impl MockMspManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn returns_identity(&self, identity: MockIdentity) {
        *self.result.write() = Ok(identity);
    }

    pub fn returns_error(&self, reason: &str) {
        *self.result.write() = Err(CapabilityError::new(reason));
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_serialized(&self) -> Option<Vec<u8>> {
        self.last_serialized.lock().clone()
    }
}

impl MspManager for MockMspManager {
    fn deserialize_identity(
        &self,
        serialized: &[u8],
    ) -> Result<Box<dyn Identity>, CapabilityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_serialized.lock() = Some(serialized.to_vec());
        let identity = self.result.read().clone()?;
        Ok(Box::new(identity))
    }
}

/// Identity with a fixed principal-satisfaction outcome.
#[derive(Clone, Debug)]
pub struct MockIdentity {
    outcome: Outcome,
    principals: Arc<Mutex<Vec<MspPrincipal>>>,
}

impl MockIdentity {
    pub fn satisfying() -> Self {
        Self {
            outcome: Ok(()),
            principals: Arc::default(),
        }
    }

    pub fn rejecting(reason: &str) -> Self {
        Self {
            outcome: Err(CapabilityError::new(reason)),
            principals: Arc::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.principals.lock().len()
    }

    /// Principals this identity was asked about, oldest first.
    pub fn principals(&self) -> Vec<MspPrincipal> {
        self.principals.lock().clone()
    }
}

impl Identity for MockIdentity {
    fn satisfies_principal(&self, principal: &MspPrincipal) -> Result<(), CapabilityError> {
        self.principals.lock().push(principal.clone());
        self.outcome.clone()
    }
}

// =============================================================================
// VERIFIER / EVALUATOR
// =============================================================================

/// Channel verifier with scripted per-call results.
#[derive(Clone, Debug, Default)]
pub struct MockVerifier {
    script: Script,
    channels: Arc<Mutex<Vec<String>>>,
}

impl MockVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next unanswered call.
    pub fn returns_on_next(&self, outcome: Result<(), CapabilityError>) {
        self.script.push(outcome);
    }

    /// Channels passed to every call, oldest first.
    pub fn channels(&self) -> Vec<String> {
        self.channels.lock().clone()
    }
}

impl ChannelVerifier for MockVerifier {
    fn verify_by_channel(
        &self,
        channel: &str,
        _signed_data: &SignedData,
    ) -> Result<(), CapabilityError> {
        self.channels.lock().push(channel.to_string());
        self.script.next()
    }
}

/// Signature-set evaluator with scripted per-call results.
#[derive(Clone, Debug, Default)]
pub struct MockEvaluator {
    script: Script,
    signature_sets: Arc<Mutex<Vec<Vec<SignedData>>>>,
}

impl MockEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next unanswered call.
    pub fn returns_on_next(&self, outcome: Result<(), CapabilityError>) {
        self.script.push(outcome);
    }

    pub fn call_count(&self) -> usize {
        self.signature_sets.lock().len()
    }

    pub fn last_signature_set(&self) -> Option<Vec<SignedData>> {
        self.signature_sets.lock().last().cloned()
    }
}

impl Evaluator for MockEvaluator {
    fn evaluate(&self, signature_set: &[SignedData]) -> Result<(), CapabilityError> {
        self.signature_sets.lock().push(signature_set.to_vec());
        self.script.next()
    }
}

// =============================================================================
// POLICY MANAGERS
// =============================================================================

/// Policy manager lookup keyed by channel name.
#[derive(Clone, Default)]
pub struct MockPolicyManagers {
    managers: Arc<RwLock<HashMap<String, Arc<dyn PolicyManager>>>>,
}

impl MockPolicyManagers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, channel: &str, manager: impl PolicyManager + 'static) {
        self.managers
            .write()
            .insert(channel.to_string(), Arc::new(manager));
    }
}

impl PolicyManagerGetter for MockPolicyManagers {
    fn manager(&self, channel: &str) -> Option<Arc<dyn PolicyManager>> {
        self.managers.read().get(channel).cloned()
    }
}

/// Policies keyed by fully qualified name.
#[derive(Clone, Default)]
pub struct MockPolicyManager {
    policies: Arc<RwLock<HashMap<String, Arc<dyn Evaluator>>>>,
}

impl MockPolicyManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, name: &str, policy: impl Evaluator + 'static) {
        self.policies
            .write()
            .insert(name.to_string(), Arc::new(policy));
    }
}

impl PolicyManager for MockPolicyManager {
    fn get_policy(&self, name: &str) -> Option<Arc<dyn Evaluator>> {
        self.policies.read().get(name).cloned()
    }
}
