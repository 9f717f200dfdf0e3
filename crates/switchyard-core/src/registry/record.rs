//! Endpoint records and their identities

use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::Arc;

/// Number of hash bytes kept in an [`EndpointId`] fingerprint
const FINGERPRINT_BYTES: usize = 6;

/// Opaque credential material of one endpoint
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub proxy: Option<String>,
    pub auth_method: Option<String>,
    pub connect_mode: Option<String>,
}

impl Credentials {
    /// Credentials with only an API key
    pub fn api_key(key: impl Into<String>) -> Self {
        Self {
            api_key: Some(key.into()),
            ..Default::default()
        }
    }

    /// Set the API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set the proxy URL
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// API key with the middle masked, safe to log
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_deref().map(mask_api_key)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.masked_api_key())
            .field("api_base", &self.api_base)
            .field("proxy", &self.proxy)
            .field("auth_method", &self.auth_method)
            .field("connect_mode", &self.connect_mode)
            .finish()
    }
}

fn mask_api_key(key: &str) -> String {
    let len = key.len();
    if len <= 12 || !key.is_ascii() {
        return "*".repeat(len.min(12));
    }

    let prefix = &key[..8];
    let suffix = &key[len - 4..];
    let mask_len = len - 12;

    format!("{}{}...{}", prefix, "*".repeat(mask_len.min(8)), suffix)
}

/// Identity of a concrete endpoint for cooldown and throttling.
///
/// Derived from the target and every credential field, never from the
/// logical name: two records under one alias with different keys are
/// distinct endpoints, two aliases pointing at the same key and target are
/// the same endpoint. Displays as `<target>#<fingerprint>`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EndpointId(Arc<str>);

impl EndpointId {
    /// Compute the identity of `target` reached with `credentials`
    pub fn derive(target: &str, credentials: &Credentials) -> Self {
        let mut hasher = Sha256::new();
        for field in [
            Some(target),
            credentials.api_key.as_deref(),
            credentials.api_base.as_deref(),
            credentials.proxy.as_deref(),
            credentials.auth_method.as_deref(),
            credentials.connect_mode.as_deref(),
        ] {
            // Length-prefix every field so ("ab", "c") and ("a", "bc") differ
            match field {
                Some(value) => {
                    hasher.update([1u8]);
                    hasher.update((value.len() as u64).to_le_bytes());
                    hasher.update(value.as_bytes());
                }
                None => hasher.update([0u8]),
            }
        }
        let digest = hasher.finalize();

        let mut id = String::with_capacity(target.len() + 1 + FINGERPRINT_BYTES * 2);
        id.push_str(target);
        id.push('#');
        for byte in &digest[..FINGERPRINT_BYTES] {
            id.push_str(&format!("{:02x}", byte));
        }
        Self(Arc::from(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EndpointId({})", self.0)
    }
}

/// One concrete, callable backend configuration for a logical model name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRecord {
    logical_name: String,
    target: String,
    credentials: Credentials,
    rpm_hint: Option<u32>,
    max_tokens_field: Option<String>,
    id: EndpointId,
}

impl EndpointRecord {
    /// Create a record. `target` is `protocol/model-id`.
    pub fn new(
        logical_name: impl Into<String>,
        target: impl Into<String>,
        credentials: Credentials,
    ) -> Self {
        let target = target.into();
        let id = EndpointId::derive(&target, &credentials);
        Self {
            logical_name: logical_name.into(),
            target,
            credentials,
            rpm_hint: None,
            max_tokens_field: None,
            id,
        }
    }

    /// Set the requests-per-minute hint
    pub fn with_rpm_hint(mut self, rpm: Option<u32>) -> Self {
        self.rpm_hint = rpm;
        self
    }

    /// Set the name of the max-tokens request field
    pub fn with_max_tokens_field(mut self, field: Option<String>) -> Self {
        self.max_tokens_field = field;
        self
    }

    pub fn logical_name(&self) -> &str {
        &self.logical_name
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Protocol part of the target, e.g. `anthropic`
    pub fn protocol(&self) -> &str {
        self.target
            .split_once('/')
            .map(|(protocol, _)| protocol)
            .unwrap_or(crate::config::DEFAULT_PROTOCOL)
    }

    /// Model identifier part of the target
    pub fn model_id(&self) -> &str {
        self.target
            .split_once('/')
            .map(|(_, model_id)| model_id)
            .unwrap_or(&self.target)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn rpm_hint(&self) -> Option<u32> {
        self.rpm_hint
    }

    /// Request field the backend expects max tokens under, e.g.
    /// `max_completion_tokens`. Not part of the endpoint identity.
    pub fn max_tokens_field(&self) -> Option<&str> {
        self.max_tokens_field.as_deref()
    }

    pub fn id(&self) -> &EndpointId {
        &self.id
    }
}
