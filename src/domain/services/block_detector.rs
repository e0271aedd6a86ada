// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Literal markers found on challenge and refusal pages.
pub const DEFAULT_BLOCK_SIGNATURES: &[&str] = &["Robot Check", "captcha", "blocked", "Access Denied"];

/// Status codes servers use to shed automated traffic.
pub const PROTECTION_STATUS_CODES: &[u16] = &[429, 503];

/// Classifies a raw response as blocked or usable.
///
/// Runs before any DOM parsing so that a challenge page can never be read as
/// product markup. Signatures are matched case-sensitively.
#[derive(Debug, Clone)]
pub struct BlockDetector {
    signatures: Vec<String>,
    status_codes: Vec<u16>,
}

impl Default for BlockDetector {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_SIGNATURES)
    }
}

impl BlockDetector {
    pub fn new(signatures: &[&str]) -> Self {
        Self {
            signatures: signatures.iter().map(|s| s.to_string()).collect(),
            status_codes: PROTECTION_STATUS_CODES.to_vec(),
        }
    }

    pub fn is_blocked(&self, body: &str, status_code: u16) -> bool {
        self.status_codes.contains(&status_code)
            || self.signatures.iter().any(|signature| body.contains(signature.as_str()))
    }

    /// Returns the first matching signature, for logging.
    pub fn matched_signature(&self, body: &str) -> Option<&str> {
        self.signatures
            .iter()
            .find(|signature| body.contains(signature.as_str()))
            .map(String::as_str)
    }
}

/// Classify with the default signature set.
pub fn is_blocked(body: &str, status_code: u16) -> bool {
    BlockDetector::default().is_blocked(body, status_code)
}
