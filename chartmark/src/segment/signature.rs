//! Canonical keys for a set of active style entries.

use crate::position::StyleEntry;
use std::sync::Arc;

/// Sorted, deduplicated, `|`-joined style tokens of `entries`.
///
/// Independent of the order in which entities were discovered, so two
/// positions that look the same always share a signature.
pub fn design_signature(entries: &[Arc<StyleEntry>]) -> String {
    let mut tokens: Vec<String> = entries.iter().flat_map(|e| e.signature_tokens()).collect();
    tokens.sort_unstable();
    tokens.dedup();
    tokens.join("|")
}

/// Sorted, deduplicated `entityId-isAttribute` tokens of `entries`.
pub fn identity_key(entries: &[Arc<StyleEntry>]) -> String {
    let mut tokens: Vec<String> = entries.iter().map(|e| e.identity_token()).collect();
    tokens.sort_unstable();
    tokens.dedup();
    tokens.join(",")
}

/// Both keys of one run of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunKey {
    pub identity: String,
    pub signature: String,
}

impl RunKey {
    pub fn of(entries: &[Arc<StyleEntry>]) -> Self {
        Self {
            identity: identity_key(entries),
            signature: design_signature(entries),
        }
    }
}
