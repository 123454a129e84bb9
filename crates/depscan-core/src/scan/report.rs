//! Deprecation chain reconstruction.

use super::cache::{DeprecationCache, Verdict};
use serde::Serialize;

/// The causal chain from a root package to the directly-deprecated
/// package that taints it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeprecationChain {
    /// The scanned root package.
    pub package: String,
    /// Ordered path from the root to the directly-deprecated package.
    pub chain: Vec<String>,
}

impl DeprecationChain {
    /// Render the chain as `root -> ... -> deprecated`.
    #[must_use]
    pub fn render(&self) -> String {
        self.chain.join(" -> ")
    }
}

/// Rebuild the chain for `root` from the final cache state.
///
/// Follows `via` pointers one hop at a time until the directly-deprecated
/// package is reached. Returns `None` when the root resolved clean (or
/// was never resolved). The walk is finite: the traversal's cycle guard
/// keeps a package from becoming its own transitive ancestor.
pub async fn build_chain(cache: &DeprecationCache, root: &str) -> Option<DeprecationChain> {
    let mut current = root.to_string();
    let mut chain = vec![current.clone()];

    loop {
        match cache.verdict(&current).await {
            Some(Verdict::Transitive { via }) => {
                chain.push(via.clone());
                current = via;
            }
            Some(Verdict::Direct) => {
                return Some(DeprecationChain {
                    package: root.to_string(),
                    chain,
                });
            }
            Some(Verdict::Clean) | None => {
                if chain.len() == 1 {
                    return None;
                }
                // A dangling link should not happen; report what we have.
                return Some(DeprecationChain {
                    package: root.to_string(),
                    chain,
                });
            }
        }
    }
}
