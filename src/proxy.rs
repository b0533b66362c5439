//! Outbound proxy selection
//!
//! One proxy is picked per run, before any request is sent, and every fetch
//! of that run goes through it.

use crate::InputError;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Non-empty set of proxy addresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyPool {
    proxies: Vec<String>,
}

impl ProxyPool {
    /// Creates a pool, rejecting an empty list
    pub fn new(proxies: Vec<String>) -> Result<Self, InputError> {
        if proxies.is_empty() {
            return Err(InputError::NoProxies);
        }
        Ok(Self { proxies })
    }

    pub fn proxies(&self) -> &[String] {
        &self.proxies
    }

    /// Picks one proxy uniformly at random
    pub fn select(&self) -> &str {
        self.select_with(&mut rand::rng())
    }

    /// Picks one proxy using the given random source
    pub fn select_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        let proxy = self
            .proxies
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default();
        tracing::info!("Proxy set to `{}`", proxy);
        proxy
    }
}
