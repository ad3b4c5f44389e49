//! Process-wide registry mapping `alg` header values to signing methods.
//!
//! The registry is seeded with `ES256K` and `ES256K-R` the first time it is
//! touched. Seeding runs exactly once per process no matter how many threads
//! race on it; afterwards the map only grows through
//! [`register_signing_method`], which refuses to overwrite an existing name.

use crate::{
    error::{JwtError, JwtResult},
    method::{ES256K, ES256K_R},
    traits::SigningMethod,
};
use dashmap::{DashMap, mapref::entry::Entry};
use once_cell::sync::Lazy;
use tracing::debug;

/// Factory producing the signing method registered under a name.
pub type SigningMethodFactory = fn() -> &'static dyn SigningMethod;

static REGISTRY: Lazy<DashMap<String, SigningMethodFactory>> = Lazy::new(|| {
    let registry = DashMap::new();
    for factory in [es256k as SigningMethodFactory, es256k_r] {
        let alg = factory().alg().to_string();
        debug!(alg = %alg, "registering builtin signing method");
        registry.insert(alg, factory);
    }
    registry
});

fn es256k() -> &'static dyn SigningMethod {
    &ES256K
}

fn es256k_r() -> &'static dyn SigningMethod {
    &ES256K_R
}

/// Seed the registry with the builtin methods. Later calls are no-ops.
pub fn init() {
    Lazy::force(&REGISTRY);
}

/// Register a signing method under `alg`.
///
/// # Errors
/// Returns [`JwtError::AlgorithmAlreadyRegistered`] if `alg` is taken,
/// including by the builtins.
pub fn register_signing_method(alg: &str, factory: SigningMethodFactory) -> JwtResult<()> {
    match REGISTRY.entry(alg.to_string()) {
        Entry::Occupied(_) => Err(JwtError::AlgorithmAlreadyRegistered(alg.to_string())),
        Entry::Vacant(slot) => {
            debug!(alg, "registering signing method");
            slot.insert(factory);
            Ok(())
        }
    }
}

/// Look up the signing method registered under `alg`.
#[must_use]
pub fn get_signing_method(alg: &str) -> Option<&'static dyn SigningMethod> {
    let factory = REGISTRY.get(alg).map(|entry| *entry.value())?;
    Some(factory())
}

/// All registered `alg` names, sorted.
#[must_use]
pub fn registered_algorithms() -> Vec<String> {
    let mut algs: Vec<String> = REGISTRY.iter().map(|entry| entry.key().clone()).collect();
    algs.sort();
    algs
}
