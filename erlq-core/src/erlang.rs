//! Erlang-C waiting probability
//!
//! The probability that an arriving job finds all c servers busy in a stable
//! M/M/c queue:
//!
//! ```text
//! a = lambda / mu           (offered load)
//! rho = a / c               (utilization)
//! P0 = [ sum_{k=0}^{c-1} a^k/k!  +  (a^c/c!) / (1 - rho) ]^-1
//! P_wait = (a^c/c!) * P0 / (1 - rho)
//! ```
//!
//! The summation is accumulated with the running ratio
//! `term_k = term_{k-1} * a / k` instead of independent powers and
//! factorials, which keeps every intermediate on the order of the final
//! terms and avoids overflow for the server counts this crate targets.

use crate::error::ModelError;
use crate::params::QueueParameters;

/// Probability that an arriving job must wait (Erlang-C).
///
/// Returns [`ModelError::UnstableQueue`] when rho >= 1.
pub fn erlang_c(params: &QueueParameters) -> Result<f64, ModelError> {
    if !params.is_stable() {
        return Err(params.unstable_error());
    }

    let a = params.offered_load();
    let c = params.servers();
    let rho = params.utilization();

    // sum of a^k/k! for k in 0..c, term-by-term
    let mut term = 1.0;
    let mut sum = 1.0;
    for k in 1..c {
        term *= a / k as f64;
        sum += term;
    }
    // (a^c/c!) / (1 - rho)
    let tail = term * a / c as f64 / (1.0 - rho);

    Ok(tail / (sum + tail))
}
