//! The proof-of-work puzzle.
//!
//! A candidate proof solves the puzzle for a reference proof when the SHA-256
//! hash of the decimal rendering of `candidate² - reference²` starts with
//! `difficulty` zero hex digits. The difference is order-sensitive and may be
//! negative, in which case it is rendered with a leading `-`.

use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;

use super::crypto::{has_leading_zeros, sha256_hex};

/// Renders `candidate² - reference²` exactly as a base-10 string.
///
/// The squares are taken in 128 bits, which holds `u64::MAX²`, and the sign
/// is tracked separately so the full `u64` range never overflows.
pub fn square_difference(candidate: u64, reference: u64) -> String {
    let candidate = u128::from(candidate).pow(2);
    let reference = u128::from(reference).pow(2);

    if candidate >= reference {
        (candidate - reference).to_string()
    } else {
        format!("-{}", reference - candidate)
    }
}

/// Checks whether `candidate` solves the puzzle relative to `reference`
pub fn is_proof_valid(candidate: u64, reference: u64, difficulty: usize) -> bool {
    let hash = sha256_hex(square_difference(candidate, reference).as_bytes());
    has_leading_zeros(&hash, difficulty)
}

/// Searches linearly from 1 for the first proof that solves the puzzle.
///
/// There is no upper bound on the number of attempts.
pub fn proof_of_work(reference: u64, difficulty: usize) -> u64 {
    let mut candidate = 1;

    while !is_proof_valid(candidate, reference, difficulty) {
        candidate = next_candidate(candidate);
    }

    debug!("Found proof {} for reference proof {}", candidate, reference);
    candidate
}

/// Like [`proof_of_work`], but gives up once `cancel` is raised.
///
/// The flag is checked before every attempt.
pub fn proof_of_work_until(reference: u64, difficulty: usize, cancel: &AtomicBool) -> Option<u64> {
    let proof = search(reference, difficulty, |_| cancel.load(Ordering::Relaxed));

    if proof.is_none() {
        debug!("Proof search for reference proof {} cancelled", reference);
    }

    proof
}

/// Like [`proof_of_work`], but tries at most `max_attempts` candidates
pub fn proof_of_work_within(reference: u64, difficulty: usize, max_attempts: u64) -> Option<u64> {
    search(reference, difficulty, |attempts| attempts >= max_attempts)
}

fn search<F>(reference: u64, difficulty: usize, mut stop: F) -> Option<u64>
where
    F: FnMut(u64) -> bool,
{
    let mut candidate = 1;
    let mut attempts = 0;

    loop {
        if stop(attempts) {
            return None;
        }

        if is_proof_valid(candidate, reference, difficulty) {
            debug!(
                "Found proof {} for reference proof {} after {} attempts",
                candidate,
                reference,
                attempts + 1
            );
            return Some(candidate);
        }

        candidate = next_candidate(candidate);
        attempts += 1;
    }
}

// Wraps to 1 rather than 0 so the search space stays the positive integers.
fn next_candidate(candidate: u64) -> u64 {
    candidate.checked_add(1).unwrap_or(1)
}
