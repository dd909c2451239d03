//! # Quote Provider
//!
//! File: server/src/services/quotes.rs
//! Author: Motiv Developers
//!
//! A fixed, immutable list of motivational quotes. Each call to
//! [`QuoteSet::random`] picks one uniformly; nothing is carried between calls.
//!
use rand::seq::SliceRandom;

/// The quotes served by `GET /api/quote`.
pub const QUOTES: [&str; 5] = [
    "Jangan menyerah — langkah kecil hari ini adalah kemenangan besar esok.",
    "Kesuksesan datang kepada mereka yang tak takut mencoba lagi.",
    "Dream big. Work hard. Stay humble.",
    "Belajar dari kemarin, hidup untuk hari ini, berharap untuk besok.",
    "Kerja keras + konsistensi = hasil.",
];

/// A non-empty set of quotes chosen from at random.
#[derive(Debug, Clone, Copy)]
pub struct QuoteSet {
    quotes: &'static [&'static str],
}

impl Default for QuoteSet {
    fn default() -> Self {
        Self { quotes: &QUOTES }
    }
}

impl QuoteSet {
    /// Returns one quote picked with the thread-local RNG.
    pub fn random(&self) -> &'static str {
        // `quotes` is never empty, so the fallback is unreachable in practice.
        self.quotes
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(QUOTES[0])
    }
}
