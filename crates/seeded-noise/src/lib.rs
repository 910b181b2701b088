//! seeded-noise: deterministic randomness for generative rendering
//!
//! This library provides the two sources of "randomness" used by a
//! deterministic rendering pipeline: a 32-bit linear congruential generator
//! and a seeded 2D gradient (Perlin) noise field. Both are pure functions of
//! their seed: the same seed always produces the same draw sequence and the
//! same noise surface, on every platform.
//!
//! # Quick Start
//!
//! ```
//! use seeded_noise::{Lcg32, NoiseField};
//!
//! let mut rng = Lcg32::new(42);
//! let a = rng.next_f64();
//! let b = rng.next_f64();
//! assert_ne!(a, b);
//!
//! let noise = NoiseField::new(42);
//! let v = noise.sample(1.5, 2.5);
//! assert!((0.0..=1.0).contains(&v));
//! ```
//!
//! # Determinism Contract
//!
//! - [`Lcg32`] steps `state = state * 1664525 + 1013904223 (mod 2^32)` and
//!   yields `state / 2^32`. The integer arithmetic is wrapping u32, so the
//!   sequence is bit-for-bit reproducible across reimplementations.
//! - [`NoiseField`] builds its permutation table with a Fisher–Yates shuffle
//!   driven by an [`Lcg32`] seeded identically, so the whole noise surface is
//!   a function of one u32 seed.
//!
//! Neither type carries global state: construct one instance per generation
//! request and the request owns its randomness outright. Instances are cheap
//! (`Lcg32` is a single u32; `NoiseField` is a 512-byte table).

pub mod perlin;
pub mod rng;


pub use perlin::NoiseField;
pub use rng::Lcg32;
