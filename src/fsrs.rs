// FSRS memory model: pure functions over (rating, stability, difficulty,
// elapsed time, weights). Stability is the time in days for recall
// probability to decay to the desired retention target; difficulty is a
// 1-10 scalar steering how fast stability grows.

use serde::{Deserialize, Serialize};

use crate::error::Error;

type R = f64;
type S = f64;
type D = f64;
type T = f64;

/// Stability never drops below this; keeps retrievability defined.
pub const MIN_STABILITY: f64 = 0.1;

/// Difficulty assigned to cards that have not graduated yet.
pub const NEUTRAL_DIFFICULTY: f64 = 5.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Again,
    Hard,
    Good,
    Easy,
}

impl Rating {
    pub const ALL: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

    /// Parse the 1..=4 wire value. Anything else is rejected before the
    /// engine touches any state.
    pub fn from_u8(n: u8) -> Result<Rating, Error> {
        match n {
            1 => Ok(Rating::Again),
            2 => Ok(Rating::Hard),
            3 => Ok(Rating::Good),
            4 => Ok(Rating::Easy),
            n => Err(Error::InvalidRating(n)),
        }
    }
}

// 1-based ordinal G used throughout the formulas.
impl From<Rating> for f64 {
    fn from(g: Rating) -> f64 {
        match g {
            Rating::Again => 1.0,
            Rating::Hard => 2.0,
            Rating::Good => 3.0,
            Rating::Easy => 4.0,
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = Error;

    fn try_from(n: u8) -> Result<Rating, Error> {
        Rating::from_u8(n)
    }
}

// R(t, S) = e^(ln(r) * t / S). At t = S this is exactly r.
pub(crate) fn retrievability(t: T, s: S, desired_retention: f64) -> R {
    (desired_retention.ln() * t / s).exp().clamp(0.0, 1.0)
}

// S_0(G) = w[G-1]
pub(crate) fn s_0(g: Rating, w: &[f64; 19]) -> S {
    let g: f64 = g.into();
    floor_s(w[g as usize - 1])
}

// D_0(G) = w[4] - e^(w[5] * (G-1)) + 1
pub(crate) fn d_0(g: Rating, w: &[f64; 19]) -> D {
    let g: f64 = g.into();
    clamp_d(w[4] - f64::exp(w[5] * (g - 1.0)) + 1.0)
}

// Linear shift by the rating, then mean reversion toward D_0(Good).
pub(crate) fn next_d(d: D, g: Rating, w: &[f64; 19]) -> D {
    let g: f64 = g.into();
    let dp = d - w[6] * (g - 3.0);
    clamp_d(w[7] * d_0(Rating::Good, w) + (1.0 - w[7]) * dp)
}

// Multiplicative growth on a successful review. The hard penalty scales
// the growth term; the easy bonus scales the whole product.
pub(crate) fn s_success(d: D, s: S, r: R, g: Rating, w: &[f64; 19]) -> S {
    let t_d = 11.0 - d;
    let t_s = s.powf(-w[9]);
    let t_r = f64::exp(w[10] * (1.0 - r)) - 1.0;
    let h = if g == Rating::Hard { w[15] } else { 1.0 };
    let b = if g == Rating::Easy { w[16] } else { 1.0 };
    floor_s(s * (f64::exp(w[8]) * t_d * t_s * t_r * h + 1.0) * b)
}

// Post-lapse stability.
pub(crate) fn s_fail(d: D, s: S, r: R, w: &[f64; 19]) -> S {
    let d_f = d.powf(-w[12]);
    let s_f = (s + 1.0).powf(w[13]) - 1.0;
    let r_f = f64::exp(w[14] * (1.0 - r));
    floor_s(w[11] * d_f * s_f * r_f)
}

fn clamp_d(d: D) -> D {
    d.clamp(1.0, 10.0)
}

fn floor_s(s: S) -> S {
    s.max(MIN_STABILITY)
}
