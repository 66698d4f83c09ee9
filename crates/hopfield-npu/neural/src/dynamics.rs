// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Hopfield Dynamics Kernels
//!
//! Pure functions shared by the weight store and the relaxation engine.
//!
//! ```text
//! Local field of neuron k:
//!     z_k = Σ_j W[k][j] · s_j − θ_k
//!
//! Update rule:
//!     s_k ← +1  if z_k > 0
//!     s_k ← −1  if z_k < 0
//!     s_k unchanged if z_k == 0
//!
//! Energy:
//!     E(s) = −½ · sᵗ W s + Σ_k θ_k · s_k
//!
//! Flipping s_k changes the energy by ΔE = 2 · s_k · z_k, so a flip made by
//! the update rule always has ΔE < 0.
//! ```
//!
//! All sums are accumulated in `i64`.

use crate::types::{NEURON_OFF, NEURON_ON};

/// Local field of one neuron
///
/// `row` is row k of the weight matrix; `state` must have the same length.
///
/// # Example
/// ```
/// use hopfield_npu_neural::local_field;
///
/// let row = [0i32, 2, -2];
/// let state = [1i8, 1, -1];
/// assert_eq!(local_field(&row, &state, 1), 3);
/// ```
#[inline]
pub fn local_field<'a>(row: impl IntoIterator<Item = &'a i32>, state: &[i8], threshold: i32) -> i64 {
    let drive: i64 = row
        .into_iter()
        .zip(state)
        .map(|(&w, &s)| w as i64 * s as i64)
        .sum();
    drive - threshold as i64
}

/// Next value of a neuron given its local field
///
/// Zero fields keep the current value.
///
/// # Example
/// ```
/// use hopfield_npu_neural::next_neuron_value;
///
/// assert_eq!(next_neuron_value(5, -1), 1);
/// assert_eq!(next_neuron_value(-5, 1), -1);
/// assert_eq!(next_neuron_value(0, -1), -1);
/// ```
#[inline(always)]
pub fn next_neuron_value(field: i64, current: i8) -> i8 {
    match field {
        f if f > 0 => NEURON_ON,
        f if f < 0 => NEURON_OFF,
        _ => current,
    }
}

/// Energy change caused by flipping a neuron whose local field is `field`
#[inline(always)]
pub fn flip_energy_delta(field: i64, current: i8) -> i64 {
    2 * current as i64 * field
}

/// Energy of a state
///
/// `rows` iterates the rows of a square weight matrix in order.
///
/// # Example
/// ```
/// use hopfield_npu_neural::energy;
///
/// // Two neurons coupled with weight 1, aligned: E = -½ · 2 = -1
/// let weights: Vec<Vec<i32>> = vec![vec![0, 1], vec![1, 0]];
/// assert_eq!(energy(&weights, &[0, 0], &[1, 1]), -1.0);
/// assert_eq!(energy(&weights, &[0, 0], &[1, -1]), 1.0);
/// ```
pub fn energy<'a, R, I>(rows: R, thresholds: &[i32], state: &[i8]) -> f64
where
    R: IntoIterator<Item = I>,
    I: IntoIterator<Item = &'a i32>,
{
    debug_assert_eq!(thresholds.len(), state.len());

    let quadratic: i64 = rows
        .into_iter()
        .zip(state)
        .map(|(row, &s_i)| s_i as i64 * local_field(row, state, 0))
        .sum();
    let bias: i64 = thresholds
        .iter()
        .zip(state)
        .map(|(&t, &s)| t as i64 * s as i64)
        .sum();

    -0.5 * quadratic as f64 + bias as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outer_zero_diag(p: &[i8]) -> Vec<Vec<i32>> {
        let k = p.len();
        (0..k)
            .map(|i| {
                (0..k)
                    .map(|j| if i == j { 0 } else { p[i] as i32 * p[j] as i32 })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_local_field_with_threshold() {
        let row = [0i32, 1, 1, -1];
        let state = [1i8, 1, -1, -1];
        // 0 + 1 - 1 + 1 = 1, minus threshold 2
        assert_eq!(local_field(&row, &state, 2), -1);
    }

    #[test]
    fn test_zero_field_keeps_value() {
        assert_eq!(next_neuron_value(0, 1), 1);
        assert_eq!(next_neuron_value(0, -1), -1);
    }

    #[test]
    fn test_energy_of_stored_pattern() {
        let p = [1i8, -1, 1, 1];
        let w = outer_zero_diag(&p);
        // Each of the K(K-1) = 12 off-diagonal terms contributes 1
        assert_eq!(energy(&w, &[0; 4], &p), -6.0);
    }

    #[test]
    fn test_energy_threshold_term() {
        let w: Vec<Vec<i32>> = vec![vec![0, 0], vec![0, 0]];
        assert_eq!(energy(&w, &[3, -1], &[1, 1]), 2.0);
        assert_eq!(energy(&w, &[3, -1], &[-1, 1]), -4.0);
    }

    #[test]
    fn test_flip_delta_matches_energy_difference() {
        let p = [1i8, 1, -1, -1, 1];
        let w = outer_zero_diag(&p);
        let thresholds = [1, 0, -1, 0, 2];
        let state = [1i8, -1, -1, 1, 1];

        for k in 0..state.len() {
            let field = local_field(&w[k], &state, thresholds[k]);
            let mut flipped = state;
            flipped[k] = -flipped[k];
            let before = energy(&w, &thresholds, &state);
            let after = energy(&w, &thresholds, &flipped);
            assert_eq!(after - before, flip_energy_delta(field, state[k]) as f64);
        }
    }

    #[test]
    fn test_update_never_raises_energy() {
        let w = outer_zero_diag(&[1, -1, -1, 1, 1, -1]);
        let state = [-1i8, -1, 1, 1, -1, 1];
        for k in 0..state.len() {
            let field = local_field(&w[k], &state, 0);
            if next_neuron_value(field, state[k]) != state[k] {
                assert!(flip_energy_delta(field, state[k]) < 0);
            }
        }
    }
}
