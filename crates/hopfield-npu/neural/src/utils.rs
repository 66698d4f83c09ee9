// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Pattern utilities: seeded generation, corruption, similarity and rendering
//!
//! Randomness always comes from a caller-supplied [`rand::Rng`] so that test
//! runs and demos are reproducible.

use rand::seq::index::sample;
use rand::Rng;

use crate::types::{HopfieldError, Pattern, Result, NEURON_OFF, NEURON_ON};

/// Draw a uniformly random bipolar pattern
///
/// # Panics
/// Panics if `size == 0`.
pub fn random_pattern<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Pattern {
    assert!(size > 0, "pattern size must be positive");
    let values = (0..size)
        .map(|_| if rng.gen::<bool>() { NEURON_ON } else { NEURON_OFF })
        .collect();
    Pattern::from_bipolar_unchecked(values)
}

/// Draw `count` independent random patterns of `size` neurons
pub fn random_patterns<R: Rng + ?Sized>(count: usize, size: usize, rng: &mut R) -> Vec<Pattern> {
    (0..count).map(|_| random_pattern(size, rng)).collect()
}

/// Return a copy of `pattern` with the neurons at `indices` inverted
///
/// # Errors
/// `Shape` if an index is out of range.
pub fn flip_neurons(pattern: &Pattern, indices: &[usize]) -> Result<Pattern> {
    let mut values = pattern.as_slice().to_vec();
    for &index in indices {
        let slot = values
            .get_mut(index)
            .ok_or_else(|| HopfieldError::shape(pattern.len(), index + 1))?;
        *slot = -*slot;
    }
    Pattern::from_bipolar(values)
}

/// Flip `round(fraction · K)` distinct, uniformly chosen neurons
///
/// # Errors
/// `Config` if `fraction` is not within `[0, 1]`.
pub fn corrupt<R: Rng + ?Sized>(pattern: &Pattern, fraction: f64, rng: &mut R) -> Result<Pattern> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(HopfieldError::config(format!(
            "corruption fraction must be within [0, 1], got {}",
            fraction
        )));
    }
    let count = ((pattern.len() as f64) * fraction).round() as usize;
    let indices = sample(rng, pattern.len(), count.min(pattern.len())).into_vec();
    flip_neurons(pattern, &indices)
}

/// Number of positions where `a` and `b` differ
///
/// # Errors
/// `Shape` if the lengths differ.
pub fn hamming_distance(a: &[i8], b: &[i8]) -> Result<usize> {
    if a.len() != b.len() {
        return Err(HopfieldError::shape(a.len(), b.len()));
    }
    Ok(a.iter().zip(b).filter(|(x, y)| x != y).count())
}

/// Normalized overlap m = (1/K) Σ aᵢ·bᵢ, in `[-1, 1]`
pub fn overlap(a: &[i8], b: &[i8]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(HopfieldError::shape(a.len(), b.len()));
    }
    if a.is_empty() {
        return Ok(0.0);
    }
    let dot: i64 = a.iter().zip(b).map(|(&x, &y)| x as i64 * y as i64).sum();
    Ok(dot as f64 / a.len() as f64)
}

/// Fraction of neurons that match, in `[0, 1]`
pub fn recall_accuracy(recalled: &[i8], original: &[i8]) -> Result<f64> {
    let distance = hamming_distance(recalled, original)?;
    if original.is_empty() {
        return Ok(1.0);
    }
    Ok(1.0 - distance as f64 / original.len() as f64)
}

/// Render a state as a grid with `width` columns (`#` active, `.` inactive)
///
/// # Example
/// ```
/// use hopfield_npu_neural::render_ascii;
///
/// assert_eq!(render_ascii(&[1, -1, -1, 1], 2), "#.\n.#");
/// ```
pub fn render_ascii(state: &[i8], width: usize) -> String {
    let width = width.max(1);
    state
        .chunks(width)
        .map(|row| {
            row.iter()
                .map(|&v| if v == NEURON_ON { '#' } else { '.' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_patterns_are_seeded() {
        let a = random_patterns(3, 16, &mut StdRng::seed_from_u64(7));
        let b = random_patterns(3, 16, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(a.iter().all(|p| p.len() == 16));
    }

    #[test]
    fn test_flip_neurons() {
        let p = Pattern::new(&[1, 1, -1, -1], 4).unwrap();
        let q = flip_neurons(&p, &[0, 3]).unwrap();
        assert_eq!(q.to_values(), vec![-1, 1, -1, 1]);
        assert!(flip_neurons(&p, &[4]).is_err());
    }

    #[test]
    fn test_corrupt_flips_exact_count() {
        let mut rng = StdRng::seed_from_u64(11);
        let p = random_pattern(200, &mut rng);
        let noisy = corrupt(&p, 0.1, &mut rng).unwrap();
        assert_eq!(hamming_distance(p.as_slice(), noisy.as_slice()).unwrap(), 20);
    }

    #[test]
    fn test_corrupt_rejects_bad_fraction() {
        let p = Pattern::new(&[1, -1], 2).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(corrupt(&p, 1.5, &mut rng), Err(HopfieldError::Config(_))));
        assert!(matches!(corrupt(&p, -0.1, &mut rng), Err(HopfieldError::Config(_))));
    }

    #[test]
    fn test_similarity_measures() {
        let a = [1i8, 1, -1, -1];
        let b = [1i8, -1, -1, 1];
        assert_eq!(hamming_distance(&a, &b).unwrap(), 2);
        assert_eq!(overlap(&a, &b).unwrap(), 0.0);
        assert_eq!(overlap(&a, &a).unwrap(), 1.0);
        assert_eq!(recall_accuracy(&b, &a).unwrap(), 0.5);
        assert!(hamming_distance(&a, &b[..3]).is_err());
    }

    #[test]
    fn test_render_ascii_rows() {
        let state = [1i8, 1, 1, -1, -1, -1, 1, 1];
        assert_eq!(render_ascii(&state, 4), "###.\n..##");
        assert_eq!(render_ascii(&state, 8), "###...##");
    }
}
