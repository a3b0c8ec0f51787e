//! Random record generation.
//!
//! Pure value generators: given an RNG they produce fixed-length alphabetic
//! strings and fixed-digit-count integers. Not cryptographically random —
//! corpus content only needs to be plausible, not unpredictable.

use rand::Rng;

use crate::document::{DataKind, FieldValue, Record};

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// A string of exactly `len` characters drawn uniformly from the upper- and
/// lower-case ASCII alphabet.
pub fn random_text<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// An integer formed by drawing `digits` decimal digits uniformly (leading
/// zeros permitted) and reading them base-10, so the result lies in
/// `[0, 10^digits - 1]`.
///
/// `digits` must be at most 18 to stay within `i64`; the CLI bounds it to 15.
pub fn random_number<R: Rng + ?Sized>(rng: &mut R, digits: usize) -> i64 {
    (0..digits).fold(0i64, |value, _| value * 10 + rng.random_range(0..10) as i64)
}

/// Generate one record with `num_fields` values of `kind`.
pub fn random_record<R: Rng + ?Sized>(
    rng: &mut R,
    key: u64,
    num_fields: usize,
    kind: DataKind,
    text_len: usize,
    numeric_len: usize,
) -> Record {
    let values = (0..num_fields)
        .map(|_| match kind {
            DataKind::String => FieldValue::Text(random_text(rng, text_len)),
            DataKind::Number => FieldValue::Integer(random_number(rng, numeric_len)),
        })
        .collect();

    Record::new(key, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_length_exact() {
        let mut rng = rand::rng();
        for len in [1, 5, 10, 100, 1000] {
            let text = random_text(&mut rng, len);
            assert_eq!(text.len(), len);
        }
    }

    #[test]
    fn test_text_alphabetic_only() {
        let mut rng = rand::rng();
        let text = random_text(&mut rng, 500);
        assert!(text.chars().all(|c| c.is_ascii_alphabetic()));
    }

    #[test]
    fn test_number_within_digit_bound() {
        let mut rng = rand::rng();
        for digits in [1, 3, 10, 15] {
            let bound = 10i64.pow(digits as u32);
            for _ in 0..100 {
                let n = random_number(&mut rng, digits);
                assert!((0..bound).contains(&n), "{n} out of range for {digits} digits");
            }
        }
    }

    #[test]
    fn test_record_shape() {
        let mut rng = rand::rng();
        let record = random_record(&mut rng, 3, 4, DataKind::String, 6, 10);

        assert_eq!(record.key, 3);
        assert_eq!(record.values.len(), 4);
        for value in &record.values {
            match value {
                FieldValue::Text(s) => assert_eq!(s.len(), 6),
                FieldValue::Integer(_) => panic!("expected text values"),
            }
        }

        let record = random_record(&mut rng, 0, 2, DataKind::Number, 6, 3);
        for value in &record.values {
            match value {
                FieldValue::Integer(n) => assert!((0..1000).contains(n)),
                FieldValue::Text(_) => panic!("expected integer values"),
            }
        }
    }
}
