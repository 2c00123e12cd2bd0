use crate::domain::model::FizzBuzzToken;
use crate::utils::error::{LabError, Result};
use crate::utils::validation::validate_range;

/// 上限只是為了控制輸出量
pub const FIZZBUZZ_MAX: i64 = 10_000;

impl FizzBuzzToken {
    /// Token for position `i`. The 15 check comes first.
    pub fn at(i: u64) -> Self {
        if i % 15 == 0 {
            FizzBuzzToken::FizzBuzz
        } else if i % 3 == 0 {
            FizzBuzzToken::Fizz
        } else if i % 5 == 0 {
            FizzBuzzToken::Buzz
        } else {
            FizzBuzzToken::Number(i)
        }
    }
}

/// The sequence `1..=n`. Iterating it again starts over from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FizzBuzz {
    n: u64,
}

impl FizzBuzz {
    pub fn new(n: i64) -> Result<Self> {
        Self::with_limit(n, FIZZBUZZ_MAX)
    }

    pub fn with_limit(n: i64, max: i64) -> Result<Self> {
        if max < 1 {
            return Err(LabError::invalid_argument("max", max, "must be at least 1"));
        }
        validate_range("n", n, 1, max)?;
        Ok(Self { n: n as u64 })
    }

    pub fn len(&self) -> usize {
        self.n as usize
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn iter(&self) -> FizzBuzzIter {
        FizzBuzzIter {
            next: 1,
            end: self.n,
        }
    }
}

impl IntoIterator for &FizzBuzz {
    type Item = FizzBuzzToken;
    type IntoIter = FizzBuzzIter;

    fn into_iter(self) -> FizzBuzzIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct FizzBuzzIter {
    next: u64,
    end: u64,
}

impl Iterator for FizzBuzzIter {
    type Item = FizzBuzzToken;

    fn next(&mut self) -> Option<FizzBuzzToken> {
        if self.next > self.end {
            return None;
        }
        let token = FizzBuzzToken::at(self.next);
        self.next += 1;
        Some(token)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end + 1 - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FizzBuzzIter {}

pub fn fizzbuzz(n: i64) -> Result<FizzBuzz> {
    FizzBuzz::new(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::modulo::is_divisible;

    #[test]
    fn test_fizzbuzz_fifteen() {
        let tokens: Vec<FizzBuzzToken> = fizzbuzz(15).unwrap().iter().collect();
        assert_eq!(tokens.len(), 15);
        for (i, token) in tokens.iter().enumerate() {
            let position = i as u64 + 1;
            let expected = match position {
                3 | 6 | 9 | 12 => FizzBuzzToken::Fizz,
                5 | 10 => FizzBuzzToken::Buzz,
                15 => FizzBuzzToken::FizzBuzz,
                n => FizzBuzzToken::Number(n),
            };
            assert_eq!(*token, expected, "position {}", position);
        }
    }

    #[test]
    fn test_fifteen_is_divisible_by_both() {
        assert!(is_divisible(15, 3).unwrap() && is_divisible(15, 5).unwrap());
        assert_eq!(fizzbuzz(15).unwrap().iter().last(), Some(FizzBuzzToken::FizzBuzz));
    }

    #[test]
    fn test_fizzbuzz_is_restartable() {
        let sequence = fizzbuzz(100).unwrap();
        let first: Vec<_> = sequence.iter().collect();
        let second: Vec<_> = (&sequence).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first, fizzbuzz(100).unwrap().iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_fizzbuzz_bounds() {
        assert!(fizzbuzz(0).is_err());
        assert!(fizzbuzz(-4).is_err());
        assert!(fizzbuzz(FIZZBUZZ_MAX + 1).is_err());
        assert_eq!(fizzbuzz(1).unwrap().iter().collect::<Vec<_>>(), vec![FizzBuzzToken::Number(1)]);
        assert_eq!(fizzbuzz(FIZZBUZZ_MAX).unwrap().len(), 10_000);
        assert!(FizzBuzz::with_limit(50, 20).is_err());
        assert!(FizzBuzz::with_limit(20, 20).is_ok());
    }

    #[test]
    fn test_exact_size() {
        let mut iter = fizzbuzz(10).unwrap().iter();
        assert_eq!(iter.len(), 10);
        iter.next();
        assert_eq!(iter.len(), 9);
    }

    #[test]
    fn test_token_display() {
        let rendered: Vec<String> = fizzbuzz(5).unwrap().iter().map(|t| t.to_string()).collect();
        assert_eq!(rendered, vec!["1", "2", "Fizz", "4", "Buzz"]);
    }
}
