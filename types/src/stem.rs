//! Selection index for the fixed set of dendrite stems.

use std::fmt;

use thiserror::Error;

/// Rejected stem index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("stem index {0} out of range (valid range 0..5)")]
pub struct StemIndexError(pub u8);

/// Index of one of the five selectable dendrite stems.
///
/// Validated on construction, so a snapshot can never carry an
/// out-of-range selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StemIndex(u8);

impl StemIndex {
    /// Number of selectable stems in the visualization.
    pub const COUNT: u8 = 5;

    pub fn new(index: u8) -> Result<Self, StemIndexError> {
        if index < Self::COUNT {
            Ok(Self(index))
        } else {
            Err(StemIndexError(index))
        }
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for StemIndex {
    type Error = StemIndexError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl fmt::Display for StemIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{StemIndex, StemIndexError};

    #[test]
    fn full_domain_accepted() {
        for i in 0..StemIndex::COUNT {
            assert_eq!(StemIndex::new(i).unwrap().get(), i);
        }
    }

    #[test]
    fn out_of_range_rejected() {
        assert_eq!(StemIndex::new(5), Err(StemIndexError(5)));
        assert_eq!(StemIndex::try_from(u8::MAX), Err(StemIndexError(u8::MAX)));
    }
}
