use crate::error::IdentificationError;
use std::convert::TryInto;

/// A rule's byte position, either fixed or relative to the cursor left
/// behind by the previous rule in the same program.
///
/// Replaces the `"+N"`/`"-N"` string-typed offset form of the reference
/// implementation with a real enum checked at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Offset {
    Absolute(u32),
    Forward(u32),
    Backward(u32),
}

impl Offset {
    pub(crate) fn resolve(&self, cursor: usize) -> Result<usize, IdentificationError> {
        match *self {
            Offset::Absolute(n) => Ok(n as usize),
            Offset::Forward(n) => Ok(cursor + n as usize),
            Offset::Backward(n) => (cursor as isize - n as isize)
                .try_into()
                .map_err(|_| IdentificationError::InvalidOffset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_ignores_cursor() {
        assert_eq!(Offset::Absolute(10).resolve(5).unwrap(), 10);
    }

    #[test]
    fn forward_adds_to_cursor() {
        assert_eq!(Offset::Forward(3).resolve(5).unwrap(), 8);
    }

    #[test]
    fn backward_subtracts_and_checks_underflow() {
        assert_eq!(Offset::Backward(2).resolve(5).unwrap(), 3);
        assert!(Offset::Backward(10).resolve(5).is_err());
    }
}
