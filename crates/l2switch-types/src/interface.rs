//! Switch interface number type.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 1-based switch interface number.
///
/// Interfaces are numbered `1..=N` to match the numbering used on the
/// transport wire. Zero is never a valid interface.
///
/// # Examples
///
/// ```
/// use l2switch_types::InterfaceNumber;
///
/// let ifc = InterfaceNumber::new(3).unwrap();
/// assert_eq!(ifc.get(), 3);
/// assert_eq!(ifc.index(), 2);
///
/// assert!(InterfaceNumber::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct InterfaceNumber(u16);

impl InterfaceNumber {
    /// Lowest valid interface number.
    pub const FIRST: InterfaceNumber = InterfaceNumber(1);

    /// Creates a new interface number.
    ///
    /// # Errors
    ///
    /// Returns an error if `number` is zero.
    pub const fn new(number: u16) -> Result<Self, ParseError> {
        if number == 0 {
            Err(ParseError::InvalidInterfaceNumber(number))
        } else {
            Ok(InterfaceNumber(number))
        }
    }

    /// Creates the interface number for a zero-based array index.
    ///
    /// Returns `None` if the index does not fit the 16-bit wire numbering.
    pub fn from_index(index: usize) -> Option<Self> {
        u16::try_from(index + 1).ok().map(InterfaceNumber)
    }

    /// Returns the interface number as a u16.
    pub const fn get(&self) -> u16 {
        self.0
    }

    /// Returns the zero-based index of this interface.
    pub const fn index(&self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Display for InterfaceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for InterfaceNumber {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: u16 = s
            .trim()
            .parse()
            .map_err(|_| ParseError::InvalidInterfaceString(s.to_string()))?;
        InterfaceNumber::new(number)
    }
}

impl TryFrom<u16> for InterfaceNumber {
    type Error = ParseError;

    fn try_from(number: u16) -> Result<Self, Self::Error> {
        InterfaceNumber::new(number)
    }
}

impl From<InterfaceNumber> for u16 {
    fn from(ifc: InterfaceNumber) -> u16 {
        ifc.0
    }
}
