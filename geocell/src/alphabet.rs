//! The geohash base32 alphabet and input validation.
//!
//! Cell strings are drawn from 32 symbols: the ten digits plus the lowercase
//! letters without `a`, `i`, `l` and `o`. Each symbol carries 5 bits.

use crate::error::{GeocellError, Result};

/// The 32-symbol alphabet, indexed by 5-bit value.
pub const ALPHABET: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Bits carried by one cell character.
pub const BITS_PER_CHAR: u32 = 5;

/// Smallest supported precision (cell string length).
pub const MIN_PRECISION: usize = 1;

/// Largest supported precision (cell string length).
pub const MAX_PRECISION: usize = 12;

/// Default precision, roughly ±19 m.
pub const DEFAULT_PRECISION: usize = 8;

/// Reverse lookup table from ASCII byte to 5-bit value (`0xFF` = not in alphabet).
const DECODE_TABLE: [u8; 128] = {
    let mut table = [0xFF_u8; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Returns the 5-bit value of an alphabet symbol.
///
/// Lookup is case-sensitive: `'B'` is not a valid symbol.
///
/// # Examples
///
/// ```
/// use geocell::alphabet::char_index;
///
/// assert_eq!(char_index(b'0'), Some(0));
/// assert_eq!(char_index(b'z'), Some(31));
/// assert_eq!(char_index(b'a'), None);
/// ```
pub fn char_index(byte: u8) -> Option<u8> {
    match DECODE_TABLE.get(byte as usize) {
        Some(&v) if v != 0xFF => Some(v),
        _ => None,
    }
}

/// Returns the alphabet symbol for a 5-bit value.
///
/// Only the low 5 bits of `value` are used.
pub fn symbol(value: u8) -> char {
    ALPHABET[(value & 0x1F) as usize] as char
}

/// Validate a latitude/longitude pair.
///
/// Latitude is checked first. `NaN` fails both range checks.
pub fn validate_coordinate(lat: f64, lon: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(GeocellError::InvalidLatitude { lat });
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(GeocellError::InvalidLongitude { lon });
    }
    Ok(())
}

/// Validate a precision value.
pub fn validate_precision(precision: usize) -> Result<()> {
    if !(MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
        return Err(GeocellError::InvalidPrecision { precision });
    }
    Ok(())
}

/// Validate a cell string without decoding it.
///
/// Any length is accepted as long as it is non-zero; only the symbols are checked.
pub fn validate_cell(cell: &str) -> Result<()> {
    if cell.is_empty() {
        return Err(GeocellError::EmptyInput);
    }
    for (position, character) in cell.chars().enumerate() {
        symbol_value(character, position)?;
    }
    Ok(())
}

/// Returns the 5-bit value of the symbol at `position` in a cell string.
///
/// Non-ASCII characters and bytes outside the alphabet fail with
/// [`GeocellError::InvalidCharacter`].
pub fn symbol_value(character: char, position: usize) -> Result<u8> {
    u8::try_from(character)
        .ok()
        .and_then(char_index)
        .ok_or(GeocellError::InvalidCharacter {
            character,
            position,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_excludes_ambiguous_letters() {
        for c in [b'a', b'i', b'l', b'o'] {
            assert!(!ALPHABET.contains(&c));
            assert_eq!(char_index(c), None);
        }
    }

    #[test]
    fn test_char_index_roundtrip() {
        for (i, &c) in ALPHABET.iter().enumerate() {
            assert_eq!(char_index(c), Some(i as u8));
            assert_eq!(symbol(i as u8), c as char);
        }
    }

    #[test]
    fn test_char_index_rejects_uppercase_and_non_ascii() {
        assert_eq!(char_index(b'B'), None);
        assert_eq!(char_index(b'U'), None);
        assert_eq!(char_index(0xC3), None);
        assert_eq!(char_index(b' '), None);
    }

    #[test]
    fn test_validate_coordinate() {
        assert!(validate_coordinate(0.0, 0.0).is_ok());
        assert!(validate_coordinate(90.0, 180.0).is_ok());
        assert!(validate_coordinate(-90.0, -180.0).is_ok());

        assert_eq!(
            validate_coordinate(90.0001, 0.0),
            Err(GeocellError::InvalidLatitude { lat: 90.0001 })
        );
        assert_eq!(
            validate_coordinate(0.0, -180.5),
            Err(GeocellError::InvalidLongitude { lon: -180.5 })
        );
        // Latitude is reported first when both are out of range
        assert!(matches!(
            validate_coordinate(100.0, 200.0),
            Err(GeocellError::InvalidLatitude { .. })
        ));
        assert!(validate_coordinate(f64::NAN, 0.0).is_err());
        assert!(validate_coordinate(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_validate_precision() {
        assert!(validate_precision(1).is_ok());
        assert!(validate_precision(12).is_ok());
        assert_eq!(
            validate_precision(0),
            Err(GeocellError::InvalidPrecision { precision: 0 })
        );
        assert_eq!(
            validate_precision(13),
            Err(GeocellError::InvalidPrecision { precision: 13 })
        );
    }

    #[test]
    fn test_symbol_value() {
        assert_eq!(symbol_value('0', 0), Ok(0));
        assert_eq!(symbol_value('z', 4), Ok(31));
        assert_eq!(
            symbol_value('A', 1),
            Err(GeocellError::InvalidCharacter {
                character: 'A',
                position: 1
            })
        );
        assert!(symbol_value('ü', 0).is_err());
    }

    #[test]
    fn test_validate_cell_agrees_with_decode() {
        for cell in ["u281zd9z", "u0aj", "ü0", "ezs42", "U281", "7zzzzzzz"] {
            assert_eq!(
                validate_cell(cell).err(),
                crate::codec::bounding_box(cell).err(),
                "{}",
                cell
            );
        }
    }

    #[test]
    fn test_validate_cell() {
        assert!(validate_cell("u0qj5v2k").is_ok());
        assert_eq!(validate_cell(""), Err(GeocellError::EmptyInput));
        assert_eq!(
            validate_cell("u0aj"),
            Err(GeocellError::InvalidCharacter {
                character: 'a',
                position: 2
            })
        );
        assert_eq!(
            validate_cell("ü0"),
            Err(GeocellError::InvalidCharacter {
                character: 'ü',
                position: 0
            })
        );
    }
}
