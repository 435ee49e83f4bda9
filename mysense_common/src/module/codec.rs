//! Schema-driven fixed-width field codec.
//!
//! Every module reading is a fixed-width byte buffer described by a
//! [`ReadingLayout`]: a total width plus a list of [`FieldSpec`]s, each with
//! an offset, a width in bytes and a signedness. Integers are stored
//! little-endian; signed fields use two's complement.
//!
//! ## Layout rules
//!
//! - Total width is at most [`MAX_READING_WIDTH`] bytes.
//! - Each field is 1 to [`MAX_FIELD_WIDTH`] bytes wide.
//! - Fields lie within the total width and never overlap.
//!
//! [`ReadingLayout::validate`] is a `const fn`; `ModuleDescriptor::new` runs
//! it, so a `static` descriptor with a bad layout does not compile. Values that do not fit their field are an
//! error, never silently truncated.

use crate::consts::{MAX_FIELD_WIDTH, MAX_READING_WIDTH};
use serde::Serialize;
use std::fmt;
use static_assertions::{const_assert, const_assert_eq};
use std::ops::Range;
use thiserror::Error;

// Field values travel as 64-bit integers.
const_assert_eq!(MAX_FIELD_WIDTH, core::mem::size_of::<u64>());
const_assert!(MAX_FIELD_WIDTH <= MAX_READING_WIDTH);

/// A single encoded reading. Capacity is bounded by [`MAX_READING_WIDTH`].
pub type Reading = heapless::Vec<u8, MAX_READING_WIDTH>;

/// Errors raised while validating layouts or packing/unpacking fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Field width outside 1..=8 bytes.
    #[error("field '{field}' has invalid width {width} (must be 1-8)")]
    InvalidWidth {
        /// Field name
        field: &'static str,
        /// Declared width
        width: usize,
    },

    /// Field extends past the end of its layout.
    #[error("field '{field}' at {offset}+{width} exceeds layout width {layout_width}")]
    FieldOutOfBounds {
        /// Field name
        field: &'static str,
        /// Field offset
        offset: usize,
        /// Field width
        width: usize,
        /// Total layout width
        layout_width: usize,
    },

    /// Two fields share bytes.
    #[error("fields '{first}' and '{second}' overlap")]
    FieldOverlap {
        /// First field name
        first: &'static str,
        /// Second field name
        second: &'static str,
    },

    /// Layout is wider than any reading may be.
    #[error("layout width {width} exceeds maximum reading width {max}")]
    LayoutTooWide {
        /// Declared width
        width: usize,
        /// Maximum width
        max: usize,
    },

    /// Raw access outside the buffer.
    #[error("access at {offset}+{width} is outside a {len}-byte buffer")]
    OutOfBounds {
        /// Byte offset
        offset: usize,
        /// Access width
        width: usize,
        /// Buffer length
        len: usize,
    },

    /// Unsigned value needs more bytes than the field provides.
    #[error("value {value} does not fit in {width} unsigned byte(s)")]
    UnsignedOverflow {
        /// Rejected value
        value: u64,
        /// Field width
        width: usize,
    },

    /// Signed value needs more bytes than the field provides.
    #[error("value {value} does not fit in {width} signed byte(s)")]
    SignedOverflow {
        /// Rejected value
        value: i64,
        /// Field width
        width: usize,
    },

    /// Buffer shorter than the declared reading width.
    #[error("buffer too short: expected {expected} bytes, got {actual}")]
    ShortBuffer {
        /// Declared width
        expected: usize,
        /// Buffer length
        actual: usize,
    },

    /// Buffer longer than the declared reading width.
    #[error("buffer too long: expected {expected} bytes, got {actual}")]
    LongBuffer {
        /// Declared width
        expected: usize,
        /// Buffer length
        actual: usize,
    },

    /// Number of values differs from the number of fields.
    #[error("expected {expected} field values, got {actual}")]
    FieldCountMismatch {
        /// Field count of the layout
        expected: usize,
        /// Values supplied
        actual: usize,
    },

    /// Signed value supplied for an unsigned field or vice versa.
    #[error("field '{field}' received a value of the wrong signedness")]
    SignednessMismatch {
        /// Field name
        field: &'static str,
    },
}

const fn width_is_valid(width: usize) -> bool {
    width >= 1 && width <= MAX_FIELD_WIDTH
}

fn span(len: usize, offset: usize, width: usize) -> Result<Range<usize>, CodecError> {
    let out_of_bounds = CodecError::OutOfBounds { offset, width, len };
    if !width_is_valid(width) {
        return Err(out_of_bounds);
    }
    match offset.checked_add(width) {
        Some(end) if end <= len => Ok(offset..end),
        _ => Err(out_of_bounds),
    }
}

/// Write `value` as a `width`-byte little-endian unsigned integer at `offset`.
///
/// # Errors
/// - `CodecError::OutOfBounds` if the field does not lie within `buf`
/// - `CodecError::UnsignedOverflow` if `value` needs more than `width` bytes
pub fn write_uint(buf: &mut [u8], offset: usize, width: usize, value: u64) -> Result<(), CodecError> {
    let range = span(buf.len(), offset, width)?;
    if width < MAX_FIELD_WIDTH && value >> (8 * width) != 0 {
        return Err(CodecError::UnsignedOverflow { value, width });
    }
    buf[range].copy_from_slice(&value.to_le_bytes()[..width]);
    Ok(())
}

/// Read a `width`-byte little-endian unsigned integer at `offset`.
///
/// # Errors
/// Returns `CodecError::OutOfBounds` if the field does not lie within `buf`.
pub fn read_uint(buf: &[u8], offset: usize, width: usize) -> Result<u64, CodecError> {
    let range = span(buf.len(), offset, width)?;
    let mut bytes = [0u8; MAX_FIELD_WIDTH];
    bytes[..width].copy_from_slice(&buf[range]);
    Ok(u64::from_le_bytes(bytes))
}

/// Write `value` as a `width`-byte two's complement integer at `offset`.
///
/// # Errors
/// - `CodecError::OutOfBounds` if the field does not lie within `buf`
/// - `CodecError::SignedOverflow` if `value` is outside the field's range
pub fn write_int(buf: &mut [u8], offset: usize, width: usize, value: i64) -> Result<(), CodecError> {
    span(buf.len(), offset, width)?;
    if width < MAX_FIELD_WIDTH {
        let bits = 8 * width as u32;
        let min = -(1i64 << (bits - 1));
        let max = (1i64 << (bits - 1)) - 1;
        if value < min || value > max {
            return Err(CodecError::SignedOverflow { value, width });
        }
    }
    let mask = if width == MAX_FIELD_WIDTH {
        u64::MAX
    } else {
        (1u64 << (8 * width)) - 1
    };
    write_uint(buf, offset, width, (value as u64) & mask)
}

/// Read a `width`-byte two's complement integer at `offset`, sign-extended.
///
/// # Errors
/// Returns `CodecError::OutOfBounds` if the field does not lie within `buf`.
pub fn read_int(buf: &[u8], offset: usize, width: usize) -> Result<i64, CodecError> {
    let raw = read_uint(buf, offset, width)?;
    let shift = 64 - 8 * width as u32;
    Ok(((raw << shift) as i64) >> shift)
}

/// Position, width and signedness of one field within a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name, used as the label when decoding.
    pub name: &'static str,
    /// Byte offset within the reading.
    pub offset: usize,
    /// Width in bytes.
    pub width: usize,
    /// Two's complement when true.
    pub signed: bool,
}

impl FieldSpec {
    /// An unsigned field.
    pub const fn unsigned(name: &'static str, offset: usize, width: usize) -> Self {
        Self {
            name,
            offset,
            width,
            signed: false,
        }
    }

    /// A signed field.
    pub const fn signed(name: &'static str, offset: usize, width: usize) -> Self {
        Self {
            name,
            offset,
            width,
            signed: true,
        }
    }
}

/// Raw integer value of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Value of an unsigned field.
    Unsigned(u64),
    /// Value of a signed field.
    Signed(i64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsigned(v) => write!(f, "{v}"),
            Self::Signed(v) => write!(f, "{v}"),
        }
    }
}

/// Byte layout of a module's reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingLayout {
    /// Total width in bytes.
    pub width: usize,
    /// Fields in encoding order.
    pub fields: &'static [FieldSpec],
}

impl ReadingLayout {
    /// Declare a layout. Call [`validate`](Self::validate) before use.
    pub const fn new(width: usize, fields: &'static [FieldSpec]) -> Self {
        Self { width, fields }
    }

    /// Check the layout rules.
    pub const fn validate(&self) -> Result<(), CodecError> {
        if self.width > MAX_READING_WIDTH {
            return Err(CodecError::LayoutTooWide {
                width: self.width,
                max: MAX_READING_WIDTH,
            });
        }
        let mut i = 0;
        while i < self.fields.len() {
            let field = &self.fields[i];
            if !width_is_valid(field.width) {
                return Err(CodecError::InvalidWidth {
                    field: field.name,
                    width: field.width,
                });
            }
            match field.offset.checked_add(field.width) {
                Some(end) if end <= self.width => {}
                _ => {
                    return Err(CodecError::FieldOutOfBounds {
                        field: field.name,
                        offset: field.offset,
                        width: field.width,
                        layout_width: self.width,
                    });
                }
            }
            let mut j = 0;
            while j < i {
                let other = &self.fields[j];
                if field.offset < other.offset + other.width
                    && other.offset < field.offset + field.width
                {
                    return Err(CodecError::FieldOverlap {
                        first: other.name,
                        second: field.name,
                    });
                }
                j += 1;
            }
            i += 1;
        }
        Ok(())
    }

    /// Check that `bytes` has exactly the declared width.
    pub fn check_len(&self, bytes: &[u8]) -> Result<(), CodecError> {
        let (expected, actual) = (self.width, bytes.len());
        if actual < expected {
            Err(CodecError::ShortBuffer { expected, actual })
        } else if actual > expected {
            Err(CodecError::LongBuffer { expected, actual })
        } else {
            Ok(())
        }
    }

    /// Pack one value per field, in field order.
    ///
    /// # Errors
    /// Fails if the value count or signedness does not match the layout, or
    /// a value does not fit its field.
    pub fn encode(&self, values: &[FieldValue]) -> Result<Reading, CodecError> {
        if self.width > MAX_READING_WIDTH {
            return Err(CodecError::LayoutTooWide {
                width: self.width,
                max: MAX_READING_WIDTH,
            });
        }
        if values.len() != self.fields.len() {
            return Err(CodecError::FieldCountMismatch {
                expected: self.fields.len(),
                actual: values.len(),
            });
        }

        let mut buf = [0u8; MAX_READING_WIDTH];
        let bytes = &mut buf[..self.width];
        for (field, value) in self.fields.iter().zip(values) {
            match (field.signed, *value) {
                (false, FieldValue::Unsigned(v)) => write_uint(bytes, field.offset, field.width, v)?,
                (true, FieldValue::Signed(v)) => write_int(bytes, field.offset, field.width, v)?,
                _ => return Err(CodecError::SignednessMismatch { field: field.name }),
            }
        }

        Reading::from_slice(bytes).map_err(|_| CodecError::LayoutTooWide {
            width: self.width,
            max: MAX_READING_WIDTH,
        })
    }

    /// Unpack every field, in field order.
    ///
    /// # Errors
    /// Returns `ShortBuffer`/`LongBuffer` before touching any field if the
    /// buffer length differs from the declared width.
    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<FieldValue>, CodecError> {
        self.check_len(bytes)?;
        self.fields
            .iter()
            .map(|field| {
                if field.signed {
                    read_int(bytes, field.offset, field.width).map(FieldValue::Signed)
                } else {
                    read_uint(bytes, field.offset, field.width).map(FieldValue::Unsigned)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIR: ReadingLayout = ReadingLayout::new(
        3,
        &[FieldSpec::unsigned("a", 0, 2), FieldSpec::signed("b", 2, 1)],
    );

    #[test]
    fn test_uint_little_endian() {
        let mut buf = [0u8; 4];
        write_uint(&mut buf, 1, 2, 0x1234).unwrap();
        assert_eq!(buf, [0x00, 0x34, 0x12, 0x00]);
        assert_eq!(read_uint(&buf, 1, 2).unwrap(), 0x1234);
    }

    #[test]
    fn test_uint_overflow_is_reported() {
        let mut buf = [0u8; 2];
        assert_eq!(
            write_uint(&mut buf, 0, 2, 0x1_0000),
            Err(CodecError::UnsignedOverflow {
                value: 0x1_0000,
                width: 2
            })
        );
        assert_eq!(buf, [0, 0]);
        write_uint(&mut buf, 0, 2, u16::MAX as u64).unwrap();
        assert_eq!(buf, [0xFF, 0xFF]);
    }

    #[test]
    fn test_full_width_fields() {
        let mut buf = [0u8; 8];
        write_uint(&mut buf, 0, 8, u64::MAX).unwrap();
        assert_eq!(read_uint(&buf, 0, 8).unwrap(), u64::MAX);
        write_int(&mut buf, 0, 8, i64::MIN).unwrap();
        assert_eq!(read_int(&buf, 0, 8).unwrap(), i64::MIN);
    }

    #[test]
    fn test_int_sign_extension() {
        let mut buf = [0u8; 2];
        write_int(&mut buf, 0, 2, -2).unwrap();
        assert_eq!(buf, [0xFE, 0xFF]);
        assert_eq!(read_int(&buf, 0, 2).unwrap(), -2);
        assert!(matches!(
            write_int(&mut buf, 0, 1, 128),
            Err(CodecError::SignedOverflow { value: 128, width: 1 })
        ));
        assert!(write_int(&mut buf, 0, 1, -128).is_ok());
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut buf = [0u8; 2];
        assert!(matches!(
            write_uint(&mut buf, 1, 2, 1),
            Err(CodecError::OutOfBounds { .. })
        ));
        assert!(matches!(read_uint(&buf, usize::MAX, 2), Err(CodecError::OutOfBounds { .. })));
        assert!(matches!(read_uint(&buf, 0, 0), Err(CodecError::OutOfBounds { .. })));
    }

    #[test]
    fn test_layout_validation() {
        assert_eq!(PAIR.validate(), Ok(()));

        const OVERLAP: ReadingLayout = ReadingLayout::new(
            4,
            &[FieldSpec::unsigned("x", 0, 2), FieldSpec::unsigned("y", 1, 2)],
        );
        assert_eq!(
            OVERLAP.validate(),
            Err(CodecError::FieldOverlap {
                first: "x",
                second: "y"
            })
        );

        const OUTSIDE: ReadingLayout = ReadingLayout::new(2, &[FieldSpec::unsigned("x", 1, 2)]);
        assert!(matches!(
            OUTSIDE.validate(),
            Err(CodecError::FieldOutOfBounds { field: "x", .. })
        ));

        const WIDE: ReadingLayout = ReadingLayout::new(16, &[FieldSpec::unsigned("x", 0, 9)]);
        assert!(matches!(
            WIDE.validate(),
            Err(CodecError::InvalidWidth { field: "x", width: 9 })
        ));

        const HUGE: ReadingLayout = ReadingLayout::new(MAX_READING_WIDTH + 1, &[]);
        assert!(matches!(HUGE.validate(), Err(CodecError::LayoutTooWide { .. })));
    }

    #[test]
    fn test_layout_encode_decode() {
        let values = [FieldValue::Unsigned(513), FieldValue::Signed(-5)];
        let reading = PAIR.encode(&values).unwrap();
        assert_eq!(reading.as_slice(), &[0x01, 0x02, 0xFB]);
        assert_eq!(PAIR.decode(&reading).unwrap(), values);
    }

    #[test]
    fn test_layout_rejects_mismatched_values() {
        assert!(matches!(
            PAIR.encode(&[FieldValue::Unsigned(1)]),
            Err(CodecError::FieldCountMismatch {
                expected: 2,
                actual: 1
            })
        ));
        assert!(matches!(
            PAIR.encode(&[FieldValue::Signed(1), FieldValue::Signed(1)]),
            Err(CodecError::SignednessMismatch { field: "a" })
        ));
    }

    #[test]
    fn test_layout_rejects_wrong_length() {
        assert_eq!(
            PAIR.decode(&[1, 2]),
            Err(CodecError::ShortBuffer {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            PAIR.decode(&[1, 2, 3, 4]),
            Err(CodecError::LongBuffer {
                expected: 3,
                actual: 4
            })
        );
    }
}
