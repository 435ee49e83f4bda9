//! Field codec property tests.
//!
//! Every value that fits a field's declared width survives a write/read
//! cycle unchanged; every value that does not fit is rejected without
//! touching the buffer.

use mysense_common::module::codec::{
    CodecError, FieldSpec, FieldValue, ReadingLayout, read_int, read_uint, write_int, write_uint,
};
use proptest::prelude::*;

fn unsigned_max(width: usize) -> u64 {
    if width == 8 {
        u64::MAX
    } else {
        (1u64 << (8 * width)) - 1
    }
}

fn signed_bounds(width: usize) -> (i64, i64) {
    if width == 8 {
        (i64::MIN, i64::MAX)
    } else {
        let half = 1i64 << (8 * width - 1);
        (-half, half - 1)
    }
}

proptest! {
    #[test]
    fn uint_fitting_values_are_exact(width in 1usize..=8, raw in any::<u64>(), offset in 0usize..4) {
        let value = raw & unsigned_max(width);
        let mut buf = [0u8; 12];
        write_uint(&mut buf, offset, width, value).unwrap();
        prop_assert_eq!(read_uint(&buf, offset, width).unwrap(), value);
    }

    #[test]
    fn uint_overflow_never_truncates(width in 1usize..=7, raw in any::<u64>()) {
        let value = raw | (1u64 << (8 * width));
        let mut buf = [0xAAu8; 8];
        let result = write_uint(&mut buf, 0, width, value);
        prop_assert_eq!(result, Err(CodecError::UnsignedOverflow { value, width }));
        prop_assert_eq!(buf, [0xAAu8; 8]);
    }

    #[test]
    fn int_fitting_values_are_exact(width in 1usize..=8, raw in any::<i64>()) {
        let (min, max) = signed_bounds(width);
        let value = raw.clamp(min, max);
        let mut buf = [0u8; 8];
        write_int(&mut buf, 0, width, value).unwrap();
        prop_assert_eq!(read_int(&buf, 0, width).unwrap(), value);
    }
}

#[test]
fn layout_short_buffer_never_reads_past_end() {
    const LAYOUT: ReadingLayout = ReadingLayout::new(
        4,
        &[FieldSpec::unsigned("low", 0, 2), FieldSpec::unsigned("high", 2, 2)],
    );

    for len in 0..LAYOUT.width {
        let bytes = vec![0xFFu8; len];
        assert_eq!(
            LAYOUT.decode(&bytes),
            Err(CodecError::ShortBuffer {
                expected: 4,
                actual: len
            })
        );
    }

    let reading = LAYOUT
        .encode(&[FieldValue::Unsigned(1), FieldValue::Unsigned(0xFFFF)])
        .unwrap();
    assert_eq!(reading.as_slice(), &[1, 0, 0xFF, 0xFF]);
}
