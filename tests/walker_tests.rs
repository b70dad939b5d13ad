use endian_serde::{
    BigEndian, Codec, Complex32, Complex64, Error, LittleEndian, Padding, from_bytes_partial,
};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::io::{self, Read, Write};
use std::num::NonZeroU32;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Record {
    a: i8,
    _pad: Padding<[u8; 3]>,
    b: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
struct Point {
    x: i16,
    y: i16,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct Sample {
    id: u64,
    origin: Point,
    path: [Point; 3],
    weights: [f32; 2],
    gain: Complex32,
    phase: Complex64,
    valid: bool,
    flags: [bool; 4],
    _reserved: Padding<u16>,
    tail: u8,
}

fn sample() -> Sample {
    Sample {
        id: 0x0102_0304_0506_0708,
        origin: Point { x: -1, y: 2 },
        path: [Point { x: 3, y: 4 }, Point { x: -5, y: 6 }, Point { x: 7, y: -8 }],
        weights: [0.25, -1.5],
        gain: Complex32::new(1.0, -1.0),
        phase: Complex64::new(std::f64::consts::PI, std::f64::consts::E),
        valid: true,
        flags: [true, false, false, true],
        _reserved: Padding::new(),
        tail: 0xEE,
    }
}

const SAMPLE_WIDTH: usize = 8 + 4 + 12 + 8 + 8 + 16 + 1 + 4 + 2 + 1;

#[test]
fn test_padded_record_little() {
    let rec = Record { a: -1, _pad: Padding::new(), b: 1 };
    let bytes = LittleEndian::to_bytes(&rec).unwrap();
    assert_eq!(bytes, [0xFF, 0, 0, 0, 1, 0, 0, 0]);
    let decoded: Record = LittleEndian::from_bytes(&bytes).unwrap();
    assert_eq!(decoded.a, -1);
    assert_eq!(decoded.b, 1);
}

#[test]
fn test_padded_record_big() {
    let rec = Record { a: -1, _pad: Padding::new(), b: 1 };
    let bytes = BigEndian::to_bytes(&rec).unwrap();
    assert_eq!(bytes.len(), 8);
    assert_eq!(&bytes[1..4], [0, 0, 0]);
    assert_eq!(bytes, [0xFF, 0, 0, 0, 0, 0, 0, 1]);
    assert_eq!(rec, BigEndian::from_bytes(&bytes).unwrap());
}

#[test]
fn test_padding_bytes_skipped_on_decode() {
    // Garbage in the reserved range never reaches the value.
    let bytes = [0x7F, 0xDE, 0xAD, 0xBE, 0, 0, 0, 9];
    let decoded: Record = BigEndian::from_bytes(&bytes).unwrap();
    assert_eq!(decoded, Record { a: 0x7F, _pad: Padding::new(), b: 9 });
    // Re-encoding zero-fills it again.
    assert_eq!(BigEndian::to_bytes(&decoded).unwrap(), [0x7F, 0, 0, 0, 0, 0, 0, 9]);
}

#[test]
fn test_nested_roundtrip_both_orders() {
    let s = sample();
    let le = LittleEndian::to_bytes(&s).unwrap();
    let be = BigEndian::to_bytes(&s).unwrap();
    assert_eq!(le.len(), SAMPLE_WIDTH);
    assert_eq!(be.len(), SAMPLE_WIDTH);
    assert_eq!(&le[..8], [8, 7, 6, 5, 4, 3, 2, 1]);
    assert_eq!(&be[..8], [1, 2, 3, 4, 5, 6, 7, 8]);
    assert_ne!(le, be);
    assert_eq!(s, LittleEndian::from_bytes::<Sample>(&le).unwrap());
    assert_eq!(s, BigEndian::from_bytes::<Sample>(&be).unwrap());
}

#[test]
fn test_nested_field_order_on_wire() {
    let bytes = BigEndian::to_bytes(&sample()).unwrap();
    // origin
    assert_eq!(&bytes[8..12], [0xFF, 0xFF, 0, 2]);
    // path[0]
    assert_eq!(&bytes[12..16], [0, 3, 0, 4]);
    // weights[0] = 0.25
    assert_eq!(&bytes[24..28], 0.25f32.to_be_bytes());
    // gain = (1.0, -1.0)
    assert_eq!(&bytes[32..40], [0x3F, 0x80, 0, 0, 0xBF, 0x80, 0, 0]);
    // valid, flags, reserved, tail
    assert_eq!(&bytes[56..], [1, 1, 0, 0, 1, 0, 0, 0xEE]);
}

#[test]
fn test_walker_matches_fast_path_for_scalars() {
    let mut fast = Vec::new();
    LittleEndian::write(&mut fast, &[1u32, 2, 3][..]).unwrap();
    let walked = LittleEndian::to_bytes(&[1u32, 2, 3]).unwrap();
    assert_eq!(fast, walked);
    assert_eq!(LittleEndian::to_bytes(&0x1234u16).unwrap(), [0x34, 0x12]);
}

#[test]
fn test_stream_roundtrip_single_write() {
    #[derive(Default)]
    struct CountingWriter {
        calls: usize,
        data: Vec<u8>,
    }
    impl Write for CountingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.calls += 1;
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let mut sink = CountingWriter::default();
    BigEndian::write_value(&mut sink, &sample()).unwrap();
    assert_eq!(sink.calls, 1);
    assert_eq!(sink.data.len(), SAMPLE_WIDTH);

    let decoded: Sample = BigEndian::read_value(&sink.data[..]).unwrap();
    assert_eq!(decoded, sample());
}

#[test]
fn test_read_value_into_overwrites() {
    let bytes = LittleEndian::to_bytes(&Point { x: 10, y: -10 }).unwrap();
    let mut p = Point { x: 1, y: 1 };
    LittleEndian::read_value_into(&bytes[..], &mut p).unwrap();
    assert_eq!(p, Point { x: 10, y: -10 });
}

#[test]
fn test_slice_of_structs() {
    let points = vec![Point { x: 1, y: 2 }, Point { x: 3, y: 4 }, Point { x: -5, y: -6 }];
    let mut buf = Vec::new();
    BigEndian::write_value(&mut buf, points.as_slice()).unwrap();
    assert_eq!(buf, [0, 1, 0, 2, 0, 3, 0, 4, 0xFF, 0xFB, 0xFF, 0xFA]);

    let mut back = [Point::default(); 3];
    BigEndian::read_values_into(&buf[..], &mut back).unwrap();
    assert_eq!(back.as_slice(), points.as_slice());
}

#[test]
fn test_slice_of_structs_is_one_read() {
    struct CountingReader<'a> {
        calls: usize,
        inner: &'a [u8],
    }
    impl Read for CountingReader<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.calls += 1;
            self.inner.read(buf)
        }
    }

    let buf = LittleEndian::to_bytes(&[Point { x: 1, y: 1 }; 4]).unwrap();
    let mut reader = CountingReader { calls: 0, inner: &buf };
    let mut back = [Point::default(); 4];
    LittleEndian::read_values_into(&mut reader, &mut back).unwrap();
    assert_eq!(reader.calls, 1);
    assert_eq!(back, [Point { x: 1, y: 1 }; 4]);
}

#[test]
fn test_zero_sized_members() {
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Marker {
        before: u8,
        unit: (),
        empty: [u32; 0],
        after: u8,
    }
    let m = Marker { before: 1, unit: (), empty: [], after: 2 };
    let bytes = LittleEndian::to_bytes(&m).unwrap();
    assert_eq!(bytes, [1, 2]);
    assert_eq!(m, LittleEndian::from_bytes(&bytes).unwrap());
}

#[test]
fn test_tuple_and_newtype() {
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Meters(u32);

    let v = (Meters(5), -1i16, true);
    let bytes = BigEndian::to_bytes(&v).unwrap();
    assert_eq!(bytes, [0, 0, 0, 5, 0xFF, 0xFF, 1]);
    let back: (Meters, i16, bool) = BigEndian::from_bytes(&bytes).unwrap();
    assert_eq!(back, v);
}

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct WithVec {
    len: u32,
    body: Vec<u8>,
}

/// Panics if it is ever touched.
struct Untouchable;

impl Read for Untouchable {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        panic!("stream read before the type was validated");
    }
}

impl Write for Untouchable {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        panic!("stream written before the value was validated");
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_undecidable_write_touches_nothing() {
    let v = WithVec { len: 1, body: vec![1] };
    let err = LittleEndian::write_value(Untouchable, &v).unwrap_err();
    assert!(matches!(err, Error::Undecidable { member: "a sequence", .. }));
}

#[test]
fn test_undecidable_read_touches_nothing() {
    let err = BigEndian::read_value::<_, WithVec>(Untouchable).unwrap_err();
    match err {
        Error::Undecidable { type_name, member } => {
            assert!(type_name.ends_with("WithVec"));
            assert_eq!(member, "a sequence");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_undecidable_members() {
    #[derive(Serialize, Deserialize)]
    struct Named {
        name: String,
    }
    #[derive(Debug, Serialize, Deserialize)]
    struct Maybe {
        v: Option<u32>,
    }
    #[derive(Serialize, Deserialize)]
    enum Kind {
        A,
    }

    let err = LittleEndian::to_bytes(&Named { name: "x".into() }).unwrap_err();
    assert!(matches!(err, Error::Undecidable { member: "a string", .. }));
    let err = LittleEndian::to_bytes(&Maybe { v: Some(1) }).unwrap_err();
    assert!(matches!(err, Error::Undecidable { member: "an option", .. }));
    let err = LittleEndian::to_bytes(&Kind::A).unwrap_err();
    assert!(matches!(err, Error::Undecidable { member: "an enum", .. }));
    let err = LittleEndian::from_bytes::<Maybe>(&[0; 8]).unwrap_err();
    assert!(matches!(err, Error::Undecidable { member: "an option", .. }));
    let err = LittleEndian::to_bytes(&'x').unwrap_err();
    assert!(matches!(err, Error::Undecidable { member: "a char", .. }));
    let err = LittleEndian::to_bytes(&1u128).unwrap_err();
    assert!(matches!(err, Error::Undecidable { member: "a 128-bit integer", .. }));
    let err = LittleEndian::from_bytes::<i128>(&[0; 16]).unwrap_err();
    assert!(matches!(err, Error::Undecidable { member: "a 128-bit integer", .. }));
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Tagged {
    id: NonZeroU32,
    tag: u8,
}

#[test]
fn test_nonzero_member_roundtrip_both_orders() {
    let v = Tagged {
        id: NonZeroU32::new(7).unwrap(),
        tag: 1,
    };

    let le = LittleEndian::to_bytes(&v).unwrap();
    assert_eq!(le, [7, 0, 0, 0, 1]);
    assert_eq!(LittleEndian::from_bytes::<Tagged>(&le).unwrap(), v);

    let be = BigEndian::to_bytes(&v).unwrap();
    assert_eq!(be, [0, 0, 0, 7, 1]);
    assert_eq!(BigEndian::from_bytes::<Tagged>(&be).unwrap(), v);

    let mut buf = Vec::new();
    BigEndian::write_value(&mut buf, &v).unwrap();
    assert_eq!(BigEndian::read_value::<_, Tagged>(&buf[..]).unwrap(), v);
    assert_eq!(LittleEndian::size_of_value(&v), Some(buf.len()));
}

#[test]
fn test_zero_on_the_wire_still_rejected_by_the_type() {
    let err = LittleEndian::from_bytes::<Tagged>(&[0, 0, 0, 0, 1]).unwrap_err();
    assert!(matches!(err, Error::Message(_)));
}

/// A `u16` whose `Deserialize` impl refuses every value.
#[derive(Debug)]
struct Refuses;

impl<'d> Deserialize<'d> for Refuses {
    fn deserialize<D: Deserializer<'d>>(deserializer: D) -> Result<Self, D::Error> {
        let v = u16::deserialize(deserializer)?;
        Err(de::Error::custom(format!("refused {v}")))
    }
}

#[test]
fn test_refusing_type_reports_its_reason() {
    let err = LittleEndian::read_value::<_, Refuses>(Untouchable).unwrap_err();
    match err {
        Error::Unmeasurable { type_name, reason } => {
            assert!(type_name.ends_with("Refuses"));
            assert_eq!(reason, "refused 1");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PadsUnsized {
    a: u8,
    _p: Padding<Vec<u8>>,
}

#[test]
fn test_padding_over_undecidable_type_write() {
    let v = PadsUnsized {
        a: 1,
        _p: Padding::new(),
    };
    let err = LittleEndian::write_value(Untouchable, &v).unwrap_err();
    match err {
        Error::Undecidable { type_name, member } => {
            assert!(type_name.ends_with("PadsUnsized"));
            assert_eq!(member, "a sequence");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(LittleEndian::size_of_value(&v), None);
}

#[test]
fn test_padding_over_undecidable_type_read() {
    let err = BigEndian::read_value::<_, PadsUnsized>(Untouchable).unwrap_err();
    assert!(matches!(err, Error::Undecidable { member: "a sequence", .. }));
    let err = BigEndian::from_bytes::<PadsUnsized>(&[0; 16]).unwrap_err();
    assert!(matches!(err, Error::Undecidable { member: "a sequence", .. }));
}

#[test]
fn test_slice_width_overflow_is_an_error() {
    // Zero-sized in memory, 256 bytes each on the wire.
    let mut dst = [Padding::<[u64; 32]>::new(); usize::MAX / 64];
    let err = LittleEndian::read_values_into(Untouchable, &mut dst[..]).unwrap_err();
    assert!(matches!(err, Error::SizeOverflow));
}

#[test]
fn test_nested_sequence_rejected() {
    let rows = vec![vec![1u8, 2], vec![3]];
    let err = BigEndian::to_bytes(&rows).unwrap_err();
    assert!(matches!(err, Error::Undecidable { member: "a sequence", .. }));
}

#[test]
fn test_short_input_buffer() {
    let err = LittleEndian::from_bytes::<Record>(&[0xFF, 0, 0, 0, 1, 0, 0]).unwrap_err();
    assert!(matches!(err, Error::UnexpectedEof));
    assert!(err.is_unexpected_eof());
}

#[test]
fn test_short_stream() {
    let bytes = BigEndian::to_bytes(&sample()).unwrap();
    let err = BigEndian::read_value::<_, Sample>(&bytes[..bytes.len() - 1]).unwrap_err();
    assert!(err.is_unexpected_eof());
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_partial_decode_returns_tail() {
    let mut buf = LittleEndian::to_bytes(&Point { x: 1, y: 2 }).unwrap();
    buf.extend(LittleEndian::to_bytes(&Point { x: 3, y: 4 }).unwrap());
    buf.extend([0xAB, 0xCD]);
    let (first, rest) = from_bytes_partial::<LittleEndian, Point>(&buf).unwrap();
    assert_eq!(first, Point { x: 1, y: 2 });
    let (second, rest) = from_bytes_partial::<LittleEndian, Point>(rest).unwrap();
    assert_eq!(second, Point { x: 3, y: 4 });
    assert_eq!(rest, [0xAB, 0xCD]);
}

#[test]
fn test_wrong_order_is_silent() {
    let bytes = BigEndian::to_bytes(&Point { x: 1, y: 2 }).unwrap();
    let swapped: Point = LittleEndian::from_bytes(&bytes).unwrap();
    assert_eq!(swapped, Point { x: 0x0100, y: 0x0200 });
}
