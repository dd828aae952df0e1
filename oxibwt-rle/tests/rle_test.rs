//! Run-length codec stream tests.

use oxibwt_core::{ByteSink, ByteSource, ErrorKind, StreamTransform};
use oxibwt_rle::{RleConfig, RunLengthCodec, compress, decompress};
use proptest::prelude::*;
use std::io::{self, Cursor, Write};

/// Writer that accepts a fixed number of write calls, then fails.
struct FailAfterWrites {
    remaining: usize,
    data: Vec<u8>,
}

impl FailAfterWrites {
    fn new(remaining: usize) -> Self {
        Self {
            remaining,
            data: Vec::new(),
        }
    }
}

impl Write for FailAfterWrites {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::other("sink closed"));
        }
        self.remaining -= 1;
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_default_config_roundtrip() {
    let data = b"aaaaaaaaaabbbcdddddddddddddddddddde";
    let packed = compress(data, RleConfig::default()).unwrap();
    assert!(packed.len() < data.len());
    assert_eq!(decompress(&packed, RleConfig::default()).unwrap(), data);
}

#[test]
fn test_mismatched_config_is_not_lossless() {
    let data = b"xxxxxxxx";
    let packed = compress(data, RleConfig::new(2, 1).unwrap()).unwrap();
    let unpacked = decompress(&packed, RleConfig::new(4, 1).unwrap());
    assert_ne!(unpacked.ok().as_deref(), Some(&data[..]));
}

#[test]
fn test_no_runs_is_identity() {
    let data: Vec<u8> = (0..=255u8).collect();
    let packed = compress(&data, RleConfig::default()).unwrap();
    assert_eq!(packed, data);
}

#[test]
fn test_escape_eof_keeps_prefix() {
    let mut input = ByteSource::new(Cursor::new(b"qq".to_vec()));
    let mut output = ByteSink::new(Vec::new());
    let err = RunLengthCodec::new(RleConfig::new(2, 3).unwrap())
        .decompress(&mut input, &mut output)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedStream);
    assert_eq!(output.into_inner(), b"qq");
}

#[test]
fn test_long_run_with_eight_byte_field() {
    let data = vec![7u8; 100_000];
    let config = RleConfig::new(5, 8).unwrap();
    let packed = compress(&data, config).unwrap();
    assert_eq!(packed.len(), 5 + 8);
    assert_eq!(&packed[5..], &99_995u64.to_le_bytes());
    assert_eq!(decompress(&packed, config).unwrap(), data);
}

#[test]
fn test_compress_sink_failure_keeps_counters() {
    // Writes: "xxxx", count byte 2, then "y" fails
    let mut codec = RunLengthCodec::new(RleConfig::default());
    let mut input = ByteSource::new(Cursor::new(b"xxxxxxyz".to_vec()));
    let mut output = ByteSink::new(FailAfterWrites::new(2));
    let err = codec.forward(&mut input, &mut output).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IoFailure);
    assert_eq!(input.bytes_read(), 8);
    assert_eq!(output.bytes_written(), 5);
    assert_eq!(output.get_mut().data, b"xxxx\x02");
}

#[test]
fn test_decompress_sink_failure_keeps_counters() {
    // Writes: four literal 'a', five repeated 'a', then 'b' fails
    let mut codec = RunLengthCodec::new(RleConfig::default());
    let mut input = ByteSource::new(Cursor::new(b"aaaa\x05b".to_vec()));
    let mut output = ByteSink::new(FailAfterWrites::new(5));
    let err = codec.inverse(&mut input, &mut output).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IoFailure);
    assert_eq!(input.bytes_read(), 6);
    assert_eq!(output.bytes_written(), 9);
    assert_eq!(input.get_ref().position(), 6);
}

#[test]
fn test_codec_keeps_config() {
    let config = RleConfig::new(3, 2).unwrap();
    assert_eq!(RunLengthCodec::new(config).config(), config);
    assert_eq!(RunLengthCodec::default().config(), RleConfig::default());
}

fn runs() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec((0u8..4, 1usize..600), 0..40).prop_map(|runs| {
        runs.into_iter()
            .flat_map(|(byte, len)| std::iter::repeat_n(byte, len))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_roundtrip_runs(data in runs(), min_run in 1usize..8, width in 1usize..=3) {
        let mut codec = RunLengthCodec::new(RleConfig::new(min_run, width).unwrap());
        let packed = codec.forward_to_vec(&data).unwrap();
        prop_assert_eq!(codec.inverse_to_vec(&packed).unwrap(), data);
    }

    #[test]
    fn prop_roundtrip_arbitrary(data in prop::collection::vec(any::<u8>(), 0..2000), min_run in 1usize..5) {
        let config = RleConfig::new(min_run, 1).unwrap();
        let packed = compress(&data, config).unwrap();
        prop_assert_eq!(decompress(&packed, config).unwrap(), data);
    }
}
