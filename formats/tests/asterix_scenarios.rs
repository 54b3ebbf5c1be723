//! End-to-end scenarios driven through the public `split_blocks`/`decode_block` pipeline,
//! rather than calling a category's item handlers directly. Byte sequences are hand-derived
//! from each category's own FRN layout and wire-format formulas, not copied from elsewhere.

use std::path::PathBuf;

use fetiche_formats::{
    decode_block, split_blocks, DebugSink, DecoderConfig, DecoderState, EnvelopeFormat,
    SurveillanceObject,
};

fn frame() -> fetiche_formats::Frame {
    fetiche_formats::Frame { offset: 0, line: None, date: None, time_of_day: None, payload: Vec::new() }
}

fn config() -> DecoderConfig {
    let mut cfg = DecoderConfig::new(PathBuf::from("test.asx"), EnvelopeFormat::Netto);
    cfg.set_reference_version(21, "2.4").unwrap();
    cfg.set_reference_version(10, "1.1").unwrap();
    cfg
}

/// CAT021 ed. 2.4 WGS-84: FRN6 (I021/130, std precision) near the +90deg boundary, then the
/// same record with FRN7 (I021/131, high precision) overriding it to high precision.
#[test]
fn scenario_cat021_wgs84_standard_precision() {
    let cfg = config();
    let mut state = DecoderState::new();
    let mut sink = DebugSink::default();

    // FSPEC: bit for FRN6 only (I021/130). Octet = 0b0000_0100, FX clear.
    let mut payload = vec![0b0000_0100u8];
    payload.extend_from_slice(&[0x7F, 0xFF, 0xFF, 0x00, 0x00, 0x00]);

    decode_block(21, &payload, &frame(), &cfg, &mut state, &mut sink).unwrap();
    assert_eq!(sink.objects.len(), 1);
    let SurveillanceObject::Adsb(adsb) = &sink.objects[0] else { panic!("wrong variant") };
    let pos = adsb.wgs84_position.unwrap();
    assert!(!pos.high_precision);
    assert!((pos.lat_rad.to_degrees() - 90.0).abs() < 0.01);
    assert!(pos.lon_rad.to_degrees().abs() < 0.01);
}

#[test]
fn scenario_cat021_wgs84_high_precision_overrides_standard() {
    let cfg = config();
    let mut state = DecoderState::new();
    let mut sink = DebugSink::default();

    // FSPEC: bits for FRN6 and FRN7 (I021/130 then I021/131). Octet = 0b0000_0110, FX clear.
    let mut payload = vec![0b0000_0110u8];
    payload.extend_from_slice(&[0x7F, 0xFF, 0xFF, 0x00, 0x00, 0x00]); // I021/130
    payload.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]); // I021/131

    decode_block(21, &payload, &frame(), &cfg, &mut state, &mut sink).unwrap();
    let SurveillanceObject::Adsb(adsb) = &sink.objects[0] else { panic!("wrong variant") };
    let pos = adsb.wgs84_position.unwrap();
    assert!(pos.high_precision);
    assert_eq!(pos.lat_rad, 0.0);
    assert_eq!(pos.lon_rad, 0.0);
}

/// CAT010 I010/041: payload `20 00 00 00 40 00 00 00` decodes to lat = pi/4, lon = pi/2.
#[test]
fn scenario_cat010_wgs84_position() {
    let cfg = config();
    let mut state = DecoderState::new();
    let mut sink = DebugSink::default();

    // FSPEC: bit for FRN5 only (I010/041). Octet = 0b0000_1000, FX clear.
    let mut payload = vec![0b0000_1000u8];
    payload.extend_from_slice(&[0x20, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00]);

    decode_block(10, &payload, &frame(), &cfg, &mut state, &mut sink).unwrap();
    assert_eq!(sink.objects.len(), 1);
    let SurveillanceObject::Mlat(mlat) = &sink.objects[0] else { panic!("wrong variant") };
    let pos = mlat.wgs84_position.unwrap();
    assert!((pos.lat_rad - std::f64::consts::FRAC_PI_4).abs() < 1e-9);
    assert!((pos.lon_rad - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
}

/// A data frame carrying two concatenated blocks (CAT003 empty record, CAT021 one record)
/// decodes both in order; the empty CAT003 record contributes nothing to the sink.
#[test]
fn scenario_mixed_frame_splits_and_decodes_both_blocks() {
    let cfg = config();
    let mut state = DecoderState::new();
    let mut sink = DebugSink::default();

    let mut raw = vec![3u8, 0x00, 0x04, 0x00]; // CAT003, empty record
    let cat021_payload = vec![0x80u8, 0x12, 0x34]; // FRN1 only (I021/010)
    raw.push(21);
    raw.extend_from_slice(&((3 + cat021_payload.len()) as u16).to_be_bytes());
    raw.extend_from_slice(&cat021_payload);

    for block in split_blocks(&raw) {
        let block = block.unwrap();
        decode_block(block.category, block.payload, &frame(), &cfg, &mut state, &mut sink).unwrap();
    }

    assert_eq!(sink.objects.len(), 1);
    assert!(matches!(sink.objects[0], SurveillanceObject::Adsb(_)));
}

/// Bounds safety: a payload that claims an FSPEC bit but is truncated before the item's bytes
/// yields a typed error, not a panic.
#[test]
fn scenario_truncated_item_is_a_typed_error_not_a_panic() {
    let cfg = config();
    let mut state = DecoderState::new();
    let mut sink = DebugSink::default();

    // FRN1 (I021/010, SAC/SIC, 2 bytes) declared but only one byte follows.
    let payload = vec![0x80u8, 0x12];
    let err = decode_block(21, &payload, &frame(), &cfg, &mut state, &mut sink).unwrap_err();
    assert!(matches!(err, fetiche_formats::DecodeError::TruncatedItem { .. }));
}
