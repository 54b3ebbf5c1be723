//! CAT221 — ADS-B reports, general aviation profile (§4.5).
//!
//! Grounded on `astx_221.cpp`, a separate, self-contained source file with its own
//! `proc_i221_*` handlers and a single UAP table — unlike CAT021 it carries no
//! `reference_vsn` branching at all, so there is exactly one [`build_uap`] here. Several
//! items share an FRN/item number with CAT021 but use a different wire format entirely
//! (no "re" range-exceeded bit, no masking, full 16-bit values); each handler below is
//! transcribed from its own `proc_i221_XXX` body rather than assumed identical to CAT021's.

use crate::asterix::bits::{make_i16, make_u16, make_u32};
use crate::asterix::envelope::Frame;
use crate::asterix::error::{DecodeError, DecodeOutcome, DecodeResult};
use crate::asterix::item::{ItemDescriptor, ItemKind};
use crate::asterix::model::{
    Adsb, DataFormat, DataSourceId, DetectionType, GroundVector, SurveillanceObject, TriBool,
    VerticalRate, Wgs84Position,
};
use crate::asterix::sink::Sink;
use crate::asterix::state::DecoderState;
use crate::asterix::walker::{walk_records, Uap};

const CATEGORY: u8 = 221;
const FT_TO_M: f64 = 0.3048;
const KT_TO_MPS: f64 = 1_852.0 / 3_600.0;
const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;
const TWO_POW_23: f64 = 8_388_608.0;

fn proc_010(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    ctx.common.data_source_identifier = Some(DataSourceId { sac: slice[0], sic: slice[1] });
    Ok(())
}

fn proc_020(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    ctx.emitter_category = Some(slice[0]);
    Ok(())
}

fn proc_030(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let tod = make_u32(0, slice[0], slice[1], slice[2]);
    ctx.detection_time = Some(tod as f64 / 128.0);
    Ok(())
}

fn proc_032(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    // Time of day accuracy; consumed for length only, no model slot.
    let _ = slice[0];
    Ok(())
}

/// Target Report Descriptor. Unlike I021/040, this maps cleanly onto the shared
/// `DetectionType` (dcr/gbs/sim/tst/rab/saa/spi on df1); `atp`/`arc` on df2 (target address
/// type / altitude reporting capability) have no `DetectionType` counterpart.
fn proc_040(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let df1 = slice[0];
    ctx.target_report_descriptor = Some(DetectionType {
        is_track: false,
        simulated: TriBool::from_bit(df1 & 0x20 != 0),
        test_target: TriBool::from_bit(df1 & 0x10 != 0),
        from_fixed_field_transponder: TriBool::from_bit(df1 & 0x08 != 0),
        spi: TriBool::from_bit(df1 & 0x02 != 0),
    });
    Ok(())
}

fn proc_080(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    ctx.aircraft_address = Some(make_u32(0, slice[0], slice[1], slice[2]));
    Ok(())
}

/// Figure of Merit. The original only stores `pa` when it's greater than zero.
fn proc_090(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let pa = slice[0] & 0x0f;
    if pa > 0 {
        ctx.quality_indicators = Some(crate::asterix::model::QualityIndicators {
            nucr_or_nacv: 0,
            nucp_or_nic: pa,
            ..Default::default()
        });
    }
    Ok(())
}

/// Velocity Accuracy. The original only stores `va` when it's greater than zero.
fn proc_095(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let va = slice[0];
    if va > 0 {
        ctx.mops_version = Some(va);
    }
    Ok(())
}

fn proc_110(slice: &[u8], consumed: &mut usize, _ctx: &mut Adsb) -> DecodeResult<()> {
    if slice.is_empty() {
        return Err(DecodeError::TruncatedItem { need: 1, have: 0 });
    }
    let rep = slice[0] as usize;
    let total = 1 + rep * 1;
    if slice.len() < total {
        return Err(DecodeError::TruncatedItem { need: total, have: slice.len() });
    }
    *consumed = total;
    Ok(())
}

/// WGS-84 position, stored unconditionally (unlike CAT021/130-131, which gate on
/// `abs(lat) <= 90 && abs(lon) <= 180`).
fn proc_130(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let lat_raw = make_u32(0, slice[0], slice[1], slice[2]);
    let lat_raw = crate::asterix::bits::sign_extend(lat_raw, 24);
    let lon_raw = make_u32(0, slice[3], slice[4], slice[5]);
    let lon_raw = crate::asterix::bits::sign_extend(lon_raw, 24);
    let lat = (180.0 / TWO_POW_23) * lat_raw as f64;
    let lon = (180.0 / TWO_POW_23) * lon_raw as f64;
    ctx.wgs84_position = Some(Wgs84Position {
        lat_rad: lat * DEG_TO_RAD,
        lon_rad: lon * DEG_TO_RAD,
        high_precision: false,
    });
    Ok(())
}

fn proc_140(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let h = make_u16(slice[0], slice[1]) as i16;
    ctx.geometric_height_m = Some(25.0 * FT_TO_M * h as f64);
    Ok(())
}

/// Flight Level. The original stores this into its Mode-C-height struct; kept here as the
/// shared barometric flight level field for consistency with CAT021.
fn proc_145(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let fl = make_i16(slice[0], slice[1]);
    ctx.barometric_flight_level_m = Some(25.0 * FT_TO_M * fl as f64);
    Ok(())
}

fn parse_selected_altitude(slice: &[u8]) -> crate::asterix::model::SelectedAltitude {
    let raw = make_u16(slice[0], slice[1]);
    let value = (raw & 0x1fff) as i32;
    crate::asterix::model::SelectedAltitude {
        value_m: 25.0 * FT_TO_M * value as f64,
        value_ft: 25 * value,
        flags: (raw >> 13) as u8 & 0x07,
    }
}

fn proc_146(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    ctx.selected_altitude = Some(parse_selected_altitude(slice));
    Ok(())
}

fn proc_148(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    ctx.final_selected_altitude = Some(parse_selected_altitude(slice));
    Ok(())
}

/// Air Speed. Unstored ("tba") in the original but cheap to supplement since the field is
/// already reserved.
fn proc_150(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let raw = make_u16(slice[0], slice[1]);
    let im = (raw >> 15) & 0x01;
    let spd = raw & 0x7fff;
    ctx.air_speed = Some(if im == 0 {
        crate::asterix::model::AirSpeed::Ias((3_600.0 / 16_384.0) * spd as f64 * KT_TO_MPS)
    } else {
        crate::asterix::model::AirSpeed::Mach(0.001 * spd as f64)
    });
    Ok(())
}

/// True Airspeed. No "re" bit, no masking: the original reads both bytes as a plain unsigned
/// 16-bit value (unlike CAT021/151, which masks df1 to 7 bits and uses the top bit as a
/// range-exceeded flag).
fn proc_151(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let spd = make_u16(slice[0], slice[1]);
    ctx.true_airspeed = Some(crate::asterix::model::TrueAirspeed {
        value_mps: spd as f64 * KT_TO_MPS,
        range_exceeded: TriBool::Undefined,
    });
    Ok(())
}

fn proc_152(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let hdg = make_u16(slice[0], slice[1]);
    ctx.magnetic_heading_rad = Some((360.0 / 65_536.0) * hdg as f64 * DEG_TO_RAD);
    Ok(())
}

/// Barometric Vertical Rate. No "re" bit, no masking: plain 16-bit signed value, stored
/// unconditionally (unlike CAT021/155's masked-df1 approach with a range-exceeded flag).
fn proc_155(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let rate = make_i16(slice[0], slice[1]);
    ctx.barometric_vertical_rate = Some(VerticalRate {
        value: (6.25 * FT_TO_M / 60.0) * rate as f64,
        range_exceeded: TriBool::Undefined,
    });
    Ok(())
}

/// Geometric Vertical Rate. Same plain 16-bit-signed shape as 155, stored unconditionally.
fn proc_157(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let rate = make_i16(slice[0], slice[1]);
    ctx.geometric_vertical_rate = Some(VerticalRate {
        value: (6.25 * FT_TO_M / 60.0) * rate as f64,
        range_exceeded: TriBool::Undefined,
    });
    Ok(())
}

/// Ground Vector. No "re" bit on speed: `spd` spans both bytes unmasked (unlike
/// CAT021/160's `df1 & 0x7f`); stored unconditionally.
fn proc_160(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let spd = make_i16(slice[0], slice[1]);
    let ta = make_u16(slice[2], slice[3]);
    ctx.ground_vector = Some(GroundVector {
        value_gsp: (KT_TO_MPS / 4.0) * spd as f64,
        value_hdg: (360.0 / 65_536.0) * ta as f64 * DEG_TO_RAD,
        range_exceeded: TriBool::Undefined,
    });
    Ok(())
}

/// Rate of Turn: an FX-style 1-or-2-byte item. Octet 1's low bit signals a second octet is
/// present; when it is, bits 1..6 of octet 2 carry a 6-bit signed rate, sign-extended by
/// OR-masking the top bits (the original's own convention, not the shared `sign_extend`
/// bit-count helper). Marked "tba" in the original; kept here as nothing is lost by storing
/// it when present.
fn proc_165(slice: &[u8], consumed: &mut usize, ctx: &mut Adsb) -> DecodeResult<()> {
    if slice.is_empty() {
        return Err(DecodeError::TruncatedItem { need: 1, have: 0 });
    }
    let df1 = slice[0];
    if df1 & 0x01 == 0 {
        *consumed = 1;
        return Ok(());
    }
    if slice.len() < 2 {
        return Err(DecodeError::TruncatedItem { need: 2, have: slice.len() });
    }
    let df2 = slice[1];
    let mut rate = ((df2 >> 1) & 0x3f) as i16;
    if df2 & 0x80 != 0 {
        rate |= !0x3f_i16;
    }
    ctx.track_angle_rate_rad_s = Some(0.25 * rate as f64 * DEG_TO_RAD);
    *consumed = 2;
    Ok(())
}

fn proc_170(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let callsign = crate::asterix::bits::unpack_6bit_chars(slice);
    ctx.target_identification = Some(crate::asterix::model::TargetIdentification { callsign });
    Ok(())
}

/// Target Status: a single emergency-type enum byte (0=none .. 5=unlawful interference), a
/// completely different encoding from CAT021/200's ps/ss bit-split `TargetStatus` struct.
/// Marked "tba" in the original and has no matching model field; consumed for length only.
fn proc_200(slice: &[u8], _ctx: &mut Adsb) -> DecodeResult<()> {
    let _emergency = slice[0];
    Ok(())
}

/// Link Technology Indicator: a CDTI/Mode-S-ES/UAT/VDL-4/other bitmask, a CAT221-specific
/// concept absent from CAT021 (whose I021/210 is an unrelated MOPS-version item). No model
/// field covers it; consumed for length only.
fn proc_210(slice: &[u8], _ctx: &mut Adsb) -> DecodeResult<()> {
    let _lti = slice[0];
    Ok(())
}

fn proc_220(
    slice: &[u8],
    consumed: &mut usize,
    _ctx: &mut Adsb,
) -> DecodeResult<()> {
    if slice.is_empty() {
        return Err(DecodeError::TruncatedItem { need: 1, have: 0 });
    }
    let df1 = slice[0];
    let sf1 = df1 & 0x80 != 0;
    let sf2 = df1 & 0x40 != 0;
    let sf3 = df1 & 0x20 != 0;
    let sf4 = df1 & 0x10 != 0;
    let len = 1 + 2 * sf1 as usize + 2 * sf2 as usize + 2 * sf3 as usize + sf4 as usize;
    if slice.len() < len {
        return Err(DecodeError::TruncatedItem { need: len, have: slice.len() });
    }
    *consumed = len;
    Ok(())
}

fn proc_230(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let ra = make_i16(slice[0], slice[1]);
    ctx.roll_angle_rad = Some(0.01 * ra as f64 * DEG_TO_RAD);
    Ok(())
}

fn proc_length_prefixed_blob(
    slice: &[u8],
    consumed: &mut usize,
    _ctx: &mut Adsb,
) -> DecodeResult<()> {
    if slice.is_empty() {
        return Err(DecodeError::TruncatedItem { need: 1, have: 0 });
    }
    let len = slice[0] as usize;
    if len < 1 || len > slice.len() {
        return Err(DecodeError::TruncatedItem { need: len, have: slice.len() });
    }
    *consumed = len;
    Ok(())
}

fn slot(item: u16, kind: ItemKind<Adsb>) -> Option<ItemDescriptor<Adsb>> {
    Some(ItemDescriptor { category: CATEGORY, item, kind })
}

/// The single UAP: `astx_221.cpp` carries no `reference_vsn` branching at all.
fn build_uap() -> Uap<Adsb> {
    let mut slots: Vec<Option<ItemDescriptor<Adsb>>> = vec![None; 35];
    slots[0] = slot(10, ItemKind::Fixed { len: 2, handler: proc_010 });
    slots[1] = slot(40, ItemKind::Fixed { len: 2, handler: proc_040 });
    slots[2] = slot(30, ItemKind::Fixed { len: 3, handler: proc_030 });
    slots[3] = slot(130, ItemKind::Fixed { len: 6, handler: proc_130 });
    slots[4] = slot(80, ItemKind::Fixed { len: 3, handler: proc_080 });
    slots[5] = slot(140, ItemKind::Fixed { len: 2, handler: proc_140 });
    slots[6] = slot(90, ItemKind::Fixed { len: 2, handler: proc_090 });
    slots[7] = slot(210, ItemKind::Fixed { len: 1, handler: proc_210 });
    slots[8] = slot(230, ItemKind::Fixed { len: 2, handler: proc_230 });
    slots[9] = slot(145, ItemKind::Fixed { len: 2, handler: proc_145 });
    slots[10] = slot(150, ItemKind::Fixed { len: 2, handler: proc_150 });
    slots[11] = slot(151, ItemKind::Fixed { len: 2, handler: proc_151 });
    slots[12] = slot(152, ItemKind::Fixed { len: 2, handler: proc_152 });
    slots[13] = slot(155, ItemKind::Fixed { len: 2, handler: proc_155 });
    slots[14] = slot(157, ItemKind::Fixed { len: 2, handler: proc_157 });
    slots[15] = slot(160, ItemKind::Fixed { len: 4, handler: proc_160 });
    slots[16] = slot(165, ItemKind::Compound { handler: proc_165 });
    slots[17] = slot(170, ItemKind::Fixed { len: 6, handler: proc_170 });
    slots[18] = slot(95, ItemKind::Fixed { len: 1, handler: proc_095 });
    slots[19] = slot(32, ItemKind::Fixed { len: 1, handler: proc_032 });
    slots[20] = slot(200, ItemKind::Fixed { len: 1, handler: proc_200 });
    slots[21] = slot(20, ItemKind::Fixed { len: 1, handler: proc_020 });
    slots[22] = slot(220, ItemKind::Compound { handler: proc_220 });
    slots[23] = slot(146, ItemKind::Fixed { len: 2, handler: proc_146 });
    slots[24] = slot(148, ItemKind::Fixed { len: 2, handler: proc_148 });
    slots[25] = slot(110, ItemKind::Compound { handler: proc_110 });
    slots[33] = slot(0, ItemKind::Immediate { handler: proc_length_prefixed_blob });
    slots[34] = slot(0, ItemKind::Immediate { handler: proc_length_prefixed_blob });

    Uap { version: "std".to_string(), max_fspec_octets: 5, slots }
}

/// Decode one CAT221 data block's record stream.
pub fn decode(
    payload: &[u8],
    frame: &Frame,
    state: &mut DecoderState,
    sink: &mut dyn Sink,
) -> DecodeResult<()> {
    let uap = build_uap();
    walk_records(
        CATEGORY,
        payload,
        &uap,
        Adsb::default,
        |mut adsb| {
            adsb.common.asterix_category = CATEGORY;
            adsb.common.data_format = DataFormat::Asterix;
            adsb.common.frame_date = frame.date;
            adsb.common.frame_time = frame.time_of_day;
            adsb.common.line_number = frame.line.map(|l| l as u8);

            if let Some(id) = adsb.common.data_source_identifier {
                state.remember_sacsic(CATEGORY, id);
            } else {
                adsb.common.data_source_identifier = state.last_sacsic(CATEGORY);
            }

            sink.accept(SurveillanceObject::Adsb(adsb))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asterix::sink::DebugSink;

    fn frame() -> Frame {
        Frame { offset: 0, line: None, date: None, time_of_day: None, payload: Vec::new() }
    }

    #[test]
    fn test_true_airspeed_has_no_masking() {
        let mut ctx = Adsb::default();
        // Full 16-bit value, top bit set: would be misread as a range-exceeded flag under
        // CAT021/151's masked convention, but here it's part of the magnitude.
        proc_151(&[0x80, 0x00], &mut ctx).unwrap();
        let ta = ctx.true_airspeed.unwrap();
        assert!((ta.value_mps - 32_768.0 * KT_TO_MPS).abs() < 1e-6);
    }

    #[test]
    fn test_ground_vector_speed_is_signed_and_unmasked() {
        let mut ctx = Adsb::default();
        let spd = (-100i16).to_be_bytes();
        proc_160(&[spd[0], spd[1], 0x00, 0x00], &mut ctx).unwrap();
        let gv = ctx.ground_vector.unwrap();
        assert!(gv.value_gsp < 0.0);
    }

    #[test]
    fn test_rate_of_turn_single_octet_is_absent() {
        let mut ctx = Adsb::default();
        let mut consumed = 0;
        proc_165(&[0x00], &mut consumed, &mut ctx).unwrap();
        assert_eq!(consumed, 1);
        assert!(ctx.track_angle_rate_rad_s.is_none());
    }

    #[test]
    fn test_rate_of_turn_two_octets_sign_extends() {
        let mut ctx = Adsb::default();
        let mut consumed = 0;
        // df1 FX set, df2 = 0b1000_0010 -> (df2>>1)&0x3f = 0x01, sign bit set -> negative.
        proc_165(&[0x01, 0b1000_0010], &mut consumed, &mut ctx).unwrap();
        assert_eq!(consumed, 2);
        assert!(ctx.track_angle_rate_rad_s.unwrap() < 0.0);
    }

    #[test]
    fn test_figure_of_merit_zero_is_not_stored() {
        let mut ctx = Adsb::default();
        proc_090(&[0x00, 0x00], &mut ctx).unwrap();
        assert!(ctx.quality_indicators.is_none());
    }

    #[test]
    fn test_wgs84_position_stored_without_range_gate() {
        let mut ctx = Adsb::default();
        // lat = 91 degrees worth of raw units: out of the +/-90 range CAT021 would reject.
        let lat_raw = ((91.0 / 180.0) * TWO_POW_23) as i32;
        let lat_bytes = lat_raw.to_be_bytes();
        proc_130(&[lat_bytes[1], lat_bytes[2], lat_bytes[3], 0x00, 0x00, 0x00], &mut ctx).unwrap();
        assert!(ctx.wgs84_position.is_some());
    }

    #[test]
    fn test_decode_single_record_sac_sic_and_emitter_category() {
        // FSPEC: FRN1 (010) and FRN22 (020). Each octet carries 7 FRNs, so FRN22 falls on a
        // fourth octet (FRN1-7, 8-14, 15-21, 22-28).
        let mut payload = vec![0b1000_0001, 0b0000_0001, 0b0000_0001, 0b0100_0000];
        payload.extend_from_slice(&[0x12, 0x34]); // I221/010
        payload.push(3); // I221/020 emitter category
        let mut state = DecoderState::new();
        let mut sink = DebugSink::default();
        decode(&payload, &frame(), &mut state, &mut sink).unwrap();
        let SurveillanceObject::Adsb(adsb) = &sink.objects[0] else { panic!("wrong variant") };
        assert_eq!(adsb.common.data_source_identifier, Some(DataSourceId { sac: 0x12, sic: 0x34 }));
        assert_eq!(adsb.emitter_category, Some(3));
    }
}
