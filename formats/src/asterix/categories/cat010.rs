//! CAT010 — surface movement MLAT/radar reports (§4.5).
//!
//! Grounded on `astx_010.cpp`. Two reference editions are wired: `"0.24Sensis"`/`"0.24s"`
//! (the original's `reference_vsn == 1`) and `"1.1"` (`reference_vsn == 3`); FRN6, 8, 15, 16,
//! 19, 21, 23-25 only exist under the newer edition, matching `load_std_uap`'s version-gated
//! assignments.

use crate::asterix::bits::{make_i16, make_i32, make_u16, make_u32, unpack_6bit_chars};
use crate::asterix::envelope::Frame;
use crate::asterix::error::{DecodeError, DecodeOutcome, DecodeResult};
use crate::asterix::item::{ItemDescriptor, ItemKind};
use crate::asterix::model::{
    CartesianPosition, DataFormat, DataSourceId, DetectionType, GroundVector, Mode3A,
    ModeCHeight, Mlat, SurveillanceObject, TargetIdentification, TriBool, Wgs84Position,
};
use crate::asterix::sink::Sink;
use crate::asterix::state::DecoderState;
use crate::asterix::walker::{walk_records, Uap};

const CATEGORY: u8 = 10;
const FT_TO_M: f64 = 0.3048;
const NMI_TO_M: f64 = 1_852.0;

fn detection_type_mut(ctx: &mut Mlat) -> &mut DetectionType {
    ctx.detection_type.get_or_insert_with(DetectionType::default)
}

fn proc_000(slice: &[u8], ctx: &mut Mlat) -> DecodeResult<()> {
    if slice[0] == 1 {
        detection_type_mut(ctx).is_track = true;
    }
    Ok(())
}

fn proc_010(slice: &[u8], ctx: &mut Mlat) -> DecodeResult<()> {
    ctx.common.data_source_identifier = Some(DataSourceId { sac: slice[0], sic: slice[1] });
    Ok(())
}

fn proc_020(slice: &[u8], ctx: &mut Mlat) -> DecodeResult<()> {
    if slice.len() > 1 {
        let df2 = slice[1];
        let dt = detection_type_mut(ctx);
        dt.simulated = TriBool::from_bit(df2 & 0x80 != 0);
        dt.test_target = TriBool::from_bit(df2 & 0x40 != 0);
        dt.from_fixed_field_transponder = TriBool::from_bit(df2 & 0x20 != 0);
    }
    if slice.len() > 2 {
        detection_type_mut(ctx).spi = TriBool::from_bit(slice[2] & 0x80 != 0);
    }
    Ok(())
}

fn proc_041(slice: &[u8], ctx: &mut Mlat) -> DecodeResult<()> {
    let lat = make_i32(slice[0], slice[1], slice[2], slice[3]);
    let lon = make_i32(slice[4], slice[5], slice[6], slice[7]);
    let scale = 180.0 / 2_147_483_648.0;
    ctx.wgs84_position = Some(Wgs84Position {
        lat_rad: (scale * lat as f64).to_radians(),
        lon_rad: (scale * lon as f64).to_radians(),
        high_precision: false,
    });
    Ok(())
}

fn proc_042(slice: &[u8], ctx: &mut Mlat) -> DecodeResult<()> {
    let x = make_i16(slice[0], slice[1]);
    let y = make_i16(slice[2], slice[3]);
    ctx.cartesian_position = Some(CartesianPosition { x_m: x as f64, y_m: y as f64 });
    Ok(())
}

fn proc_060(slice: &[u8], ctx: &mut Mlat) -> DecodeResult<()> {
    let df1 = slice[0];
    let df2 = slice[1];
    ctx.mode_3a = Some(Mode3A {
        code: make_u16(df1 & 0x0f, df2),
        invalid: TriBool::from_bit(df1 & 0x80 != 0),
        garbled: TriBool::from_bit(df1 & 0x40 != 0),
        smoothed: TriBool::from_bit(df1 & 0x20 != 0),
    });
    Ok(())
}

fn proc_090(slice: &[u8], ctx: &mut Mlat) -> DecodeResult<()> {
    let df1 = slice[0];
    let df2 = slice[1];
    let mut mfl = make_i16(df1 & 0x1f, df2);
    if df1 & 0x20 != 0 {
        mfl |= 0xc000u16 as i16;
    }
    ctx.mode_c_height = Some(ModeCHeight {
        value_m: 25.0 * FT_TO_M * mfl as f64,
        value_ft: 25 * mfl as i32,
        garbled: TriBool::from_bit(df1 & 0x40 != 0),
        invalid: TriBool::from_bit(df1 & 0x80 != 0),
    });
    Ok(())
}

fn proc_091(_slice: &[u8], _ctx: &mut Mlat) -> DecodeResult<()> {
    // Measured height (6.25 ft/LSB) has no normalised field of its own distinct from
    // I010/090's flight level; the original never stores it either.
    Ok(())
}

fn proc_140(slice: &[u8], ctx: &mut Mlat) -> DecodeResult<()> {
    let tod = make_u32(0, slice[0], slice[1], slice[2]);
    ctx.detection_time = Some(tod as f64 / 128.0);
    Ok(())
}

fn proc_161(slice: &[u8], ctx: &mut Mlat) -> DecodeResult<()> {
    ctx.track_number = Some(make_u16(slice[0] & 0x0f, slice[1]));
    Ok(())
}

fn proc_170(_slice: &[u8], _ctx: &mut Mlat) -> DecodeResult<()> {
    // Track status: the original lists every bit but never stores any of them.
    Ok(())
}

fn proc_200(slice: &[u8], ctx: &mut Mlat) -> DecodeResult<()> {
    let spd = make_u16(slice[0], slice[1]);
    let hdg = make_u16(slice[2], slice[3]);
    ctx.velocity = Some(GroundVector {
        value_gsp: (NMI_TO_M / 16_384.0) * spd as f64,
        value_hdg: (std::f64::consts::TAU / 65_536.0) * hdg as f64,
        range_exceeded: TriBool::Undefined,
    });
    Ok(())
}

/// I010/202, v1 edition: three octets, 12-bit signed `vx`/`vy` fields in whole m/s.
fn proc_202_v1(slice: &[u8], ctx: &mut Mlat) -> DecodeResult<()> {
    let df1 = slice[0];
    let df2 = slice[1];
    let df3 = slice[2];

    let mut vx: u16 = (df1 as u16) << 4 | ((df2 as u16 >> 4) & 0x0f);
    if df1 & 0x80 != 0 {
        vx |= 0xf000;
    }
    let mut vy: u16 = (df2 as u16 & 0x0f) << 8 | df3 as u16;
    if df2 & 0x08 != 0 {
        vy |= 0xf000;
    }

    store_cartesian_velocity(ctx, vx as i16 as f64, vy as i16 as f64);
    Ok(())
}

/// I010/202, v3 edition: four octets, 0.25 m/s per LSB.
fn proc_202_v3(slice: &[u8], ctx: &mut Mlat) -> DecodeResult<()> {
    let vx = make_i16(slice[0], slice[1]);
    let vy = make_i16(slice[2], slice[3]);
    store_cartesian_velocity(ctx, 0.25 * vx as f64, 0.25 * vy as f64);
    Ok(())
}

/// Converts Cartesian `vx`/`vy` (m/s) onto the same polar [`GroundVector`] every other
/// category's ground speed/heading lands in, so downstream sinks see one consistent shape.
fn store_cartesian_velocity(ctx: &mut Mlat, vx: f64, vy: f64) {
    ctx.velocity = Some(GroundVector {
        value_gsp: (vx * vx + vy * vy).sqrt(),
        value_hdg: vx.atan2(vy).rem_euclid(std::f64::consts::TAU),
        range_exceeded: TriBool::Undefined,
    });
}

fn proc_210(_slice: &[u8], _ctx: &mut Mlat) -> DecodeResult<()> {
    Ok(())
}

fn proc_220(slice: &[u8], ctx: &mut Mlat) -> DecodeResult<()> {
    ctx.aircraft_address = Some(make_u32(0, slice[0], slice[1], slice[2]));
    Ok(())
}

fn proc_245(slice: &[u8], ctx: &mut Mlat) -> DecodeResult<()> {
    ctx.target_identification = Some(TargetIdentification {
        callsign: unpack_6bit_chars(&slice[1..7]),
    });
    Ok(())
}

fn proc_250(slice: &[u8], _pos: &mut usize, ctx: &mut Mlat) -> DecodeResult<()> {
    let rep = slice[0] as usize;
    if rep == 0 {
        return Err(DecodeError::InvalidRepeat { category: CATEGORY, item: 250 });
    }
    let total = 1 + rep * 8;
    if slice.len() < total {
        return Err(DecodeError::TruncatedItem { need: total, have: slice.len() });
    }
    // BDS registers have no home on `Mlat`; the original lists them but CAT010 never treats
    // them as ADS-B state, so they're consumed and dropped here too.
    *_pos = total;
    let _ = ctx;
    Ok(())
}

fn proc_270(_slice: &[u8], _ctx: &mut Mlat) -> DecodeResult<()> {
    Ok(())
}

fn proc_280(slice: &[u8], pos: &mut usize, _ctx: &mut Mlat) -> DecodeResult<()> {
    let rep = slice[0] as usize;
    if rep == 0 {
        return Err(DecodeError::InvalidRepeat { category: CATEGORY, item: 280 });
    }
    let total = 1 + rep * 2;
    if slice.len() < total {
        return Err(DecodeError::TruncatedItem { need: total, have: slice.len() });
    }
    *pos = total;
    Ok(())
}

fn proc_300(_slice: &[u8], _ctx: &mut Mlat) -> DecodeResult<()> {
    Ok(())
}

fn proc_310(_slice: &[u8], _ctx: &mut Mlat) -> DecodeResult<()> {
    Ok(())
}

fn proc_500(_slice: &[u8], _ctx: &mut Mlat) -> DecodeResult<()> {
    Ok(())
}

fn proc_550(slice: &[u8], ctx: &mut Mlat) -> DecodeResult<()> {
    ctx.system_status = Some(slice[0]);
    Ok(())
}

/// I010/REF and I010/SPF share the same one-byte length-prefixed blob shape.
fn proc_length_prefixed_blob(slice: &[u8], consumed: &mut usize, _ctx: &mut Mlat) -> DecodeResult<()> {
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

fn slot(category: u8, item: u16, kind: ItemKind<Mlat>) -> Option<ItemDescriptor<Mlat>> {
    Some(ItemDescriptor { category, item, kind })
}

/// Build the UAP for reference edition `version` (`"0.24Sensis"`/`"0.24s"` or `"1.1"`).
fn build_uap(version: &str) -> DecodeResult<Uap<Mlat>> {
    let v3 = match version {
        "0.24Sensis" | "0.24s" => false,
        "1.1" => true,
        other => {
            return Err(DecodeError::UnknownReferenceVersion(other.to_string(), CATEGORY));
        }
    };

    let mut slots: Vec<Option<ItemDescriptor<Mlat>>> = vec![None; 28];
    slots[0] = slot(CATEGORY, 10, ItemKind::Fixed { len: 2, handler: proc_010 });
    slots[1] = slot(CATEGORY, 0, ItemKind::Fixed { len: 1, handler: proc_000 });
    slots[2] = slot(CATEGORY, 20, ItemKind::Extended { handler: proc_020 });
    slots[3] = slot(CATEGORY, 140, ItemKind::Fixed { len: 3, handler: proc_140 });
    slots[4] = slot(CATEGORY, 41, ItemKind::Fixed { len: 8, handler: proc_041 });
    if v3 {
        slots[5] = slot(CATEGORY, 40, ItemKind::Fixed { len: 4, handler: proc_042 });
    }
    slots[6] = slot(CATEGORY, 42, ItemKind::Fixed { len: 4, handler: proc_042 });
    if v3 {
        slots[7] = slot(CATEGORY, 200, ItemKind::Fixed { len: 4, handler: proc_200 });
    }
    slots[8] = slot(
        CATEGORY,
        202,
        if v3 {
            ItemKind::Fixed { len: 4, handler: proc_202_v3 }
        } else {
            ItemKind::Fixed { len: 3, handler: proc_202_v1 }
        },
    );
    slots[9] = slot(CATEGORY, 161, ItemKind::Fixed { len: 2, handler: proc_161 });
    slots[10] = slot(CATEGORY, 170, ItemKind::Extended { handler: proc_170 });
    slots[11] = slot(CATEGORY, 60, ItemKind::Fixed { len: 2, handler: proc_060 });
    slots[12] = slot(CATEGORY, 220, ItemKind::Fixed { len: 3, handler: proc_220 });
    slots[13] = slot(CATEGORY, 245, ItemKind::Fixed { len: 7, handler: proc_245 });
    if v3 {
        slots[14] = slot(CATEGORY, 250, ItemKind::Compound { handler: proc_250 });
        slots[15] = slot(CATEGORY, 300, ItemKind::Fixed { len: 1, handler: proc_300 });
    }
    slots[16] = slot(CATEGORY, 90, ItemKind::Fixed { len: 2, handler: proc_090 });
    slots[17] = slot(CATEGORY, 91, ItemKind::Fixed { len: 2, handler: proc_091 });
    if v3 {
        slots[18] = slot(CATEGORY, 270, ItemKind::Extended { handler: proc_270 });
    }
    slots[19] = slot(CATEGORY, 550, ItemKind::Fixed { len: 1, handler: proc_550 });
    if v3 {
        slots[20] = slot(CATEGORY, 310, ItemKind::Fixed { len: 1, handler: proc_310 });
    }
    slots[21] = slot(CATEGORY, 500, ItemKind::Fixed { len: 4, handler: proc_500 });
    if v3 {
        slots[22] = slot(CATEGORY, 280, ItemKind::Compound { handler: proc_280 });
        slots[23] = slot(CATEGORY, 131, ItemKind::Fixed { len: 1, handler: |_, _| Ok(()) });
        slots[24] = slot(CATEGORY, 210, ItemKind::Fixed { len: 2, handler: proc_210 });
    }
    slots[26] = slot(CATEGORY, 27, ItemKind::Immediate { handler: proc_length_prefixed_blob });
    slots[27] = slot(CATEGORY, 28, ItemKind::Immediate { handler: proc_length_prefixed_blob });

    Ok(Uap { version: version.to_string(), max_fspec_octets: 4, slots })
}

/// Decode one CAT010 data block's record stream under reference edition `version`.
pub fn decode(
    payload: &[u8],
    frame: &Frame,
    version: &str,
    state: &mut DecoderState,
    sink: &mut dyn Sink,
) -> DecodeResult<()> {
    let uap = build_uap(version)?;
    walk_records(
        CATEGORY,
        payload,
        &uap,
        Mlat::default,
        |mut mlat| {
            mlat.common.asterix_category = CATEGORY;
            mlat.common.data_format = DataFormat::Asterix;
            mlat.common.frame_date = frame.date;
            mlat.common.frame_time = frame.time_of_day;
            mlat.common.line_number = frame.line.map(|l| l as u8);

            if let Some(id) = mlat.common.data_source_identifier {
                state.remember_sacsic(CATEGORY, id);
            } else {
                mlat.common.data_source_identifier = state.last_sacsic(CATEGORY);
            }

            sink.accept(SurveillanceObject::Mlat(mlat))
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
    fn test_rejects_unknown_version() {
        assert!(build_uap("-2").is_err());
    }

    #[test]
    fn test_v1_omits_v3_only_slots() {
        let uap = build_uap("0.24Sensis").unwrap();
        assert!(uap.slots[5].is_none()); // FRN6, I010/040, v3 only
        assert!(uap.slots[7].is_none()); // FRN8, I010/200, v3 only
    }

    #[test]
    fn test_wgs84_position_decoded() {
        let mut ctx = Mlat::default();
        // lat = +45 degrees: 45 / (180/2^31) = 536_870_912 = 0x2000_0000.
        let lat_raw: i32 = 536_870_912;
        let bytes = lat_raw.to_be_bytes();
        let slice = [bytes[0], bytes[1], bytes[2], bytes[3], 0, 0, 0, 0];
        proc_041(&slice, &mut ctx).unwrap();
        let pos = ctx.wgs84_position.unwrap();
        assert!((pos.lat_rad.to_degrees() - 45.0).abs() < 1e-6);
    }

    #[test]
    fn test_cartesian_velocity_v3_converts_to_polar() {
        let mut ctx = Mlat::default();
        // vx = 40 (x0.25 m/s -> 10 m/s), vy = 0 m/s: heading should be 90 degrees (east).
        let vx = 40i16.to_be_bytes();
        let vy = 0i16.to_be_bytes();
        proc_202_v3(&[vx[0], vx[1], vy[0], vy[1]], &mut ctx).unwrap();
        let v = ctx.velocity.unwrap();
        assert!((v.value_gsp - 10.0).abs() < 1e-9);
        assert!((v.value_hdg.to_degrees() - 90.0).abs() < 1e-6);
    }

    #[test]
    fn test_mode_c_height_negative_sign_extends() {
        let mut ctx = Mlat::default();
        proc_090(&[0x20, 0x00], &mut ctx).unwrap();
        assert!(ctx.mode_c_height.unwrap().value_ft < 0);
    }

    #[test]
    fn test_spf_blob_consumes_length_prefix() {
        let mut consumed = 0usize;
        let mut ctx = Mlat::default();
        let slice = [0x03, 0xaa, 0xbb];
        proc_length_prefixed_blob(&slice, &mut consumed, &mut ctx).unwrap();
        assert_eq!(consumed, 3);
    }

    #[test]
    fn test_decode_single_record_sac_sic_and_track_number() {
        let uap = build_uap("1.1").unwrap();
        assert!(uap.slots[9].is_some()); // FRN10, I010/161
        let mut payload = Vec::new();
        // FSPEC: FRN1 and FRN10 set. Bit layout per octet (bit7..bit1 = FRN n..n+6, FX=bit0).
        payload.push(0b1000_0001); // FRN1 set, FX=1 (continue)
        payload.push(0b0010_0000); // FRN10 set (bit5 of 2nd octet = 7+3), FX=0
        payload.extend_from_slice(&[0x12, 0x34]); // I010/010
        payload.extend_from_slice(&[0x00, 0x2a]); // I010/161 -> track 42
        let mut state = DecoderState::new();
        let mut sink = DebugSink::default();
        decode(&payload, &frame(), "1.1", &mut state, &mut sink).unwrap();
        let SurveillanceObject::Mlat(mlat) = &sink.objects[0] else { panic!("wrong variant") };
        assert_eq!(mlat.common.data_source_identifier, Some(DataSourceId { sac: 0x12, sic: 0x34 }));
        assert_eq!(mlat.track_number, Some(42));
    }
}
