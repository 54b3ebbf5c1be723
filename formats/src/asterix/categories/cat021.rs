//! CAT021 — ADS-B reports (§4.5). Largest UAP in the format (FRN 1..49).
//!
//! Grounded on `astx_021.cpp`. Only the "modern" reference editions the original calls
//! `reference_vsn` 14/15/21/24 ("1.0P"/"1.4"/"2.1"/"2.4") share one item set and are
//! implemented here; earlier pre-ADS-B-standardisation editions ("0.12".."0.27") differ
//! item-by-item enough that they are out of scope (`DecodeError::UnknownReferenceVersion`).
//! Unlike CAT003, this edition family carries no RFS item — FRN48/49 are plain REF/SPF.

use crate::asterix::bits::{make_i16, make_i32, make_u16, make_u32, sign_extend, unpack_6bit_chars};
use crate::asterix::envelope::Frame;
use crate::asterix::error::{DecodeError, DecodeOutcome, DecodeResult};
use crate::asterix::item::{ItemDescriptor, ItemKind};
use crate::asterix::model::{
    Adsb, AirSpeed, BdsRegister, DataFormat, DataSourceId, DetectionType, GroundVector,
    QualityIndicators, SelectedAltitude, SurveillanceObject, TargetIdentification, TargetStatus,
    TriBool, TrueAirspeed, VerticalRate, Wgs84Position,
};
use crate::asterix::sink::Sink;
use crate::asterix::state::DecoderState;
use crate::asterix::walker::{walk_records, Uap};

const CATEGORY: u8 = 21;
const FT_TO_M: f64 = 0.3048;
const KT_TO_MPS: f64 = 1852.0 / 3600.0;
const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;
const TWO_POW_23: f64 = 8_388_608.0;
const TWO_POW_30: f64 = 1_073_741_824.0;

fn proc_008(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    ctx.aircraft_operational_status = Some(slice[0]);
    Ok(())
}

fn proc_010(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    ctx.common.data_source_identifier = Some(DataSourceId { sac: slice[0], sic: slice[1] });
    Ok(())
}

fn proc_015(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    ctx.service_identification = Some(slice[0]);
    Ok(())
}

fn proc_016(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    ctx.report_characteristics = Some(slice[0]);
    Ok(())
}

fn proc_020(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    ctx.emitter_category = Some(slice[0]);
    Ok(())
}

fn proc_040(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let df1 = slice[0];
    let df2 = if slice.len() > 1 { slice[1] } else { 0 };
    ctx.target_report_descriptor = Some(DetectionType {
        is_track: false,
        simulated: TriBool::from_bit(df2 & 0x20 != 0),
        test_target: TriBool::from_bit(df2 & 0x10 != 0),
        from_fixed_field_transponder: TriBool::Undefined,
        spi: TriBool::Undefined,
    });
    Ok(())
}

fn proc_071(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let tod = make_u32(0, slice[0], slice[1], slice[2]);
    ctx.toa_position = Some(tod as f64 / 128.0);
    Ok(())
}

fn proc_072(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let tod = make_u32(0, slice[0], slice[1], slice[2]);
    ctx.toa_velocity = Some(tod as f64 / 128.0);
    Ok(())
}

fn proc_090(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let df1 = slice[0];
    let mut q = QualityIndicators {
        nucr_or_nacv: (df1 >> 5) & 0x07,
        nucp_or_nic: (df1 >> 1) & 0x0f,
        ..QualityIndicators::default()
    };
    if slice.len() >= 2 {
        let df2 = slice[1];
        q.nic_baro = Some((df2 >> 7) & 0x01);
        q.sil = Some((df2 >> 5) & 0x03);
        q.nacp = Some((df2 >> 1) & 0x0f);
    }
    if slice.len() >= 3 {
        let df3 = slice[2];
        q.sil_supplement = Some((df3 >> 5) & 0x01);
        q.sda = Some((df3 >> 3) & 0x03);
        q.gva = Some((df3 >> 1) & 0x03);
    }
    if slice.len() >= 4 {
        q.pic = Some((slice[3] >> 4) & 0x0f);
    }
    ctx.quality_indicators = Some(q);
    Ok(())
}

fn proc_130(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let hi = if slice[0] & 0x80 != 0 { 0xff } else { 0x00 };
    let lat = make_i32(hi, slice[0], slice[1], slice[2]);
    let hi2 = if slice[3] & 0x80 != 0 { 0xff } else { 0x00 };
    let lon = make_i32(hi2, slice[3], slice[4], slice[5]);
    let latf = (180.0 / TWO_POW_23) * lat as f64;
    let lonf = (180.0 / TWO_POW_23) * lon as f64;
    if latf.abs() <= 90.0 && lonf.abs() <= 180.0 {
        ctx.wgs84_position = Some(Wgs84Position {
            lat_rad: DEG_TO_RAD * latf,
            lon_rad: DEG_TO_RAD * lonf,
            high_precision: false,
        });
    }
    Ok(())
}

fn proc_131(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let lat = make_i32(slice[0], slice[1], slice[2], slice[3]);
    let lon = make_i32(slice[4], slice[5], slice[6], slice[7]);
    let latf = (180.0 / TWO_POW_30) * lat as f64;
    let lonf = (180.0 / TWO_POW_30) * lon as f64;
    if latf.abs() <= 90.0 && lonf.abs() <= 180.0 {
        ctx.wgs84_position = Some(Wgs84Position {
            lat_rad: DEG_TO_RAD * latf,
            lon_rad: DEG_TO_RAD * lonf,
            high_precision: true,
        });
    }
    Ok(())
}

fn proc_132(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    ctx.message_amplitude_dbm = Some(slice[0] as i8);
    Ok(())
}

fn proc_140(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let alt = make_i16(slice[0], slice[1]);
    ctx.geometric_height_m = Some(6.25 * FT_TO_M * alt as f64);
    Ok(())
}

fn proc_145(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let fl = make_i16(slice[0], slice[1]);
    ctx.barometric_flight_level_m = Some(25.0 * FT_TO_M * fl as f64);
    Ok(())
}

fn parse_selected_altitude(slice: &[u8]) -> SelectedAltitude {
    let df1 = slice[0];
    let mut alt = make_u16(df1 & 0x1f, slice[1]) as i16;
    if df1 & 0x10 != 0 {
        alt |= 0xe000u16 as i16;
    }
    SelectedAltitude { value_m: 25.0 * FT_TO_M * alt as f64, value_ft: 25 * alt as i32, flags: df1 >> 5 }
}

fn proc_146(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    ctx.selected_altitude = Some(parse_selected_altitude(slice));
    Ok(())
}

fn proc_148(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    ctx.final_selected_altitude = Some(parse_selected_altitude(slice));
    Ok(())
}

fn proc_150(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let df1 = slice[0];
    let im = (df1 >> 7) & 0x01;
    let spd = make_u16(df1 & 0x7f, slice[1]);
    ctx.air_speed = Some(if im == 0 {
        // Wire unit is knots at (3600/16384) LSB; KT_TO_MPS converts to the model's m/s.
        AirSpeed::Ias((3600.0 / 16_384.0) * spd as f64 * KT_TO_MPS)
    } else {
        AirSpeed::Mach(0.001 * spd as f64)
    });
    Ok(())
}

fn proc_151(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let df1 = slice[0];
    let re = (df1 >> 7) & 0x01;
    let spd = make_u16(df1 & 0x7f, slice[1]);
    ctx.true_airspeed = Some(TrueAirspeed {
        value_mps: KT_TO_MPS * spd as f64,
        range_exceeded: TriBool::from_bit(re != 0),
    });
    Ok(())
}

fn proc_152(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let hdg = make_u16(slice[0], slice[1]);
    ctx.magnetic_heading_rad = Some((std::f64::consts::TAU / 65_536.0) * hdg as f64);
    Ok(())
}

fn proc_155(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let df1 = slice[0];
    let re = (df1 >> 7) & 0x01;
    let mut bvr = make_i16(df1 & 0x7f, slice[1]);
    if df1 & 0x40 != 0 {
        bvr |= 0x8000u16 as i16;
    }
    ctx.barometric_vertical_rate = Some(VerticalRate {
        value: 6.25 * (FT_TO_M / 60.0) * bvr as f64,
        range_exceeded: TriBool::from_bit(re != 0),
    });
    Ok(())
}

fn proc_157(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let df1 = slice[0];
    let re = (df1 >> 7) & 0x01;
    let mut gvr = make_i16(df1 & 0x7f, slice[1]);
    if df1 & 0x40 != 0 {
        gvr |= 0x8000u16 as i16;
    }
    ctx.geometric_vertical_rate = Some(VerticalRate {
        value: 6.25 * (FT_TO_M / 60.0) * gvr as f64,
        range_exceeded: TriBool::from_bit(re != 0),
    });
    Ok(())
}

fn proc_160(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let df1 = slice[0];
    let re = (df1 >> 7) & 0x01;
    let spd = make_i16(df1 & 0x7f, slice[1]);
    let ta = make_u16(slice[2], slice[3]);
    ctx.ground_vector = Some(GroundVector {
        value_gsp: (1_852.0 / 16_384.0) * spd as f64,
        value_hdg: (std::f64::consts::TAU / 65_536.0) * ta as f64,
        range_exceeded: TriBool::from_bit(re != 0),
    });
    Ok(())
}

fn proc_161(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    ctx.track_number = Some(make_u16(slice[0] & 0x0f, slice[1]));
    Ok(())
}

fn proc_165(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let df1 = slice[0];
    let mut rate = make_u16(df1 & 0x03, slice[1]) as i32;
    if df1 & 0x02 != 0 {
        rate = sign_extend(rate as u32, 10);
    }
    ctx.track_angle_rate_rad_s = Some((1.0 / 32.0) * DEG_TO_RAD * rate as f64);
    Ok(())
}

fn proc_170(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    ctx.target_identification =
        Some(TargetIdentification { callsign: unpack_6bit_chars(&slice[0..6]) });
    Ok(())
}

fn proc_200(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let df1 = slice[0];
    ctx.target_status = Some(TargetStatus {
        icf: false,
        lnav: false,
        ps: (df1 >> 2) & 0x07,
        ss: df1 & 0x03,
    });
    Ok(())
}

fn proc_210(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    ctx.mops_version = Some((slice[0] >> 3) & 0x07);
    Ok(())
}

fn proc_230(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    let ra = make_i16(slice[0], slice[1]);
    ctx.roll_angle_rad = Some(0.01 * DEG_TO_RAD * ra as f64);
    Ok(())
}

/// `rep == 0` is a legal "no registers present" encoding here, unlike the generic
/// [`ItemKind::Repetitive`] convention elsewhere that rejects a zero count; hence `Compound`.
fn proc_250(slice: &[u8], consumed: &mut usize, ctx: &mut Adsb) -> DecodeResult<()> {
    if slice.is_empty() {
        return Err(DecodeError::TruncatedItem { need: 1, have: 0 });
    }
    let rep = slice[0] as usize;
    if rep == 0 {
        *consumed = 1;
        return Ok(());
    }
    let total = 1 + rep * 8;
    if slice.len() < total {
        return Err(DecodeError::TruncatedItem { need: total, have: slice.len() });
    }
    ctx.bds_registers.clear();
    for ix in 0..rep {
        let reg = &slice[1 + 8 * ix..1 + 8 * ix + 8];
        let mut data = [0u8; 7];
        data.copy_from_slice(&reg[0..7]);
        ctx.bds_registers.push(BdsRegister { bds1: (reg[7] >> 4) & 0x0f, bds2: reg[7] & 0x0f, data });
    }
    *consumed = total;
    Ok(())
}

fn proc_260(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    if slice[0] == 0x30 {
        ctx.acas_resolution_advisory = Some(slice[0..7].to_vec());
    }
    Ok(())
}

fn proc_271(slice: &[u8], consumed: &mut usize, ctx: &mut Adsb) -> DecodeResult<()> {
    if slice.is_empty() {
        return Err(DecodeError::TruncatedItem { need: 1, have: 0 });
    }
    let df1 = slice[0];
    let len = if df1 & 0x01 != 0 { 2 } else { 1 };
    if slice.len() < len {
        return Err(DecodeError::TruncatedItem { need: len, have: slice.len() });
    }
    ctx.surface_capabilities = Some(if len == 2 { make_u16(slice[0], slice[1]) } else { df1 as u16 });
    *consumed = len;
    Ok(())
}

fn proc_295(slice: &[u8], consumed: &mut usize, _ctx: &mut Adsb) -> DecodeResult<()> {
    // Compound presence bitmap (up to 4 FX-extensible octets), one age byte per set bit.
    let mut bitmap_len = 0usize;
    let mut set_bits = 0usize;
    loop {
        if bitmap_len >= slice.len() {
            return Err(DecodeError::TruncatedItem { need: bitmap_len + 1, have: slice.len() });
        }
        let octet = slice[bitmap_len];
        bitmap_len += 1;
        set_bits += (octet >> 1).count_ones() as usize;
        if octet & 0x01 == 0 {
            break;
        }
        if bitmap_len >= 4 {
            break;
        }
    }
    let total = bitmap_len + set_bits;
    if slice.len() < total {
        return Err(DecodeError::TruncatedItem { need: total, have: slice.len() });
    }
    *consumed = total;
    Ok(())
}

/// Met info (wind speed/direction, temperature, turbulence): a presence-bitmap octet
/// followed by 2/2/2/1 bytes per set bit. Not modelled (no corresponding field), consumed only.
fn proc_220(slice: &[u8], consumed: &mut usize, _ctx: &mut Adsb) -> DecodeResult<()> {
    if slice.is_empty() {
        return Err(DecodeError::TruncatedItem { need: 1, have: 0 });
    }
    let pm = slice[0];
    let lens = [(0x80u8, 2usize), (0x40, 2), (0x20, 2), (0x10, 1)];
    let mut total = 1;
    for (bit, len) in lens {
        if pm & bit != 0 {
            total += len;
        }
    }
    if slice.len() < total {
        return Err(DecodeError::TruncatedItem { need: total, have: slice.len() });
    }
    *consumed = total;
    Ok(())
}

fn proc_400(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    ctx.receiver_id = Some(slice[0]);
    Ok(())
}

fn proc_ref(slice: &[u8], consumed: &mut usize, _ctx: &mut Adsb) -> DecodeResult<()> {
    proc_length_prefixed_blob(slice, consumed)
}

fn proc_spf(slice: &[u8], consumed: &mut usize, _ctx: &mut Adsb) -> DecodeResult<()> {
    proc_length_prefixed_blob(slice, consumed)
}

fn proc_length_prefixed_blob(slice: &[u8], consumed: &mut usize) -> DecodeResult<()> {
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

/// Reference editions sharing one item set: "1.0P"/"1.4"/"2.1"/"2.4" (`reference_vsn` 14/15/21/24).
fn build_uap(version: &str) -> DecodeResult<Uap<Adsb>> {
    if !matches!(version, "1.0P" | "1.4" | "2.1" | "2.4") {
        return Err(DecodeError::UnknownReferenceVersion(version.to_string(), CATEGORY));
    }

    let mut slots: Vec<Option<ItemDescriptor<Adsb>>> = vec![None; 49];
    slots[0] = slot(10, ItemKind::Fixed { len: 2, handler: proc_010 });
    slots[1] = slot(40, ItemKind::Extended { handler: proc_040 });
    slots[2] = slot(161, ItemKind::Fixed { len: 2, handler: proc_161 });
    slots[3] = slot(15, ItemKind::Fixed { len: 1, handler: proc_015 });
    slots[4] = slot(71, ItemKind::Fixed { len: 3, handler: proc_071 });
    slots[5] = slot(130, ItemKind::Fixed { len: 6, handler: proc_130 });
    slots[6] = slot(131, ItemKind::Fixed { len: 8, handler: proc_131 });
    slots[7] = slot(72, ItemKind::Fixed { len: 3, handler: proc_072 });
    slots[8] = slot(150, ItemKind::Fixed { len: 2, handler: proc_150 });
    slots[9] = slot(151, ItemKind::Fixed { len: 2, handler: proc_151 });
    slots[10] = slot(80, ItemKind::Fixed { len: 3, handler: proc_aircraft_address });
    // FRN12-15, FRN28 (073-077): trajectory change report/status items, outside scope here.
    // Consumed for their fixed length only, so later FRNs stay aligned.
    slots[11] = slot(73, ItemKind::Fixed { len: 3, handler: noop_fixed3 });
    slots[12] = slot(74, ItemKind::Fixed { len: 4, handler: noop_fixed4 });
    slots[13] = slot(75, ItemKind::Fixed { len: 3, handler: noop_fixed3 });
    slots[14] = slot(76, ItemKind::Fixed { len: 4, handler: noop_fixed4 });
    slots[15] = slot(140, ItemKind::Fixed { len: 2, handler: proc_140 });
    slots[16] = slot(90, ItemKind::Compound { handler: proc_090_variable });
    slots[17] = slot(210, ItemKind::Fixed { len: 1, handler: proc_210 });
    slots[18] = slot(70, ItemKind::Fixed { len: 2, handler: noop_fixed2 });
    slots[19] = slot(230, ItemKind::Fixed { len: 2, handler: proc_230 });
    slots[20] = slot(145, ItemKind::Fixed { len: 2, handler: proc_145 });
    slots[21] = slot(152, ItemKind::Fixed { len: 2, handler: proc_152 });
    slots[22] = slot(200, ItemKind::Fixed { len: 1, handler: proc_200 });
    slots[23] = slot(155, ItemKind::Fixed { len: 2, handler: proc_155 });
    slots[24] = slot(157, ItemKind::Fixed { len: 2, handler: proc_157 });
    slots[25] = slot(160, ItemKind::Fixed { len: 4, handler: proc_160 });
    slots[26] = slot(165, ItemKind::Fixed { len: 2, handler: proc_165 });
    slots[27] = slot(77, ItemKind::Fixed { len: 3, handler: noop_fixed3 });
    slots[28] = slot(170, ItemKind::Fixed { len: 6, handler: proc_170 });
    slots[29] = slot(20, ItemKind::Fixed { len: 1, handler: proc_020 });
    slots[30] = slot(220, ItemKind::Compound { handler: proc_220 });
    slots[31] = slot(146, ItemKind::Fixed { len: 2, handler: proc_146 });
    slots[32] = slot(148, ItemKind::Fixed { len: 2, handler: proc_148 });
    slots[33] = slot(110, ItemKind::Immediate { handler: noop_variable });
    slots[34] = slot(16, ItemKind::Fixed { len: 1, handler: proc_016 });
    slots[35] = slot(8, ItemKind::Fixed { len: 1, handler: proc_008 });
    slots[36] = slot(271, ItemKind::Immediate { handler: proc_271 });
    slots[37] = slot(132, ItemKind::Fixed { len: 1, handler: proc_132 });
    slots[38] = slot(250, ItemKind::Compound { handler: proc_250 });
    slots[39] = slot(260, ItemKind::Fixed { len: 7, handler: proc_260 });
    slots[40] = slot(400, ItemKind::Fixed { len: 1, handler: proc_400 });
    slots[41] = slot(295, ItemKind::Immediate { handler: proc_295 });
    slots[47] = slot(0, ItemKind::Immediate { handler: proc_ref });
    slots[48] = slot(0, ItemKind::Immediate { handler: proc_spf });

    Ok(Uap { version: version.to_string(), max_fspec_octets: 7, slots })
}

fn noop_fixed1(_slice: &[u8], _ctx: &mut Adsb) -> DecodeResult<()> {
    Ok(())
}

fn noop_fixed2(_slice: &[u8], _ctx: &mut Adsb) -> DecodeResult<()> {
    Ok(())
}

fn noop_fixed3(_slice: &[u8], _ctx: &mut Adsb) -> DecodeResult<()> {
    Ok(())
}

fn noop_fixed4(_slice: &[u8], _ctx: &mut Adsb) -> DecodeResult<()> {
    Ok(())
}

fn noop_variable(slice: &[u8], consumed: &mut usize, _ctx: &mut Adsb) -> DecodeResult<()> {
    proc_length_prefixed_blob(slice, consumed)
}

fn proc_aircraft_address(slice: &[u8], ctx: &mut Adsb) -> DecodeResult<()> {
    ctx.aircraft_address = Some(make_u32(0, slice[0], slice[1], slice[2]));
    Ok(())
}

fn proc_090_variable(slice: &[u8], consumed: &mut usize, ctx: &mut Adsb) -> DecodeResult<()> {
    if slice.is_empty() {
        return Err(DecodeError::TruncatedItem { need: 1, have: 0 });
    }
    let len = slice.len().min(4);
    proc_090(&slice[..len], ctx)?;
    *consumed = len;
    Ok(())
}

/// Decode one CAT021 data block's record stream.
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
    fn test_rejects_unknown_version() {
        assert!(matches!(build_uap("0.23"), Err(DecodeError::UnknownReferenceVersion(_, 21))));
    }

    #[test]
    fn test_wgs84_std_precision_position() {
        let mut ctx = Adsb::default();
        // lat = +10 deg, lon = -20 deg at 180/2^23 LSB.
        let lat = ((10.0 * TWO_POW_23 / 180.0) as i32).to_be_bytes();
        let lon = ((-20.0 * TWO_POW_23 / 180.0) as i32).to_be_bytes();
        proc_130(&[lat[1], lat[2], lat[3], lon[1], lon[2], lon[3]], &mut ctx).unwrap();
        let pos = ctx.wgs84_position.unwrap();
        assert!(!pos.high_precision);
        assert!((pos.lat_rad.to_degrees() - 10.0).abs() < 1e-3);
        assert!((pos.lon_rad.to_degrees() + 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_high_precision_supersedes_std() {
        let mut ctx = Adsb::default();
        proc_130(&[0x00, 0x00, 0x01, 0x00, 0x00, 0x01], &mut ctx).unwrap();
        assert!(!ctx.wgs84_position.unwrap().high_precision);
        let lat = ((10.0 * TWO_POW_30 / 180.0) as i32).to_be_bytes();
        let lon = ((20.0 * TWO_POW_30 / 180.0) as i32).to_be_bytes();
        proc_131(&[lat[0], lat[1], lat[2], lat[3], lon[0], lon[1], lon[2], lon[3]], &mut ctx)
            .unwrap();
        assert!(ctx.wgs84_position.unwrap().high_precision);
    }

    #[test]
    fn test_track_angle_rate_sign_extends() {
        let mut ctx = Adsb::default();
        // df1 bit1 set (negative), rate field = 0b10 (low 2 bits of df1) << 8 | df2.
        proc_165(&[0x02, 0x01], &mut ctx).unwrap();
        assert!(ctx.track_angle_rate_rad_s.unwrap() < 0.0);
    }

    #[test]
    fn test_bds_registers_zero_repeat_is_empty() {
        let mut ctx = Adsb::default();
        let mut consumed = 0;
        proc_250(&[0x00], &mut consumed, &mut ctx).unwrap();
        assert_eq!(consumed, 1);
        assert!(ctx.bds_registers.is_empty());
    }

    #[test]
    fn test_acas_ra_only_stored_for_bds_30() {
        let mut ctx = Adsb::default();
        proc_260(&[0x10, 0, 0, 0, 0, 0, 0], &mut ctx).unwrap();
        assert!(ctx.acas_resolution_advisory.is_none());
        proc_260(&[0x30, 1, 2, 3, 4, 5, 6], &mut ctx).unwrap();
        assert_eq!(ctx.acas_resolution_advisory, Some(vec![0x30, 1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn test_decode_single_record_sac_sic_and_track_number() {
        // FSPEC: FRN1 (010) and FRN3 (161), both on octet1, FX clear -> 0b1010_0000.
        let mut payload = vec![0b1010_0000u8];
        payload.extend_from_slice(&[0x12, 0x34]); // I021/010
        payload.extend_from_slice(&[0x00, 0x07]); // I021/161
        let mut state = DecoderState::new();
        let mut sink = DebugSink::default();
        decode(&payload, &frame(), "2.4", &mut state, &mut sink).unwrap();
        let SurveillanceObject::Adsb(adsb) = &sink.objects[0] else { panic!("wrong variant") };
        assert_eq!(adsb.common.data_source_identifier, Some(DataSourceId { sac: 0x12, sic: 0x34 }));
        assert_eq!(adsb.track_number, Some(7));
    }
}
