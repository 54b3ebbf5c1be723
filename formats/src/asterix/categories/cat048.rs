//! CAT048 — monoradar target reports (§4.5). CAT016 is a variant of this category's shape;
//! this module carries the fuller item set (ground vector, aircraft address, callsign, radar
//! plot characteristics) that CAT016 only partially implements.
//!
//! No `astx_048.cpp` exists in the reference sources, so this handler is grounded on
//! `cat016.rs`'s own item bodies (SAC/SIC, target report descriptor, polar position, Mode-3/A,
//! Mode-C height, track number all share CAT016's exact wire layout) plus `astx_021.cpp`'s
//! I021/170 callsign decoding for I048/240, which uses the same 6-bit-char alphabet.

use crate::asterix::bits::{make_u16, make_u32, sign_extend16, unpack_6bit_chars};
use crate::asterix::envelope::Frame;
use crate::asterix::error::{DecodeError, DecodeOutcome, DecodeResult};
use crate::asterix::item::{ItemDescriptor, ItemKind};
use crate::asterix::model::{
    DataFormat, DataSourceId, DetectionType, GroundVector, Mode3A, ModeCHeight, PolarPosition,
    RadarTarget, SurveillanceObject, TargetIdentification, TriBool,
};
use crate::asterix::sink::Sink;
use crate::asterix::state::DecoderState;
use crate::asterix::walker::{walk_records, Uap};

const CATEGORY: u8 = 48;
const NMI_TO_M: f64 = 1_852.0;
const FT_TO_M: f64 = 0.3048;

fn proc_010(slice: &[u8], ctx: &mut RadarTarget) -> DecodeResult<()> {
    ctx.common.data_source_identifier = Some(DataSourceId { sac: slice[0], sic: slice[1] });
    Ok(())
}

fn proc_020(slice: &[u8], ctx: &mut RadarTarget) -> DecodeResult<()> {
    let dfo = slice[0];
    let mut dt = DetectionType {
        is_track: false,
        simulated: TriBool::from_bit(dfo & 0x40 != 0),
        test_target: TriBool::from_bit(dfo & 0x08 != 0),
        from_fixed_field_transponder: TriBool::from_bit(dfo & 0x02 != 0),
        spi: TriBool::from_bit(dfo & 0x04 != 0),
    };
    if dfo & 0x01 != 0 && slice.len() > 1 {
        dt.spi = TriBool::from_bit(slice[1] & 0x02 != 0);
    }
    ctx.detection_type = Some(dt);
    Ok(())
}

fn proc_040(slice: &[u8], ctx: &mut RadarTarget) -> DecodeResult<()> {
    let rho = make_u16(slice[0], slice[1]);
    let theta = make_u16(slice[2], slice[3]);
    ctx.polar_position = Some(PolarPosition {
        rho_m: (NMI_TO_M / 256.0) * rho as f64,
        theta_rad: (std::f64::consts::TAU / 65_536.0) * theta as f64,
    });
    Ok(())
}

fn proc_070(slice: &[u8], ctx: &mut RadarTarget) -> DecodeResult<()> {
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

/// Mode-C / flight level. Suppresses storage when the invalid bit is set, matching CAT016's
/// I016/090 convention (§9 design note flags CAT021/145 as the one that does not).
fn proc_090(slice: &[u8], ctx: &mut RadarTarget) -> DecodeResult<()> {
    let df1 = slice[0];
    let df2 = slice[1];
    if df1 & 0x80 != 0 {
        return Ok(());
    }
    let raw14 = (((df1 & 0x3f) as u16) << 8) | df2 as u16;
    let fl = sign_extend16(raw14, 14);
    ctx.mode_c_height = Some(ModeCHeight {
        value_m: 25.0 * FT_TO_M * fl as f64,
        value_ft: 25 * fl as i32,
        garbled: TriBool::from_bit(df1 & 0x40 != 0),
        invalid: TriBool::False,
    });
    Ok(())
}

/// Radar Plot Characteristics: an FX-style presence-bitmap compound item. Consumed for its
/// correct wire length, no model field — this category's position/velocity fields already
/// carry the information a downstream consumer needs.
fn proc_130(slice: &[u8], consumed: &mut usize, _ctx: &mut RadarTarget) -> DecodeResult<()> {
    if slice.is_empty() {
        return Err(DecodeError::TruncatedItem { need: 1, have: 0 });
    }
    let df1 = slice[0];
    let mut len = 1usize;
    for bit in (1..8).rev() {
        if df1 & (1 << bit) != 0 {
            len += 1;
        }
    }
    if slice.len() < len {
        return Err(DecodeError::TruncatedItem { need: len, have: slice.len() });
    }
    *consumed = len;
    Ok(())
}

fn proc_161(slice: &[u8], ctx: &mut RadarTarget) -> DecodeResult<()> {
    ctx.track_number = Some(make_u16(slice[0] & 0x0f, slice[1]));
    Ok(())
}

fn proc_200(slice: &[u8], ctx: &mut RadarTarget) -> DecodeResult<()> {
    let gsp = make_u16(slice[0], slice[1]);
    let hdg = make_u16(slice[2], slice[3]);
    ctx.ground_vector = Some(GroundVector {
        value_gsp: (NMI_TO_M / 16_384.0) * gsp as f64,
        value_hdg: (360.0 / 65_536.0) * hdg as f64 * std::f64::consts::PI / 180.0,
        range_exceeded: TriBool::Undefined,
    });
    Ok(())
}

fn proc_220(slice: &[u8], ctx: &mut RadarTarget) -> DecodeResult<()> {
    ctx.aircraft_address = Some(make_u32(0, slice[0], slice[1], slice[2]));
    Ok(())
}

fn proc_240(slice: &[u8], ctx: &mut RadarTarget) -> DecodeResult<()> {
    let callsign = unpack_6bit_chars(slice);
    ctx.target_identification = Some(TargetIdentification { callsign });
    Ok(())
}

fn slot(item: u16, kind: ItemKind<RadarTarget>) -> Option<ItemDescriptor<RadarTarget>> {
    Some(ItemDescriptor { category: CATEGORY, item, kind })
}

fn build_uap() -> Uap<RadarTarget> {
    let mut slots: Vec<Option<ItemDescriptor<RadarTarget>>> = vec![None; 28];
    slots[0] = slot(10, ItemKind::Fixed { len: 2, handler: proc_010 });
    slots[1] = slot(140, ItemKind::Fixed { len: 3, handler: |_, _| Ok(()) });
    slots[2] = slot(20, ItemKind::Extended { handler: proc_020 });
    slots[3] = slot(40, ItemKind::Fixed { len: 4, handler: proc_040 });
    slots[4] = slot(70, ItemKind::Fixed { len: 2, handler: proc_070 });
    slots[5] = slot(90, ItemKind::Fixed { len: 2, handler: proc_090 });
    slots[6] = slot(130, ItemKind::Compound { handler: proc_130 });
    slots[7] = slot(220, ItemKind::Fixed { len: 3, handler: proc_220 });
    slots[8] = slot(240, ItemKind::Fixed { len: 6, handler: proc_240 });
    // FRN10 (I048/250, BDS register data) and FRN12 (I048/042, Cartesian position) are
    // "tba" here same as several CAT021 items: no model field fits them yet.
    slots[10] = slot(161, ItemKind::Fixed { len: 2, handler: proc_161 });
    slots[12] = slot(200, ItemKind::Fixed { len: 4, handler: proc_200 });

    Uap { version: "std".to_string(), max_fspec_octets: 4, slots }
}

/// Decode one CAT048 data block's record stream.
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
        RadarTarget::default,
        |mut rtgt| {
            rtgt.common.asterix_category = CATEGORY;
            rtgt.common.data_format = DataFormat::Asterix;
            rtgt.common.frame_date = frame.date;
            rtgt.common.frame_time = frame.time_of_day;
            rtgt.common.line_number = frame.line.map(|l| l as u8);

            if let Some(id) = rtgt.common.data_source_identifier {
                state.remember_sacsic(CATEGORY, id);
            } else {
                rtgt.common.data_source_identifier = state.last_sacsic(CATEGORY);
            }

            sink.accept(SurveillanceObject::RadarTarget(rtgt))
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
    fn test_minimal_plot_sac_sic_and_category() {
        // FSPEC octet 0x80: FRN1 (I048/010) only, FX clear.
        let mut payload = vec![0x80u8];
        payload.extend_from_slice(&[0x12, 0x34]);
        let mut state = DecoderState::new();
        let mut sink = DebugSink::default();
        decode(&payload, &frame(), &mut state, &mut sink).unwrap();
        let SurveillanceObject::RadarTarget(rtgt) = &sink.objects[0] else { panic!("wrong variant") };
        assert_eq!(rtgt.common.asterix_category, 48);
        assert_eq!(rtgt.common.data_source_identifier, Some(DataSourceId { sac: 0x12, sic: 0x34 }));
    }

    #[test]
    fn test_mode_c_height_suppressed_on_invalid_bit() {
        let mut ctx = RadarTarget::default();
        proc_090(&[0x80, 0x00], &mut ctx).unwrap();
        assert!(ctx.mode_c_height.is_none());
    }

    #[test]
    fn test_callsign_decodes_6bit_chars() {
        let mut ctx = RadarTarget::default();
        // "AB      " packed as 8 six-bit ICAO chars (A=0x01, B=0x02, space=0x20), trailing
        // spaces trimmed by `unpack_6bit_chars`.
        proc_240(&[0x04, 0x28, 0x20, 0x82, 0x08, 0x20], &mut ctx).unwrap();
        assert_eq!(ctx.target_identification.unwrap().callsign, "AB");
    }
}
