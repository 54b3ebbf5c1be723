//! CAT001 (monoradar plots, legacy) and CAT002 (monoradar sector/status messages), folded into
//! one module since they share a single physical sensor and the original ports keep them
//! side by side for the same reason (§4.5's "legacy" bracket).
//!
//! No `astx_001.cpp`/`astx_002.cpp` exists in the reference sources; CAT001's plot items
//! (SAC/SIC, target report descriptor, polar position, Mode-3/A, Mode-C height) are grounded
//! on `cat016.rs`'s own bodies, which the spec explicitly calls out as carrying this
//! convention ("Mode-3/A and Mode-C values by convention (see CAT016 handler)"). CAT002's
//! sector/status items have no counterpart elsewhere in this crate and are grounded on the
//! shared `RadarService` model shape instead.

use crate::asterix::bits::{make_u16, sign_extend16};
use crate::asterix::envelope::Frame;
use crate::asterix::error::{DecodeOutcome, DecodeResult};
use crate::asterix::item::{ItemDescriptor, ItemKind};
use crate::asterix::model::{
    DataFormat, DataSourceId, DetectionType, Mode3A, ModeCHeight, PolarPosition, RadarService,
    RadarTarget, SurveillanceObject, TriBool,
};
use crate::asterix::sink::Sink;
use crate::asterix::state::DecoderState;
use crate::asterix::walker::{walk_records, Uap};

const CAT001: u8 = 1;
const CAT002: u8 = 2;
const NMI_TO_M: f64 = 1_852.0;
const FT_TO_M: f64 = 0.3048;

fn proc001_010(slice: &[u8], ctx: &mut RadarTarget) -> DecodeResult<()> {
    ctx.common.data_source_identifier = Some(DataSourceId { sac: slice[0], sic: slice[1] });
    Ok(())
}

/// Target Report Descriptor. The "code invalid" bit suppresses storage of Mode-3/A and
/// Mode-C, per the shared CAT001/002/CAT016 convention the spec names.
fn proc001_020(slice: &[u8], ctx: &mut RadarTarget) -> DecodeResult<()> {
    let dfo = slice[0];
    ctx.detection_type = Some(DetectionType {
        is_track: false,
        simulated: TriBool::from_bit(dfo & 0x80 != 0),
        test_target: TriBool::from_bit(dfo & 0x02 != 0),
        from_fixed_field_transponder: TriBool::Undefined,
        spi: TriBool::from_bit(dfo & 0x01 != 0),
    });
    Ok(())
}

fn proc001_040(slice: &[u8], ctx: &mut RadarTarget) -> DecodeResult<()> {
    let rho = make_u16(slice[0], slice[1]);
    let theta = make_u16(slice[2], slice[3]);
    ctx.polar_position = Some(PolarPosition {
        rho_m: (NMI_TO_M / 128.0) * rho as f64,
        theta_rad: (std::f64::consts::TAU / 65_536.0) * theta as f64,
    });
    Ok(())
}

fn proc001_030(slice: &[u8], ctx: &mut RadarTarget) -> DecodeResult<()> {
    let df1 = slice[0];
    let df2 = slice[1];
    let code = make_u16(df1 & 0x0f, df2);
    if df1 & 0x80 == 0 {
        ctx.mode_3a = Some(Mode3A {
            code,
            invalid: TriBool::False,
            garbled: TriBool::from_bit(df1 & 0x40 != 0),
            smoothed: TriBool::from_bit(df1 & 0x20 != 0),
        });
    }
    Ok(())
}

fn proc001_060(slice: &[u8], ctx: &mut RadarTarget) -> DecodeResult<()> {
    let df1 = slice[0];
    let df2 = slice[1];
    if df1 & 0x80 != 0 {
        return Ok(());
    }
    let raw13 = (((df1 & 0x1f) as u16) << 8) | df2 as u16;
    let fl = sign_extend16(raw13, 13);
    ctx.mode_c_height = Some(ModeCHeight {
        value_m: 25.0 * FT_TO_M * fl as f64,
        value_ft: 25 * fl as i32,
        garbled: TriBool::from_bit(df1 & 0x40 != 0),
        invalid: TriBool::False,
    });
    Ok(())
}

fn slot001(item: u16, kind: ItemKind<RadarTarget>) -> Option<ItemDescriptor<RadarTarget>> {
    Some(ItemDescriptor { category: CAT001, item, kind })
}

fn build_uap001() -> Uap<RadarTarget> {
    let mut slots: Vec<Option<ItemDescriptor<RadarTarget>>> = vec![None; 8];
    slots[0] = slot001(10, ItemKind::Fixed { len: 2, handler: proc001_010 });
    slots[1] = slot001(20, ItemKind::Extended { handler: proc001_020 });
    slots[2] = slot001(70, ItemKind::Fixed { len: 2, handler: proc001_030 });
    slots[3] = slot001(90, ItemKind::Fixed { len: 2, handler: proc001_060 });
    slots[6] = slot001(40, ItemKind::Fixed { len: 4, handler: proc001_040 });

    Uap { version: "std".to_string(), max_fspec_octets: 1, slots }
}

/// Decode one CAT001 data block's record stream.
pub fn decode_cat001(
    payload: &[u8],
    frame: &Frame,
    state: &mut DecoderState,
    sink: &mut dyn Sink,
) -> DecodeResult<()> {
    let uap = build_uap001();
    walk_records(
        CAT001,
        payload,
        &uap,
        RadarTarget::default,
        |mut rtgt| {
            rtgt.common.asterix_category = CAT001;
            rtgt.common.data_format = DataFormat::Asterix;
            rtgt.common.frame_date = frame.date;
            rtgt.common.frame_time = frame.time_of_day;
            rtgt.common.line_number = frame.line.map(|l| l as u8);

            if let Some(id) = rtgt.common.data_source_identifier {
                state.remember_sacsic(CAT001, id);
            } else {
                rtgt.common.data_source_identifier = state.last_sacsic(CAT001);
            }

            sink.accept(SurveillanceObject::RadarTarget(rtgt))
        },
    )
}

fn proc002_010(slice: &[u8], ctx: &mut RadarService) -> DecodeResult<()> {
    ctx.common.data_source_identifier = Some(DataSourceId { sac: slice[0], sic: slice[1] });
    Ok(())
}

fn proc002_000(slice: &[u8], ctx: &mut RadarService) -> DecodeResult<()> {
    ctx.message_type = Some(slice[0]);
    Ok(())
}

fn proc002_020(slice: &[u8], ctx: &mut RadarService) -> DecodeResult<()> {
    ctx.sector_number = Some(slice[0]);
    Ok(())
}

fn proc002_030(slice: &[u8], ctx: &mut RadarService) -> DecodeResult<()> {
    let tod = crate::asterix::bits::make_u32(0, slice[0], slice[1], slice[2]);
    ctx.time_of_message = Some(tod as f64 / 128.0);
    Ok(())
}

fn proc002_050(slice: &[u8], ctx: &mut RadarService) -> DecodeResult<()> {
    ctx.status_words.push(make_u16(slice[0], slice[1]));
    Ok(())
}

fn slot002(item: u16, kind: ItemKind<RadarService>) -> Option<ItemDescriptor<RadarService>> {
    Some(ItemDescriptor { category: CAT002, item, kind })
}

fn build_uap002() -> Uap<RadarService> {
    let mut slots: Vec<Option<ItemDescriptor<RadarService>>> = vec![None; 8];
    slots[0] = slot002(10, ItemKind::Fixed { len: 2, handler: proc002_010 });
    slots[1] = slot002(0, ItemKind::Fixed { len: 1, handler: proc002_000 });
    slots[2] = slot002(20, ItemKind::Fixed { len: 1, handler: proc002_020 });
    slots[3] = slot002(30, ItemKind::Fixed { len: 3, handler: proc002_030 });
    slots[6] = slot002(50, ItemKind::Fixed { len: 2, handler: proc002_050 });

    Uap { version: "std".to_string(), max_fspec_octets: 1, slots }
}

/// Decode one CAT002 data block's record stream.
pub fn decode_cat002(
    payload: &[u8],
    frame: &Frame,
    state: &mut DecoderState,
    sink: &mut dyn Sink,
) -> DecodeResult<()> {
    let uap = build_uap002();
    walk_records(
        CAT002,
        payload,
        &uap,
        RadarService::default,
        |mut svc| {
            svc.common.asterix_category = CAT002;
            svc.common.data_format = DataFormat::Asterix;
            svc.common.frame_date = frame.date;
            svc.common.frame_time = frame.time_of_day;
            svc.common.line_number = frame.line.map(|l| l as u8);

            if let Some(id) = svc.common.data_source_identifier {
                state.remember_sacsic(CAT002, id);
            } else {
                svc.common.data_source_identifier = state.last_sacsic(CAT002);
            }

            sink.accept(SurveillanceObject::RadarService(svc))
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
    fn test_cat001_mode_c_suppressed_on_invalid() {
        let mut ctx = RadarTarget::default();
        proc001_060(&[0x80, 0x00], &mut ctx).unwrap();
        assert!(ctx.mode_c_height.is_none());
    }

    #[test]
    fn test_cat002_sector_message() {
        // FSPEC 0xE0: FRN1,2,3 set, FX clear.
        let mut payload = vec![0xE0u8];
        payload.extend_from_slice(&[0x01, 0x02]); // I002/010
        payload.push(3); // I002/000 message type
        payload.push(180); // I002/020 sector number
        let mut state = DecoderState::new();
        let mut sink = DebugSink::default();
        decode_cat002(&payload, &frame(), &mut state, &mut sink).unwrap();
        let SurveillanceObject::RadarService(svc) = &sink.objects[0] else { panic!("wrong variant") };
        assert_eq!(svc.message_type, Some(3));
        assert_eq!(svc.sector_number, Some(180));
        assert_eq!(svc.common.data_source_identifier, Some(DataSourceId { sac: 1, sic: 2 }));
    }
}
