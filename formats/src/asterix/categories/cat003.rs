//! CAT003 — system (fused) track messages (§4.5).
//!
//! Grounded on `astx_003.cpp`. FRN20 (SPF) and FRN21 (RFS) are distinct, non-aliased
//! descriptors here (unlike some deployed editions that conflate the two); RFS recurses
//! through [`crate::asterix::item::ItemKind::Rfs`].

use crate::asterix::bits::make_u16;
use crate::asterix::envelope::Frame;
use crate::asterix::error::{DecodeError, DecodeOutcome, DecodeResult};
use crate::asterix::item::{ItemDescriptor, ItemKind};
use crate::asterix::model::{
    CartesianPosition, DataFormat, DataSourceId, GroundVector, Mode3A, SurveillanceObject,
    SystemTrack, TriBool, VerticalRate,
};
use crate::asterix::sink::Sink;
use crate::asterix::state::DecoderState;
use crate::asterix::walker::{walk_records, Uap};

const CATEGORY: u8 = 3;
const NMI_TO_M: f64 = 1_852.0;
const FL_TO_M: f64 = 30.48;

fn proc_010(slice: &[u8], ctx: &mut SystemTrack) -> DecodeResult<()> {
    ctx.common.data_source_identifier = Some(DataSourceId { sac: slice[0], sic: slice[1] });
    Ok(())
}

fn proc_020(slice: &[u8], ctx: &mut SystemTrack) -> DecodeResult<()> {
    let x = make_u16(slice[0], slice[1]) as i16;
    let y = make_u16(slice[2], slice[3]) as i16;
    ctx.calculated_position = Some(CartesianPosition {
        x_m: (NMI_TO_M / 64.0) * x as f64,
        y_m: (NMI_TO_M / 64.0) * y as f64,
    });
    Ok(())
}

fn proc_040(slice: &[u8], ctx: &mut SystemTrack) -> DecodeResult<()> {
    let df1 = slice[0];
    let df2 = slice[1];
    ctx.mode_3a = Some(Mode3A {
        code: make_u16(df1 & 0x0f, df2),
        invalid: TriBool::from_bit(df1 & 0x80 != 0),
        garbled: TriBool::from_bit(df1 & 0x40 != 0),
        smoothed: TriBool::Undefined,
    });
    Ok(())
}

fn proc_070(slice: &[u8], ctx: &mut SystemTrack) -> DecodeResult<()> {
    ctx.track_number = Some(make_u16(slice[0] & 0x0f, slice[1]));
    Ok(())
}

fn proc_080(slice: &[u8], ctx: &mut SystemTrack) -> DecodeResult<()> {
    let octet0 = slice[0];
    let octet1 = if slice.len() > 1 { slice[1] } else { 0 };
    ctx.track_status_raw = Some(((octet0 as u32) << 8) | octet1 as u32);
    Ok(())
}

fn proc_120(slice: &[u8], ctx: &mut SystemTrack) -> DecodeResult<()> {
    let spd = make_u16(slice[0], slice[1]);
    let hdg = make_u16(slice[2], slice[3]);
    ctx.ground_vector = Some(GroundVector {
        value_gsp: (NMI_TO_M / 16_384.0) * spd as f64,
        value_hdg: (std::f64::consts::TAU / 65_536.0) * hdg as f64,
        range_exceeded: TriBool::Undefined,
    });
    Ok(())
}

fn proc_140(slice: &[u8], ctx: &mut SystemTrack) -> DecodeResult<()> {
    let rate = make_u16(slice[0], slice[1]) as i16;
    ctx.climb_rate = Some(VerticalRate {
        value: (FL_TO_M / 1024.0) * rate as f64,
        range_exceeded: TriBool::Undefined,
    });
    Ok(())
}

/// Items the original lists but never stores (track quality, attitude/intention, callsign,
/// current control position, cleared flight level, track category): consumed for their fixed
/// length, nothing recorded.
fn proc_noop(_slice: &[u8], _ctx: &mut SystemTrack) -> DecodeResult<()> {
    Ok(())
}

fn proc_variable_noop(slice: &[u8], consumed: &mut usize, _ctx: &mut SystemTrack) -> DecodeResult<()> {
    // I003/150 (Track Quality): an FX-extensible item of otherwise unstored content.
    let mut end = 0usize;
    loop {
        if end >= slice.len() {
            return Err(DecodeError::TruncatedItem { need: end + 1, have: slice.len() });
        }
        let continues = slice[end] & 0x01 != 0;
        end += 1;
        if !continues {
            break;
        }
    }
    *consumed = end;
    Ok(())
}

fn proc_spf(slice: &[u8], consumed: &mut usize, _ctx: &mut SystemTrack) -> DecodeResult<()> {
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

fn slot(item: u16, kind: ItemKind<SystemTrack>) -> Option<ItemDescriptor<SystemTrack>> {
    Some(ItemDescriptor { category: CATEGORY, item, kind })
}

fn build_uap() -> Uap<SystemTrack> {
    let mut slots: Vec<Option<ItemDescriptor<SystemTrack>>> = vec![None; 21];
    slots[0] = slot(10, ItemKind::Fixed { len: 2, handler: proc_010 });
    slots[1] = slot(70, ItemKind::Fixed { len: 2, handler: proc_070 });
    slots[2] = slot(20, ItemKind::Fixed { len: 4, handler: proc_020 });
    slots[3] = slot(120, ItemKind::Fixed { len: 4, handler: proc_120 });
    slots[4] = slot(50, ItemKind::Fixed { len: 2, handler: proc_noop });
    slots[5] = slot(80, ItemKind::Extended { handler: proc_080 });
    slots[6] = slot(150, ItemKind::Compound { handler: proc_variable_noop });
    slots[7] = slot(140, ItemKind::Fixed { len: 2, handler: proc_140 });
    slots[8] = slot(130, ItemKind::Fixed { len: 1, handler: proc_noop });
    slots[9] = slot(160, ItemKind::Fixed { len: 7, handler: proc_noop });
    slots[10] = slot(40, ItemKind::Fixed { len: 2, handler: proc_040 });
    slots[11] = slot(170, ItemKind::Fixed { len: 1, handler: proc_noop });
    slots[12] = slot(180, ItemKind::Fixed { len: 2, handler: proc_noop });
    slots[13] = slot(90, ItemKind::Fixed { len: 1, handler: proc_noop });
    slots[19] = slot(0, ItemKind::Immediate { handler: proc_spf });
    slots[20] = Some(ItemDescriptor { category: CATEGORY, item: 0, kind: ItemKind::Rfs });

    Uap { version: "std".to_string(), max_fspec_octets: 3, slots }
}

/// Decode one CAT003 data block's record stream.
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
        SystemTrack::default,
        |mut strk| {
            strk.common.asterix_category = CATEGORY;
            strk.common.data_format = DataFormat::Asterix;
            strk.common.frame_date = frame.date;
            strk.common.frame_time = frame.time_of_day;
            strk.common.line_number = frame.line.map(|l| l as u8);

            if let Some(id) = strk.common.data_source_identifier {
                state.remember_sacsic(CATEGORY, id);
            } else {
                strk.common.data_source_identifier = state.last_sacsic(CATEGORY);
            }

            sink.accept(SurveillanceObject::SystemTrack(strk))
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
    fn test_calculated_position_scales_to_metres() {
        let mut ctx = SystemTrack::default();
        // x = 64 (1/64 nmi units) => 1 nmi => 1852 m.
        let x = 64i16.to_be_bytes();
        let y = 0i16.to_be_bytes();
        proc_020(&[x[0], x[1], y[0], y[1]], &mut ctx).unwrap();
        let pos = ctx.calculated_position.unwrap();
        assert!((pos.x_m - 1852.0).abs() < 1e-9);
    }

    #[test]
    fn test_mode_3a_decoded() {
        let mut ctx = SystemTrack::default();
        proc_040(&[0x01, 0x23], &mut ctx).unwrap();
        assert_eq!(ctx.mode_3a.unwrap().code, 0x123);
    }

    #[test]
    fn test_empty_record_is_skipped() {
        let payload = [0x00];
        let mut state = DecoderState::new();
        let mut sink = DebugSink::default();
        decode(&payload, &frame(), &mut state, &mut sink).unwrap();
        assert!(sink.objects.is_empty());
    }

    #[test]
    fn test_rfs_recurses_into_track_number_and_sac_sic() {
        // FSPEC: FRN21 (RFS) alone. bit layout: FRN1..7 on octet1, FRN21 needs 3 octets.
        // octet1=0x01(FX), octet2=0x01(FX), octet3=0b0000_0010 (bit1 -> FRN7+14=21), FX=0.
        let mut payload = vec![0x01, 0x01, 0x02];
        payload.push(0x02); // RFS: n=2 pairs
        payload.push(1); // FRN1 -> I003/010
        payload.extend_from_slice(&[0x12, 0x34]);
        payload.push(2); // FRN2 -> I003/070
        payload.extend_from_slice(&[0x00, 0x07]);
        let mut state = DecoderState::new();
        let mut sink = DebugSink::default();
        decode(&payload, &frame(), &mut state, &mut sink).unwrap();
        let SurveillanceObject::SystemTrack(strk) = &sink.objects[0] else { panic!("wrong variant") };
        assert_eq!(strk.common.data_source_identifier, Some(DataSourceId { sac: 0x12, sic: 0x34 }));
        assert_eq!(strk.track_number, Some(7));
    }
}
