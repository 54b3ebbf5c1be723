//! CAT019 — MLAT system status messages (§4.5, §S6).
//!
//! Grounded on `astx_019.cpp`. Every record is a status message, never a detection; the walker
//! always sets `is_status_message = true` before dispatching FSPEC items, matching the
//! original's unconditional `mlat.is_status_message = TRUE` ahead of its FRN loop.

use crate::asterix::bits::make_u32;
use crate::asterix::envelope::Frame;
use crate::asterix::error::{DecodeOutcome, DecodeResult};
use crate::asterix::item::{ItemDescriptor, ItemKind};
use crate::asterix::model::{DataFormat, DataSourceId, Mlat, SurveillanceObject};
use crate::asterix::sink::Sink;
use crate::asterix::state::DecoderState;
use crate::asterix::walker::{walk_records, Uap};

const CATEGORY: u8 = 19;

fn proc_010(slice: &[u8], ctx: &mut Mlat) -> DecodeResult<()> {
    ctx.common.data_source_identifier = Some(DataSourceId { sac: slice[0], sic: slice[1] });
    Ok(())
}

fn proc_140(slice: &[u8], ctx: &mut Mlat) -> DecodeResult<()> {
    let tod = make_u32(0, slice[0], slice[1], slice[2]);
    ctx.detection_time = Some(tod as f64 / 128.0);
    Ok(())
}

fn proc_550(slice: &[u8], ctx: &mut Mlat) -> DecodeResult<()> {
    let nogo = (slice[0] >> 6) & 0x03;
    ctx.system_status = Some(nogo);
    Ok(())
}

fn build_uap() -> Uap<Mlat> {
    Uap {
        version: "std".to_string(),
        max_fspec_octets: 2,
        slots: vec![
            Some(ItemDescriptor { category: CATEGORY, item: 10, kind: ItemKind::Fixed { len: 2, handler: proc_010 } }),
            Some(ItemDescriptor { category: CATEGORY, item: 140, kind: ItemKind::Fixed { len: 3, handler: proc_140 } }),
            None,
            None,
            None,
            Some(ItemDescriptor { category: CATEGORY, item: 550, kind: ItemKind::Fixed { len: 1, handler: proc_550 } }),
        ],
    }
}

/// Decode one CAT019 data block's record stream.
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
        Mlat::default,
        |mut mlat| {
            mlat.is_status_message = true;
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
    fn test_every_record_flagged_status_message() {
        let payload = vec![0x80, 0x01, 0x02];
        let mut state = DecoderState::new();
        let mut sink = DebugSink::default();
        decode(&payload, &frame(), &mut state, &mut sink).unwrap();
        let SurveillanceObject::Mlat(mlat) = &sink.objects[0] else { panic!("wrong variant") };
        assert!(mlat.is_status_message);
    }

    #[test]
    fn test_system_status_nogo_field() {
        let mut ctx = Mlat::default();
        proc_550(&[0b1100_0000], &mut ctx).unwrap();
        assert_eq!(ctx.system_status, Some(3));
    }

    #[test]
    fn test_time_of_day_decoded() {
        let mut ctx = Mlat::default();
        proc_140(&[0x00, 0x00, 0x80], &mut ctx).unwrap();
        assert_eq!(ctx.detection_time, Some(1.0));
    }
}
