//! CAT065 — SDPS (surveillance data processing system) service status messages (§4.5).
//!
//! No `astx_065.cpp` exists in the reference sources; grounded on `cat019.rs`'s
//! status-message shape (every record a `RadarService`, not a detection) and CAT002's
//! sector/status item bodies for the shared encodings (message type, SAC/SIC, time of day).

use crate::asterix::bits::make_u32;
use crate::asterix::envelope::Frame;
use crate::asterix::error::{DecodeOutcome, DecodeResult};
use crate::asterix::item::{ItemDescriptor, ItemKind};
use crate::asterix::model::{DataFormat, DataSourceId, RadarService, SurveillanceObject};
use crate::asterix::sink::Sink;
use crate::asterix::state::DecoderState;
use crate::asterix::walker::{walk_records, Uap};

const CATEGORY: u8 = 65;

fn proc_000(slice: &[u8], ctx: &mut RadarService) -> DecodeResult<()> {
    ctx.message_type = Some(slice[0]);
    Ok(())
}

fn proc_010(slice: &[u8], ctx: &mut RadarService) -> DecodeResult<()> {
    ctx.common.data_source_identifier = Some(DataSourceId { sac: slice[0], sic: slice[1] });
    Ok(())
}

/// Service Identification. No dedicated model field; consumed for length only.
fn proc_015(slice: &[u8], _ctx: &mut RadarService) -> DecodeResult<()> {
    let _service_id = slice[0];
    Ok(())
}

/// Batch Number. No dedicated model field; consumed for length only.
fn proc_020(slice: &[u8], _ctx: &mut RadarService) -> DecodeResult<()> {
    let _batch = slice[0];
    Ok(())
}

fn proc_030(slice: &[u8], ctx: &mut RadarService) -> DecodeResult<()> {
    let tod = make_u32(0, slice[0], slice[1], slice[2]);
    ctx.time_of_message = Some(tod as f64 / 128.0);
    Ok(())
}

fn proc_040(slice: &[u8], ctx: &mut RadarService) -> DecodeResult<()> {
    let raw = u16::from_be_bytes([slice[0], slice[1]]);
    ctx.antenna_azimuth_rad = Some((360.0 / 65_536.0) * raw as f64 * std::f64::consts::PI / 180.0);
    Ok(())
}

fn proc_050(slice: &[u8], ctx: &mut RadarService) -> DecodeResult<()> {
    ctx.status_words.push(u16::from_be_bytes([slice[0], slice[1]]));
    Ok(())
}

fn slot(item: u16, kind: ItemKind<RadarService>) -> Option<ItemDescriptor<RadarService>> {
    Some(ItemDescriptor { category: CATEGORY, item, kind })
}

fn build_uap() -> Uap<RadarService> {
    let mut slots: Vec<Option<ItemDescriptor<RadarService>>> = vec![None; 6];
    slots[0] = slot(10, ItemKind::Fixed { len: 2, handler: proc_010 });
    slots[1] = slot(0, ItemKind::Fixed { len: 1, handler: proc_000 });
    slots[2] = slot(15, ItemKind::Fixed { len: 1, handler: proc_015 });
    slots[3] = slot(30, ItemKind::Fixed { len: 3, handler: proc_030 });
    slots[4] = slot(20, ItemKind::Fixed { len: 1, handler: proc_020 });
    slots[5] = slot(40, ItemKind::Fixed { len: 2, handler: proc_040 });

    Uap { version: "std".to_string(), max_fspec_octets: 1, slots }
}

/// Decode one CAT065 data block's record stream. Every record is a service/status message,
/// never a detection.
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
        RadarService::default,
        |mut svc| {
            svc.common.asterix_category = CATEGORY;
            svc.common.data_format = DataFormat::Asterix;
            svc.common.frame_date = frame.date;
            svc.common.frame_time = frame.time_of_day;
            svc.common.line_number = frame.line.map(|l| l as u8);

            if let Some(id) = svc.common.data_source_identifier {
                state.remember_sacsic(CATEGORY, id);
            } else {
                svc.common.data_source_identifier = state.last_sacsic(CATEGORY);
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
    fn test_status_message_decodes() {
        // FSPEC 0xC0: FRN1 (010), FRN2 (000), FX clear.
        let mut payload = vec![0xC0u8];
        payload.extend_from_slice(&[0x08, 0xC8]);
        payload.push(3);
        let mut state = DecoderState::new();
        let mut sink = DebugSink::default();
        decode(&payload, &frame(), &mut state, &mut sink).unwrap();
        let SurveillanceObject::RadarService(svc) = &sink.objects[0] else { panic!("wrong variant") };
        assert_eq!(svc.common.data_source_identifier, Some(DataSourceId { sac: 0x08, sic: 0xC8 }));
        assert_eq!(svc.message_type, Some(3));
    }
}
