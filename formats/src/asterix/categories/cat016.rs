//! CAT016 — monoradar track/plot data, a variant of CAT048 (§4.5).
//!
//! Grounded on `astx_016.cpp`. Implements the SAC/SIC-propagation and Mode-C invalid-bit
//! suppression conventions that CAT001/002 and CAT048 share.

use crate::asterix::bits::{make_u16, sign_extend16};
use crate::asterix::envelope::Frame;
use crate::asterix::error::{DecodeOutcome, DecodeResult};
use crate::asterix::item::{ItemDescriptor, ItemKind};
use crate::asterix::model::{
    DataFormat, DataSourceId, DetectionType, Mode3A, ModeCHeight, PolarPosition, RadarTarget,
    SurveillanceObject, TriBool,
};
use crate::asterix::sink::Sink;
use crate::asterix::state::DecoderState;
use crate::asterix::walker::{walk_records, Uap};

const CATEGORY: u8 = 16;
const NMI_TO_M: f64 = 1_852.0;
const FT_TO_M: f64 = 0.3048;

fn proc_010(slice: &[u8], ctx: &mut RadarTarget) -> DecodeResult<()> {
    let id = DataSourceId { sac: slice[0], sic: slice[1] };
    ctx.common.data_source_identifier = Some(id);
    Ok(())
}

fn proc_020(slice: &[u8], ctx: &mut RadarTarget) -> DecodeResult<()> {
    let dfo = slice[0];
    let mut dt = DetectionType {
        is_track: dfo & 0x80 != 0,
        simulated: TriBool::from_bit(dfo & 0x40 != 0),
        test_target: TriBool::Undefined,
        from_fixed_field_transponder: TriBool::from_bit(dfo & 0x02 != 0),
        spi: TriBool::from_bit(dfo & 0x04 != 0),
    };
    if slice.len() > 1 {
        dt.test_target = TriBool::from_bit(slice[1] & 0x80 != 0);
    }
    ctx.detection_type = Some(dt);
    Ok(())
}

fn proc_040(slice: &[u8], ctx: &mut RadarTarget) -> DecodeResult<()> {
    let rho = make_u16(slice[0], slice[1]);
    let theta = make_u16(slice[2], slice[3]);
    ctx.polar_position = Some(PolarPosition {
        rho_m: (NMI_TO_M / 128.0) * rho as f64,
        theta_rad: (std::f64::consts::TAU / 65_536.0) * theta as f64,
    });
    Ok(())
}

fn proc_070(slice: &[u8], ctx: &mut RadarTarget) -> DecodeResult<()> {
    let df1 = slice[0];
    let df2 = slice[1];
    let m3c = make_u16(df1 & 0x0f, df2);
    if m3c != 0 && df1 & 0x80 == 0 {
        ctx.mode_3a = Some(Mode3A {
            code: m3c,
            invalid: TriBool::from_bit(df1 & 0x80 != 0),
            garbled: TriBool::from_bit(df1 & 0x40 != 0),
            smoothed: TriBool::from_bit(df1 & 0x20 != 0),
        });
    }
    Ok(())
}

fn proc_090(slice: &[u8], ctx: &mut RadarTarget) -> DecodeResult<()> {
    let df1 = slice[0];
    let df2 = slice[1];
    let raw13 = (((df1 & 0x1f) as u16) << 8) | df2 as u16;
    let mch = sign_extend16(raw13, 13);
    if mch != 0 && df1 & 0x80 == 0 {
        ctx.mode_c_height = Some(ModeCHeight {
            value_m: 25.0 * FT_TO_M * mch as f64,
            value_ft: 25 * mch as i32,
            garbled: TriBool::from_bit(df1 & 0x40 != 0),
            invalid: TriBool::from_bit(df1 & 0x80 != 0),
        });
    }
    Ok(())
}

fn proc_161(slice: &[u8], ctx: &mut RadarTarget) -> DecodeResult<()> {
    ctx.track_number = Some(make_u16(slice[0], slice[1]));
    Ok(())
}

fn build_uap() -> Uap<RadarTarget> {
    Uap {
        version: "std".to_string(),
        max_fspec_octets: 3,
        slots: vec![
            Some(ItemDescriptor { category: CATEGORY, item: 10, kind: ItemKind::Fixed { len: 2, handler: proc_010 } }),
            Some(ItemDescriptor { category: CATEGORY, item: 20, kind: ItemKind::Extended { handler: proc_020 } }),
            Some(ItemDescriptor { category: CATEGORY, item: 40, kind: ItemKind::Fixed { len: 4, handler: proc_040 } }),
            None, // I016/042 calculated position: not yet wired to a normalised field of its own
            None,
            None,
            None,
            Some(ItemDescriptor { category: CATEGORY, item: 70, kind: ItemKind::Fixed { len: 2, handler: proc_070 } }),
            Some(ItemDescriptor { category: CATEGORY, item: 90, kind: ItemKind::Fixed { len: 2, handler: proc_090 } }),
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            Some(ItemDescriptor { category: CATEGORY, item: 161, kind: ItemKind::Fixed { len: 2, handler: proc_161 } }),
        ],
    }
}

/// Decode one CAT016 data block's record stream.
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
    use crate::asterix::envelope::Frame;
    use crate::asterix::sink::DebugSink;

    fn frame() -> Frame {
        Frame {
            offset: 0,
            line: Some(3),
            date: None,
            time_of_day: Some(10.0),
            payload: Vec::new(),
        }
    }

    #[test]
    fn test_sac_sic_propagation_across_records() {
        // Record 1: FRN1 (SAC/SIC) alone. Record 2: FRN8 (Mode-3/A) alone, no SAC/SIC.
        let mut payload = vec![0x80, 0x12, 0x34];
        payload.extend_from_slice(&[0x01, 0x80, 0x00, 0x05]);
        let mut state = DecoderState::new();
        let mut sink = DebugSink::default();
        decode(&payload, &frame(), &mut state, &mut sink).unwrap();
        assert_eq!(sink.objects.len(), 2);
        for obj in &sink.objects {
            let SurveillanceObject::RadarTarget(rtgt) = obj else { panic!("wrong variant") };
            assert_eq!(
                rtgt.common.data_source_identifier,
                Some(DataSourceId { sac: 0x12, sic: 0x34 })
            );
        }
    }

    #[test]
    fn test_mode_c_invalid_bit_suppresses_storage() {
        let mut ctx = RadarTarget::default();
        proc_090(&[0x80, 0x05], &mut ctx).unwrap();
        assert!(ctx.mode_c_height.is_none());
    }

    #[test]
    fn test_mode_c_negative_value_sign_extends() {
        let mut ctx = RadarTarget::default();
        // df1 bit5 (0x20) set => negative 13-bit field.
        proc_090(&[0x20, 0x00], &mut ctx).unwrap();
        let height = ctx.mode_c_height.unwrap();
        assert!(height.value_ft < 0);
    }

    #[test]
    fn test_detection_type_is_track_bit() {
        let mut ctx = RadarTarget::default();
        proc_020(&[0x80], &mut ctx).unwrap();
        assert!(ctx.detection_type.unwrap().is_track);
    }

}
