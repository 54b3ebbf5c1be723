//! Normalised surveillance objects.
//!
//! One variant per detection class (§3 of the spec). Every scalar field uses `Option<T>` as
//! the "(present, value)" pair the spec calls for; fields that carry extra wire flags alongside
//! the value (garbled/invalid/range-exceeded, ...) bundle those flags into the field's own
//! struct instead of the surrounding object, so `None` always means "not present" and nothing
//! else.
//!
//! Units are always the SI unit named by the item handler that fills them: radians for angles,
//! metres for distance/height, metres/second for speed. The wire's application unit (NM, FL,
//! ft/min, ...) never leaks past the category handler that parses it.

/// Tri-valued truth, for items whose wire encoding has an explicit "unknown" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriBool {
    True,
    False,
    #[default]
    Undefined,
}

impl TriBool {
    #[inline]
    pub fn from_bit(set: bool) -> Self {
        if set {
            TriBool::True
        } else {
            TriBool::False
        }
    }
}

/// Which recording envelope produced a frame, attached to every object for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataFormat {
    #[default]
    Asterix,
    Other,
}

/// A Christian calendar date, as carried by `frame_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

/// Packed SAC/SIC data source identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSourceId {
    pub sac: u8,
    pub sic: u8,
}

impl DataSourceId {
    #[inline]
    pub fn packed(&self) -> u16 {
        ((self.sac as u16) << 8) | self.sic as u16
    }
}

/// Fields attached to every surveillance object regardless of variant (§6 of the spec).
#[derive(Debug, Clone, Default)]
pub struct CommonFields {
    pub asterix_category: u8,
    pub data_format: DataFormat,
    pub frame_date: Option<FrameDate>,
    pub frame_time: Option<f64>,
    pub line_number: Option<u8>,
    pub data_source_identifier: Option<DataSourceId>,
}

/// SSR Mode-3/A code with its validity flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mode3A {
    pub code: u16,
    pub invalid: TriBool,
    pub garbled: TriBool,
    pub smoothed: TriBool,
}

/// SSR Mode-C / barometric height, kept in both SI and the wire's native feet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeCHeight {
    pub value_m: f64,
    pub value_ft: i32,
    pub garbled: TriBool,
    pub invalid: TriBool,
}

/// A polar measurement in sensor-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarPosition {
    pub rho_m: f64,
    pub theta_rad: f64,
}

/// A Cartesian position, sensor- or system-local depending on the item that filled it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianPosition {
    pub x_m: f64,
    pub y_m: f64,
}

/// A WGS-84 geographic position in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wgs84Position {
    pub lat_rad: f64,
    pub lon_rad: f64,
    pub high_precision: bool,
}

/// Ground vector: speed in m/s, heading/track angle in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundVector {
    pub value_gsp: f64,
    pub value_hdg: f64,
    pub range_exceeded: TriBool,
}

/// Air speed, either indicated airspeed (m/s) or Mach number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AirSpeed {
    Ias(f64),
    Mach(f64),
}

/// A signed vertical rate in m/s, with the range-exceeded flag carried by later editions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalRate {
    pub value: f64,
    pub range_exceeded: TriBool,
}

/// Target report descriptor flags shared by the radar/MLAT/track categories (I0xx/020-ish).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetectionType {
    pub is_track: bool,
    pub simulated: TriBool,
    pub test_target: TriBool,
    pub from_fixed_field_transponder: TriBool,
    pub spi: TriBool,
}

/// Free-text aircraft identification (callsign / tail number), 6-bit-char decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetIdentification {
    pub callsign: String,
}

/// One BDS register extracted from a compound I021/250.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BdsRegister {
    pub bds1: u8,
    pub bds2: u8,
    pub data: [u8; 7],
}

/// Target status flags (I021/200).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetStatus {
    pub icf: bool,
    pub lnav: bool,
    pub ps: u8,
    pub ss: u8,
}

/// A primary/secondary/combined radar plot, radar track, or MLAT report's shared position data.
#[derive(Debug, Clone, Default)]
pub struct RadarTarget {
    pub common: CommonFields,
    pub detection_type: Option<DetectionType>,
    pub polar_position: Option<PolarPosition>,
    pub cartesian_position: Option<CartesianPosition>,
    pub mode_3a: Option<Mode3A>,
    pub mode_c_height: Option<ModeCHeight>,
    pub track_number: Option<u16>,
    pub aircraft_address: Option<u32>,
    pub target_identification: Option<TargetIdentification>,
    pub ground_vector: Option<GroundVector>,
    pub detection_time: Option<f64>,
}

/// A multilateration report, or (CAT019) an MLAT system status message.
#[derive(Debug, Clone, Default)]
pub struct Mlat {
    pub common: CommonFields,
    pub is_status_message: bool,
    pub system_status: Option<u8>,
    pub wgs84_position: Option<Wgs84Position>,
    pub cartesian_position: Option<CartesianPosition>,
    pub velocity: Option<GroundVector>,
    pub mode_3a: Option<Mode3A>,
    pub mode_c_height: Option<ModeCHeight>,
    pub aircraft_address: Option<u32>,
    pub target_identification: Option<TargetIdentification>,
    pub detection_type: Option<DetectionType>,
    pub detection_time: Option<f64>,
}

/// Navigation accuracy/integrity bundle (I021/090), shape varies 1..4 bytes by edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QualityIndicators {
    pub nucr_or_nacv: u8,
    pub nucp_or_nic: u8,
    pub nic_baro: Option<u8>,
    pub sil: Option<u8>,
    pub nacp: Option<u8>,
    pub sil_supplement: Option<u8>,
    pub sda: Option<u8>,
    pub gva: Option<u8>,
    pub pic: Option<u8>,
}

/// A selected/intermediate/final-state altitude (I021/146, I021/148), 25 ft LSB plus raw flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedAltitude {
    pub value_m: f64,
    pub value_ft: i32,
    pub flags: u8,
}

/// True airspeed (I021/151), with the wire's range-exceeded indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrueAirspeed {
    pub value_mps: f64,
    pub range_exceeded: TriBool,
}

/// An ADS-B report.
#[derive(Debug, Clone, Default)]
pub struct Adsb {
    pub common: CommonFields,
    pub aircraft_operational_status: Option<u8>,
    pub service_identification: Option<u8>,
    pub report_characteristics: Option<u8>,
    pub emitter_category: Option<u8>,
    pub target_report_descriptor: Option<DetectionType>,
    pub toa_position: Option<f64>,
    pub toa_velocity: Option<f64>,
    pub quality_indicators: Option<QualityIndicators>,
    pub wgs84_position: Option<Wgs84Position>,
    pub geometric_height_m: Option<f64>,
    pub barometric_flight_level_m: Option<f64>,
    pub selected_altitude: Option<SelectedAltitude>,
    pub final_selected_altitude: Option<SelectedAltitude>,
    pub ground_vector: Option<GroundVector>,
    pub air_speed: Option<AirSpeed>,
    pub true_airspeed: Option<TrueAirspeed>,
    pub magnetic_heading_rad: Option<f64>,
    pub barometric_vertical_rate: Option<VerticalRate>,
    pub geometric_vertical_rate: Option<VerticalRate>,
    pub track_angle_rate_rad_s: Option<f64>,
    pub track_number: Option<u16>,
    pub target_identification: Option<TargetIdentification>,
    pub target_status: Option<TargetStatus>,
    pub mops_version: Option<u8>,
    pub roll_angle_rad: Option<f64>,
    pub aircraft_address: Option<u32>,
    pub bds_registers: Vec<BdsRegister>,
    pub acas_resolution_advisory: Option<Vec<u8>>,
    pub receiver_id: Option<u8>,
    pub message_amplitude_dbm: Option<i8>,
    pub surface_capabilities: Option<u16>,
    pub detection_time: Option<f64>,
}

/// A fused/output system track (e.g. ARTAS, CAT003/CAT030-family output).
#[derive(Debug, Clone, Default)]
pub struct SystemTrack {
    pub common: CommonFields,
    pub calculated_position: Option<CartesianPosition>,
    pub calculated_wgs84_position: Option<Wgs84Position>,
    pub track_number: Option<u16>,
    pub ground_vector: Option<GroundVector>,
    pub climb_rate: Option<VerticalRate>,
    pub mode_3a: Option<Mode3A>,
    pub track_status_raw: Option<u32>,
    pub service_identification: Option<u8>,
    pub detection_time: Option<f64>,
}

/// A sector/status radar service message.
#[derive(Debug, Clone, Default)]
pub struct RadarService {
    pub common: CommonFields,
    pub antenna_azimuth_rad: Option<f64>,
    pub sector_number: Option<u8>,
    pub message_type: Option<u8>,
    pub status_words: Vec<u16>,
    pub time_of_message: Option<f64>,
}

/// The object handed to a sink: one per decoded record.
#[derive(Debug, Clone)]
pub enum SurveillanceObject {
    RadarTarget(RadarTarget),
    Mlat(Mlat),
    Adsb(Adsb),
    SystemTrack(SystemTrack),
    RadarService(RadarService),
}

impl SurveillanceObject {
    pub fn common(&self) -> &CommonFields {
        match self {
            SurveillanceObject::RadarTarget(o) => &o.common,
            SurveillanceObject::Mlat(o) => &o.common,
            SurveillanceObject::Adsb(o) => &o.common,
            SurveillanceObject::SystemTrack(o) => &o.common,
            SurveillanceObject::RadarService(o) => &o.common,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_source_id_packed() {
        let id = DataSourceId { sac: 0x12, sic: 0x34 };
        assert_eq!(id.packed(), 0x1234);
    }

    #[test]
    fn test_tribool_from_bit() {
        assert_eq!(TriBool::from_bit(true), TriBool::True);
        assert_eq!(TriBool::from_bit(false), TriBool::False);
        assert_eq!(TriBool::default(), TriBool::Undefined);
    }

    #[test]
    fn test_surveillance_object_common() {
        let obj = SurveillanceObject::RadarTarget(RadarTarget {
            common: CommonFields {
                asterix_category: 48,
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(obj.common().asterix_category, 48);
    }
}
