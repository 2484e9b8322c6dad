use chrono::NaiveDateTime;
use serde::de::{value, IntoDeserializer};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Calendar format of the `# Timestamp` column, e.g. `31/12/2015 23:59:59`.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
pub enum NavigationalStatus {
    #[serde(rename = "Unknown value")]
    Unknown,
    #[serde(rename = "Under way using engine")]
    UnderWay,
    #[serde(rename = "Engaged in fishing")]
    Fishing,
    #[serde(rename = "Moored")]
    Moored,
    #[serde(rename = "At anchor")]
    Anchor,
    #[serde(rename = "Restricted maneuverability")]
    Restricted,
    #[serde(rename = "Constrained by her draught")]
    Constrained,
    #[serde(rename = "Not under command")]
    NotUnderCommand,
    #[serde(rename = "Under way sailing")]
    Sailing,
    #[serde(rename = "Aground")]
    Aground,
    #[serde(rename = "Power-driven vessel towing astern")]
    TowingAstern,
    #[serde(rename = "Power-driven vessel pushing ahead or towing alongside")]
    PushingAhead,
    #[serde(rename = "AIS-SART is active")]
    SartActive,
    #[serde(rename = "Reserved for future use")]
    #[serde(alias = "Reserved for future use [11]")]
    #[serde(alias = "Reserved for future use [12]")]
    #[serde(alias = "Reserved for future use [13]")]
    Reserved,
    #[serde(rename = "Reserved for future amendment [HSC]")]
    ReservedHsc,
    #[serde(rename = "Reserved for future amendment [WIG]")]
    ReservedWig,
    #[default]
    #[serde(other)]
    Other,
}

impl NavigationalStatus {
    /// Statuses of vessels that are not underway.
    pub const NOT_UNDERWAY: [NavigationalStatus; 3] = [
        NavigationalStatus::Moored,
        NavigationalStatus::Anchor,
        NavigationalStatus::Reserved,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NavigationalStatus::Unknown => "Unknown value",
            NavigationalStatus::UnderWay => "Under way using engine",
            NavigationalStatus::Fishing => "Engaged in fishing",
            NavigationalStatus::Moored => "Moored",
            NavigationalStatus::Anchor => "At anchor",
            NavigationalStatus::Restricted => "Restricted maneuverability",
            NavigationalStatus::Constrained => "Constrained by her draught",
            NavigationalStatus::NotUnderCommand => "Not under command",
            NavigationalStatus::Sailing => "Under way sailing",
            NavigationalStatus::Aground => "Aground",
            NavigationalStatus::TowingAstern => "Power-driven vessel towing astern",
            NavigationalStatus::PushingAhead => {
                "Power-driven vessel pushing ahead or towing alongside"
            }
            NavigationalStatus::SartActive => "AIS-SART is active",
            NavigationalStatus::Reserved => "Reserved for future use",
            NavigationalStatus::ReservedHsc => "Reserved for future amendment [HSC]",
            NavigationalStatus::ReservedWig => "Reserved for future amendment [WIG]",
            NavigationalStatus::Other => "Other",
        }
    }
}

impl fmt::Display for NavigationalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses the same labels the CSV column carries. Unrecognised labels map to
/// [`NavigationalStatus::Other`].
impl FromStr for NavigationalStatus {
    type Err = value::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::deserialize(s.trim().into_deserializer())
    }
}

#[derive(Debug, Default, Clone, serde::Deserialize, serde::Serialize)]
//1.	Timestamp			Timestamp from the AIS basestation, format: 31/12/2015 23:59:59
//2.	Type of mobile			Describes what type of target this message is received from (class A AIS Vessel, Class B AIS vessel, etc)
//3.	MMSI				MMSI number of vessel
//4.	Latitude			Latitude of message report (e.g. 57,8794)
//5.	Longitude			Longitude of message report (e.g. 17,9125)
//6.	Navigational status		Navigational status from AIS message if available
//7.	ROT				Rate of turn from AIS message if available
//8.	SOG				Speed over ground from AIS message if available
//9.	COG				Course over ground from AIS message if available
//10.	Heading			Heading from AIS message if available
//11.	IMO				IMO number of the vessel
//12.	Callsign			Callsign of the vessel
//13.	Name				Name of the vessel
//14.	Ship type			Describes the AIS ship type of this vessel
//15.	Cargo type			Type of cargo from the AIS message
//16.	Width				Width of the vessel
//17.	Length				Length of the vessel
//18.	Type of position fixing device	Type of positional fixing device from the AIS message
//19.	Draught			Draught field from AIS message
//20.	Destination			Destination from AIS message
//21.	ETA				Estimated Time of Arrival, if available
//22.	Data source type		Data source type, e.g. AIS
//23. Size A				Length from GPS to the bow
//24. Size B				Length from GPS to the stern
//25. Size C				Length from GPS to starboard side
//26. Size D				Length from GPS to port side
// example: 23/06/2017 00:44:23,Class A,305484000,56.134323,11.474578,Under way using engine,0.0,6.8,268.1,264,9428217,V2EN3,ICE MOON,Cargo,,24,129,GPS,6.8,AARHUS,23/06/2017 08:00:00,AIS,109,20,12,12
pub struct Record {
    pub timestamp: Option<String>,
    pub type_mobile: Option<String>,
    pub mmsi: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub lon: Option<f64>,
    #[serde(default)]
    pub status: NavigationalStatus,
    #[serde(default)]
    pub rot: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub sog: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub cog: Option<f64>,
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub imo: Option<String>,
    #[serde(default)]
    pub callsign: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ship_type: Option<String>,
    #[serde(default)]
    pub cargo_type: Option<String>,
    #[serde(default)]
    pub width: Option<String>,
    #[serde(default)]
    pub length: Option<String>,
    #[serde(default)]
    pub type_device: Option<String>,
    #[serde(default)]
    pub draught: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub eta: Option<String>,
    #[serde(default)]
    pub data_source: Option<String>,
    #[serde(default)]
    pub a: Option<String>,
    #[serde(default)]
    pub b: Option<String>,
    #[serde(default)]
    pub c: Option<String>,
    #[serde(default)]
    pub d: Option<String>,
}

/// A sanitized report. Built once by the sanitizer and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionReport {
    pub mmsi: String,
    pub timestamp: NaiveDateTime,
    pub lat: f64,
    pub lon: f64,
    pub sog: f64,
    pub cog: f64,
    pub status: NavigationalStatus,
}
