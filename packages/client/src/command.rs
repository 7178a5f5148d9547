//! Prompt commands.
//!
//! ```text
//! loc <lat> <lon>
//! report <type> <lat> <lon> [description...]
//! help
//! quit
//! ```

use roadsafe_server::infrastructure::dto::websocket::{
    ClientMessage, HazardReportPayload, LocationUpdatePayload,
};

use crate::error::CommandError;

const LOC_USAGE: &str = "loc <lat> <lon>";
const REPORT_USAGE: &str = "report <type> <lat> <lon> [description...]";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Location {
        latitude: f64,
        longitude: f64,
    },
    Report {
        hazard_type: String,
        latitude: f64,
        longitude: f64,
        description: String,
    },
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Usage(LOC_USAGE));
        };

        match name {
            "loc" | "location" => {
                let (Some(lat), Some(lon), None) = (words.next(), words.next(), words.next())
                else {
                    return Err(CommandError::Usage(LOC_USAGE));
                };
                Ok(Command::Location {
                    latitude: parse_number(lat)?,
                    longitude: parse_number(lon)?,
                })
            }
            "report" => {
                let (Some(hazard_type), Some(lat), Some(lon)) =
                    (words.next(), words.next(), words.next())
                else {
                    return Err(CommandError::Usage(REPORT_USAGE));
                };
                Ok(Command::Report {
                    hazard_type: hazard_type.to_string(),
                    latitude: parse_number(lat)?,
                    longitude: parse_number(lon)?,
                    description: words.collect::<Vec<_>>().join(" "),
                })
            }
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }

    /// The frame to send for this command, stamped with `timestamp`.
    pub fn to_message(&self, timestamp: String) -> Option<ClientMessage> {
        match self {
            Command::Location {
                latitude,
                longitude,
            } => Some(ClientMessage::LocationUpdate(LocationUpdatePayload {
                latitude: Some(*latitude),
                longitude: Some(*longitude),
                timestamp: Some(timestamp),
            })),
            Command::Report {
                hazard_type,
                latitude,
                longitude,
                description,
            } => Some(ClientMessage::HazardReport(HazardReportPayload {
                latitude: *latitude,
                longitude: *longitude,
                hazard_type: hazard_type.clone(),
                description: description.clone(),
                timestamp,
                photo: None,
            })),
            Command::Help | Command::Quit => None,
        }
    }
}

fn parse_number(word: &str) -> Result<f64, CommandError> {
    word.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| CommandError::InvalidNumber(word.to_string()))
}
