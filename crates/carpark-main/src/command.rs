// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use carpark_model::{UnknownVehicleKindError, VehicleKind};
use std::{fmt::Display, num::ParseIntError, str::FromStr};

/// One line of interpreter input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateParkingLot(usize),
    Park {
        registration: String,
        colour: String,
        kind: VehicleKind,
    },
    Leave(usize),
    RegistrationsForColour(String),
    SlotsForColour(String),
    SlotForRegistration(String),
    Status,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidNumberError {
    input: String,
    source: ParseIntError,
}

impl InvalidNumberError {
    #[inline]
    pub fn new(input: impl Into<String>, source: ParseIntError) -> Self {
        Self {
            input: input.into(),
            source,
        }
    }

    #[inline]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl Display for InvalidNumberError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid number '{}': {}", self.input, self.source)
    }
}

impl std::error::Error for InvalidNumberError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    /// Unknown verb or wrong number of arguments.
    Unknown,
    InvalidNumber(InvalidNumberError),
    UnknownVehicleKind(UnknownVehicleKindError),
}

impl Display for ParseCommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseCommandError::Unknown => write!(f, "Unknown input command"),
            ParseCommandError::InvalidNumber(e) => write!(f, "{e}"),
            ParseCommandError::UnknownVehicleKind(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ParseCommandError {}

impl From<InvalidNumberError> for ParseCommandError {
    fn from(err: InvalidNumberError) -> Self {
        ParseCommandError::InvalidNumber(err)
    }
}

impl From<UnknownVehicleKindError> for ParseCommandError {
    fn from(err: UnknownVehicleKindError) -> Self {
        ParseCommandError::UnknownVehicleKind(err)
    }
}

fn parse_number(input: &str) -> Result<usize, InvalidNumberError> {
    input
        .parse::<usize>()
        .map_err(|e| InvalidNumberError::new(input, e))
}

impl Command {
    /// Parses a single input line. Blank lines yield `Ok(None)`.
    ///
    /// A trailing carriage return is ignored so that files written with
    /// CRLF line endings behave like LF ones.
    pub fn parse_line(line: &str) -> Result<Option<Command>, ParseCommandError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let words: Vec<&str> = line.split_whitespace().collect();
        let cmd = match words.as_slice() {
            [] => return Ok(None),
            ["create_parking_lot", n] => Command::CreateParkingLot(parse_number(n)?),
            ["park", registration, colour, kind] => Command::Park {
                registration: (*registration).to_owned(),
                colour: (*colour).to_owned(),
                kind: kind.parse()?,
            },
            ["leave", n] => Command::Leave(parse_number(n)?),
            ["registration_numbers_for_cars_with_colour", colour] => {
                Command::RegistrationsForColour((*colour).to_owned())
            }
            ["slot_numbers_for_cars_with_colour", colour] => {
                Command::SlotsForColour((*colour).to_owned())
            }
            ["slot_number_for_registration_number", registration] => {
                Command::SlotForRegistration((*registration).to_owned())
            }
            ["status"] => Command::Status,
            ["exit"] => Command::Exit,
            _ => return Err(ParseCommandError::Unknown),
        };
        Ok(Some(cmd))
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::parse_line(s)?.ok_or(ParseCommandError::Unknown)
    }
}
