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

use crate::{
    command::{Command, ParseCommandError},
    config::{Backend, OutputFormat, SessionConfig},
};
use carpark_core::{SlotCount, SlotNumber};
use carpark_engine::{
    BTreeSetFreeSlots, CarPark, FreeSlots, SortedVecFreeSlots, err::NotInitializedError,
};
use carpark_model::{ParkedVehicle, Vehicle};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Spaces between the widest cell of a column and the next column.
const COLUMN_PADDING: usize = 4;
const STATUS_HEADER: [&str; 4] = ["Slot No.", "Registration No", "Colour", "Type"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Serialize)]
struct StatusRow<'a> {
    slot: usize,
    last_slot: usize,
    registration: &'a str,
    colour: &'a str,
    kind: &'static str,
}

impl<'a> From<&'a ParkedVehicle> for StatusRow<'a> {
    fn from(parked: &'a ParkedVehicle) -> Self {
        let block = parked.block();
        Self {
            slot: block.start().value(),
            last_slot: block.last().unwrap_or(block.start()).value(),
            registration: parked.registration(),
            colour: parked.colour(),
            kind: parked.kind().name(),
        }
    }
}

/// Lays out `rows` in columns. Every column but the last is padded to its
/// widest cell plus [`COLUMN_PADDING`].
fn render_table<const N: usize>(rows: &[[String; N]]) -> String {
    let mut widths = [0usize; N];
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    let mut out = String::new();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            out.push_str(cell);
            if i + 1 < N {
                let pad = widths[i] + COLUMN_PADDING - cell.chars().count();
                out.extend(std::iter::repeat_n(' ', pad));
            }
        }
        out.push('\n');
    }
    out
}

fn join<T: ToString>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Runs interpreter commands against one car park and writes the replies
/// to `out`.
///
/// Failed commands print their error message and leave the session running.
pub struct Session<F, W> {
    car_park: CarPark<F>,
    format: OutputFormat,
    out: W,
}

impl<F: FreeSlots, W: Write> Session<F, W> {
    pub fn new(format: OutputFormat, out: W) -> Self {
        Self {
            car_park: CarPark::new(),
            format,
            out,
        }
    }

    #[inline]
    pub fn car_park(&self) -> &CarPark<F> {
        &self.car_park
    }

    #[inline]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Executes lines from `input` until it is exhausted or `exit` is read.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than ending the
    /// session.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> io::Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            let command = match Command::parse_line(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                // Parking needs a lot before the vehicle itself is looked at.
                Err(ParseCommandError::UnknownVehicleKind(err))
                    if !self.car_park.is_initialized() =>
                {
                    debug!(%line, %err, "Rejected vehicle before initialization");
                    writeln!(self.out, "{}", NotInitializedError)?;
                    continue;
                }
                Err(err) => {
                    debug!(%line, %err, "Rejected input line");
                    writeln!(self.out, "{err}")?;
                    continue;
                }
            };
            if self.execute(command)? == Flow::Exit {
                break;
            }
        }
        self.out.flush()
    }

    pub fn execute(&mut self, command: Command) -> io::Result<Flow> {
        match command {
            Command::CreateParkingLot(n) => match self.car_park.initialize(SlotCount::new(n)) {
                Ok(()) => writeln!(self.out, "Created a parking lot with {n} slots")?,
                Err(err) => writeln!(self.out, "{err}")?,
            },
            Command::Park {
                registration,
                colour,
                kind,
            } => match self.car_park.park(Vehicle::new(registration, colour, kind)) {
                Ok(slot) => writeln!(self.out, "Allocated slot number: {}", slot.value())?,
                Err(err) => writeln!(self.out, "{err}")?,
            },
            Command::Leave(n) => match self.car_park.depart(SlotNumber::new(n)) {
                Ok(parked) => {
                    let block = parked.block();
                    let first = block.start().value();
                    match block.last().map(SlotNumber::value) {
                        Some(last) if last > first => {
                            writeln!(self.out, "Slot numbers {first}-{last} are free")?
                        }
                        _ => writeln!(self.out, "Slot number {first} is free")?,
                    }
                }
                Err(err) => writeln!(self.out, "{err}")?,
            },
            Command::RegistrationsForColour(colour) => {
                match self.car_park.query_by_colour(&colour) {
                    Ok(matches) => writeln!(self.out, "{}", join(matches.iter().map(|m| m.1)))?,
                    Err(err) => writeln!(self.out, "{err}")?,
                }
            }
            Command::SlotsForColour(colour) => match self.car_park.query_by_colour(&colour) {
                Ok(matches) => writeln!(
                    self.out,
                    "{}",
                    join(matches.iter().map(|m| m.0.value()))
                )?,
                Err(err) => writeln!(self.out, "{err}")?,
            },
            Command::SlotForRegistration(registration) => {
                match self.car_park.query_by_registration(&registration) {
                    Ok(slot) => writeln!(self.out, "{}", slot.value())?,
                    Err(err) => writeln!(self.out, "{err}")?,
                }
            }
            Command::Status => self.write_status()?,
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn write_status(&mut self) -> io::Result<()> {
        let status = self.car_park.status();
        match self.format {
            OutputFormat::Table => {
                let mut rows: Vec<[String; 4]> = Vec::with_capacity(status.len() + 1);
                rows.push(STATUS_HEADER.map(str::to_owned));
                rows.extend(status.iter().map(|p| {
                    [
                        p.slot().value().to_string(),
                        p.registration().to_owned(),
                        p.colour().to_owned(),
                        p.kind().name().to_owned(),
                    ]
                }));
                self.out.write_all(render_table(&rows).as_bytes())
            }
            OutputFormat::Json => {
                let rows: Vec<StatusRow<'_>> = status.into_iter().map(StatusRow::from).collect();
                serde_json::to_writer_pretty(&mut self.out, &rows).map_err(io::Error::other)?;
                writeln!(self.out)
            }
        }
    }
}

/// Runs a whole session with the backend chosen in `config`.
pub fn run<R: BufRead, W: Write>(config: &SessionConfig, input: R, out: W) -> io::Result<()> {
    match config.backend {
        Backend::SortedVec => {
            Session::<SortedVecFreeSlots, W>::new(config.format, out).run(input)
        }
        Backend::BTreeSet => Session::<BTreeSetFreeSlots, W>::new(config.format, out).run(input),
    }
}
