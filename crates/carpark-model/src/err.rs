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

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownVehicleKindError {
    input: String,
}

impl UnknownVehicleKindError {
    #[inline]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    #[inline]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl Display for UnknownVehicleKindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown or nil vehicle")
    }
}

impl std::error::Error for UnknownVehicleKindError {}

/// Why a vehicle cannot be parked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidVehicleReason {
    EmptyRegistration,
    EmptyColour,
    ZeroSlotsNeeded,
}

impl Display for InvalidVehicleReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidVehicleReason::EmptyRegistration => write!(f, "registration is empty"),
            InvalidVehicleReason::EmptyColour => write!(f, "colour is empty"),
            InvalidVehicleReason::ZeroSlotsNeeded => write!(f, "vehicle needs zero slots"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvalidVehicleError {
    registration: String,
    reason: InvalidVehicleReason,
}

impl InvalidVehicleError {
    #[inline]
    pub fn new(registration: impl Into<String>, reason: InvalidVehicleReason) -> Self {
        Self {
            registration: registration.into(),
            reason,
        }
    }

    #[inline]
    pub fn registration(&self) -> &str {
        &self.registration
    }

    #[inline]
    pub fn reason(&self) -> InvalidVehicleReason {
        self.reason
    }
}

impl Display for InvalidVehicleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown or invalid vehicle: {}", self.reason)
    }
}

impl std::error::Error for InvalidVehicleError {}
