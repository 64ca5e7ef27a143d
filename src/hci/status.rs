//! Controller status codes (Core Spec Vol 1, Part F).
//!
//! Handlers pass through whatever code a collaborator reports, including
//! codes this crate has no name for, so `Status` is an open `u8` newtype
//! rather than a closed enum. Every value fits the single status byte of
//! a command-complete event.

use core::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status(pub u8);

impl Status {
    pub const SUCCESS: Status = Status(0x00);
    pub const UNKNOWN_COMMAND: Status = Status(0x01);
    pub const UNKNOWN_CONNECTION_ID: Status = Status(0x02);
    pub const HARDWARE_FAILURE: Status = Status(0x03);
    pub const MEMORY_CAPACITY_EXCEEDED: Status = Status(0x07);
    pub const COMMAND_DISALLOWED: Status = Status(0x0C);
    pub const UNSUPPORTED_FEATURE: Status = Status(0x11);
    pub const INVALID_PARAMETERS: Status = Status(0x12);
    pub const UNSPECIFIED_ERROR: Status = Status(0x1F);
    pub const PARAMETER_OUT_OF_RANGE: Status = Status(0x30);
    pub const CONTROLLER_BUSY: Status = Status(0x3A);

    pub const fn is_success(self) -> bool {
        self.0 == Self::SUCCESS.0
    }

    pub const fn as_u8(self) -> u8 {
        self.0
    }

    fn name(self) -> Option<&'static str> {
        Some(match self {
            Self::SUCCESS => "Success",
            Self::UNKNOWN_COMMAND => "UnknownCommand",
            Self::UNKNOWN_CONNECTION_ID => "UnknownConnectionId",
            Self::HARDWARE_FAILURE => "HardwareFailure",
            Self::MEMORY_CAPACITY_EXCEEDED => "MemoryCapacityExceeded",
            Self::COMMAND_DISALLOWED => "CommandDisallowed",
            Self::UNSUPPORTED_FEATURE => "UnsupportedFeature",
            Self::INVALID_PARAMETERS => "InvalidParameters",
            Self::UNSPECIFIED_ERROR => "UnspecifiedError",
            Self::PARAMETER_OUT_OF_RANGE => "ParameterOutOfRange",
            Self::CONTROLLER_BUSY => "ControllerBusy",
            _ => return None,
        })
    }
}

impl From<Status> for u8 {
    fn from(s: Status) -> u8 {
        s.0
    }
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "Status(0x{:02X})", self.0),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X} ({:?})", self.0, self)
    }
}
