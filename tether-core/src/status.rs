use std::fmt::{self, Display, Formatter};

/// Raw status word returned by every native call. The native library reports
/// errors as unsigned integers; only the busy sub-range gets interpreted by
/// this crate, everything else is carried through to listeners untouched.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct StatusCode(pub u32);

/// Low byte of a status word identifies the error family.
pub const ERROR_ID_MASK: u32 = 0x0000_00FF;

impl StatusCode {
    pub const OK: Self = Self(0x0000_0000);
    pub const UNIMPLEMENTED: Self = Self(0x0000_0001);
    pub const INTERNAL_ERROR: Self = Self(0x0000_0002);
    pub const MEM_ALLOC_FAILED: Self = Self(0x0000_0003);
    pub const MEM_FREE_FAILED: Self = Self(0x0000_0004);
    pub const OPERATION_CANCELLED: Self = Self(0x0000_0005);
    pub const INCOMPATIBLE_VERSION: Self = Self(0x0000_0006);
    pub const NOT_SUPPORTED: Self = Self(0x0000_0007);
    pub const UNEXPECTED_EXCEPTION: Self = Self(0x0000_0008);
    pub const PROTECTION_VIOLATION: Self = Self(0x0000_0009);
    pub const FILE_IO_ERROR: Self = Self(0x0000_0020);
    pub const DEVICE_NOT_FOUND: Self = Self(0x0000_0080);
    pub const DEVICE_BUSY: Self = Self(0x0000_0081);
    pub const DEVICE_INVALID: Self = Self(0x0000_0082);
    pub const SESSION_NOT_OPEN: Self = Self(0x0000_0084);
    pub const COMMUNICATION_ERROR: Self = Self(0x0000_00C1);
    pub const OBJECT_NOT_READY: Self = Self(0x0000_A102);

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn is_ok(self) -> bool {
        self.0 == Self::OK.0
    }

    /// Transient "try again later" family. The one condition callers are
    /// expected to retry; see `GetPropertyCommand`.
    pub const fn is_busy(self) -> bool {
        (self.0 & ERROR_ID_MASK) == Self::DEVICE_BUSY.0
    }

    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0x0000_0000 => Some("ok"),
            0x0000_0001 => Some("unimplemented"),
            0x0000_0002 => Some("internal error"),
            0x0000_0003 => Some("memory allocation failed"),
            0x0000_0004 => Some("memory free failed"),
            0x0000_0005 => Some("operation cancelled"),
            0x0000_0006 => Some("incompatible version"),
            0x0000_0007 => Some("not supported"),
            0x0000_0008 => Some("unexpected exception"),
            0x0000_0009 => Some("protection violation"),
            0x0000_0020 => Some("file I/O error"),
            0x0000_0080 => Some("device not found"),
            0x0000_0081 => Some("device busy"),
            0x0000_0082 => Some("device invalid"),
            0x0000_0084 => Some("session not open"),
            0x0000_00C1 => Some("communication error"),
            0x0000_A102 => Some("object not ready"),
            _ => None,
        }
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} (0x{:08X})", name, self.0),
            None => write!(f, "0x{:08X}", self.0),
        }
    }
}

impl From<u32> for StatusCode {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}
