//! Exit codes for the prose CLI.
//!
//! Distinct codes let scripts and CI systems tell failure modes apart
//! without parsing output.

/// Exit codes used by the CLI.
///
/// 0 indicates success; non-zero values distinguish failure types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// No diagnostics at error severity
    Success = 0,
    /// Diagnostics at error severity were reported
    LintError = 1,
    /// Configuration error (missing, unparseable, or invalid config)
    ConfigError = 2,
    /// Dictionary load error (unreadable or malformed dictionary pair)
    DictionaryError = 3,
    /// I/O error (unreadable input, invalid UTF-8)
    IoError = 4,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }

    /// Get the numeric value of this exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}
