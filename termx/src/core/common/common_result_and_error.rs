// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Short for `Ok(())`, or `Ok(value)`.
#[macro_export]
macro_rules! ok {
    () => {
        Ok(())
    };
    ($value:expr) => {
        Ok($value)
    };
}

pub type TermxResult<T> = Result<T, TermxError>;

/// Every way a widget run can end other than with a committed value.
///
/// - [`TermxError::NotATerminal`] and [`TermxError::Io`] are fatal. The terminal session
///   is restored before they reach the caller.
/// - [`TermxError::Validation`] is recoverable. Widgets show it inline and keep running;
///   it only escapes through APIs that validate outside an event loop.
/// - [`TermxError::Cancelled`] means the user declined (Escape or `Ctrl+C`). Callers can
///   tell this apart from a broken terminal with [`TermxError::is_cancelled`].
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum TermxError {
    #[error("standard input is not an interactive terminal")]
    #[diagnostic(
        code(r3bl_termx::session::not_a_terminal),
        help("Run the program directly in a terminal, without piping or redirecting stdin")
    )]
    NotATerminal,

    #[error("terminal I/O failed: {0}")]
    #[diagnostic(
        code(r3bl_termx::io),
        help("The input stream reached EOF or the terminal went away")
    )]
    Io(#[from] std::io::Error),

    #[error("{message}")]
    #[diagnostic(code(r3bl_termx::validation))]
    Validation { message: String },

    #[error("cancelled by user")]
    #[diagnostic(code(r3bl_termx::cancelled), help("Escape or Ctrl+C was pressed"))]
    Cancelled,
}

impl TermxError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Convert a [`miette::Report`] from the raw mode and tracing helpers.
    pub fn from_report(report: &miette::Report) -> Self {
        Self::Io(std::io::Error::other(report.to_string()))
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool { matches!(self, Self::Cancelled) }

    #[must_use]
    pub fn is_fatal(&self) -> bool { matches!(self, Self::NotATerminal | Self::Io(_)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cancelled_is_distinct_from_io() {
        let cancelled = TermxError::Cancelled;
        let io = TermxError::from(std::io::Error::from(std::io::ErrorKind::UnexpectedEof));

        assert!(cancelled.is_cancelled());
        assert!(!cancelled.is_fatal());
        assert!(!io.is_cancelled());
        assert!(io.is_fatal());
    }

    #[test]
    fn test_validation_message_is_display() {
        let error = TermxError::validation("select at least 1 option");
        assert_eq!(error.to_string(), "select at least 1 option");
        assert!(!error.is_fatal());
    }

    #[test]
    fn test_diagnostic_codes() {
        use miette::Diagnostic;
        let code = TermxError::NotATerminal.code().map(|it| it.to_string());
        assert_eq!(code.as_deref(), Some("r3bl_termx::session::not_a_terminal"));
    }

    #[test]
    fn test_from_report_keeps_message() {
        let report = miette::miette!("failed to set terminal attributes");
        let error = TermxError::from_report(&report);
        assert!(error.to_string().contains("failed to set terminal attributes"));
    }
}
