use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum VerificationFlowError {
    #[error("Invalid type")]
    UnknownFlow,
}

/// The purpose an email-ownership proof is bound to.
///
/// A code or single-use token issued for one flow is useless in the other:
/// the flow is part of every ephemeral key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationFlow {
    Register,
    Reset,
}

impl VerificationFlow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Reset => "reset",
        }
    }
}

impl FromStr for VerificationFlow {
    type Err = VerificationFlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "register" => Ok(Self::Register),
            "reset" => Ok(Self::Reset),
            _ => Err(VerificationFlowError::UnknownFlow),
        }
    }
}

impl fmt::Display for VerificationFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
