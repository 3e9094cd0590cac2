use std::fmt;

#[derive(Debug)]
pub enum Error {
  InvalidArgument {
    description: String
  },
  IO {
    error: std::io::Error
  },
  Csv {
    error: csv::Error
  },
  Json {
    error: serde_json::Error
  }
}

impl Error {
  pub fn invalid<S: Into<String>>(description: S) -> Self {
    Error::InvalidArgument { description: description.into() }
  }

  pub fn is_invalid_argument(&self) -> bool {
    matches!(self, Error::InvalidArgument { .. })
  }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidArgument { description } => write!(f, "invalid argument: {}", description),
            Error::IO { error } => write!(f, "i/o failure: {}", error),
            Error::Csv { error } => write!(f, "csv error: {}", error),
            Error::Json { error } => write!(f, "json error: {}", error)
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidArgument { .. } => None,
            Error::IO { error } => Some(error),
            Error::Csv { error } => Some(error),
            Error::Json { error } => Some(error)
        }
    }
}

impl From<std::io::Error> for Error {
  fn from(error: std::io::Error) -> Self {
    Error::IO { error: error }
  }
}

// Disk-level failures inside the csv crate are reported as plain I/O.
impl From<csv::Error> for Error {
  fn from(error: csv::Error) -> Self {
    match error.kind() {
      csv::ErrorKind::Io(io) => Error::IO {
        error: std::io::Error::new(io.kind(), io.to_string())
      },
      _ => Error::Csv { error: error }
    }
  }
}

impl From<serde_json::Error> for Error {
  fn from(error: serde_json::Error) -> Self {
    Error::Json { error: error }
  }
}

impl From<String> for Error {
  fn from(description: String) -> Self {
    Error::InvalidArgument { description: description }
  }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
