use std::convert::From;
use std::error;
use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum ErrorKind {
    ConfigParse,
    DateKeyParse,
    MonthParse,
    ParseError,
    IOError(io::Error),
}

impl Error {
    pub fn new(kind: ErrorKind, msg: &str) -> Self {
        Error {
            kind,
            message: Some(msg.to_owned()),
        }
    }

    pub fn with_msg(mut self, message: &str) -> Self {
        self.message = Some(message.to_owned());
        self
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind,
            message: None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(io_error: io::Error) -> Error {
        Error::from(ErrorKind::IOError(io_error))
    }
}

impl From<toml::de::Error> for Error {
    fn from(toml_error: toml::de::Error) -> Error {
        Error::new(
            ErrorKind::ConfigParse,
            &format!("Could not parse config file: {}", toml_error),
        )
    }
}

impl<E: std::fmt::Debug> From<nom::Err<E>> for Error {
    fn from(error: nom::Err<E>) -> Self {
        Error::new(
            ErrorKind::ParseError,
            &format!("Error while parsing: {}", error),
        )
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        if let ErrorKind::IOError(err) = err.kind {
            err
        } else {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                err.message.unwrap_or_else(|| "invalid format".to_owned()),
            )
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}: {}", self.kind.as_str(), msg),
            None => write!(f, "{}", self.kind.as_str()),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.kind {
            ErrorKind::IOError(err) => Some(err),
            _ => None,
        }
    }
}

impl ErrorKind {
    pub fn as_str(&self) -> String {
        match self {
            ErrorKind::ConfigParse => "invalid config file".to_owned(),
            ErrorKind::DateKeyParse => "invalid date (expected YYYY-MM-DD)".to_owned(),
            ErrorKind::MonthParse => "invalid month (expected YYYY-MM)".to_owned(),
            ErrorKind::ParseError => "invalid format".to_owned(),
            ErrorKind::IOError(err) => err.to_string(),
        }
    }
}
