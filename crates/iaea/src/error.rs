//! Result and Error types for the IAEA data module

/// Type alias for `Result<T, iaea::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `ftools-iaea`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),

    /// Failure during GET request to IAEA API
    #[error("request to IAEA API failed")]
    FailedRequest(#[from] minreq::Error),

    /// Anything other than a 200 response from the API
    #[error("IAEA API responded with status {status} for {url}")]
    BadStatus { status: i32, url: String },

    /// Malformed CSV content
    #[error("failed CSV operation")]
    Csv(#[from] csv::Error),

    /// Generic error for values that could not be interpreted
    #[error("parser failed: {0}")]
    ParseError(String),

    /// Input could not be read as a nuclide name
    #[error("could not parse \"{0}\" as a nuclide, expected something like Pu241 or 241pu")]
    FailedToParseNuclide(String),

    /// Element symbol not in the periodic table
    #[error("unknown element \"{0}\"")]
    UnknownElement(String),
}
