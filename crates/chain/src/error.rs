//! Result and Error types for the decay chain engine

/// Type alias for `Result<T, chain::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `ftools-chain`
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The data provider could not supply decay or yield data
    #[error("decay data unavailable for \"{nuclide}\"")]
    DataUnavailable {
        nuclide: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No element symbol is known for a proton number
    #[error("no element symbol known for Z={0}")]
    ElementUnknown(u8),

    /// Decay mode code with no daughter mapping
    #[error("decay mode \"{mode}\" not supported for {nuclide}")]
    UnsupportedDecayMode { mode: String, nuclide: String },

    /// Guard against cyclic or otherwise malformed decay data
    #[error("decay chain from {nuclide} exceeds the maximum depth of {depth}")]
    DecayChainTooDeep { nuclide: String, depth: usize },
}

impl Error {
    /// Wrap any provider failure as [Error::DataUnavailable]
    pub fn unavailable<E>(nuclide: &str, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::DataUnavailable {
            nuclide: nuclide.to_string(),
            source: source.into(),
        }
    }
}
