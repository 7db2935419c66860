use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all airdep operations.
///
/// Every variant is fatal to a resolution run: there is no local recovery
/// and no partial result is published.
#[derive(Debug, Error, Diagnostic)]
pub enum AirdepError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed `airdep.json`.
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your airdep.json for syntax errors"))]
    Manifest { message: String },

    /// A repository index or package file could not be loaded.
    #[error("Repository error: {message}")]
    Repository { message: String },

    /// The user configuration file is unreadable or malformed.
    #[error("Config error: {message}")]
    #[diagnostic(help("Check ~/.airdep/config.toml"))]
    Config { message: String },

    /// A constraint references a package that no repository provides.
    #[error("Unknown package '{package}'")]
    #[diagnostic(help("No loaded repository defines this package"))]
    UnknownPackage { package: String },

    /// A catalog version key is not a valid semantic version.
    #[error("Malformed version '{version}' for package '{package}': {reason}")]
    MalformedVersion {
        package: String,
        version: String,
        reason: String,
    },

    /// A constraint string could not be parsed.
    #[error("Malformed constraint '{constraint}': {reason}")]
    MalformedConstraint { constraint: String, reason: String },

    /// Narrowing removed every remaining version of a package.
    #[error("No versions of '{package}' left after applying constraint '{constraint}'")]
    #[diagnostic(help("Relax the constraint or add a repository providing a matching version"))]
    UnsatisfiableConstraint { package: String, constraint: String },

    /// An internal invariant of the resolution engine was broken.
    #[error("Internal invariant violated: {message}")]
    InvariantViolation { message: String },

    /// An attribute value did not have the shape the engine expected.
    #[error("Expected {expected} for {context}, found {found}")]
    ValueShape {
        context: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}
