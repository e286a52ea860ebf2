//! Extraction of GitHub dependency declarations from package-manager
//! configuration text.

/// Two-pass extraction of dependency records from raw file content.
pub mod extractor;

/// Configuration file inputs and the dependency records extracted from them.
pub mod record;

/// Supported configuration file syntaxes and their extraction patterns.
pub mod variant;

/// Canonicalization of captured version pins.
pub mod version;
