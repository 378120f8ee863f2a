//! Result type alias for Holonet

use super::errors::HolonetError;

/// Result type alias for Holonet operations
///
/// # Examples
///
/// ```
/// use holonet::domain::result::Result;
/// use holonet::domain::errors::HolonetError;
///
/// fn failing_function() -> Result<()> {
///     Err(HolonetError::Validation("Invalid input".to_string()))
/// }
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, HolonetError>;
