//! Request ID generation

use uuid::Uuid;

/// Generate a new request ID using UUID v4
///
/// Attached to the compose span so every backend attempt of one request
/// can be correlated.
///
/// ```
/// use herald::logging::generate_request_id;
///
/// let request_id = generate_request_id();
/// assert_eq!(request_id.len(), 36);
/// ```
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}
