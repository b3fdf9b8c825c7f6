//! Result type alias for dbmon
//!
//! This module provides a convenient Result type alias that uses DbmonError
//! as the error type.

use super::errors::DbmonError;

/// Result type alias for dbmon operations
///
/// # Examples
///
/// ```
/// use dbmon::domain::result::Result;
/// use dbmon::domain::errors::DbmonError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(DbmonError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, DbmonError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DbmonError;

    #[test]
    fn test_result_ok() {
        let result: Result<i32> = Ok(42);
        assert!(result.is_ok());
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(DbmonError::Document("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
