//! Input limits applied by the task services.

use super::error::TaskServiceError;

/// Caps on caller-supplied input.
///
/// The limits guard storage and keep pathological payloads out of commit
/// digests; they are not business rules. Embedders can tighten or relax
/// them per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskPolicy {
    /// Longest accepted title, in characters.
    pub max_title_chars: usize,
    /// Longest accepted description, in characters.
    pub max_description_chars: usize,
    /// Longest accepted commit message, in characters.
    pub max_message_chars: usize,
    /// Most users a directed task may resolve to.
    pub max_targets: usize,
}

impl TaskPolicy {
    /// Limits suitable for interactive use.
    pub const STANDARD: Self = Self {
        max_title_chars: 200,
        max_description_chars: 4000,
        max_message_chars: 500,
        max_targets: 100,
    };

    /// Checks a title against [`TaskPolicy::max_title_chars`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when the title is too
    /// long.
    pub fn check_title(&self, title: &str) -> Result<(), TaskServiceError> {
        if title.chars().count() > self.max_title_chars {
            return Err(TaskServiceError::Validation(format!(
                "title exceeds {} characters",
                self.max_title_chars
            )));
        }
        Ok(())
    }

    /// Checks a description against
    /// [`TaskPolicy::max_description_chars`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when the description is
    /// too long.
    pub fn check_description(&self, description: &str) -> Result<(), TaskServiceError> {
        if description.chars().count() > self.max_description_chars {
            return Err(TaskServiceError::Validation(format!(
                "description exceeds {} characters",
                self.max_description_chars
            )));
        }
        Ok(())
    }

    /// Checks a commit message against [`TaskPolicy::max_message_chars`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when the message is too
    /// long.
    pub fn check_message(&self, message: &str) -> Result<(), TaskServiceError> {
        if message.chars().count() > self.max_message_chars {
            return Err(TaskServiceError::Validation(format!(
                "commit message exceeds {} characters",
                self.max_message_chars
            )));
        }
        Ok(())
    }

    /// Checks a resolved target count against
    /// [`TaskPolicy::max_targets`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when the assignment would
    /// cover too many users.
    pub fn check_target_count(&self, count: usize) -> Result<(), TaskServiceError> {
        if count > self.max_targets {
            return Err(TaskServiceError::Validation(format!(
                "assignment covers {count} users, more than the {} allowed",
                self.max_targets
            )));
        }
        Ok(())
    }
}

impl Default for TaskPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}
