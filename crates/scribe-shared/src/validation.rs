//! Request-format validation. Each failed rule contributes one field message;
//! the server returns them all at once.

use crate::dto::{
    CategoryRequest, ChangePasswordRequest, CommentRequest, EditCommentRequest,
    ForgotPasswordRequest, LoginRequest, PostRequest, RegisterRequest, UpdateUserRequest,
};

const TITLE_MAX_CHARS: usize = 100;

/// Field-level format checks for an incoming request body.
pub trait Validate {
    /// Returns every violated rule, or `Ok` when the request is well formed.
    fn validate(&self) -> Result<(), Vec<String>>;
}

#[derive(Default)]
struct Violations(Vec<String>);

impl Violations {
    fn check(&mut self, ok: bool, message: &str) -> &mut Self {
        if !ok {
            self.0.push(message.to_string());
        }
        self
    }

    fn finish(&mut self) -> Result<(), Vec<String>> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(std::mem::take(&mut self.0))
        }
    }
}

fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// `local@domain.tld` with a 2-6 letter alphabetic TLD.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ".-".contains(c));
    let tld_ok = (2..=6).contains(&tld.len()) && tld.chars().all(|c| c.is_ascii_alphabetic());
    local_ok && host_ok && tld_ok
}

/// Exactly ten ASCII digits.
pub fn is_valid_mobile(mobile: &str) -> bool {
    mobile.len() == 10 && mobile.chars().all(|c| c.is_ascii_digit())
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), Vec<String>> {
        Violations::default()
            .check(not_blank(&self.full_name), "Full name is required")
            .check(not_blank(&self.email), "Email is required")
            .check(
                !not_blank(&self.email) || is_valid_email(&self.email),
                "Email format is invalid",
            )
            .check(not_blank(&self.password), "Password is required")
            .check(not_blank(&self.mobile_number), "Mobile number is required")
            .check(
                !not_blank(&self.mobile_number) || is_valid_mobile(&self.mobile_number),
                "Mobile number must be 10 digits",
            )
            .finish()
    }
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), Vec<String>> {
        Violations::default()
            .check(not_blank(&self.email), "Email is required")
            .check(not_blank(&self.password), "Password cannot be blank")
            .finish()
    }
}

impl Validate for ForgotPasswordRequest {
    fn validate(&self) -> Result<(), Vec<String>> {
        Violations::default()
            .check(not_blank(&self.email), "Email ID is required")
            .check(not_blank(&self.mobile_number), "Mobile number is required")
            .check(not_blank(&self.new_password), "New password is required")
            .check(not_blank(&self.confirm_password), "Confirm password is required")
            .finish()
    }
}

impl Validate for ChangePasswordRequest {
    fn validate(&self) -> Result<(), Vec<String>> {
        Violations::default()
            .check(not_blank(&self.email), "Email ID is required")
            .check(not_blank(&self.current_password), "Current password is required")
            .check(not_blank(&self.new_password), "New password is required")
            .check(not_blank(&self.confirm_password), "Confirm password is required")
            .finish()
    }
}

impl Validate for UpdateUserRequest {
    fn validate(&self) -> Result<(), Vec<String>> {
        Violations::default()
            .check(
                self.mobile_number.as_deref().is_none_or(is_valid_mobile),
                "Mobile number must be 10 digits",
            )
            .finish()
    }
}

impl Validate for PostRequest {
    fn validate(&self) -> Result<(), Vec<String>> {
        Violations::default()
            .check(not_blank(&self.title), "Title cannot be blank")
            .check(
                self.title.chars().count() <= TITLE_MAX_CHARS,
                "Title cannot exceed 100 characters",
            )
            .check(not_blank(&self.content), "Content cannot be blank")
            .check(self.author_id > 0, "Author ID must be a positive number")
            .check(
                self.category_id.is_none_or(|id| id > 0),
                "Category ID must be a positive number",
            )
            .finish()
    }
}

impl Validate for CommentRequest {
    fn validate(&self) -> Result<(), Vec<String>> {
        Violations::default()
            .check(not_blank(&self.content), "Content cannot be blank")
            .finish()
    }
}

impl Validate for EditCommentRequest {
    fn validate(&self) -> Result<(), Vec<String>> {
        Violations::default()
            .check(not_blank(&self.content), "Content cannot be blank")
            .finish()
    }
}

impl Validate for CategoryRequest {
    fn validate(&self) -> Result<(), Vec<String>> {
        Violations::default()
            .check(not_blank(&self.name), "Category cannot be blank")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str) -> PostRequest {
        PostRequest {
            title: title.to_string(),
            content: "Body".to_string(),
            author_id: 1,
            category_id: None,
            featured: false,
        }
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("jane.doe+blog@example.co"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("jane@example.c0m"));
    }

    #[test]
    fn test_mobile_format() {
        assert!(is_valid_mobile("0123456789"));
        assert!(!is_valid_mobile("12345"));
        assert!(!is_valid_mobile("01234567ab"));
    }

    #[test]
    fn test_post_title_rules() {
        assert!(post("Hello").validate().is_ok());

        let errors = post("  ").validate().unwrap_err();
        assert_eq!(errors, vec!["Title cannot be blank".to_string()]);

        let errors = post(&"x".repeat(101)).validate().unwrap_err();
        assert_eq!(errors, vec!["Title cannot exceed 100 characters".to_string()]);
    }

    #[test]
    fn test_register_collects_every_violation() {
        let request = RegisterRequest {
            full_name: String::new(),
            email: "nope".to_string(),
            password: String::new(),
            mobile_number: "123".to_string(),
            role: None,
            bio: None,
            avatar: None,
        };

        let errors = request.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&"Email format is invalid".to_string()));
        assert!(errors.contains(&"Mobile number must be 10 digits".to_string()));
    }
}
