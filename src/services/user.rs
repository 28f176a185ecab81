//! User service
//!
//! Handles registration and credential verification. Passwords are hashed
//! with Argon2id and stored in PHC string format; verification failures for
//! unknown emails and wrong passwords are indistinguishable to the caller.

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;

use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{user::normalize_email, User};
use crate::storage::Storage;

/// Service for user management
pub struct UserService<'a> {
    storage: &'a Storage,
}

impl<'a> UserService<'a> {
    /// Create a new user service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a new user
    ///
    /// The email is trimmed and lowercased before storage. Registration fails
    /// if the email or password is empty or the email is already taken.
    pub fn register(&self, email: &str, password: &str) -> SpendlogResult<User> {
        let email = normalize_email(email);

        if email.is_empty() {
            return Err(SpendlogError::Validation("Email is required".into()));
        }
        if password.is_empty() {
            return Err(SpendlogError::Validation("Password is required".into()));
        }

        if self.storage.users.get_by_email(&email)?.is_some() {
            return Err(SpendlogError::user_exists(email));
        }

        let password_hash = hash_password(password)?;
        let user = User::new(email, password_hash);

        self.storage.users.upsert(user.clone())?;
        self.storage.users.save()?;

        Ok(user)
    }

    /// Verify a user's credentials, returning the user on success
    ///
    /// Unknown email and wrong password both produce `Credentials` so callers
    /// cannot tell which emails are registered.
    pub fn verify(&self, email: &str, password: &str) -> SpendlogResult<User> {
        let email = normalize_email(email);

        let user = self
            .storage
            .users
            .get_by_email(&email)?
            .ok_or(SpendlogError::Credentials)?;

        if verify_password(&user.password_hash, password) {
            Ok(user)
        } else {
            Err(SpendlogError::Credentials)
        }
    }

    /// Look up a user by email
    pub fn find_by_email(&self, email: &str) -> SpendlogResult<Option<User>> {
        self.storage.users.get_by_email(&normalize_email(email))
    }

    /// Look up a user by email, failing with NotFound if absent
    pub fn require_by_email(&self, email: &str) -> SpendlogResult<User> {
        self.find_by_email(email)?
            .ok_or_else(|| SpendlogError::user_not_found(normalize_email(email)))
    }

    /// List all users, sorted by email
    pub fn list(&self) -> SpendlogResult<Vec<User>> {
        self.storage.users.get_all()
    }

    /// Count registered users
    pub fn count(&self) -> SpendlogResult<usize> {
        self.storage.users.count()
    }
}

/// Hash a password with Argon2id and a fresh random salt
fn hash_password(password: &str) -> SpendlogResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| SpendlogError::Storage(format!("Password hashing failed: {}", e)))
}

/// Check a password against a stored PHC hash string
fn verify_password(stored_hash: &str, password: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendlogPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendlogPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_register_normalizes_email() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        let user = service.register("  Alice@Example.COM ", "hunter2").unwrap();
        assert_eq!(user.email, "alice@example.com");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[test]
    fn test_register_rejects_empty_fields() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        assert!(matches!(
            service.register("", "hunter2"),
            Err(SpendlogError::Validation(_))
        ));
        assert!(matches!(
            service.register("alice@example.com", ""),
            Err(SpendlogError::Validation(_))
        ));
    }

    #[test]
    fn test_register_rejects_duplicate_email() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        service.register("alice@example.com", "hunter2").unwrap();
        let result = service.register("ALICE@example.com", "other");
        assert!(matches!(result, Err(SpendlogError::Duplicate { .. })));
    }

    #[test]
    fn test_verify_success() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        let registered = service.register("alice@example.com", "hunter2").unwrap();
        let verified = service.verify("Alice@Example.com", "hunter2").unwrap();
        assert_eq!(verified.id, registered.id);
    }

    #[test]
    fn test_verify_failures_are_indistinguishable() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        service.register("alice@example.com", "hunter2").unwrap();

        let wrong_password = service.verify("alice@example.com", "wrong");
        let unknown_email = service.verify("nobody@example.com", "hunter2");

        assert!(matches!(wrong_password, Err(SpendlogError::Credentials)));
        assert!(matches!(unknown_email, Err(SpendlogError::Credentials)));
    }

    #[test]
    fn test_registered_user_persists() {
        let (temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);
        let registered = service.register("alice@example.com", "hunter2").unwrap();
        drop(storage);

        let paths = SpendlogPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage2 = Storage::new(paths).unwrap();
        let service2 = UserService::new(&storage2);

        let found = service2.require_by_email("alice@example.com").unwrap();
        assert_eq!(found.id, registered.id);
        let verified = service2.verify("alice@example.com", "hunter2").unwrap();
        assert_eq!(verified.id, registered.id);
    }
}
