//! User Storage
//! Mission: Persist user accounts with SQLite behind a narrow interface

use crate::auth::models::{Department, Role, User};
use anyhow::{Context, Result};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::{info, warn};

/// A new account, pre-hashing. `create` owns turning the password into
/// a bcrypt hash.
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub role: Role,
    pub department: Department,
}

/// Why user creation failed. Uniqueness violations get their own
/// variant so the API can surface 409 instead of a generic 500.
#[derive(Debug)]
pub enum CreateUserError {
    UsernameTaken,
    Other(anyhow::Error),
}

impl std::fmt::Display for CreateUserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateUserError::UsernameTaken => write!(f, "Username already exists"),
            CreateUserError::Other(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CreateUserError {}

/// Credential store with SQLite backend
pub struct UserStore {
    db_path: String,
}

impl UserStore {
    /// Create a new user store and initialize the schema.
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                username TEXT PRIMARY KEY,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL,
                department TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        self.create_default_admin(&conn)?;

        Ok(())
    }

    /// Create default admin user for initial setup
    fn create_default_admin(&self, conn: &Connection) -> Result<()> {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM users WHERE role = 'admin'",
                [],
                |row| row.get(0),
            )
            .context("Failed to check for admin users")?;

        if count == 0 {
            let password_hash =
                hash("admin123", DEFAULT_COST).context("Failed to hash password")?;

            conn.execute(
                "INSERT INTO users (username, first_name, last_name, password_hash, role, department, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    "admin",
                    "Default",
                    "Admin",
                    password_hash,
                    Role::Admin.as_str(),
                    Department::It.as_str(),
                    Utc::now().to_rfc3339(),
                ],
            )
            .context("Failed to insert admin user")?;

            info!("🔐 Default admin user created (username: admin, password: admin123)");
            warn!("⚠️  CHANGE DEFAULT PASSWORD IN PRODUCTION!");
        }

        Ok(())
    }

    /// Seed the demo accounts the original deployment shipped with.
    /// Idempotent: existing usernames are left untouched.
    pub fn seed_demo_users(&self) -> Result<()> {
        let demo = [
            ("user1", Role::User, Department::Hr),
            ("admin1", Role::Admin, Department::It),
            ("moderator1", Role::Moderator, Department::Finance),
        ];

        for (username, role, department) in demo {
            let result = self.create(NewUser {
                username: username.to_string(),
                first_name: "Demo".to_string(),
                last_name: "Account".to_string(),
                password: "password".to_string(),
                role,
                department,
            });

            match result {
                Ok(_) | Err(CreateUserError::UsernameTaken) => {}
                Err(CreateUserError::Other(e)) => return Err(e),
            }
        }

        info!("✅ Demo users seeded (user1 / admin1 / moderator1)");
        Ok(())
    }

    /// Get user by username
    pub fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT username, first_name, last_name, password_hash, role, department, created_at
             FROM users WHERE username = ?1",
        )?;

        let user_result = stmt.query_row(params![username], |row| {
            let role_str: String = row.get(4)?;
            let department_str: String = row.get(5)?;
            Ok(User {
                username: row.get(0)?,
                first_name: row.get(1)?,
                last_name: row.get(2)?,
                password_hash: row.get(3)?,
                role: Role::from_str(&role_str).unwrap_or(Role::User),
                department: Department::from_str(&department_str).unwrap_or(Department::It),
                created_at: row.get(6)?,
            })
        });

        match user_result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Verify username and password
    pub fn verify_password(&self, username: &str, password: &str) -> Result<bool> {
        match self.find_by_username(username)? {
            Some(user) => {
                let valid =
                    verify(password, &user.password_hash).context("Failed to verify password")?;
                Ok(valid)
            }
            None => Ok(false),
        }
    }

    /// Create a new user. The PRIMARY KEY constraint on `username` is
    /// what serializes concurrent creates for the same name.
    pub fn create(&self, new_user: NewUser) -> Result<User, CreateUserError> {
        let password_hash = hash(&new_user.password, DEFAULT_COST)
            .context("Failed to hash password")
            .map_err(CreateUserError::Other)?;

        let user = User {
            username: new_user.username,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            password_hash,
            role: new_user.role,
            department: new_user.department,
            created_at: Utc::now().to_rfc3339(),
        };

        let conn = Connection::open(&self.db_path)
            .context("Failed to open credential store")
            .map_err(CreateUserError::Other)?;

        let result = conn.execute(
            "INSERT INTO users (username, first_name, last_name, password_hash, role, department, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                user.username,
                user.first_name,
                user.last_name,
                user.password_hash,
                user.role.as_str(),
                user.department.as_str(),
                user.created_at,
            ],
        );

        match result {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                return Err(CreateUserError::UsernameTaken);
            }
            Err(e) => {
                return Err(CreateUserError::Other(
                    anyhow::Error::new(e).context("Failed to insert user"),
                ));
            }
        }

        info!(
            "✅ Created user: {} ({}, {})",
            user.username,
            user.role.as_str(),
            user.department.as_str()
        );

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (UserStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();
        let store = UserStore::new(db_path).unwrap();
        (store, temp_file)
    }

    fn new_user(username: &str, role: Role, department: Department) -> NewUser {
        NewUser {
            username: username.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            password: "pw123".to_string(),
            role,
            department,
        }
    }

    #[test]
    fn test_default_admin_created() {
        let (store, _temp) = create_test_store();

        let admin = store.find_by_username("admin").unwrap();
        assert!(admin.is_some());

        let admin = admin.unwrap();
        assert_eq!(admin.username, "admin");
        assert_eq!(admin.role, Role::Admin);
    }

    #[test]
    fn test_password_verification() {
        let (store, _temp) = create_test_store();

        // Correct password
        assert!(store.verify_password("admin", "admin123").unwrap());

        // Incorrect password
        assert!(!store.verify_password("admin", "wrongpassword").unwrap());

        // Non-existent user
        assert!(!store.verify_password("nonexistent", "password").unwrap());
    }

    #[test]
    fn test_create_and_retrieve_user() {
        let (store, _temp) = create_test_store();

        let created = store
            .create(new_user("alice", Role::User, Department::It))
            .unwrap();
        assert_eq!(created.username, "alice");
        assert_eq!(created.role, Role::User);
        assert_eq!(created.department, Department::It);

        let retrieved = store.find_by_username("alice").unwrap().unwrap();
        assert_eq!(retrieved.username, "alice");
        assert_eq!(retrieved.role, Role::User);
        assert_eq!(retrieved.department, Department::It);
        assert!(store.verify_password("alice", "pw123").unwrap());
    }

    #[test]
    fn test_duplicate_username_is_conflict() {
        let (store, _temp) = create_test_store();

        store
            .create(new_user("bob", Role::User, Department::Hr))
            .unwrap();

        let err = store
            .create(new_user("bob", Role::Moderator, Department::Finance))
            .unwrap_err();
        assert!(matches!(err, CreateUserError::UsernameTaken));
    }

    #[test]
    fn test_seed_demo_users_idempotent() {
        let (store, _temp) = create_test_store();

        store.seed_demo_users().unwrap();
        store.seed_demo_users().unwrap();

        let moderator = store.find_by_username("moderator1").unwrap().unwrap();
        assert_eq!(moderator.role, Role::Moderator);
        assert_eq!(moderator.department, Department::Finance);
        assert!(store.verify_password("moderator1", "password").unwrap());
    }
}
