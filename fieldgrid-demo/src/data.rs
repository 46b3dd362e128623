//! Users shown by the table stories.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid user data in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::Editor => write!(f, "Editor"),
            Role::Viewer => write!(f, "Viewer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn new(id: u32, name: &str, email: &str, role: Role) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
            role,
        }
    }
}

/// The built-in dataset.
pub fn sample_users() -> Vec<User> {
    vec![
        User::new(1, "Alice Johnson", "alice@example.com", Role::Admin),
        User::new(2, "Bob Smith", "bob@example.com", Role::Editor),
        User::new(3, "Cara Lee", "cara@example.com", Role::Viewer),
    ]
}

/// Read a JSON array of users.
pub fn load_users(path: &Path) -> Result<Vec<User>, DataError> {
    let text = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let users: Vec<User> = serde_json::from_str(&text).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("loaded {} users from {:?}", users.len(), path);
    Ok(users)
}

/// Users whose name or email contains `query`, ignoring case.
pub fn filter_users(users: &[User], query: &str) -> Vec<User> {
    let needle = query.to_lowercase();
    users
        .iter()
        .filter(|u| {
            u.name.to_lowercase().contains(&needle) || u.email.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
