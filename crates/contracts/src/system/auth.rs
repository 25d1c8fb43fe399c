use serde::{Deserialize, Serialize};

/// Staff role, checked by the route middleware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Warehouse,
    Support,
}

impl Role {
    pub fn code(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Warehouse => "WAREHOUSE",
            Role::Support => "SUPPORT",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Warehouse => "Warehouse operator",
            Role::Support => "Customer support",
        }
    }

    pub fn all() -> Vec<Role> {
        vec![Role::Admin, Role::Warehouse, Role::Support]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ADMIN" => Some(Role::Admin),
            "WAREHOUSE" => Some(Role::Warehouse),
            "SUPPORT" => Some(Role::Support),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Receiving, inspection and refund actions need this
    pub fn can_operate_warehouse(&self) -> bool {
        matches!(self, Role::Admin | Role::Warehouse)
    }
}

impl ToString for Role {
    fn to_string(&self) -> String {
        self.code().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // user_id
    pub username: String,
    pub role: Role,
    pub exp: usize, // expiration timestamp
    pub iat: usize, // issued at
}

impl TokenClaims {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
