use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct RegisterActionQuery {
    pub action: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Body of POST/DELETE on the favourites collection: the external movie id
#[derive(Debug, Deserialize)]
pub struct FavouriteRequest {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub msg: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisteredResponse {
    pub code: u16,
    pub msg: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub success: bool,
    /// "BEARER <signed-token>"
    pub token: String,
}
