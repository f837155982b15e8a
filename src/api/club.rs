//! Club directory endpoints

use crate::client::Client;
use crate::error::Result;
use serde::Deserialize;

/// A club in the directory.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Club {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub avatar: Option<String>,
    pub member_count: Option<i64>,
    pub post_count: Option<i64>,
}

impl Client {
    /// Fetch the full club directory.
    pub async fn clubs(&self) -> Result<Vec<Club>> {
        let data = self.get("/club/list", &[]).await?;
        Client::parse(data)
    }

    /// Fetch one club.
    pub async fn club_detail(&self, club_id: i64) -> Result<Club> {
        let data = self.get(&format!("/club/{}", club_id), &[]).await?;
        Client::parse(data)
    }
}
