use serde::{Deserialize, Serialize};

pub const MAX_TEAM_NAME_LEN: usize = 100;

/// Team row from the teams table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    pub id: i64,
    pub name: String,
}

/// Request body for POST /api/teams
#[derive(Debug, Deserialize)]
pub struct CreateTeam {
    pub name: String,
}

/// A team name that passed validation and is ready to insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewTeam {
    name: String,
    key: String,
}

impl NewTeam {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let name = raw.trim();

        if name.is_empty() {
            return Err("name must not be empty".to_string());
        }
        if name.chars().count() > MAX_TEAM_NAME_LEN {
            return Err(format!("name must be at most {} characters", MAX_TEAM_NAME_LEN));
        }

        Ok(NewTeam {
            name: name.to_string(),
            key: name.to_lowercase(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Uniqueness key, equal for names that differ only in letter case.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl TryFrom<CreateTeam> for NewTeam {
    type Error = String;

    fn try_from(body: CreateTeam) -> Result<Self, Self::Error> {
        NewTeam::parse(&body.name)
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub timestamp: i64,
}

/// Snapshot returned by the environment diagnostics endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvDiagnostics {
    pub app_env: Option<String>,
    pub auth_app_env: Option<String>,
    pub auth_url: Option<String>,
    pub auth_secret: String,
}
