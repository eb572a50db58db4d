//! Platform wire types used only inside the client

use std::collections::HashMap;

use serde::Deserialize;

/// `GET /site-names/{name}`
#[derive(Debug, Deserialize)]
pub(crate) struct SiteLookup {
    pub id: String,
}

/// `GET /sites/{id}/environments`, keyed by environment name.
pub(crate) type EnvironmentMap = HashMap<String, serde_json::Value>;
