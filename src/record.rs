//! User record model
//!
//! Mirrors the JSON shape of the remote collection. Only `id`, the display
//! fields and the organization name are read by the list controller; the
//! rest is carried for the detail view.

use serde::{Deserialize, Serialize};

/// A single user as returned by the collection endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "username", default)]
    pub handle: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub company: Company,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub suite: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default)]
    pub geo: Geo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    #[serde(default)]
    pub lat: String,
    #[serde(default)]
    pub lng: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "catchPhrase", default)]
    pub catch_phrase: String,
    #[serde(default)]
    pub bs: String,
}

impl Record {
    /// Build a record with only the list-view fields set
    pub fn new(id: u64, display_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            handle: String::new(),
            email: email.into(),
            phone: String::new(),
            website: String::new(),
            address: Address::default(),
            company: Company::default(),
        }
    }

    pub fn organization_name(&self) -> &str {
        &self.company.name
    }

    /// Handle as shown in the list, e.g. `@Bret`
    pub fn handle_label(&self) -> String {
        format!("@{}", self.handle)
    }

    /// Website as a clickable URL (the source stores bare host names)
    pub fn website_url(&self) -> Option<String> {
        let site = self.website.trim();
        if site.is_empty() {
            None
        } else if site.starts_with("http://") || site.starts_with("https://") {
            Some(site.to_string())
        } else {
            Some(format!("http://{}", site))
        }
    }
}
