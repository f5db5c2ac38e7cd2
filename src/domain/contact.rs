//! Contacts owned by the backend and the views built over them

use crate::domain::shared::lenient;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Contact as returned by the backend contact list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(
        default,
        deserialize_with = "lenient::opt_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub phone: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            phone: phone.into(),
        }
    }

    /// Case-insensitive name match, or plain substring match on the phone
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase()) || self.phone.contains(query)
    }

    /// Group key: the uppercased first character of the name
    pub fn index_letter(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

/// Data for creating a contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
}

/// Data for editing an existing contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactUpdate {
    pub id: i64,
    pub name: String,
    pub phone: String,
}

/// Which side of the pending call a contact is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactRole {
    #[serde(rename = "A-party")]
    AParty,
    #[serde(rename = "B-party")]
    BParty,
}

impl ContactRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactRole::AParty => "A-party",
            ContactRole::BParty => "B-party",
        }
    }

    /// Role of `phone` given the current A-party and B-party numbers
    pub fn of(phone: &str, aparty: Option<&str>, bparty: &str) -> Option<Self> {
        if aparty == Some(phone) {
            Some(ContactRole::AParty)
        } else if bparty == phone {
            Some(ContactRole::BParty)
        } else {
            None
        }
    }
}

impl fmt::Display for ContactRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contacts matching a search query, in list order
pub fn filter_contacts<'a>(contacts: &'a [Contact], query: &str) -> Vec<&'a Contact> {
    contacts.iter().filter(|c| c.matches(query)).collect()
}

/// Contacts grouped under the first letter of their name, groups sorted by letter
pub fn group_by_first_letter<'a, I>(contacts: I) -> BTreeMap<String, Vec<&'a Contact>>
where
    I: IntoIterator<Item = &'a Contact>,
{
    let mut groups: BTreeMap<String, Vec<&'a Contact>> = BTreeMap::new();
    for contact in contacts {
        groups.entry(contact.index_letter()).or_default().push(contact);
    }
    groups
}
