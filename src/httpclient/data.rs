//! Defines the records returned by the SIM API and their `Serialize`
//! instances. They are built from JSON by the functions in
//! [`super::mapping`].

use serde::Serialize;
use serde_json::{Map, Value};

/// A project group and its members, in the order the server returned
/// them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub name: String,
    pub members: Vec<String>,
}

/// Link from a project name to its institution resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectInstitutionLink {
    pub project: String,
    pub institution_id: String,
    pub link: String,
}

/// A postal address block of an institution.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct InstitutionAddress {
    pub kind: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub po_box: Option<String>,
    pub address_suffix: Option<String>,
    pub care_of: Option<String>,
    pub person: Option<String>,
    pub account: Option<String>,
    pub distribution_key: Option<String>,
    pub recipient1: Option<String>,
    pub recipient2: Option<String>,
    pub recipient3: Option<String>,
    pub recipient4: Option<String>,
    pub name: Option<String>,
    /// Whether the address is inherited from a parent institution.
    pub inherited: Option<bool>,
    pub person_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Institution {
    pub lrz_id: String,
    pub name: Option<String>,
    pub parent_ids: Vec<String>,
    pub parent_links: Vec<String>,
    pub description: Option<String>,
    pub user_class: Option<String>,
    pub mwn_internal: Option<String>,
    pub billing: Vec<String>,
    pub institution_kind: Option<String>,
    pub institution_type: Option<String>,
    pub ads_org_prefix: Option<String>,
    pub status: Option<String>,
    pub imported: Option<String>,
    pub addresses: Vec<InstitutionAddress>,
    /// The person heading the institution.
    pub head_lrz_id: Option<String>,
    pub head_links: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    pub lrz_id: String,
    pub username: Option<String>,
    pub salutation: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title_prefix: Option<String>,
    pub title_suffix: Option<String>,
    pub gender: Option<String>,
    /// The user accounts (Kennungen) of this person.
    pub accounts: Vec<String>,
    pub status: Option<String>,
}

/// A SIM user account (Kennung).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub username: String,
    /// The LRZ id of the person owning this account.
    pub person_id: Option<String>,
    pub status: Option<String>,
    pub status_num: Option<i64>,
    pub valid_password: Option<i64>,
    pub uid: Option<String>,
    pub gid: Option<String>,
    pub project: Option<String>,
    pub account_type: Option<String>,
    pub data: Map<String, Value>,
}
