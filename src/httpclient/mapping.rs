//! Maps JSON responses into the records of [`super::data`].
//!
//! There is one function per endpoint. Each validates that required
//! fields are present and that every field it reads has the expected
//! JSON type. Absent and `null` optional fields become `None` or an
//! empty list, unknown fields are ignored.
//!
//! Some endpoints wrap their payload into an envelope:
//!
//! ```json
//! {"code": 0, "message": "OK", "data": ...}
//! ```
//!
//! A non-zero `code` is reported as [`Error::ApiCode`].

use super::data::*;
use serde_json::{Map, Value};
use snafu::Snafu;

#[derive(Debug, PartialEq, Snafu)]
pub enum Error {
    #[snafu(display("Field '{}': expected {}, found {}", field, expected, actual))]
    Shape {
        field: String,
        expected: &'static str,
        actual: String,
    },

    #[snafu(display("API returned error code {}: {}", code, message))]
    ApiCode { code: i64, message: String },
}

pub fn groups(value: &Value) -> Result<Vec<String>, Error> {
    string_list(value, "groups")
}

pub fn group_members(value: &Value) -> Result<Vec<String>, Error> {
    string_list(value, "members")
}

pub fn project_institution_links(value: &Value) -> Result<Vec<ProjectInstitutionLink>, Error> {
    let items = match unwrap_envelope(value)? {
        Value::Null => return Ok(vec![]),
        Value::Array(items) => items.iter().collect::<Vec<_>>(),
        single => vec![single],
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let f = Fields::new(item, format!("data[{}]", i))?;
            Ok(ProjectInstitutionLink {
                project: f.id("projektname")?,
                institution_id: f.id("einrichtungsId")?,
                link: f.opt_str("link")?.unwrap_or_default(),
            })
        })
        .collect()
}

pub fn institution(value: &Value) -> Result<Institution, Error> {
    let f = Fields::new(single_record(value)?, "data".into())?;
    let addresses = match f.get("anschriften") {
        None => vec![],
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| address(item, f.path(&format!("anschriften[{}]", i))))
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => return Err(f.mismatch("anschriften", "array", other)),
    };
    Ok(Institution {
        lrz_id: f.id("LRZid")?,
        name: f.opt_str("name")?,
        parent_ids: f.str_list("parent_lrzId")?,
        parent_links: f.str_list("parent_link")?,
        description: f.opt_str("bezeichnung")?,
        user_class: f.opt_str("nutzerklasse")?,
        mwn_internal: f.opt_str("mwnintern")?,
        billing: f.str_list("kostenabrechnung")?,
        institution_kind: f.opt_str("einrichtungsart")?,
        institution_type: f.opt_str("einrichtungstyp")?,
        ads_org_prefix: f.opt_str("adsorgpraefix")?,
        status: f.opt_str("status")?,
        imported: f.opt_str("importiert")?,
        addresses,
        head_lrz_id: f.opt_str("chef_lrzId")?,
        head_links: f.str_list("chef_link")?,
    })
}

fn address(value: &Value, path: String) -> Result<InstitutionAddress, Error> {
    let f = Fields::new(value, path)?;
    Ok(InstitutionAddress {
        kind: f.opt_str("typ")?,
        street: f.opt_str("strasse")?,
        postal_code: f.opt_str("plz")?,
        city: f.opt_str("ort")?,
        country: f.opt_str("land")?,
        po_box: f.opt_str("postfach")?,
        address_suffix: f.opt_str("adresszusatz")?,
        care_of: f.opt_str("co")?,
        person: f.opt_str("person")?,
        account: f.opt_str("kennung")?,
        distribution_key: f.opt_str("postverteilschluessel")?,
        recipient1: f.opt_str("adressat1")?,
        recipient2: f.opt_str("adressat2")?,
        recipient3: f.opt_str("adressat3")?,
        recipient4: f.opt_str("adressat4")?,
        name: f.opt_str("name")?,
        inherited: f.opt_bool("geerbt")?,
        person_link: f.opt_str("person_link")?,
    })
}

pub fn person(value: &Value) -> Result<Person, Error> {
    let f = Fields::new(single_record(value)?, "data".into())?;
    Ok(Person {
        lrz_id: f.id("LRZid")?,
        username: f.opt_str("benutzername")?,
        salutation: f.opt_str("anrede")?,
        first_name: f.opt_str("rufname")?,
        last_name: f.opt_str("nachname")?,
        title_prefix: f.opt_str("titelPre")?,
        title_suffix: f.opt_str("titelPost")?,
        gender: f.opt_str("geschlecht")?,
        accounts: f.str_list("kennungen")?,
        status: f.opt_str("status")?,
    })
}

pub fn user(value: &Value) -> Result<User, Error> {
    let f = Fields::new(value, "user".into())?;
    let data = match f.get("daten") {
        None => Map::new(),
        Some(Value::Object(m)) => m.clone(),
        Some(other) => return Err(f.mismatch("daten", "object", other)),
    };
    Ok(User {
        username: f.id("kennung")?,
        person_id: f.opt_str("mwnlrzid")?,
        status: f.opt_str("status")?,
        status_num: f.opt_int("status_num")?,
        valid_password: f.opt_int("validpwd")?,
        uid: f.opt_str_or_number("uid")?,
        gid: f.opt_str_or_number("gid")?,
        project: f.opt_str("projekt")?,
        account_type: f.opt_str("kennungstyp")?,
        data,
    })
}

static NULL: Value = Value::Null;

/// Checks the envelope's `code` and returns its `data`.
fn unwrap_envelope(value: &Value) -> Result<&Value, Error> {
    let f = Fields::new(value, "response".into())?;
    let code = match f.get("code") {
        Some(Value::Number(n)) if n.is_i64() => n.as_i64().unwrap_or_default(),
        Some(other) => return Err(f.mismatch("code", "integer", other)),
        None => return Err(f.missing("code", "integer")),
    };
    if code != 0 {
        let message = f
            .opt_str("message")
            .ok()
            .flatten()
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(Error::ApiCode { code, message });
    }
    Ok(f.get("data").unwrap_or(&NULL))
}

/// An envelope whose `data` is either an object or an array holding
/// exactly one object.
fn single_record(value: &Value) -> Result<&Value, Error> {
    match unwrap_envelope(value)? {
        Value::Array(items) if items.len() == 1 => Ok(&items[0]),
        Value::Array(items) => Err(Error::Shape {
            field: "data".into(),
            expected: "exactly one record",
            actual: format!("{} records", items.len()),
        }),
        data @ Value::Object(_) => Ok(data),
        other => Err(Error::Shape {
            field: "data".into(),
            expected: "object",
            actual: json_type(other).into(),
        }),
    }
}

fn string_list(value: &Value, field: &str) -> Result<Vec<String>, Error> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(Error::Shape {
                    field: format!("{}[{}]", field, i),
                    expected: "string",
                    actual: json_type(other).into(),
                }),
            })
            .collect(),
        other => Err(Error::Shape {
            field: field.into(),
            expected: "array of strings",
            actual: json_type(other).into(),
        }),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Typed access to the fields of a JSON object. Field names in errors
/// are prefixed with the object's path.
struct Fields<'a> {
    map: &'a Map<String, Value>,
    path: String,
}

impl<'a> Fields<'a> {
    fn new(value: &'a Value, path: String) -> Result<Fields<'a>, Error> {
        match value {
            Value::Object(map) => Ok(Fields { map, path }),
            other => Err(Error::Shape {
                field: path,
                expected: "object",
                actual: json_type(other).into(),
            }),
        }
    }

    fn path(&self, name: &str) -> String {
        format!("{}.{}", self.path, name)
    }

    /// The value of `name`, where `null` counts as absent.
    fn get(&self, name: &str) -> Option<&'a Value> {
        self.map.get(name).filter(|v| !v.is_null())
    }

    fn mismatch(&self, name: &str, expected: &'static str, found: &Value) -> Error {
        Error::Shape {
            field: self.path(name),
            expected,
            actual: json_type(found).into(),
        }
    }

    fn missing(&self, name: &str, expected: &'static str) -> Error {
        Error::Shape {
            field: self.path(name),
            expected,
            actual: "nothing".into(),
        }
    }

    /// A required, non-empty string.
    fn id(&self, name: &str) -> Result<String, Error> {
        match self.opt_str(name)? {
            Some(s) if !s.trim().is_empty() => Ok(s),
            Some(_) => Err(Error::Shape {
                field: self.path(name),
                expected: "non-empty string",
                actual: "empty string".into(),
            }),
            None => Err(self.missing(name, "non-empty string")),
        }
    }

    fn opt_str(&self, name: &str) -> Result<Option<String>, Error> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.mismatch(name, "string", other)),
        }
    }

    fn opt_str_or_number(&self, name: &str) -> Result<Option<String>, Error> {
        match self.get(name) {
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::String(_)) | None => self.opt_str(name),
            Some(other) => Err(self.mismatch(name, "string or number", other)),
        }
    }

    fn opt_int(&self, name: &str) -> Result<Option<i64>, Error> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::Number(n)) if n.is_i64() => Ok(n.as_i64()),
            Some(other) => Err(self.mismatch(name, "integer", other)),
        }
    }

    fn opt_bool(&self, name: &str) -> Result<Option<bool>, Error> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(self.mismatch(name, "boolean", other)),
        }
    }

    fn str_list(&self, name: &str) -> Result<Vec<String>, Error> {
        match self.get(name) {
            None => Ok(vec![]),
            Some(v) => string_list(v, &self.path(name)),
        }
    }
}
