use serde::{Deserialize, Deserializer, Serialize};

pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_initials: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub photo: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub doctor_introduction: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub specialities: Vec<Speciality>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fees: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clinic: Option<Clinic>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub video_consult: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub in_clinic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speciality {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clinic {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, deserialize_with = "null_as_default")]
    pub locality: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address_line1: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub logo_url: Option<String>,
}

/// Autocomplete entry offered by the search bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub name: String,
}

impl From<&Doctor> for Suggestion {
    fn from(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id.clone(),
            name: doctor.name.clone(),
        }
    }
}

impl Doctor {
    pub fn primary_specialty(&self) -> &str {
        self.specialities
            .first()
            .map(|s| s.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(NOT_AVAILABLE)
    }

    pub fn has_specialty(&self, name: &str) -> bool {
        self.specialities.iter().any(|s| s.name == name)
    }

    pub fn clinic_name(&self) -> Option<&str> {
        self.clinic
            .as_ref()
            .and_then(|c| c.name.as_deref())
            .filter(|name| !name.is_empty())
    }

    /// "locality, city" from whichever parts are present.
    pub fn location(&self) -> String {
        let Some(address) = self.clinic.as_ref().and_then(|c| c.address.as_ref()) else {
            return NOT_AVAILABLE.to_string();
        };

        let parts: Vec<&str> = [address.locality.as_deref(), address.city.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            parts.join(", ")
        }
    }

    /// The API sometimes sends the literal string "null" for a missing photo.
    pub fn photo_url<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match self.photo.as_deref() {
            Some(photo) if !photo.is_empty() && photo != "null" => photo,
            _ => placeholder,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(text)) => text,
        Some(RawId::Number(number)) => number.to_string(),
        None => String::new(),
    })
}
