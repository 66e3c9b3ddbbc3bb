//! Registration record types: the submitted form, the validated record and the persisted row.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Gender labels offered by the registration form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Masculino,
    Femenino,
    Otro,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Masculino, Gender::Femenino, Gender::Otro];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Masculino => "Masculino",
            Gender::Femenino => "Femenino",
            Gender::Otro => "Otro",
        }
    }
}

/// Cities offered by the registration form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum City {
    Quito,
    Guayaquil,
    Cuenca,
    Ambato,
    Loja,
    Manta,
}

impl City {
    pub const ALL: [City; 6] = [
        City::Quito,
        City::Guayaquil,
        City::Cuenca,
        City::Ambato,
        City::Loja,
        City::Manta,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            City::Quito => "Quito",
            City::Guayaquil => "Guayaquil",
            City::Cuenca => "Cuenca",
            City::Ambato => "Ambato",
            City::Loja => "Loja",
            City::Manta => "Manta",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel(pub String);

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown label '{}'", self.0)
    }
}

impl std::error::Error for UnknownLabel {}

impl FromStr for Gender {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

impl FromStr for City {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// Raw form submission as it arrives on POST/PUT. Fields stay untyped JSON here so that
/// missing values and wrong JSON types surface as per-field validation messages instead of
/// a rejection of the whole body.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistroInput {
    #[serde(default)]
    pub dni: Option<Value>,
    #[serde(default)]
    pub nombres: Option<Value>,
    #[serde(default)]
    pub apellidos: Option<Value>,
    #[serde(default)]
    pub fecha_nacimiento: Option<Value>,
    #[serde(default)]
    pub genero: Option<Value>,
    #[serde(default)]
    pub ciudad: Option<Value>,
}

/// A submission that passed validation; the only shape the store accepts for writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRegistro {
    pub dni: String,
    pub nombres: String,
    pub apellidos: String,
    pub fecha_nacimiento: NaiveDate,
    pub genero: Gender,
    pub ciudad: City,
}

/// Persisted registration record. Gender and city are read back as the stored labels:
/// databases written before the label sets were enforced may hold other values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registro {
    pub id: i64,
    pub dni: String,
    pub nombres: String,
    pub apellidos: String,
    pub fecha_nacimiento: NaiveDate,
    pub genero: String,
    pub ciudad: String,
    pub fecha_creacion: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_exactly() {
        assert_eq!("Femenino".parse::<Gender>(), Ok(Gender::Femenino));
        assert_eq!("Loja".parse::<City>(), Ok(City::Loja));
        assert!("femenino".parse::<Gender>().is_err());
        assert!("Lima".parse::<City>().is_err());
    }

    #[test]
    fn record_serializes_with_form_field_names() {
        let r = Registro {
            id: 7,
            dni: "1234567890".into(),
            nombres: "Ana Maria".into(),
            apellidos: "Lopez Ruiz".into(),
            fecha_nacimiento: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            genero: "Femenino".into(),
            ciudad: "Quito".into(),
            fecha_creacion: NaiveDate::from_ymd_opt(2024, 5, 2)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
        };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["fechaNacimiento"], "1990-01-01");
        assert_eq!(v["genero"], "Femenino");
        assert_eq!(v["ciudad"], "Quito");
        assert_eq!(v["fechaCreacion"], "2024-05-02T10:30:00");
    }

    #[test]
    fn input_accepts_partial_bodies() {
        let input: RegistroInput = serde_json::from_str(r#"{"dni":"1234567890"}"#).unwrap();
        assert_eq!(input.dni, Some(Value::from("1234567890")));
        assert!(input.fecha_nacimiento.is_none());
    }

    #[test]
    fn input_keeps_mistyped_fields() {
        let input: RegistroInput =
            serde_json::from_str(r#"{"dni":1234567890,"nombres":["Ana"],"ciudad":null}"#).unwrap();
        assert_eq!(input.dni, Some(Value::from(1234567890_i64)));
        assert!(input.nombres.unwrap().is_array());
        assert!(input.ciudad.is_none());
    }
}
