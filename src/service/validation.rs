//! Registration form validation: age computation and per-field format rules.

use crate::domain::{City, Gender, NewRegistro, RegistroInput};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Minimum age, in whole years, accepted at create/update time.
pub const ADULT_AGE: i32 = 18;

const DATE_FORMAT: &str = "%Y-%m-%d";

static NATIONAL_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("national id pattern compiles"));
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\p{L}\p{M}\s]+$").expect("name pattern compiles"));

/// Whole years between `birth` and `reference`, minus one if the birthday has not
/// yet come around in `reference`'s year.
pub fn compute_age(birth: NaiveDate, reference: NaiveDate) -> i32 {
    let mut age = reference.year() - birth.year();
    if (reference.month(), reference.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

pub fn is_adult(birth: NaiveDate, today: NaiveDate) -> bool {
    compute_age(birth, today) >= ADULT_AGE
}

/// Exactly ten ASCII digits.
pub fn is_valid_national_id(s: &str) -> bool {
    NATIONAL_ID_RE.is_match(s)
}

/// At least two characters, each a Unicode letter, combining mark or whitespace.
/// Marks keep decomposed accents (`e` + U+0301) valid.
pub fn is_valid_name(s: &str) -> bool {
    s.chars().count() >= 2 && NAME_RE.is_match(s)
}

/// Form fields in the order the server checks them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Dni,
    Nombres,
    Apellidos,
    FechaNacimiento,
    Genero,
    Ciudad,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Dni => "dni",
            Field::Nombres => "nombres",
            Field::Apellidos => "apellidos",
            Field::FechaNacimiento => "fechaNacimiento",
            Field::Genero => "genero",
            Field::Ciudad => "ciudad",
        }
    }
}

/// One message per failing field, kept in server check order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(Field, String)>,
}

impl FieldErrors {
    fn push(&mut self, field: Field, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    /// First failure in server order; this is what the endpoints report as the error message.
    pub fn first(&self) -> Option<(Field, &str)> {
        self.errors.first().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first() {
            Some((_, message)) => f.write_str(message),
            None => f.write_str("Datos inválidos"),
        }
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (field, message) in &self.errors {
            map.serialize_entry(field.as_str(), message)?;
        }
        map.end()
    }
}

/// How a submitted field arrived.
#[derive(Debug, PartialEq, Eq)]
enum FormValue<'a> {
    /// Missing, `null`, or a blank string.
    Absent,
    Text(Cow<'a, str>),
    /// Booleans, arrays and objects; the form never sends these.
    Unsupported,
}

/// Strings pass through and numbers are taken by their decimal text, so `{"dni": 1234567890}`
/// validates like its quoted form.
fn form_value(v: Option<&Value>) -> FormValue<'_> {
    match v {
        None | Some(Value::Null) => FormValue::Absent,
        Some(Value::String(s)) if s.trim().is_empty() => FormValue::Absent,
        Some(Value::String(s)) => FormValue::Text(Cow::Borrowed(s.as_str())),
        Some(Value::Number(n)) => FormValue::Text(Cow::Owned(n.to_string())),
        Some(_) => FormValue::Unsupported,
    }
}

pub struct RegistroValidator;

impl RegistroValidator {
    /// Validate every field of a submission. All failing fields are reported together,
    /// each with the first rule it violated.
    pub fn validate(input: &RegistroInput, today: NaiveDate) -> Result<NewRegistro, FieldErrors> {
        let mut errors = FieldErrors::default();

        let dni = match form_value(input.dni.as_ref()) {
            FormValue::Absent => {
                errors.push(Field::Dni, "El DNI es requerido");
                None
            }
            FormValue::Text(s) if is_valid_national_id(&s) => Some(s.into_owned()),
            FormValue::Text(_) | FormValue::Unsupported => {
                errors.push(Field::Dni, "El DNI debe tener 10 dígitos numéricos");
                None
            }
        };

        let nombres = validate_name(&mut errors, Field::Nombres, input.nombres.as_ref(), "Los nombres");
        let apellidos = validate_name(&mut errors, Field::Apellidos, input.apellidos.as_ref(), "Los apellidos");

        let birth = match form_value(input.fecha_nacimiento.as_ref()) {
            FormValue::Absent => Err("La fecha de nacimiento es requerida"),
            FormValue::Text(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
                .map_err(|_| "La fecha de nacimiento no es válida"),
            FormValue::Unsupported => Err("La fecha de nacimiento no es válida"),
        };
        let fecha_nacimiento = match birth {
            Ok(d) if is_adult(d, today) => Some(d),
            Ok(_) => {
                errors.push(Field::FechaNacimiento, "Debes ser mayor de 18 años");
                None
            }
            Err(message) => {
                errors.push(Field::FechaNacimiento, message);
                None
            }
        };

        let genero = validate_label::<Gender>(
            &mut errors,
            Field::Genero,
            input.genero.as_ref(),
            "Debe seleccionar un género",
            "Género no válido",
        );
        let ciudad = validate_label::<City>(
            &mut errors,
            Field::Ciudad,
            input.ciudad.as_ref(),
            "Debe seleccionar una ciudad",
            "Ciudad no válida",
        );

        match (dni, nombres, apellidos, fecha_nacimiento, genero, ciudad) {
            (Some(dni), Some(nombres), Some(apellidos), Some(fecha_nacimiento), Some(genero), Some(ciudad))
                if errors.is_empty() =>
            {
                Ok(NewRegistro {
                    dni,
                    nombres,
                    apellidos,
                    fecha_nacimiento,
                    genero,
                    ciudad,
                })
            }
            _ => Err(errors),
        }
    }
}

fn validate_label<T: FromStr>(
    errors: &mut FieldErrors,
    field: Field,
    value: Option<&Value>,
    missing: &'static str,
    unknown: &'static str,
) -> Option<T> {
    match form_value(value) {
        FormValue::Absent => {
            errors.push(field, missing);
            None
        }
        FormValue::Text(s) => match s.parse::<T>() {
            Ok(v) => Some(v),
            Err(_) => {
                errors.push(field, unknown);
                None
            }
        },
        FormValue::Unsupported => {
            errors.push(field, unknown);
            None
        }
    }
}

fn validate_name(errors: &mut FieldErrors, field: Field, value: Option<&Value>, label: &str) -> Option<String> {
    let s = match form_value(value) {
        FormValue::Absent => {
            errors.push(field, format!("{} son requeridos", label));
            return None;
        }
        FormValue::Unsupported => {
            errors.push(field, format!("{} solo pueden contener letras y espacios", label));
            return None;
        }
        FormValue::Text(s) => s,
    };
    if s.chars().count() < 2 {
        errors.push(field, format!("{} deben tener al menos 2 caracteres", label));
        return None;
    }
    if !is_valid_name(&s) {
        errors.push(field, format!("{} solo pueden contener letras y espacios", label));
        return None;
    }
    Some(s.into_owned())
}
