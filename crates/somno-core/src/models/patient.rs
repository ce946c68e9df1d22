use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::error::ValidationError;

/// Upper bound accepted for age at intake.
pub const MAX_AGE: u32 = 120;

/// Text recorded in place of a BMI that could not be derived.
pub const BMI_NOT_CALCULATED: &str = "Not calculated";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body mass index derived from height and weight.
///
/// Serializes as a bare number, or as the string `"Not calculated"` when
/// either measurement was zero or the ratio is not finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bmi {
    Calculated(f64),
    NotCalculated,
}

impl Bmi {
    /// weight / (height / 100)², rounded to one decimal place.
    pub fn from_measurements(height_cm: f64, weight_kg: f64) -> Self {
        if height_cm <= 0.0 || weight_kg <= 0.0 {
            return Bmi::NotCalculated;
        }
        let height_m = height_cm / 100.0;
        let raw = weight_kg / (height_m * height_m);
        if !raw.is_finite() {
            return Bmi::NotCalculated;
        }
        Bmi::Calculated((raw * 10.0).round() / 10.0)
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Bmi::Calculated(v) => Some(*v),
            Bmi::NotCalculated => None,
        }
    }
}

impl fmt::Display for Bmi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bmi::Calculated(v) => write!(f, "{v:.1}"),
            Bmi::NotCalculated => f.write_str(BMI_NOT_CALCULATED),
        }
    }
}

impl Serialize for Bmi {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Bmi::Calculated(v) => serializer.serialize_f64(*v),
            Bmi::NotCalculated => serializer.serialize_str(BMI_NOT_CALCULATED),
        }
    }
}

impl<'de> Deserialize<'de> for Bmi {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(v) => Ok(Bmi::Calculated(v)),
            Raw::Text(s) if s == BMI_NOT_CALCULATED => Ok(Bmi::NotCalculated),
            Raw::Text(s) => Err(serde::de::Error::custom(format!("invalid BMI value: {s}"))),
        }
    }
}

/// Raw answers from the Patient Info step, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientIntake {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
}

impl PatientIntake {
    /// Check that all five fields are present and in range, then build the
    /// profile. Zero counts as absent for age, height and weight.
    pub fn validate(self) -> Result<PatientProfile, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::missing("name"));
        }

        let age = match self.age {
            None | Some(0) => return Err(ValidationError::missing("age")),
            Some(age) if age > MAX_AGE => {
                return Err(ValidationError::OutOfRange {
                    field: "age".to_string(),
                    value: f64::from(age),
                    min: 1.0,
                    max: f64::from(MAX_AGE),
                });
            }
            Some(age) => age,
        };

        let gender = self.gender.ok_or_else(|| ValidationError::missing("gender"))?;
        let height_cm = positive("height_cm", self.height_cm)?;
        let weight_kg = positive("weight_kg", self.weight_kg)?;

        Ok(PatientProfile::new(name, age, gender, height_cm, weight_kg))
    }
}

fn positive(field: &str, value: Option<f64>) -> Result<f64, ValidationError> {
    match value {
        None => Err(ValidationError::missing(field)),
        Some(v) if v == 0.0 => Err(ValidationError::missing(field)),
        Some(v) if !v.is_finite() || v < 0.0 => Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value: v,
            min: 0.0,
            max: f64::MAX,
        }),
        Some(v) => Ok(v),
    }
}

/// Demographics collected once at the start of a session.
///
/// BMI is derived in [`PatientProfile::new`] and cannot be set directly.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct PatientProfile {
    name: String,
    age: u32,
    gender: Gender,
    height_cm: f64,
    weight_kg: f64,
    #[ts(type = "number | string")]
    bmi: Bmi,
}

impl PatientProfile {
    pub fn new(
        name: impl Into<String>,
        age: u32,
        gender: Gender,
        height_cm: f64,
        weight_kg: f64,
    ) -> Self {
        Self {
            name: name.into(),
            age,
            gender,
            height_cm,
            weight_kg,
            bmi: Bmi::from_measurements(height_cm, weight_kg),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn bmi(&self) -> Bmi {
        self.bmi
    }
}
