//! Profile input validation
//!
//! Onboarding collects the profile one field at a time, so the in-progress
//! state is a [`ProfileForm`] with every field optional. A form only becomes a
//! [`UserProfile`] once it passes validation; the store itself never checks.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::ValidationError;
use crate::models::{Diet, Gender, UserProfile};

/// Order in which form fields are reported
const FIELD_ORDER: &[&str] = &["age", "gender", "height_cm", "weight_kg", "diet", "ethnicity"];

/// Partially filled profile as edited by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(
        required(message = "is required"),
        range(min = 13, max = 100, message = "must be between 13 and 100")
    )]
    pub age: Option<u32>,

    #[validate(required(message = "is required"))]
    pub gender: Option<Gender>,

    #[validate(
        required(message = "is required"),
        range(min = 100, max = 250, message = "must be between 100 and 250 cm")
    )]
    pub height_cm: Option<u32>,

    #[validate(
        required(message = "is required"),
        range(min = 30, max = 300, message = "must be between 30 and 300 kg")
    )]
    pub weight_kg: Option<u32>,

    #[validate(required(message = "is required"))]
    pub diet: Option<Diet>,

    #[validate(length(max = 64, message = "must be at most 64 characters"))]
    pub ethnicity: Option<String>,
}

impl ProfileForm {
    /// Validate every field and build the complete profile.
    ///
    /// Errors are reported in form order. A blank ethnicity is stored as absent.
    pub fn into_profile(self) -> Result<UserProfile, Vec<ValidationError>> {
        if let Err(errors) = self.validate() {
            let mut out: Vec<ValidationError> = errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errs)| {
                    let field = field.to_string();
                    errs.iter()
                        .map(move |err| {
                            let message = err
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| err.code.to_string());
                            field_error(&field, &message)
                        })
                        .collect::<Vec<_>>()
                })
                .collect();
            out.sort_by_key(|e| field_rank(&e.field));
            return Err(out);
        }

        let (Some(age), Some(gender), Some(height_cm), Some(weight_kg), Some(diet)) =
            (self.age, self.gender, self.height_cm, self.weight_kg, self.diet)
        else {
            return Err(self
                .missing_fields()
                .into_iter()
                .map(|field| field_error(field, "is required"))
                .collect());
        };

        let ethnicity = self
            .ethnicity
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        Ok(UserProfile {
            age,
            gender,
            height_cm,
            weight_kg,
            diet,
            ethnicity,
        })
    }

    /// Names of required fields that are still empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.age.is_none() {
            missing.push("age");
        }
        if self.gender.is_none() {
            missing.push("gender");
        }
        if self.height_cm.is_none() {
            missing.push("height_cm");
        }
        if self.weight_kg.is_none() {
            missing.push("weight_kg");
        }
        if self.diet.is_none() {
            missing.push("diet");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

impl From<&UserProfile> for ProfileForm {
    fn from(profile: &UserProfile) -> Self {
        Self {
            age: Some(profile.age),
            gender: Some(profile.gender),
            height_cm: Some(profile.height_cm),
            weight_kg: Some(profile.weight_kg),
            diet: Some(profile.diet),
            ethnicity: profile.ethnicity.clone(),
        }
    }
}

fn field_rank(field: &str) -> usize {
    FIELD_ORDER
        .iter()
        .position(|f| *f == field)
        .unwrap_or(FIELD_ORDER.len())
}

fn field_error(field: &str, message: &str) -> ValidationError {
    ValidationError {
        field: field.to_string(),
        message: message.to_string(),
        display_label: get_field_display_label(field).to_string(),
    }
}

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "age" => "Age",
        "gender" => "Gender",
        "height_cm" | "height" => "Height",
        "weight_kg" | "weight" => "Weight",
        "diet" => "Diet",
        "ethnicity" => "Ethnicity",
        _ => field_name,
    }
}

/// Convert a list of technical field names to user-friendly labels
pub fn get_missing_fields_labels(fields: &[&str]) -> Vec<String> {
    fields
        .iter()
        .map(|f| get_field_display_label(f).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::Fake;
    use proptest::prelude::*;

    fn complete_form() -> ProfileForm {
        ProfileForm {
            age: Some(25),
            gender: Some(Gender::Female),
            height_cm: Some(165),
            weight_kg: Some(58),
            diet: Some(Diet::Vegetarian),
            ethnicity: None,
        }
    }

    #[test]
    fn test_complete_form_builds_profile() {
        let profile = complete_form().into_profile().unwrap();
        assert_eq!(profile.age, 25);
        assert_eq!(profile.gender, Gender::Female);
        assert_eq!(profile.ethnicity, None);
    }

    #[test]
    fn test_empty_form_reports_required_fields_in_order() {
        let errors = ProfileForm::default().into_profile().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["age", "gender", "height_cm", "weight_kg", "diet"]);
        assert_eq!(errors[0].to_string(), "Age: is required");
    }

    #[test]
    fn test_out_of_range_values() {
        let form = ProfileForm {
            age: Some(12),
            height_cm: Some(251),
            weight_kg: Some(29),
            ..complete_form()
        };

        let errors = form.into_profile().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].display_label, "Age");
        assert_eq!(errors[0].message, "must be between 13 and 100");
        assert_eq!(errors[1].field, "height_cm");
        assert_eq!(errors[2].field, "weight_kg");
    }

    #[test]
    fn test_range_bounds_inclusive() {
        let low = ProfileForm {
            age: Some(13),
            height_cm: Some(100),
            weight_kg: Some(30),
            ..complete_form()
        };
        let high = ProfileForm {
            age: Some(100),
            height_cm: Some(250),
            weight_kg: Some(300),
            ..complete_form()
        };
        assert!(low.into_profile().is_ok());
        assert!(high.into_profile().is_ok());
    }

    #[test]
    fn test_blank_ethnicity_dropped() {
        let form = ProfileForm {
            ethnicity: Some("   ".to_string()),
            ..complete_form()
        };
        assert_eq!(form.into_profile().unwrap().ethnicity, None);

        let form = ProfileForm {
            ethnicity: Some(" South Asian ".to_string()),
            ..complete_form()
        };
        assert_eq!(
            form.into_profile().unwrap().ethnicity.as_deref(),
            Some("South Asian")
        );
    }

    #[test]
    fn test_long_ethnicity_rejected() {
        let form = ProfileForm {
            ethnicity: Some("x".repeat(65)),
            ..complete_form()
        };
        let errors = form.into_profile().unwrap_err();
        assert_eq!(errors[0].field, "ethnicity");
    }

    #[test]
    fn test_form_from_profile_round_trip() {
        let profile = complete_form().into_profile().unwrap();
        let form = ProfileForm::from(&profile);
        assert!(form.is_complete());
        assert_eq!(form.into_profile().unwrap(), profile);
    }

    #[test]
    fn test_missing_field_labels() {
        let form = ProfileForm {
            age: Some(30),
            ..Default::default()
        };
        assert_eq!(
            get_missing_fields_labels(&form.missing_fields()),
            vec!["Gender", "Height", "Weight", "Diet"]
        );
    }

    #[test]
    fn test_random_valid_profiles_accepted() {
        for _ in 0..50 {
            let form = ProfileForm {
                age: Some((13..101).fake::<u32>()),
                height_cm: Some((100..251).fake::<u32>()),
                weight_kg: Some((30..301).fake::<u32>()),
                ..complete_form()
            };
            assert!(form.into_profile().is_ok());
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_age_outside_range_rejected(age in prop_oneof![0u32..13, 101u32..200]) {
            let form = ProfileForm { age: Some(age), ..complete_form() };
            prop_assert!(form.into_profile().is_err());
        }

        #[test]
        fn prop_height_in_range_accepted(height in 100u32..=250) {
            let form = ProfileForm { height_cm: Some(height), ..complete_form() };
            prop_assert!(form.into_profile().is_ok());
        }
    }
}
