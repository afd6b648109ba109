//! Form-session state for embedding clients
//!
//! The validator reports every error on every call; a real form only shows
//! messages for fields the user has interacted with until submit. That
//! policy lives here, as a wrapper around the pure core, so touch tracking
//! never leaks into `validate` itself.

use chrono::Utc;
use std::collections::HashSet;

use crate::model::{CampaignFields, Field, UtmResult, ValidationErrors, CAMPAIGN_NAME_OR_ID};
use crate::utm;

/// One in-progress form: the current field values, which fields the user
/// has touched, and whether a submit attempt has forced all errors visible.
#[derive(Debug, Default, Clone)]
pub struct FormSession {
    fields: CampaignFields,
    touched: HashSet<Field>,
    show_all: bool,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &CampaignFields {
        &self.fields
    }

    /// Record a keystroke: update the value and mark the field touched.
    pub fn input(&mut self, field: Field, value: impl Into<String>) {
        self.fields.set(field, value);
        self.touched.insert(field);
    }

    /// Record focus leaving a field without necessarily changing it.
    pub fn blur(&mut self, field: Field) {
        self.touched.insert(field);
    }

    /// The full validator output, regardless of touch state.
    pub fn errors(&self) -> ValidationErrors {
        utm::validate(&self.fields)
    }

    /// The errors a form should currently display.
    ///
    /// Before a submit attempt, only errors for touched fields are shown.
    /// The name-or-id error belongs to no single field; it surfaces once
    /// either the name or the id input has been touched.
    pub fn visible_errors(&self) -> ValidationErrors {
        let mut errors = self.errors();
        if self.show_all {
            return errors;
        }
        errors.retain_keys(|key| {
            if key == CAMPAIGN_NAME_OR_ID {
                return self.touched.contains(&Field::CampaignName)
                    || self.touched.contains(&Field::CampaignId);
            }
            self.touched
                .iter()
                .any(|field| field.as_str() == key)
        });
        errors
    }

    /// Live preview of the URL for the current values, when enough of the
    /// form is filled in to make one.
    pub fn preview(&self) -> Option<String> {
        utm::preview_url(&self.fields)
    }

    /// Attempt to commit the form.
    ///
    /// Marks every field touched and forces all errors visible. On a clean
    /// validation the URL is built, stamped with the current time, and the
    /// session resets for the next entry; otherwise the full error map is
    /// returned and the entered values stay put.
    pub fn submit(&mut self) -> Result<UtmResult, ValidationErrors> {
        self.touched.extend(Field::all());
        self.show_all = true;

        let errors = self.errors();
        if !errors.is_empty() {
            return Err(errors);
        }

        // validate() passing guarantees the build cannot fail
        let utm_url = utm::build_utm_url(&self.fields).map_err(|err| {
            let mut errors = ValidationErrors::new();
            errors.insert(Field::WebsiteUrl.as_str(), err.to_string());
            errors
        })?;

        let result = UtmResult {
            original_url: self.fields.website_url.clone(),
            utm_url,
            timestamp: Utc::now().timestamp_millis(),
        };
        self.reset();
        Ok(result)
    }

    /// Clear the values, the touched set, and the show-all flag.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
