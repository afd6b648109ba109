//! Data models for the UTM link builder
//!
//! This module defines the campaign field set submitted by clients, the
//! persisted result record, and the validation error map returned to the
//! form layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The full set of campaign inputs for one UTM URL.
///
/// Wire format is camelCase JSON; fields absent from the payload
/// deserialize to the empty string, mirroring an untouched form input.
///
/// # Example
/// ```json
/// {
///   "websiteUrl": "www.example.com",
///   "campaignSource": "google",
///   "campaignMedium": "cpc",
///   "campaignName": "spring_sale"
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignFields {
    /// Destination URL; may omit the scheme (normalized to https://)
    pub website_url: String,

    /// Traffic referrer, e.g. "google" or "newsletter" (required)
    pub campaign_source: String,

    /// Marketing medium, e.g. "cpc" or "email" (required)
    pub campaign_medium: String,

    /// Campaign label; required unless a campaign id is given
    pub campaign_name: String,

    /// Ads campaign id; satisfies the name-or-id rule on its own
    pub campaign_id: String,

    /// Paid keyword term (optional)
    pub campaign_term: String,

    /// Differentiator for ad variants (optional)
    pub campaign_content: String,
}

/// A generated URL as stored in history.
///
/// `timestamp` is milliseconds since the epoch, assigned once at creation.
/// It doubles as the identity of the entry in a rendered list and is never
/// updated afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UtmResult {
    /// The destination URL exactly as the user entered it
    pub original_url: String,

    /// The fully built URL with UTM parameters appended
    pub utm_url: String,

    /// Creation time in milliseconds since the epoch
    pub timestamp: i64,
}

/// Names of the form fields, used as error-map keys and for touch tracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    WebsiteUrl,
    CampaignSource,
    CampaignMedium,
    CampaignName,
    CampaignId,
    CampaignTerm,
    CampaignContent,
}

impl Field {
    /// The camelCase wire name, matching the JSON payload keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::WebsiteUrl => "websiteUrl",
            Field::CampaignSource => "campaignSource",
            Field::CampaignMedium => "campaignMedium",
            Field::CampaignName => "campaignName",
            Field::CampaignId => "campaignId",
            Field::CampaignTerm => "campaignTerm",
            Field::CampaignContent => "campaignContent",
        }
    }

    /// All fields, in form order.
    pub fn all() -> [Field; 7] {
        [
            Field::WebsiteUrl,
            Field::CampaignSource,
            Field::CampaignMedium,
            Field::CampaignName,
            Field::CampaignId,
            Field::CampaignTerm,
            Field::CampaignContent,
        ]
    }
}

impl CampaignFields {
    /// Read a field value by name.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::WebsiteUrl => &self.website_url,
            Field::CampaignSource => &self.campaign_source,
            Field::CampaignMedium => &self.campaign_medium,
            Field::CampaignName => &self.campaign_name,
            Field::CampaignId => &self.campaign_id,
            Field::CampaignTerm => &self.campaign_term,
            Field::CampaignContent => &self.campaign_content,
        }
    }

    /// Overwrite a field value by name.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::WebsiteUrl => self.website_url = value,
            Field::CampaignSource => self.campaign_source = value,
            Field::CampaignMedium => self.campaign_medium = value,
            Field::CampaignName => self.campaign_name = value,
            Field::CampaignId => self.campaign_id = value,
            Field::CampaignTerm => self.campaign_term = value,
            Field::CampaignContent => self.campaign_content = value,
        }
    }
}

/// Synthetic error-map key for the "either name or id" rule, which does not
/// belong to a single field.
pub const CAMPAIGN_NAME_OR_ID: &str = "campaignNameOrId";

/// Map from field name to a single human-readable error message.
///
/// Absence of a key means the field is currently valid. The map is always
/// recomputed wholesale by the validator, never patched entry by entry.
/// Backed by a BTreeMap so serialized output has a stable key order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.0.insert(key.into(), message.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keep only the entries the given predicate accepts (by key).
    pub fn retain_keys(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.0.retain(|k, _| keep(k));
    }
}
