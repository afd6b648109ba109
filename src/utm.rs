//! URL builder and form validator
//!
//! The two pure cores of the application. `build_utm_url` turns a campaign
//! field set into a tagged URL; `validate` produces the full error map for
//! the same field set. Both share one URL predicate so anything the
//! validator accepts is guaranteed to build.

use std::error::Error;
use std::fmt::{Display, Formatter};
use url::Url;

use crate::model::{CampaignFields, ValidationErrors, CAMPAIGN_NAME_OR_ID};

/// Error returned by the builder when the destination cannot be parsed
/// even after scheme normalization.
#[derive(Debug, PartialEq, Eq)]
pub enum UtmError {
    /// The website URL is not parseable. The message is fixed so the
    /// form layer can show it verbatim.
    InvalidInput,
}

impl Display for UtmError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UtmError::InvalidInput => write!(f, "Invalid URL or parameters"),
        }
    }
}

impl Error for UtmError {}

/// Prepend `https://` unless the input already carries an explicit scheme.
///
/// The prefix match is a case-sensitive literal check; inputs that already
/// start with `http://` or `https://` pass through unchanged.
pub fn normalize_scheme(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    }
}

/// Whether the input parses as a URL after scheme normalization.
///
/// This is the single URL predicate shared by the validator and the
/// builder: `is_valid_url(x)` implies `build_utm_url` will not fail on `x`.
pub fn is_valid_url(raw: &str) -> bool {
    Url::parse(&normalize_scheme(raw)).is_ok()
}

/// The UTM parameters in their fixed output order, paired with the field
/// each one is sourced from.
fn utm_pairs(fields: &CampaignFields) -> [(&'static str, &str); 6] {
    [
        ("utm_source", fields.campaign_source.as_str()),
        ("utm_medium", fields.campaign_medium.as_str()),
        ("utm_campaign", fields.campaign_name.as_str()),
        ("utm_id", fields.campaign_id.as_str()),
        ("utm_term", fields.campaign_term.as_str()),
        ("utm_content", fields.campaign_content.as_str()),
    ]
}

/// Build the tagged URL for a campaign field set.
///
/// The destination is scheme-normalized and parsed; parse failure is the
/// only error path. Each non-empty campaign field is appended as a query
/// parameter in the fixed order source, medium, campaign, id, term,
/// content. Values are taken verbatim (no trimming or case folding) and
/// form-urlencoded on output.
///
/// Parameters are appended, never set: a same-named parameter already on
/// the base URL survives alongside the new one. The builder is permissive
/// about empty fields and does not enforce the name-or-id rule; that is
/// the validator's job.
pub fn build_utm_url(fields: &CampaignFields) -> Result<String, UtmError> {
    let base = normalize_scheme(&fields.website_url);
    let mut url = Url::parse(&base).map_err(|_| UtmError::InvalidInput)?;

    {
        let mut query = url.query_pairs_mut();
        for (key, value) in utm_pairs(fields) {
            if !value.is_empty() {
                query.append_pair(key, value);
            }
        }
    }

    // query_pairs_mut leaves a bare "?" behind when nothing was appended
    if url.query().is_some_and(str::is_empty) {
        url.set_query(None);
    }

    Ok(url.into())
}

/// Live-preview gate: build only once the destination and at least one of
/// source, name, or id are present, and the destination actually parses.
pub fn preview_url(fields: &CampaignFields) -> Option<String> {
    if fields.website_url.is_empty() {
        return None;
    }
    if fields.campaign_source.is_empty()
        && fields.campaign_name.is_empty()
        && fields.campaign_id.is_empty()
    {
        return None;
    }
    build_utm_url(fields).ok()
}

/// Validate a campaign field set, returning every failing rule at once.
///
/// Never fails; an empty map means the form is submittable. All rules run
/// independently so the form layer can show every message in one pass.
pub fn validate(fields: &CampaignFields) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if fields.website_url.is_empty() {
        errors.insert("websiteUrl", "Website URL is required");
    } else if !is_valid_url(&fields.website_url) {
        errors.insert(
            "websiteUrl",
            "Please enter a valid URL (e.g., https://www.example.com)",
        );
    }

    if fields.campaign_source.is_empty() {
        errors.insert("campaignSource", "Campaign Source is required");
    }

    if fields.campaign_medium.is_empty() {
        errors.insert("campaignMedium", "Campaign Medium is required");
    }

    if fields.campaign_name.is_empty() && fields.campaign_id.is_empty() {
        errors.insert(
            CAMPAIGN_NAME_OR_ID,
            "Either Campaign Name or Campaign ID must be provided",
        );
    }

    if fields.campaign_name.contains(' ') {
        errors.insert(
            "campaignName",
            "Campaign Name should not contain spaces. Use underscores or hyphens instead.",
        );
    }

    if fields.campaign_term.contains(' ') {
        errors.insert(
            "campaignTerm",
            "Campaign Term should not contain spaces. Use plus signs (+) or hyphens instead.",
        );
    }

    errors
}

/// Advisory reachability report for a generated URL.
///
/// The probe never gates generation: a syntactically valid URL always
/// reports reachable, and transport-level outcomes are deliberately
/// ignored. Only an unparseable URL reports unreachable.
pub fn probe_reachability(url: &str) -> bool {
    Url::parse(url).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_fields() -> CampaignFields {
        CampaignFields {
            website_url: "www.example.com".to_string(),
            campaign_source: "google".to_string(),
            campaign_medium: "cpc".to_string(),
            campaign_name: "spring_sale".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn normalization_prepends_https_when_scheme_missing() {
        assert_eq!(normalize_scheme("www.example.com"), "https://www.example.com");
    }

    #[test]
    fn normalization_is_a_noop_for_explicit_schemes() {
        assert_eq!(normalize_scheme("http://example.com"), "http://example.com");
        assert_eq!(normalize_scheme("https://example.com"), "https://example.com");
    }

    #[test]
    fn normalization_prefix_match_is_case_sensitive() {
        // "HTTP://" is not recognized as a scheme prefix, so https:// is
        // prepended in front of it, matching the original behavior
        assert_eq!(normalize_scheme("HTTP://example.com"), "https://HTTP://example.com");
    }

    #[test]
    fn builds_expected_url_for_basic_campaign() {
        let url = build_utm_url(&filled_fields()).unwrap();
        assert_eq!(
            url,
            "https://www.example.com/?utm_source=google&utm_medium=cpc&utm_campaign=spring_sale"
        );
    }

    #[test]
    fn parameters_keep_fixed_order_with_all_fields_set() {
        let fields = CampaignFields {
            website_url: "https://example.com".to_string(),
            campaign_source: "s".to_string(),
            campaign_medium: "m".to_string(),
            campaign_name: "n".to_string(),
            campaign_id: "i".to_string(),
            campaign_term: "t".to_string(),
            campaign_content: "c".to_string(),
        };
        let url = build_utm_url(&fields).unwrap();
        assert_eq!(
            url,
            "https://example.com/?utm_source=s&utm_medium=m&utm_campaign=n&utm_id=i&utm_term=t&utm_content=c"
        );
    }

    #[test]
    fn empty_optional_fields_emit_no_parameter() {
        let url = build_utm_url(&filled_fields()).unwrap();
        assert!(!url.contains("utm_id"));
        assert!(!url.contains("utm_term"));
        assert!(!url.contains("utm_content"));
    }

    #[test]
    fn existing_query_parameters_are_preserved_not_replaced() {
        let mut fields = filled_fields();
        fields.website_url = "https://example.com/?utm_source=old&ref=x".to_string();
        let url = build_utm_url(&fields).unwrap();
        // append semantics: both occurrences survive
        assert_eq!(url.matches("utm_source=").count(), 2);
        assert!(url.contains("ref=x"));
        assert!(url.contains("utm_source=old"));
        assert!(url.contains("utm_source=google"));
    }

    #[test]
    fn values_are_form_urlencoded() {
        let mut fields = filled_fields();
        fields.campaign_name = "spring sale".to_string();
        let url = build_utm_url(&fields).unwrap();
        // space encodes as '+' in the query; either works for consumers
        assert!(url.contains("utm_campaign=spring+sale"));
    }

    #[test]
    fn builder_fails_on_unparseable_destination() {
        let mut fields = filled_fields();
        fields.website_url = "not a url!!".to_string();
        assert_eq!(build_utm_url(&fields), Err(UtmError::InvalidInput));
        assert_eq!(
            UtmError::InvalidInput.to_string(),
            "Invalid URL or parameters"
        );
    }

    #[test]
    fn builder_with_no_parameters_leaves_base_url_clean() {
        let fields = CampaignFields {
            website_url: "https://example.com".to_string(),
            ..Default::default()
        };
        // no trailing '?' even though the query serializer ran
        assert_eq!(build_utm_url(&fields).unwrap(), "https://example.com/");
    }

    #[test]
    fn validator_flags_missing_required_fields() {
        let errors = validate(&CampaignFields::default());
        assert_eq!(errors.get("websiteUrl"), Some("Website URL is required"));
        assert_eq!(errors.get("campaignSource"), Some("Campaign Source is required"));
        assert_eq!(errors.get("campaignMedium"), Some("Campaign Medium is required"));
        assert_eq!(
            errors.get(CAMPAIGN_NAME_OR_ID),
            Some("Either Campaign Name or Campaign ID must be provided")
        );
    }

    #[test]
    fn validator_flags_only_missing_url_when_rest_is_valid() {
        let mut fields = filled_fields();
        fields.website_url = String::new();
        let errors = validate(&fields);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("websiteUrl"), Some("Website URL is required"));
    }

    #[test]
    fn validator_flags_malformed_url() {
        let mut fields = filled_fields();
        fields.website_url = "not a url!!".to_string();
        let errors = validate(&fields);
        assert_eq!(
            errors.get("websiteUrl"),
            Some("Please enter a valid URL (e.g., https://www.example.com)")
        );
    }

    #[test]
    fn either_name_or_id_satisfies_the_rule() {
        let mut fields = filled_fields();
        fields.campaign_name = String::new();
        fields.campaign_id = "abc-123".to_string();
        assert!(!validate(&fields).contains(CAMPAIGN_NAME_OR_ID));

        fields.campaign_id = String::new();
        assert!(validate(&fields).contains(CAMPAIGN_NAME_OR_ID));
    }

    #[test]
    fn spaces_in_name_and_term_are_rejected_but_buildable() {
        let mut fields = filled_fields();
        fields.campaign_name = "spring sale".to_string();
        fields.campaign_term = "running shoes".to_string();
        let errors = validate(&fields);
        assert!(errors.contains("campaignName"));
        assert!(errors.contains("campaignTerm"));
        // the builder stays permissive and encodes the space
        assert!(build_utm_url(&fields).is_ok());
    }

    #[test]
    fn validator_and_builder_agree_on_url_validity() {
        let candidates = [
            "www.example.com",
            "https://example.com/path?x=1",
            "http://example.com",
            "example.com:8080/page",
            "not a url!!",
            "https://",
            "",
        ];
        for candidate in candidates {
            let mut fields = filled_fields();
            fields.website_url = candidate.to_string();
            let errors = validate(&fields);
            if !errors.contains("websiteUrl") {
                assert!(
                    build_utm_url(&fields).is_ok(),
                    "validator accepted {candidate:?} but builder failed"
                );
            }
        }
    }

    #[test]
    fn preview_requires_url_and_one_primary_field() {
        let mut fields = CampaignFields {
            website_url: "www.example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(preview_url(&fields), None);

        fields.campaign_source = "google".to_string();
        let preview = preview_url(&fields).unwrap();
        assert!(preview.contains("utm_source=google"));

        fields.website_url = String::new();
        assert_eq!(preview_url(&fields), None);
    }

    #[test]
    fn probe_reports_reachable_for_any_well_formed_url() {
        assert!(probe_reachability("https://definitely-not-registered.example/"));
        assert!(!probe_reachability("not a url!!"));
    }
}
