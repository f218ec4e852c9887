//! Create-mode and update-mode validation.
//!
//! Both entry points are pure: they take a candidate [`CustomerDraft`] and
//! the current date, and produce either a normalized output or the complete
//! list of field violations. Validation never short-circuits; every failing
//! field is reported, each under its dotted path.
//!
//! Normalization trims all strings and lowercases the email. Unknown input
//! fields never reach this module; deserialization of [`CustomerDraft`]
//! silently drops them.

use chrono::NaiveDate;
use url::Url;

use customer_registry_core::{CustomerStatus, Email, Phone};

use crate::error::FieldError;
use crate::model::{Address, CustomerDraft, CustomerPatch, NewCustomer, SocialMedia};

/// Minimum length of a first or last name.
pub const NAME_MIN: usize = 2;
/// Maximum length of a first or last name.
pub const NAME_MAX: usize = 50;
/// Maximum length of the notes field.
pub const NOTES_MAX: usize = 500;
/// Maximum number of tags on a record.
pub const TAGS_MAX: usize = 10;
/// Maximum length of a single tag.
pub const TAG_MAX: usize = 30;

const STREET_MAX: usize = 100;
const CITY_MAX: usize = 50;
const STATE_MAX: usize = 50;
const COUNTRY_MAX: usize = 50;
const ZIP_MAX: usize = 20;
const SNAPCHAT_MAX: usize = 50;
const WHATSAPP_MAX: usize = 20;

/// Validate a candidate in create mode.
///
/// `firstName`, `lastName`, `email` and `phone` are required; everything
/// else is optional, with `status` defaulting to `active`.
///
/// # Errors
///
/// Returns the full list of field violations when any field fails.
pub fn validate_create(
    draft: &CustomerDraft,
    today: NaiveDate,
) -> Result<NewCustomer, Vec<FieldError>> {
    let mut errors = Vec::new();

    let first_name = required(draft.first_name.as_deref(), "firstName", "First name", &mut errors)
        .and_then(|v| name_field("firstName", "First name", v, &mut errors));
    let last_name = required(draft.last_name.as_deref(), "lastName", "Last name", &mut errors)
        .and_then(|v| name_field("lastName", "Last name", v, &mut errors));
    let email = required(draft.email.as_deref(), "email", "Email", &mut errors)
        .and_then(|v| email_field(v, &mut errors));
    let phone = required(draft.phone.as_deref(), "phone", "Phone number", &mut errors)
        .and_then(|v| phone_field(v, &mut errors));

    let date_of_birth = birth_date(draft.date_of_birth, today, &mut errors);
    let address = draft.address.as_ref().map(|a| address_field(a, &mut errors));
    let social_media = draft
        .social_media
        .as_ref()
        .map(|s| social_media_field(s, &mut errors));
    let status = draft
        .status
        .as_deref()
        .and_then(|v| status_field(v, &mut errors));
    let notes = draft.notes.as_deref().and_then(|v| notes_field(v, &mut errors));
    let tags = draft.tags.as_ref().map(|t| tags_field(t, &mut errors));

    match (first_name, last_name, email, phone) {
        (Some(first_name), Some(last_name), Some(email), Some(phone)) if errors.is_empty() => {
            Ok(NewCustomer {
                first_name,
                last_name,
                email,
                phone,
                date_of_birth,
                address,
                social_media,
                status: status.unwrap_or_default(),
                notes,
                tags: tags.unwrap_or_default(),
            })
        }
        _ => Err(errors),
    }
}

/// Validate a candidate in update mode.
///
/// Every field is optional; any field that is present is validated with the
/// same per-field rules as create mode. Absent fields stay untouched in the
/// resulting patch.
///
/// # Errors
///
/// Returns the full list of field violations when any present field fails.
pub fn validate_update(
    draft: &CustomerDraft,
    today: NaiveDate,
) -> Result<CustomerPatch, Vec<FieldError>> {
    let mut errors = Vec::new();

    let patch = CustomerPatch {
        first_name: draft
            .first_name
            .as_deref()
            .and_then(|v| name_field("firstName", "First name", v, &mut errors)),
        last_name: draft
            .last_name
            .as_deref()
            .and_then(|v| name_field("lastName", "Last name", v, &mut errors)),
        email: draft.email.as_deref().and_then(|v| email_field(v, &mut errors)),
        phone: draft.phone.as_deref().and_then(|v| phone_field(v, &mut errors)),
        date_of_birth: birth_date(draft.date_of_birth, today, &mut errors),
        address: draft.address.as_ref().map(|a| address_field(a, &mut errors)),
        social_media: draft
            .social_media
            .as_ref()
            .map(|s| social_media_field(s, &mut errors)),
        status: draft
            .status
            .as_deref()
            .and_then(|v| status_field(v, &mut errors)),
        notes: draft.notes.as_deref().and_then(|v| notes_field(v, &mut errors)),
        tags: draft.tags.as_ref().map(|t| tags_field(t, &mut errors)),
    };

    if errors.is_empty() { Ok(patch) } else { Err(errors) }
}

fn required<'a>(
    value: Option<&'a str>,
    path: &str,
    label: &str,
    errors: &mut Vec<FieldError>,
) -> Option<&'a str> {
    match value {
        Some(v) => Some(v),
        None => {
            errors.push(FieldError::new(path, format!("{label} is required")));
            None
        }
    }
}

fn name_field(
    path: &str,
    label: &str,
    value: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new(path, format!("{label} is required")));
        return None;
    }
    let len = trimmed.chars().count();
    if len < NAME_MIN {
        errors.push(FieldError::new(
            path,
            format!("{label} must be at least {NAME_MIN} characters long"),
        ));
        return None;
    }
    if len > NAME_MAX {
        errors.push(FieldError::new(
            path,
            format!("{label} cannot exceed {NAME_MAX} characters"),
        ));
        return None;
    }
    Some(trimmed.to_owned())
}

fn email_field(value: &str, errors: &mut Vec<FieldError>) -> Option<Email> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
        return None;
    }
    match Email::parse(trimmed) {
        Ok(email) => Some(email),
        Err(_) => {
            errors.push(FieldError::new(
                "email",
                "Please provide a valid email address",
            ));
            None
        }
    }
}

fn phone_field(value: &str, errors: &mut Vec<FieldError>) -> Option<Phone> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new("phone", "Phone number is required"));
        return None;
    }
    match Phone::parse(trimmed) {
        Ok(phone) => Some(phone),
        Err(_) => {
            errors.push(FieldError::new(
                "phone",
                "Please provide a valid phone number",
            ));
            None
        }
    }
}

fn birth_date(
    value: Option<NaiveDate>,
    today: NaiveDate,
    errors: &mut Vec<FieldError>,
) -> Option<NaiveDate> {
    match value {
        Some(date) if date > today => {
            errors.push(FieldError::new(
                "dateOfBirth",
                "Date of birth cannot be in the future",
            ));
            None
        }
        other => other,
    }
}

fn bounded(
    path: &str,
    label: &str,
    max: usize,
    value: Option<&str>,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.chars().count() > max {
        errors.push(FieldError::new(
            path,
            format!("{label} cannot exceed {max} characters"),
        ));
        return None;
    }
    Some(trimmed.to_owned())
}

fn address_field(address: &Address, errors: &mut Vec<FieldError>) -> Address {
    Address {
        street: bounded(
            "address.street",
            "Street",
            STREET_MAX,
            address.street.as_deref(),
            errors,
        ),
        city: bounded("address.city", "City", CITY_MAX, address.city.as_deref(), errors),
        state: bounded(
            "address.state",
            "State",
            STATE_MAX,
            address.state.as_deref(),
            errors,
        ),
        country: bounded(
            "address.country",
            "Country",
            COUNTRY_MAX,
            address.country.as_deref(),
            errors,
        ),
        zip_code: bounded(
            "address.zipCode",
            "Zip code",
            ZIP_MAX,
            address.zip_code.as_deref(),
            errors,
        ),
    }
}

fn social_url(
    path: &str,
    label: &str,
    value: Option<&str>,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let trimmed = value?.trim();
    // Empty handles are allowed and kept as-is.
    if trimmed.is_empty() {
        return Some(String::new());
    }
    let valid = Url::parse(trimmed).is_ok_and(|u| matches!(u.scheme(), "http" | "https"));
    if valid {
        Some(trimmed.to_owned())
    } else {
        errors.push(FieldError::new(
            path,
            format!("{label} URL must be a valid URL"),
        ));
        None
    }
}

fn social_media_field(social: &SocialMedia, errors: &mut Vec<FieldError>) -> SocialMedia {
    SocialMedia {
        facebook: social_url(
            "socialMedia.facebook",
            "Facebook",
            social.facebook.as_deref(),
            errors,
        ),
        twitter: social_url(
            "socialMedia.twitter",
            "Twitter",
            social.twitter.as_deref(),
            errors,
        ),
        instagram: social_url(
            "socialMedia.instagram",
            "Instagram",
            social.instagram.as_deref(),
            errors,
        ),
        linkedin: social_url(
            "socialMedia.linkedin",
            "LinkedIn",
            social.linkedin.as_deref(),
            errors,
        ),
        youtube: social_url(
            "socialMedia.youtube",
            "YouTube",
            social.youtube.as_deref(),
            errors,
        ),
        tiktok: social_url(
            "socialMedia.tiktok",
            "TikTok",
            social.tiktok.as_deref(),
            errors,
        ),
        snapchat: bounded(
            "socialMedia.snapchat",
            "Snapchat handle",
            SNAPCHAT_MAX,
            social.snapchat.as_deref(),
            errors,
        ),
        whatsapp: bounded(
            "socialMedia.whatsapp",
            "WhatsApp handle",
            WHATSAPP_MAX,
            social.whatsapp.as_deref(),
            errors,
        ),
    }
}

fn status_field(value: &str, errors: &mut Vec<FieldError>) -> Option<CustomerStatus> {
    match value.trim().parse::<CustomerStatus>() {
        Ok(status) => Some(status),
        Err(_) => {
            errors.push(FieldError::new(
                "status",
                "Status must be either active, inactive, or suspended",
            ));
            None
        }
    }
}

fn notes_field(value: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.chars().count() > NOTES_MAX {
        errors.push(FieldError::new(
            "notes",
            format!("Notes cannot exceed {NOTES_MAX} characters"),
        ));
        return None;
    }
    Some(trimmed.to_owned())
}

fn tags_field(tags: &[String], errors: &mut Vec<FieldError>) -> Vec<String> {
    if tags.len() > TAGS_MAX {
        errors.push(FieldError::new(
            "tags",
            format!("Cannot have more than {TAGS_MAX} tags"),
        ));
    }
    tags.iter()
        .enumerate()
        .map(|(i, tag)| {
            let trimmed = tag.trim();
            if trimmed.chars().count() > TAG_MAX {
                errors.push(FieldError::new(
                    format!("tags.{i}"),
                    format!("Each tag cannot exceed {TAG_MAX} characters"),
                ));
            }
            trimmed.to_owned()
        })
        .collect()
}
