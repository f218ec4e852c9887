//! Customer record model.
//!
//! The stored shape is [`CustomerRecord`]; [`NewCustomer`] and
//! [`CustomerPatch`] are the validated outputs of create-mode and update-mode
//! validation, and [`CustomerView`] is the read shape handed to callers, with
//! the derived `fullName` computed at shaping time and never stored.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use customer_registry_core::{CustomerId, CustomerStatus, Email, Phone};

/// Postal address sub-record. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

/// Social media handles and profile URLs.
///
/// The URL-typed fields (`facebook` through `tiktok`) must be empty or an
/// absolute http(s) URL; `snapchat` and `whatsapp` are plain handles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialMedia {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiktok: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapchat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
}

/// A customer record as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: Phone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_media: Option<SocialMedia>,
    pub status: CustomerStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CustomerRecord {
    /// Derived display name; never stored.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Merge a validated patch into this record, field by field. Fields
    /// absent from the patch keep their prior value; `address` and
    /// `socialMedia` are replaced wholesale when present.
    ///
    /// Does not touch `updated_at`; the store stamps it inside the same
    /// atomic update.
    pub fn apply(&mut self, patch: CustomerPatch) {
        if let Some(v) = patch.first_name {
            self.first_name = v;
        }
        if let Some(v) = patch.last_name {
            self.last_name = v;
        }
        if let Some(v) = patch.email {
            self.email = v;
        }
        if let Some(v) = patch.phone {
            self.phone = v;
        }
        if let Some(v) = patch.date_of_birth {
            self.date_of_birth = Some(v);
        }
        if let Some(v) = patch.address {
            self.address = Some(v);
        }
        if let Some(v) = patch.social_media {
            self.social_media = Some(v);
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = patch.notes {
            self.notes = Some(v);
        }
        if let Some(v) = patch.tags {
            self.tags = v;
        }
    }
}

/// A validated, normalized candidate for insertion. Produced only by
/// create-mode validation; the store assigns the id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: Phone,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<Address>,
    pub social_media: Option<SocialMedia>,
    pub status: CustomerStatus,
    pub notes: Option<String>,
    pub tags: Vec<String>,
}

impl NewCustomer {
    /// Materialize a record with store-assigned identity and timestamps.
    #[must_use]
    pub fn into_record(self, id: CustomerId, now: DateTime<Utc>) -> CustomerRecord {
        CustomerRecord {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            date_of_birth: self.date_of_birth,
            address: self.address,
            social_media: self.social_media,
            status: self.status,
            notes: self.notes,
            tags: self.tags,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A validated, normalized partial update. Produced only by update-mode
/// validation; every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<Phone>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<Address>,
    pub social_media: Option<SocialMedia>,
    pub status: Option<CustomerStatus>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl CustomerPatch {
    /// `true` when the patch carries no field at all. An empty patch is
    /// still a legal update; it only bumps `updatedAt`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.date_of_birth.is_none()
            && self.address.is_none()
            && self.social_media.is_none()
            && self.status.is_none()
            && self.notes.is_none()
            && self.tags.is_none()
    }
}

/// Unvalidated input candidate for create and update operations.
///
/// Every field is optional; unknown input fields are silently dropped during
/// deserialization. The validators decide which fields are required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<Address>,
    pub social_media: Option<SocialMedia>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// The read shape returned to callers: the record plus the derived
/// `fullName`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerView {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: Email,
    pub phone: Phone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_media: Option<SocialMedia>,
    pub status: CustomerStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CustomerRecord> for CustomerView {
    fn from(record: CustomerRecord) -> Self {
        let full_name = record.full_name();
        Self {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            full_name,
            email: record.email,
            phone: record.phone,
            date_of_birth: record.date_of_birth,
            address: record.address,
            social_media: record.social_media,
            status: record.status,
            notes: record.notes,
            tags: record.tags,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_record() -> CustomerRecord {
        let now = Utc::now();
        NewCustomer {
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
            email: Email::parse("john@test.com").unwrap(),
            phone: Phone::parse("+1234567890").unwrap(),
            date_of_birth: None,
            address: None,
            social_media: None,
            status: CustomerStatus::Active,
            notes: None,
            tags: vec!["vip".to_owned()],
        }
        .into_record(CustomerId::generate(), now)
    }

    #[test]
    fn test_full_name_derivation() {
        let record = sample_record();
        assert_eq!(record.full_name(), "John Doe");

        let view = CustomerView::from(record);
        assert_eq!(view.full_name, "John Doe");
    }

    #[test]
    fn test_into_record_stamps_both_timestamps() {
        let record = sample_record();
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_apply_merges_only_present_fields() {
        let mut record = sample_record();
        let original_phone = record.phone.clone();

        record.apply(CustomerPatch {
            first_name: Some("Jane".to_owned()),
            notes: Some("prefers email contact".to_owned()),
            ..CustomerPatch::default()
        });

        assert_eq!(record.first_name, "Jane");
        assert_eq!(record.last_name, "Doe");
        assert_eq!(record.phone, original_phone);
        assert_eq!(record.notes.as_deref(), Some("prefers email contact"));
        assert_eq!(record.tags, vec!["vip".to_owned()]);
    }

    #[test]
    fn test_apply_replaces_address_wholesale() {
        let mut record = sample_record();
        record.address = Some(Address {
            street: Some("1 Old Road".to_owned()),
            city: Some("Springfield".to_owned()),
            ..Address::default()
        });

        record.apply(CustomerPatch {
            address: Some(Address {
                street: Some("2 New Road".to_owned()),
                ..Address::default()
            }),
            ..CustomerPatch::default()
        });

        let address = record.address.unwrap();
        assert_eq!(address.street.as_deref(), Some("2 New Road"));
        // wholesale replacement, not a nested merge
        assert_eq!(address.city, None);
    }

    #[test]
    fn test_empty_patch() {
        assert!(CustomerPatch::default().is_empty());
        assert!(
            !CustomerPatch {
                notes: Some(String::new()),
                ..CustomerPatch::default()
            }
            .is_empty()
        );
    }

    #[test]
    fn test_draft_drops_unknown_fields() {
        let draft: CustomerDraft = serde_json::from_str(
            r#"{"firstName":"John","unknownField":"ignored","email":"a@b.com"}"#,
        )
        .unwrap();
        assert_eq!(draft.first_name.as_deref(), Some("John"));
        assert_eq!(draft.email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let view = CustomerView::from(sample_record());
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("firstName").is_some());
        assert!(json.get("fullName").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("first_name").is_none());
        // absent optionals are omitted entirely
        assert!(json.get("dateOfBirth").is_none());
    }
}
