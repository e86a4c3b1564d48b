//! Logged records: a dated observation against a category, with an optional
//! screenshot and a short human-readable code.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of characters in a record code.
pub const CODE_LENGTH: usize = 5;

/// Maximum number of digits a record code may contain.
pub const CODE_MAX_DIGITS: usize = 2;

/// A stored record row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Primary key.
    pub id: Uuid,
    /// Owning user. May dangle after a user delete; no cascade exists.
    pub user_id: Uuid,
    /// Category the record was logged against.
    pub category_id: Uuid,
    /// When the observation happened (caller-supplied, not insertion time).
    pub date_record: DateTime<Utc>,
    /// Free-form comment.
    pub comments: String,
    /// Stored screenshot URL, or `None` when no screenshot was attached.
    pub image: Option<String>,
    /// Short human-readable token generated by the caller. Not unique.
    pub code: String,
    /// Insertion timestamp.
    pub created_at: DateTime<Utc>,
}

/// User projection embedded in record reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordUser {
    /// Display name of the owning user.
    pub name: String,
    /// Email of the owning user.
    pub email: String,
}

/// Category projection embedded in record reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCategory {
    /// Display name of the category.
    pub name: String,
}

/// A record together with its denormalised user and category projections.
///
/// Either embed is `None` when the referenced row no longer exists (a user or
/// category was deleted out from under the record).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordWithRelations {
    /// The record itself, flattened into the same JSON object.
    #[serde(flatten)]
    pub record: Record,
    /// Owning user projection, if the user still exists.
    pub user: Option<RecordUser>,
    /// Category projection, if the category still exists.
    pub category: Option<RecordCategory>,
}

/// Fields required to insert or fully update a record.
///
/// `image` holds the already-resolved URL; data-URL decoding happens before
/// this struct is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    /// Owning user id.
    pub user_id: Uuid,
    /// Category id.
    pub category_id: Uuid,
    /// Observation timestamp.
    pub date_record: DateTime<Utc>,
    /// Free-form comment.
    pub comments: String,
    /// Resolved screenshot URL, if any.
    pub image: Option<String>,
    /// Caller-generated short code.
    pub code: String,
}

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";

/// Generate a record code: [`CODE_LENGTH`] alphanumeric characters containing
/// at most [`CODE_MAX_DIGITS`] digits.
///
/// Codes are produced by callers of the API; the server never enforces
/// uniqueness. This generator exists for seed tooling and tests.
///
/// # Examples
/// ```
/// use backend::domain::record::{generate_code, is_valid_code};
///
/// let code = generate_code(&mut rand::thread_rng());
/// assert!(is_valid_code(&code));
/// ```
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    let digit_count = rng.gen_range(0..=CODE_MAX_DIGITS);
    let mut positions: Vec<bool> = vec![false; CODE_LENGTH];
    let mut placed = 0;
    while placed < digit_count {
        let slot = rng.gen_range(0..CODE_LENGTH);
        if !positions[slot] {
            positions[slot] = true;
            placed += 1;
        }
    }
    positions
        .into_iter()
        .map(|is_digit| {
            let pool = if is_digit { DIGITS } else { LETTERS };
            char::from(pool[rng.gen_range(0..pool.len())])
        })
        .collect()
}

/// Check whether a string satisfies the record-code shape: exactly
/// [`CODE_LENGTH`] ASCII alphanumeric characters with at most
/// [`CODE_MAX_DIGITS`] digits.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH
        && code.chars().all(|c| c.is_ascii_alphanumeric())
        && code.chars().filter(char::is_ascii_digit).count() <= CODE_MAX_DIGITS
}
