//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. The schema
//! deliberately carries no foreign key constraints: deleting a user or
//! category must never cascade into records or audit entries, which instead
//! render with a null embed.

diesel::table! {
    /// Dashboard users, provisioned by the identity layer.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name.
        name -> Varchar,
        /// Contact email.
        email -> Varchar,
    }
}

diesel::table! {
    /// Record categories.
    categories (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Category name.
        name -> Varchar,
        /// Free-form description.
        description -> Text,
    }
}

diesel::table! {
    /// Observations logged against a category by a user.
    records (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user. Not a foreign key; may dangle after user deletion.
        user_id -> Uuid,
        /// Category. Not a foreign key; may dangle after category deletion.
        category_id -> Uuid,
        /// Observation timestamp supplied by the client.
        date_record -> Timestamptz,
        /// Free-form comment.
        comments -> Text,
        /// Stored screenshot URL, if any.
        image -> Nullable<Text>,
        /// Short alphanumeric code.
        code -> Varchar,
        /// Row creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only audit log.
    binnacles (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Acting user, when known. Not a foreign key.
        user_id -> Nullable<Uuid>,
        /// Action label, e.g. "Create Category".
        action -> Varchar,
        /// Opaque JSON details payload.
        details -> Nullable<Text>,
        /// Row creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(records -> users (user_id));
diesel::joinable!(records -> categories (category_id));
diesel::joinable!(binnacles -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, categories, records, binnacles);
