//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the embedded migrations exactly. When a
//! migration changes the schema, regenerate this file with
//! `diesel print-schema` or update it by hand.

diesel::table! {
    /// Owners of calculations.
    ///
    /// Only the columns needed to anchor the `calculations.user_id` foreign
    /// key live here; account management belongs to another service.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Arithmetic calculations owned by users.
    ///
    /// Rows are removed by `ON DELETE CASCADE` when the owning user goes.
    calculations (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user; indexed, cascades on delete.
        user_id -> Uuid,
        /// Variant tag: `addition`, `subtraction`, `multiplication` or
        /// `division`. Indexed.
        #[sql_name = "type"]
        #[max_length = 50]
        calculation_type -> Varchar,
        /// Ordered operands as a JSON array of numbers.
        inputs -> Jsonb,
        /// Cached evaluation result, `NULL` until computed.
        result -> Nullable<Float8>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(calculations -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(calculations, users);
