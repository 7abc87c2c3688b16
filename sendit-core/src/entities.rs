//! Schemas for the Send-IT application tables.
//!
//! One schema per entity, built once. The accessor layer clones these when
//! constructing per-entity accessors at startup.

use once_cell::sync::Lazy;

use crate::schema::{AttrType, Schema};

/// Registered users. `is_admin` is 0/1 under the layer's two-type model.
pub static USERS: Lazy<Schema> = Lazy::new(|| {
    Schema::builder("users")
        .attr("id", AttrType::Integer)
        .attr("first_name", AttrType::Text)
        .attr("last_name", AttrType::Text)
        .attr("other_names", AttrType::Text)
        .attr("username", AttrType::Text)
        .attr("email", AttrType::Text)
        .attr("password_hash", AttrType::Text)
        .attr("registered_on", AttrType::Text)
        .attr("is_admin", AttrType::Integer)
        .build()
        .expect("users schema")
});

/// Parcel delivery orders.
pub static PARCELS: Lazy<Schema> = Lazy::new(|| {
    Schema::builder("parcels")
        .attr("id", AttrType::Integer)
        .attr("placed_by", AttrType::Integer)
        .attr("weight", AttrType::Integer)
        .attr("weight_metric", AttrType::Text)
        .attr("sent_on", AttrType::Text)
        .attr("delivered_on", AttrType::Text)
        .attr("status", AttrType::Text)
        .attr("origin", AttrType::Text)
        .attr("destination", AttrType::Text)
        .attr("current_location", AttrType::Text)
        .build()
        .expect("parcels schema")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_schemas_build() {
        assert_eq!(USERS.table(), "users");
        assert_eq!(PARCELS.table(), "parcels");
        assert!(PARCELS.attribute("current_location").is_some());
        assert!(USERS.attribute("email").is_some());
    }

    #[test]
    fn primary_keys_are_integer() {
        assert_eq!(USERS.attribute("id").unwrap().ty(), AttrType::Integer);
        assert_eq!(PARCELS.attribute("id").unwrap().ty(), AttrType::Integer);
    }
}
