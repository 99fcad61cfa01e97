//! Sample records exercising the full pipeline.
//!
//! A person with a nested address and a list of grades. The CLI `demo`
//! command binds [`SAMPLE_PERSON`] onto [`Person`], then serializes
//! [`sample_person`]. Binding matches keys to field names exactly, so the
//! camel-case `isStudent` key needs a field of the same spelling.

use std::fmt;

use crate::json_record;

/// Sample document bound by the demo.
pub const SAMPLE_PERSON: &str = r#"{
    "name": "John Doe",
    "age": 30,
    "city": "New York",
    "isStudent": false,
    "grades": [85, 90, 78],
    "address": {
        "street": "123 Main St",
        "zipcode": "10001"
    }
}"#;

/// Sample array-rooted document.
pub const SAMPLE_PEOPLE: &str = r#"[
    {"id": 1, "name": "Alice"},
    {"id": 2, "name": "Bob"},
    {"id": 3, "name": "Charlie"}
]"#;

/// A postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    /// Street line
    pub street: String,
    /// Postal code, kept as text to preserve leading zeros
    pub zipcode: String,
}

json_record!(Address { street, zipcode });

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address{{street='{}', zipcode='{}'}}", self.street, self.zipcode)
    }
}

/// A person record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    /// Full name
    pub name: String,
    /// Age in years
    pub age: i32,
    /// City of residence
    pub city: String,
    /// Enrolled as a student
    #[allow(non_snake_case)]
    pub isStudent: bool,
    /// Grades in recorded order
    pub grades: Vec<i32>,
    /// Postal address
    pub address: Address,
}

json_record!(Person {
    name,
    age,
    city,
    isStudent,
    grades,
    address,
});

/// The person the demo serializes.
pub fn sample_person() -> Person {
    Person {
        name: "Jane Doe".to_string(),
        age: 28,
        city: "San Francisco".to_string(),
        isStudent: true,
        grades: vec![95, 88, 92],
        address: Address {
            street: "456 Elm St".to_string(),
            zipcode: "94102".to_string(),
        },
    }
}
