//! The five directory domains, declared as data.
//!
//! A domain is nothing but a schema row; every row runs through the same
//! generic service.

use crate::resource::models::ResourceSchema;

pub const SHELTER: ResourceSchema = ResourceSchema {
    domain: "shelter",
    collection: "shelters",
    required_fields: &[
        "organization",
        "target_population",
        "location",
        "capacity",
        "current_usage",
    ],
};

pub const FOOD: ResourceSchema = ResourceSchema {
    domain: "food",
    collection: "food_programs",
    required_fields: &[
        "organization",
        "city",
        "address",
        "food_type",
        "hours",
        "capacity",
    ],
};

pub const HEALTHCARE: ResourceSchema = ResourceSchema {
    domain: "healthcare",
    collection: "healthcare_services",
    required_fields: &[
        "organization",
        "city",
        "address",
        "services",
        "hours",
        "contact",
    ],
};

pub const OUTREACH: ResourceSchema = ResourceSchema {
    domain: "outreach",
    collection: "outreach_programs",
    required_fields: &[
        "name",
        "city",
        "address",
        "description",
        "contact",
        "hours",
        "target_audience",
    ],
};

pub const COUNSELING: ResourceSchema = ResourceSchema {
    domain: "counseling",
    collection: "counseling_services",
    required_fields: &[
        "organization",
        "city",
        "address",
        "specialization",
        "contact",
        "hours",
    ],
};

pub const ALL: [ResourceSchema; 5] = [SHELTER, FOOD, HEALTHCARE, OUTREACH, COUNSELING];
