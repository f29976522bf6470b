//! Candidate location under evaluation.

use serde::{Deserialize, Serialize};

use super::Criterion;
use crate::domain::foundation::LocationId;

/// A candidate coffee shop location with its raw attribute values.
///
/// Missing fields in JSON input take the same defaults as a freshly added
/// location: no customers, no rent, and a neutral 5 on every 1-10 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub potential_customers: f64,
    pub rent_cost: f64,
    pub accessibility: f64,
    pub competitors: f64,
    pub security: f64,
}

impl Location {
    /// Creates a location with a generated id and default attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the identifier.
    pub fn with_id(mut self, id: LocationId) -> Self {
        self.id = id;
        self
    }

    /// Sets the potential customer share.
    pub fn with_potential_customers(mut self, value: f64) -> Self {
        self.potential_customers = value;
        self
    }

    /// Sets the monthly rent.
    pub fn with_rent_cost(mut self, value: f64) -> Self {
        self.rent_cost = value;
        self
    }

    /// Sets the accessibility score.
    pub fn with_accessibility(mut self, value: f64) -> Self {
        self.accessibility = value;
        self
    }

    /// Sets the competitive position score.
    pub fn with_competitors(mut self, value: f64) -> Self {
        self.competitors = value;
        self
    }

    /// Sets the security score.
    pub fn with_security(mut self, value: f64) -> Self {
        self.security = value;
        self
    }

    /// Returns the raw value for a criterion.
    pub fn value(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::PotentialCustomers => self.potential_customers,
            Criterion::RentCost => self.rent_cost,
            Criterion::Accessibility => self.accessibility,
            Criterion::Competitors => self.competitors,
            Criterion::Security => self.security,
        }
    }

    /// True if the name is empty after trimming.
    pub fn is_unnamed(&self) -> bool {
        self.name.trim().is_empty()
    }
}

impl Default for Location {
    fn default() -> Self {
        Self {
            id: LocationId::generate(),
            name: String::new(),
            potential_customers: 0.0,
            rent_cost: 0.0,
            accessibility: 5.0,
            competitors: 5.0,
            security: 5.0,
        }
    }
}
