//! Checkout Field Rules
//!
//! Which buyer fields a checkout needs depends on what is being bought. The
//! policy is a lookup table from category sets to extra required fields, on
//! top of the fields every checkout needs.

use std::fmt::{self, Display, Formatter};

use smallvec::SmallVec;

use crate::{cart::CartLine, products::ProductCategory};

/// A buyer-supplied checkout field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// In-game nickname of the receiving account.
    Nick,

    /// Account password, for products delivered by logging in.
    Password,

    /// WhatsApp contact number.
    Whatsapp,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Field; 3] = [Field::Nick, Field::Password, Field::Whatsapp];

    /// Field name as shown next to its input.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Nick => "nick",
            Field::Password => "password",
            Field::Whatsapp => "whatsapp",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra fields required when the cart holds any of `categories`.
#[derive(Debug, Clone, Copy)]
pub struct FieldRequirement {
    /// Triggering categories
    pub categories: &'static [ProductCategory],

    /// Fields those categories add
    pub fields: &'static [Field],
}

/// Fields every checkout requires.
pub const BASE_FIELDS: &[Field] = &[Field::Nick, Field::Whatsapp];

/// Category-triggered requirements.
pub const CATEGORY_REQUIREMENTS: &[FieldRequirement] = &[FieldRequirement {
    categories: &[ProductCategory::RobuxLogin, ProductCategory::Joki],
    fields: &[Field::Password],
}];

/// Set of fields a checkout must validate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredFields(SmallVec<[Field; 3]>);

impl RequiredFields {
    /// Resolve the required fields for a set of product categories against
    /// `requirements`.
    pub fn resolve(
        categories: impl IntoIterator<Item = ProductCategory>,
        requirements: &[FieldRequirement],
    ) -> Self {
        let mut fields: SmallVec<[Field; 3]> = BASE_FIELDS.iter().copied().collect();

        for category in categories {
            let triggered = requirements
                .iter()
                .filter(|requirement| requirement.categories.contains(&category))
                .flat_map(|requirement| requirement.fields.iter().copied());

            for field in triggered {
                if !fields.contains(&field) {
                    fields.push(field);
                }
            }
        }

        Self(fields)
    }

    /// Required fields for the given cart lines under the store policy.
    pub fn for_lines(lines: &[CartLine]) -> Self {
        Self::resolve(
            lines.iter().map(|line| line.product.category),
            CATEGORY_REQUIREMENTS,
        )
    }

    /// Whether `field` must be filled in.
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains(&field)
    }

    /// Required fields, in the order they were resolved.
    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.iter().copied()
    }
}
