use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }
    };
}

opaque_id!(
    /// Backend identifier of a travel package.
    PackageId
);
opaque_id!(
    /// Backend identifier of a plan inside a package.
    PlanId
);
opaque_id!(
    /// Backend identifier of a bookable activity.
    ActivityId
);
opaque_id!(
    /// Identifier of an activity allocation on a plan.
    OrderedQuantityId
);
opaque_id!(CouponId);
opaque_id!(
    /// Customer identifier used by the loyalty endpoints.
    CustomerId
);
