//! Jam3a Prelude

pub use crate::{
    cart::{Cart, CartError, CartLine},
    catalog::{CatalogQuery, CategoryCount, SortOrder, categories},
    deals::{
        Deal, DealId, DealStatus, DealWindow, Lifecycle, Participation, compute_status,
        progress_ratio, remaining_after_join, remaining_participants,
        time_left::{format_remaining, parse_time_left, resolve_window, time_left},
    },
    fixtures::{Fixture, FixtureError},
    join::{Invitation, JoinFailure, JoinFlow, JoinFlowError, JoinForm, JoinRequest, JoinState},
    locale::{Direction, Language, Localized},
    money::{Amount, PriceError, amount_from_major, default_currency, format_amount, major_units},
    pricing::{discount_percentage, discount_percentage_minor, savings},
    products::Product,
    users::{Role, User},
    validation::{Field, FieldError, FieldErrorKind, PaymentMethod, ValidationErrors},
    view::DealView,
    wizard::{
        Wizard, WizardError, WizardForm, WizardState, WizardStep,
        seller::{SellerApplication, SellerForm, SellerStep},
        start_jam3a::{DealDuration, StartJam3aForm, StartJam3aRequest, StartStep},
    },
};
