//! Decision model - profiles, categories and weighted factors.
//!
//! A [`Profile`] exclusively owns its [`Category`] list, and each category
//! exclusively owns its pro and con [`Factor`]s. Edits go through
//! [`apply_edit`]; new profiles come from [`create_from_template`].

mod category;
mod factor;
mod mutation;
mod profile;
mod templates;

pub use category::Category;
pub use factor::{Factor, FactorSide, Weight};
pub use mutation::{apply_edit, ProfileMutation};
pub use profile::{Profile, Theme};
pub use templates::{
    create_from_template, find_template, template_summaries, DecisionTemplate, OptionTemplate,
    TemplateSummary, BLANK_PROFILE_NAME, CATALOG,
};
