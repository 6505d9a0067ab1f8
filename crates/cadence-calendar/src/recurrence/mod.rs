//! Recurring rule model and expansion into calendar occurrences.

mod expand;
mod frequency;
mod next;
mod rrule;
mod rule;

pub use expand::{Expander, Expansion, Occurrences, expand};
pub use frequency::Frequency;
pub use next::next_occurrence;
pub use rule::{Anchor, RecurringRule, RecurringRuleRecord};
