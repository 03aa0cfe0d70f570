//! The built-in rule set.

mod checklists;
mod fences;
mod frontmatter;
mod headings;
mod links;
mod style;

pub use checklists::ChecklistFormat;
pub use fences::{FenceClosed, FenceLanguage};
pub use frontmatter::FrontmatterFields;
pub use headings::{DuplicateHeading, HeadingDepth, HeadingSkip, SingleTitle};
pub use links::RelativeLinks;
pub use style::{LineLength, TrailingSpace};

use crate::rule::Rule;

/// All built-in rules, in the order they run.
pub fn all() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(SingleTitle),
        Box::new(HeadingDepth),
        Box::new(HeadingSkip),
        Box::new(DuplicateHeading),
        Box::new(ChecklistFormat),
        Box::new(FenceClosed),
        Box::new(FenceLanguage),
        Box::new(RelativeLinks),
        Box::new(FrontmatterFields),
        Box::new(LineLength),
        Box::new(TrailingSpace),
    ]
}
