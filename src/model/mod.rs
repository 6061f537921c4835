//! Data model: tokens in, page profiles out.

mod profile;
mod token;

pub use profile::{FormPair, ListKind, PageAnalysis, PageMode, PageProfile, ProfileBuilder, TextList};
pub use token::{PageTokens, Token};
