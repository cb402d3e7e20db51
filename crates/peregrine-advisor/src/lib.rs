pub mod rules;

pub use rules::SuggestionEngine;
