pub mod normalize;
pub mod values;

pub use normalize::{contains_word, exact_match, fuzzy_match, normalize_text};
pub use values::{
    ensure_array, ensure_number, ensure_string, is_non_empty_object, is_present, is_true,
    is_truthy,
    non_empty_string,
};
