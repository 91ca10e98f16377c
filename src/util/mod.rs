pub mod path;
pub mod powershell;

pub use path::{
    RESERVED_CHARS, clean_target, is_absolute_like, normalize_logical, same_logical, to_windows,
    validate_logical, validate_target,
};
pub use powershell::PsEscape;
