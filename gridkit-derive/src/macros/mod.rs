pub mod attrs;
pub mod display_enum;
pub mod record;
