/// Sort order given to generated sailings so that explicit persisted ordering
/// always comes first.
pub const GENERATED_SORT_ORDER: i32 = 999;

/// Prefix carried by generated identities on the wire.
pub const GENERATED_ID_PREFIX: &str = "gen-";

/// Display format for departure dates ("01 August 2025").
pub const DISPLAY_DATE_FORMAT: &str = "%d %B %Y";
