use std::sync::OnceLock;

/// Luminance cut used when no threshold is given explicitly
pub const DEFAULT_LUMINANCE_THRESHOLD: u8 = 128;

fn parse_u8(raw: Option<&str>, default: u8) -> u8 {
    raw.and_then(|v| v.trim().parse::<u8>().ok())
        .unwrap_or(default)
}

/// Zero counts as unset
fn parse_positive_u32(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|&v| v > 0)
}

fn parse_env_u8(name: &str, default: u8) -> u8 {
    parse_u8(std::env::var(name).ok().as_deref(), default)
}

fn parse_env_u32(name: &str) -> Option<u32> {
    parse_positive_u32(std::env::var(name).ok().as_deref())
}

static LUMINANCE_THRESHOLD: OnceLock<u8> = OnceLock::new();

pub(crate) fn luminance_threshold() -> u8 {
    *LUMINANCE_THRESHOLD
        .get_or_init(|| parse_env_u8("QR_LUMINANCE_THRESHOLD", DEFAULT_LUMINANCE_THRESHOLD))
}

static CORNER_SEARCH_LIMIT: OnceLock<Option<u32>> = OnceLock::new();

/// Diagonal search distance for finder corners; unset means the image's shorter side
pub(crate) fn corner_search_limit() -> Option<u32> {
    *CORNER_SEARCH_LIMIT.get_or_init(|| parse_env_u32("QR_CORNER_SEARCH_LIMIT"))
}
