/// Parse an app name, rejecting names that cannot become file names.
///
/// Per-platform rules (e.g. lowercase on Linux) are checked later, against
/// the detected host.
pub fn parse_app_name(s: &str) -> Result<String, String> {
    wrapkit_core::options::validate_app_name(s)
        .map(|()| s.to_string())
        .map_err(|e| e.to_string())
}

/// Parse a window dimension in pixels.
pub fn parse_dimension(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a whole number of pixels", s))?;
    if value == 0 {
        return Err("window size must be positive".to_string());
    }
    Ok(value)
}
