/// Shorten an address for display, keeping the first 6 and last 4 characters.
///
/// `"0x1234567890abcdef1234567890abcdef12345678"` becomes `"0x1234...5678"`.
/// A missing or empty address yields `"N/A"`.
pub fn shorten_address(address: Option<&str>) -> String {
    match address {
        Some(address) if !address.is_empty() => {
            let chars: Vec<char> = address.chars().collect();
            let head: String = chars.iter().take(6).collect();
            let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
            format!("{}...{}", head, tail)
        }
        _ => "N/A".to_string(),
    }
}
