use alloy::primitives::utils::format_ether;
use alloy::primitives::U256;

/// Render a wei amount as decimal ETH, trimming trailing zeros
///
/// At least one fractional digit is kept: `10^16` becomes `0.01` and `10^18`
/// becomes `1.0`.
pub fn format_fee(wei: U256) -> String {
    let formatted = format_ether(wei);
    if !formatted.contains('.') {
        return format!("{}.0", formatted);
    }

    let trimmed = formatted.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}
