//! Utility functions

/// Masks a login identifier for log output.
///
/// Emails keep the first two characters of the local part, phone numbers
/// keep the area code and the last two digits.
pub fn mask_identifier(identifier: &str) -> String {
    if let Some(at_pos) = identifier.find('@') {
        let (local, domain) = identifier.split_at(at_pos);
        let keep: String = local.chars().take(2).collect();
        format!("{}***{}", keep, domain)
    } else {
        let chars: Vec<char> = identifier.chars().collect();
        if chars.len() <= 4 {
            return "***".to_string();
        }
        let head: String = chars[..2].iter().collect();
        let tail: String = chars[chars.len() - 2..].iter().collect();
        format!("{}***{}", head, tail)
    }
}
