//! Interface-name utilities.

use std::cmp::Ordering;

/// Shorten a long interface name for easier reading
/// (`GigabitEthernet1/0/1` becomes `Gi1/0/1`).
pub fn short_int_name(name: &str) -> String {
    const REPLACE_PAIRS: [(&str, &str); 8] = [
        ("fortygigabitethernet", "Fo"),
        ("tengigabitethernet", "Te"),
        ("gigabitethernet", "Gi"),
        ("fastethernet", "F"),
        ("ethernet", "e"),
        ("eth", "e"),
        ("port-channel", "Po"),
        ("loopback", "Lo"),
    ];

    let lower = name.to_lowercase();
    for (long, short) in REPLACE_PAIRS {
        if lower.contains(long) {
            return lower.replace(long, short);
        }
    }
    name.to_string()
}

/// Expand a short interface name to the full form
/// (`Gi1/0/1` becomes `GigabitEthernet1/0/1`).
pub fn long_int_name(name: &str) -> String {
    const REPLACE_PAIRS: [(&str, &str); 8] = [
        ("Fo", "FortyGigabitEthernet"),
        ("Te", "TenGigabitEthernet"),
        ("Gi", "GigabitEthernet"),
        ("F", "FastEthernet"),
        ("Eth", "Ethernet"),
        ("e", "Ethernet"),
        ("Po", "port-channel"),
        ("Lo", "Loopback"),
    ];

    for (short, long) in REPLACE_PAIRS {
        if name.contains(short) {
            return name.replace(short, long);
        }
    }
    name.to_string()
}

/// One token of a human sort key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortToken {
    /// Numeric runs compare as numbers (and before text).
    Num(u64),
    /// Everything else compares as text.
    Text(String),
}

/// Key function for alphanumeric ("human") sorting, so `Gi1/0/2`
/// sorts before `Gi1/0/10`.
pub fn human_sort_key(s: &str) -> Vec<SortToken> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut current_is_digit = false;

    for c in s.chars() {
        let is_digit = c.is_ascii_digit();
        if !current.is_empty() && is_digit != current_is_digit {
            tokens.push(make_token(&current, current_is_digit));
            current.clear();
        }
        current_is_digit = is_digit;
        current.push(c);
    }
    if !current.is_empty() {
        tokens.push(make_token(&current, current_is_digit));
    }
    tokens
}

fn make_token(text: &str, is_digit: bool) -> SortToken {
    if is_digit {
        // Interface indexes fit comfortably in u64; anything longer is
        // compared as text.
        match text.parse() {
            Ok(n) => SortToken::Num(n),
            Err(_) => SortToken::Text(text.to_string()),
        }
    } else {
        SortToken::Text(text.to_string())
    }
}

/// Compare two strings with the human sort key.
pub fn human_cmp(a: &str, b: &str) -> Ordering {
    human_sort_key(a).cmp(&human_sort_key(b))
}
