//! Fixed-width table parsing for `show vlan brief`.

/// Split fixed-column table text into rows of trimmed fields.
///
/// `widths` gives the column widths; a final `-1` means "the rest of
/// the line". A line qualifies as a row when it reaches the start of
/// the last fixed-width column - a VLAN with no assigned ports ends
/// after its Status column and must still parse. Separator lines and
/// continuation lines (empty first column - wrapped port lists) are
/// dropped, so the output is the header row followed by one row per
/// table entry.
pub fn fixed_columns_to_rows(text: &str, widths: &[isize]) -> Vec<Vec<String>> {
    let positive: Vec<usize> = widths
        .iter()
        .filter(|w| **w > 0)
        .map(|w| *w as usize)
        .collect();
    let min_len: usize = match positive.split_last() {
        Some((_, head)) => head.iter().sum(),
        None => 0,
    };

    let mut rows = Vec::new();
    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if line.len() <= min_len {
            continue;
        }

        let chars: Vec<char> = line.chars().collect();
        let mut fields = Vec::with_capacity(widths.len());
        let mut start = 0usize;
        for width in widths {
            let begin = start.min(chars.len());
            let end = if *width > 0 {
                (start + *width as usize).min(chars.len())
            } else {
                chars.len()
            };
            let field: String = chars[begin..end].iter().collect();
            fields.push(field.trim_matches([' ', '-', '\t']).to_string());
            start = start.saturating_add(if *width > 0 { *width as usize } else { 0 });
        }

        // Separator rows become all-dashes (trimmed to empty) and
        // continuation rows have an empty first column; both drop out.
        if !fields[0].is_empty() {
            rows.push(fields);
        }
    }
    rows
}

/// Reduce a parsed VLAN table to per-VLAN port counts.
///
/// The input rows are `[VLAN, Name, Status, Ports]` with the header
/// first; the output keeps the first three columns and replaces the
/// port list with its count. VLANs with no assigned ports are only
/// kept when `include_empty` is set.
pub fn vlan_summary(rows: &[Vec<String>], include_empty: bool) -> Vec<Vec<String>> {
    let mut summary: Vec<Vec<String>> = rows.iter().take(1).cloned().collect();

    for row in rows.iter().skip(1) {
        if row.len() < 4 {
            continue;
        }
        let mut line: Vec<String> = row[..3].to_vec();
        if !row[3].is_empty() {
            let count = row[3].split(", ").count();
            line.push(count.to_string());
            summary.push(line);
        } else if include_empty {
            line.push("0".to_string());
            summary.push(line);
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOW_VLAN_WIDTHS: [isize; 4] = [5, 33, 10, -1];

    const SAMPLE: &str = "\
VLAN Name                             Status    Ports
---- -------------------------------- --------- -------------------------------
1    default                          active    Gi1/0/5, Gi1/0/6, Gi1/0/7
10   users                            active    Gi1/0/1, Gi1/0/2, Gi1/0/3,
                                                Gi1/0/4
20   servers                          active
99   mgmt                             active    Gi1/0/48
";

    #[test]
    fn test_fixed_columns_basic() {
        let rows = fixed_columns_to_rows(SAMPLE, &SHOW_VLAN_WIDTHS);
        // Header + 4 VLANs; the separator and continuation lines drop.
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0][0], "VLAN");
        assert_eq!(
            rows[1],
            vec!["1", "default", "active", "Gi1/0/5, Gi1/0/6, Gi1/0/7"]
        );
        assert_eq!(rows[3], vec!["20", "servers", "active", ""]);
    }

    #[test]
    fn test_continuation_lines_dropped() {
        let rows = fixed_columns_to_rows(SAMPLE, &SHOW_VLAN_WIDTHS);
        assert!(!rows.iter().any(|r| r[3].contains("Gi1/0/4")));
    }

    #[test]
    fn test_vlan_summary_counts() {
        let rows = fixed_columns_to_rows(SAMPLE, &SHOW_VLAN_WIDTHS);
        let summary = vlan_summary(&rows, false);
        assert_eq!(summary[0][0], "VLAN");
        assert_eq!(summary[1], vec!["1", "default", "active", "3"]);
        // The wrapped line was dropped, so VLAN 10 counts the ports on
        // its first line only (trailing comma included).
        assert_eq!(summary[2][0], "10");
        assert_eq!(summary[3], vec!["99", "mgmt", "active", "1"]);
        // VLAN 20 has no ports and include_empty is false.
        assert!(!summary.iter().skip(1).any(|r| r[0] == "20"));
    }

    #[test]
    fn test_vlan_summary_include_empty() {
        let rows = fixed_columns_to_rows(SAMPLE, &SHOW_VLAN_WIDTHS);
        let summary = vlan_summary(&rows, true);
        assert!(summary.iter().any(|r| r[0] == "20" && r[3] == "0"));
    }
}
